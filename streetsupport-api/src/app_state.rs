use std::sync::Arc;

use crate::{adapters::inbound::http::HttpCachePolicy, domain::ports::inbound::ServiceDirectory};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn ServiceDirectory>,
    pub http_cache: HttpCachePolicy,
}

impl AppState {
    pub fn new(directory: Arc<dyn ServiceDirectory>, http_cache: HttpCachePolicy) -> Self {
        Self {
            directory,
            http_cache,
        }
    }
}
