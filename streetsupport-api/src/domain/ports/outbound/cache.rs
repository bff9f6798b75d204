use std::{sync::Arc, time::Duration};

use crate::domain::{
    models::{ServicesPage, ServiceQuery},
    CacheKey,
};

/// Response cache for services queries.
pub trait QueryCache: Send + Sync + 'static {
    fn generate_key(&self, query: &ServiceQuery) -> CacheKey {
        CacheKey::generate(query)
    }

    /// The stored page, unless it is missing or has outlived its TTL.
    fn get(&self, key: &CacheKey) -> Option<Arc<ServicesPage>>;

    fn set(&self, key: CacheKey, page: Arc<ServicesPage>, ttl: Duration);
}
