use async_trait::async_trait;

use crate::domain::{
    models::{ResultWindow, ServiceMatches, ServiceQuery},
    FetchError,
};

#[async_trait]
pub trait ServiceRepository: Send + Sync + 'static {
    /// Published services matching `query`, restricted to `window`, nearest
    /// first when the query has a proximity filter. `total` counts every match
    /// regardless of the window.
    async fn find_services(
        &self,
        query: &ServiceQuery,
        window: ResultWindow,
    ) -> Result<ServiceMatches, FetchError>;
}
