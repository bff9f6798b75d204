use async_trait::async_trait;

use crate::domain::{
    models::{DirectoryPage, ServiceQuery, UnifiedResult},
    DirectoryError,
};

/// Inbound port for the Find Help service locator.
///
/// This trait defines the use cases that HTTP handlers can invoke.
#[async_trait]
pub trait ServiceDirectory: Send + Sync + 'static {
    /// Search services and accommodation, merged into one paginated page.
    ///
    /// Upstream read failures are absorbed (fallback data or an empty
    /// accommodation list); an error means no usable data could be produced.
    async fn find_services(&self, query: &ServiceQuery) -> Result<DirectoryPage, DirectoryError>;

    /// All visible accommodation owned by one provider. Never fails; a broken
    /// read yields an empty list.
    async fn provider_accommodation(&self, provider_id: &str) -> Vec<UnifiedResult>;
}
