use async_trait::async_trait;

use crate::domain::{
    models::{AccommodationFilter, AccommodationRecord},
    FetchError,
};

#[async_trait]
pub trait AccommodationRepository: Send + Sync + 'static {
    /// Visible accommodation with a provider, matching `filter`.
    async fn find_accommodation(
        &self,
        filter: &AccommodationFilter,
    ) -> Result<Vec<AccommodationRecord>, FetchError>;

    /// Visible accommodation owned by `provider_id`.
    async fn find_by_provider(
        &self,
        provider_id: &str,
    ) -> Result<Vec<AccommodationRecord>, FetchError>;
}
