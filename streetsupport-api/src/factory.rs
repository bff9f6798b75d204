//! Composition root: the only place that picks concrete outbound adapters.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    adapters::{
        inbound::http::HttpCachePolicy,
        outbound::{
            memory::{InMemoryServiceRepository, MokaQueryCache},
            mongodb::{MongoAccommodationAdapter, MongoServiceAdapter},
        },
    },
    app_state::AppState,
    config::Settings,
    domain::services::ServiceDirectoryImpl,
};

/// TTL applied to cached pages in test mode, whatever the configuration says.
const TEST_MODE_TTL: std::time::Duration = std::time::Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to configure database client: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to load fallback dataset: {0}")]
    FallbackDataset(#[from] serde_json::Error),
}

pub async fn build_app_state(settings: &Settings) -> Result<AppState, StartupError> {
    let database = settings.database.connect().await?;
    let fallback = InMemoryServiceRepository::fallback_dataset()?;
    tracing::info!(
        "Connected to database '{}', {} fallback services loaded",
        settings.database.database_name,
        fallback.len()
    );

    let test_mode = settings.is_test_mode();
    let cache_ttl = if test_mode {
        TEST_MODE_TTL
    } else {
        settings.cache.ttl()
    };

    let directory = ServiceDirectoryImpl::new(
        Arc::new(MongoServiceAdapter::new(&database)),
        Arc::new(fallback),
        Arc::new(MongoAccommodationAdapter::new(&database)),
        Arc::new(MokaQueryCache::new(settings.cache.max_capacity)),
        cache_ttl,
    );

    Ok(AppState::new(
        Arc::new(directory),
        HttpCachePolicy::new(test_mode),
    ))
}
