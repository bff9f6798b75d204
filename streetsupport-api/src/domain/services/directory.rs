use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use super::{
    merge::{accommodation_hits, into_unified, merge_page},
    AccommodationLoader,
};
use crate::domain::{
    models::{CacheStatus, DirectoryPage, ServiceMatches, ServiceQuery, UnifiedResult},
    ports::{
        inbound::ServiceDirectory,
        outbound::{AccommodationRepository, QueryCache, ServiceRepository},
    },
    DirectoryError,
};

/// Implementation of the ServiceDirectory inbound port.
///
/// Reads the primary services collection and the accommodation collection
/// concurrently, merges them and caches the resulting page. When the primary
/// read fails the static fallback dataset answers instead; such degraded
/// pages are not cached.
pub struct ServiceDirectoryImpl<S, F, A> {
    services: Arc<S>,
    fallback: Arc<F>,
    accommodation: AccommodationLoader<A>,
    cache: Arc<dyn QueryCache>,
    cache_ttl: Duration,
}

impl<S, F, A> ServiceDirectoryImpl<S, F, A>
where
    S: ServiceRepository,
    F: ServiceRepository,
    A: AccommodationRepository,
{
    pub fn new(
        services: Arc<S>,
        fallback: Arc<F>,
        accommodation: Arc<A>,
        cache: Arc<dyn QueryCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            services,
            fallback,
            accommodation: AccommodationLoader::new(accommodation),
            cache,
            cache_ttl,
        }
    }

    /// Primary services, or the fallback dataset when the database read fails.
    /// The flag is true when the fallback answered.
    async fn load_primary(
        &self,
        query: &ServiceQuery,
    ) -> Result<(ServiceMatches, bool), DirectoryError> {
        let window = query.primary_window();
        match self.services.find_services(query, window).await {
            Ok(matches) => Ok((matches, false)),
            Err(err) => {
                tracing::warn!("Primary service query failed, serving fallback data: {}", err);
                self.fallback
                    .find_services(query, window)
                    .await
                    .map(|matches| (matches, true))
                    .map_err(|err| {
                        tracing::error!("Fallback service query failed: {}", err);
                        DirectoryError::Unavailable(err.to_string())
                    })
            }
        }
    }
}

#[async_trait]
impl<S, F, A> ServiceDirectory for ServiceDirectoryImpl<S, F, A>
where
    S: ServiceRepository,
    F: ServiceRepository,
    A: AccommodationRepository,
{
    async fn find_services(&self, query: &ServiceQuery) -> Result<DirectoryPage, DirectoryError> {
        let cache_key = self.cache.generate_key(query);
        if let Some(page) = self.cache.get(&cache_key) {
            tracing::debug!(key = %cache_key, "services page served from cache");
            return Ok(DirectoryPage {
                page,
                cache_key,
                cache_status: CacheStatus::Hit,
            });
        }

        let (primary, accommodation) =
            tokio::join!(self.load_primary(query), self.accommodation.load(query));
        let (primary, degraded) = primary?;

        let page = Arc::new(merge_page(query, primary, accommodation));
        if !degraded {
            self.cache
                .set(cache_key.clone(), Arc::clone(&page), self.cache_ttl);
        }

        tracing::debug!(
            key = %cache_key,
            total = page.total,
            returned = page.results.len(),
            degraded,
            "services page assembled"
        );

        Ok(DirectoryPage {
            page,
            cache_key,
            cache_status: CacheStatus::Miss,
        })
    }

    async fn provider_accommodation(&self, provider_id: &str) -> Vec<UnifiedResult> {
        let records = self.accommodation.load_for_provider(provider_id).await;
        accommodation_hits(records, None)
            .into_iter()
            .map(into_unified)
            .collect()
    }
}
