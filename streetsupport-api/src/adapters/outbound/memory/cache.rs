use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use moka::{sync::Cache, Expiry};

use crate::domain::{models::ServicesPage, ports::outbound::QueryCache, CacheKey};

#[derive(Clone)]
struct CachedPage {
    page: Arc<ServicesPage>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct StoredTtl;

impl Expiry<CacheKey, CachedPage> for StoredTtl {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CachedPage,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CachedPage,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process services page cache backed by moka.
///
/// Expired entries are invisible to `get` even before moka evicts them.
pub struct MokaQueryCache {
    entries: Cache<CacheKey, CachedPage>,
}

impl MokaQueryCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(StoredTtl)
                .build(),
        }
    }
}

impl QueryCache for MokaQueryCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<ServicesPage>> {
        self.entries.get(key).map(|entry| entry.page)
    }

    fn set(&self, key: CacheKey, page: Arc<ServicesPage>, ttl: Duration) {
        self.entries.insert(key, CachedPage { page, ttl });
    }
}
