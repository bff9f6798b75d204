use std::sync::Arc;

use crate::domain::{
    models::{AccommodationFilter, AccommodationRecord, ServiceQuery},
    ports::outbound::AccommodationRepository,
};

/// Loads accommodation rows for a search, absorbing read failures.
///
/// Accommodation is an optional enrichment of the services listing: a failed
/// read is logged and treated as "no accommodation".
pub struct AccommodationLoader<A> {
    repository: Arc<A>,
}

impl<A: AccommodationRepository> AccommodationLoader<A> {
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    pub async fn load(&self, query: &ServiceQuery) -> Vec<AccommodationRecord> {
        if !query.includes_accommodation() {
            return Vec::new();
        }

        let filter = AccommodationFilter::from(query);
        match self.repository.find_accommodation(&filter).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "loaded accommodation");
                records
            }
            Err(err) => {
                tracing::error!("Failed to load accommodation: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn load_for_provider(&self, provider_id: &str) -> Vec<AccommodationRecord> {
        match self.repository.find_by_provider(provider_id).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(
                    "Failed to load accommodation for provider '{}': {}",
                    provider_id,
                    err
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryAccommodationRepository,
        domain::{models::Pagination, FetchError},
    };

    struct BrokenRepository;

    #[async_trait]
    impl AccommodationRepository for BrokenRepository {
        async fn find_accommodation(
            &self,
            _filter: &AccommodationFilter,
        ) -> Result<Vec<AccommodationRecord>, FetchError> {
            Err(FetchError::Database("connection refused".to_string()))
        }

        async fn find_by_provider(
            &self,
            _provider_id: &str,
        ) -> Result<Vec<AccommodationRecord>, FetchError> {
            Err(FetchError::Database("connection refused".to_string()))
        }
    }

    fn record(id: &str, provider_id: &str) -> AccommodationRecord {
        AccommodationRecord {
            id: id.to_string(),
            name: format!("House {id}"),
            provider_id: provider_id.to_string(),
            ..Default::default()
        }
    }

    fn query(category: Option<&str>) -> ServiceQuery {
        ServiceQuery {
            category: category.map(String::from),
            pagination: Pagination::default(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn other_categories_load_nothing() {
        let repository = InMemoryAccommodationRepository::new(vec![record("a1", "p1")]);
        let loader = AccommodationLoader::new(Arc::new(repository));

        assert!(loader.load(&query(Some("foodbank"))).await.is_empty());
        assert!(loader.load(&query(None)).await.is_empty());
    }

    #[tokio::test]
    async fn accommodation_category_loads_rows() {
        let repository = InMemoryAccommodationRepository::new(vec![
            record("a1", "p1"),
            record("a2", "p2"),
        ]);
        let loader = AccommodationLoader::new(Arc::new(repository));

        assert_eq!(loader.load(&query(Some("accom"))).await.len(), 2);
    }

    #[tokio::test]
    async fn read_failures_become_empty() {
        let loader = AccommodationLoader::new(Arc::new(BrokenRepository));

        assert!(loader.load(&query(Some("accom"))).await.is_empty());
        assert!(loader.load_for_provider("p1").await.is_empty());
    }

    #[tokio::test]
    async fn provider_lookup_ignores_category_gate() {
        let repository = InMemoryAccommodationRepository::new(vec![
            record("a1", "p1"),
            record("a2", "p2"),
            record("a3", "p1"),
        ]);
        let loader = AccommodationLoader::new(Arc::new(repository));

        let rows = loader.load_for_provider("p1").await;
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
    }
}
