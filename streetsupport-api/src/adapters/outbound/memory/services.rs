use async_trait::async_trait;

use super::starts_with_ignore_case;
use crate::domain::{
    geo::haversine_km,
    models::{ResultWindow, ServiceMatches, ServiceQuery, ServiceRecord},
    ports::outbound::ServiceRepository,
    FetchError,
};

const FALLBACK_DATASET: &str = include_str!("../../../../data/fallback_services.json");

/// Service repository over records held in memory.
///
/// Serves the static fallback dataset when the database is unreachable and
/// applies the same filters as the aggregation pipeline, with Haversine in
/// place of `$geoNear`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRepository {
    records: Vec<ServiceRecord>,
}

impl InMemoryServiceRepository {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        Self { records }
    }

    /// The dataset bundled with the binary.
    pub fn fallback_dataset() -> Result<Self, serde_json::Error> {
        let records: Vec<ServiceRecord> = serde_json::from_str(FALLBACK_DATASET)?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(&self, query: &ServiceQuery) -> Vec<ServiceRecord> {
        let mut matches: Vec<ServiceRecord> = self
            .records
            .iter()
            .filter(|record| record.is_published)
            .filter(|record| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |category| starts_with_ignore_case(&record.category, category))
            })
            .filter(|record| {
                query.subcategory.as_deref().map_or(true, |subcategory| {
                    starts_with_ignore_case(&record.subcategory, subcategory)
                })
            })
            .cloned()
            .collect();

        match query.geo {
            Some(geo) => {
                let mut nearby: Vec<ServiceRecord> = matches
                    .into_iter()
                    .filter_map(|mut record| {
                        let location = record.address.location?;
                        let distance_km = haversine_km(geo.centre, location);
                        if distance_km > geo.radius_km {
                            return None;
                        }
                        record.distance_metres = Some(distance_km * 1000.0);
                        Some(record)
                    })
                    .collect();
                nearby.sort_by(|a, b| {
                    let a = a.distance_metres.unwrap_or_default();
                    let b = b.distance_metres.unwrap_or_default();
                    a.total_cmp(&b)
                });
                nearby
            }
            None => {
                if let Some(location) = query.location.as_deref() {
                    matches.retain(|record| starts_with_ignore_case(&record.address.city, location));
                }
                matches
            }
        }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn find_services(
        &self,
        query: &ServiceQuery,
        window: ResultWindow,
    ) -> Result<ServiceMatches, FetchError> {
        let matches = self.matches(query);
        let total = matches.len() as u64;
        let records = matches
            .into_iter()
            .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .collect();

        Ok(ServiceMatches { records, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Address, Coordinates, GeoFilter, Pagination};

    const CENTRE: Coordinates = Coordinates {
        latitude: 53.8008,
        longitude: -1.5491,
    };

    fn record(id: &str, category: &str, city: &str, location: Option<Coordinates>) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            subcategory: format!("{category}-general"),
            address: Address {
                city: city.to_string(),
                location,
                ..Default::default()
            },
            is_published: true,
            ..Default::default()
        }
    }

    fn query() -> ServiceQuery {
        ServiceQuery {
            pagination: Pagination::default(),
            ..Default::default()
        }
    }

    async fn ids(repository: &InMemoryServiceRepository, query: &ServiceQuery) -> Vec<String> {
        repository
            .find_services(query, query.primary_window())
            .await
            .unwrap()
            .records
            .into_iter()
            .map(|record| record.id)
            .collect()
    }

    #[test]
    fn bundled_dataset_parses() {
        let repository = InMemoryServiceRepository::fallback_dataset().unwrap();
        assert!(!repository.is_empty());
    }

    #[tokio::test]
    async fn skips_unpublished() {
        let mut hidden = record("hidden", "foodbank", "Leeds", None);
        hidden.is_published = false;
        let repository = InMemoryServiceRepository::new(vec![
            hidden,
            record("shown", "foodbank", "Leeds", None),
        ]);

        assert_eq!(ids(&repository, &query()).await, vec!["shown"]);
    }

    #[tokio::test]
    async fn prefix_filters_are_case_insensitive() {
        let repository = InMemoryServiceRepository::new(vec![
            record("leeds-food", "foodbank", "Leeds", None),
            record("leeds-meals", "meals", "Leeds", None),
            record("manchester-food", "foodbank", "Manchester", None),
        ]);

        let mut by_category = query();
        by_category.category = Some("FOOD".to_string());
        assert_eq!(
            ids(&repository, &by_category).await,
            vec!["leeds-food", "manchester-food"]
        );

        let mut by_city = query();
        by_city.location = Some("man".to_string());
        assert_eq!(ids(&repository, &by_city).await, vec!["manchester-food"]);

        let mut by_subcategory = query();
        by_subcategory.subcategory = Some("meals-".to_string());
        assert_eq!(ids(&repository, &by_subcategory).await, vec!["leeds-meals"]);
    }

    #[tokio::test]
    async fn proximity_sorts_nearest_first_and_ignores_location() {
        let repository = InMemoryServiceRepository::new(vec![
            record("half-km", "foodbank", "Leeds", Some(Coordinates::new(53.8053, -1.5491))),
            record("nearby", "foodbank", "Leeds", Some(Coordinates::new(53.8019, -1.5491))),
            record("unplaced", "foodbank", "Leeds", None),
            record("manchester", "foodbank", "Manchester", Some(Coordinates::new(53.4808, -2.2426))),
        ]);

        let mut near = query();
        near.location = Some("Nowhere".to_string());
        near.geo = Some(GeoFilter::new(CENTRE, 1.0));

        let result = repository
            .find_services(&near, near.primary_window())
            .await
            .unwrap();
        let found: Vec<_> = result.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(found, vec!["nearby", "half-km"]);
        assert!(result.records.iter().all(|r| r.distance_metres.is_some()));

        near.geo = Some(GeoFilter::new(CENTRE, 0.1));
        assert!(ids(&repository, &near).await.is_empty());
    }

    #[tokio::test]
    async fn window_limits_rows_but_not_total() {
        let repository = InMemoryServiceRepository::new(
            (0..5)
                .map(|i| record(&format!("s{i}"), "foodbank", "Leeds", None))
                .collect(),
        );

        let result = repository
            .find_services(&query(), ResultWindow::new(3, 10))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].id, "s3");
    }
}
