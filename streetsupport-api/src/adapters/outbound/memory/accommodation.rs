use async_trait::async_trait;

use super::starts_with_ignore_case;
use crate::domain::{
    geo::haversine_km,
    models::{AccommodationFilter, AccommodationRecord, Coordinates},
    ports::outbound::AccommodationRepository,
    FetchError,
};

/// Accommodation repository over records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccommodationRepository {
    records: Vec<AccommodationRecord>,
}

impl InMemoryAccommodationRepository {
    pub fn new(records: Vec<AccommodationRecord>) -> Self {
        Self { records }
    }

    fn is_match(record: &AccommodationRecord, filter: &AccommodationFilter) -> bool {
        if record.provider_id.is_empty() {
            return false;
        }
        if let Some(location) = filter.location.as_deref() {
            if !starts_with_ignore_case(&record.address.city, location) {
                return false;
            }
        }
        if let Some(kind) = filter.accommodation_type.as_deref() {
            if !starts_with_ignore_case(&record.details.accommodation_type, kind) {
                return false;
            }
        }
        match filter.geo {
            Some(geo) => {
                let location = record.address.location.unwrap_or(Coordinates::default());
                haversine_km(geo.centre, location) <= geo.radius_km
            }
            None => true,
        }
    }
}

#[async_trait]
impl AccommodationRepository for InMemoryAccommodationRepository {
    async fn find_accommodation(
        &self,
        filter: &AccommodationFilter,
    ) -> Result<Vec<AccommodationRecord>, FetchError> {
        Ok(self
            .records
            .iter()
            .filter(|record| Self::is_match(record, filter))
            .cloned()
            .collect())
    }

    async fn find_by_provider(
        &self,
        provider_id: &str,
    ) -> Result<Vec<AccommodationRecord>, FetchError> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.provider_id == provider_id)
            .cloned()
            .collect())
    }
}
