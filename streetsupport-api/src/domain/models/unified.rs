use std::sync::Arc;

use serde::Serialize;

use super::{
    AccommodationDetails, AccommodationFeatures, AccommodationRecord, Address, ContactInformation,
    Coordinates, OpeningTime, ResidentCriteria, ServiceRecord, SupportProvided,
};
use crate::domain::CacheKey;

/// Which collection a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Service,
    Accommodation,
}

/// A search match before it is shaped for output.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    Service(ServiceRecord),
    Accommodation {
        record: AccommodationRecord,
        distance_metres: Option<f64>,
    },
}

impl SearchHit {
    pub fn source_type(&self) -> SourceType {
        match self {
            Self::Service(_) => SourceType::Service,
            Self::Accommodation { .. } => SourceType::Accommodation,
        }
    }

    pub fn distance_metres(&self) -> Option<f64> {
        match self {
            Self::Service(record) => record.distance_metres,
            Self::Accommodation {
                distance_metres, ..
            } => *distance_metres,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationSummary {
    pub name: String,
    pub slug: String,
    pub is_verified: bool,
}

/// Accommodation-only fields carried alongside a unified result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationData {
    pub synopsis: String,
    #[serde(flatten)]
    pub details: AccommodationDetails,
    pub features: AccommodationFeatures,
    pub resident_criteria: ResidentCriteria,
    pub support: SupportProvided,
    pub contact: ContactInformation,
}

/// The common output shape of both sources.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub organisation: Option<OrganisationSummary>,
    pub organisation_slug: String,
    pub address: Address,
    pub location: Option<Coordinates>,
    pub opening_times: Vec<OpeningTime>,
    pub is_appointment_only: bool,
    pub is_telephone_service: bool,
    pub is_open_247: bool,
    /// Kilometres, rounded to two decimals.
    pub distance_km: Option<f64>,
    pub source_type: SourceType,
    pub accommodation: Option<AccommodationData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServicesPage {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub results: Vec<UnifiedResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// A services page together with how it was produced.
#[derive(Debug, Clone)]
pub struct DirectoryPage {
    pub page: Arc<ServicesPage>,
    pub cache_key: CacheKey,
    pub cache_status: CacheStatus,
}
