use serde::{Deserialize, Serialize};

use super::Coordinates;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street1: String,
    pub street2: String,
    pub street3: String,
    pub city: String,
    pub postcode: String,
    pub location: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningTime {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// The provider fields joined onto a service for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSummary {
    pub key: String,
    pub name: String,
    pub is_verified: bool,
    pub short_description: String,
}

/// A published service from the primary services collection.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub provider_key: String,
    pub organisation: Option<ProviderSummary>,
    pub address: Address,
    pub opening_times: Vec<OpeningTime>,
    pub is_appointment_only: bool,
    pub is_telephone_service: bool,
    pub is_open_247: bool,
    pub is_published: bool,
    /// Metres from the search centre, set by proximity queries only.
    #[serde(skip)]
    pub distance_metres: Option<f64>,
}

/// One page of primary services plus the count of all matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceMatches {
    pub records: Vec<ServiceRecord>,
    pub total: u64,
}
