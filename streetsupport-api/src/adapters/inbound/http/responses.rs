//! HTTP response types for the services endpoints.
//!
//! These types serialize to the JSON envelope the Find Help pages read.

use serde::Serialize;

use crate::domain::models::{
    AccommodationData, Address, Coordinates, OpeningTime, OrganisationSummary, ServicesPage,
    SourceType, UnifiedResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Body of a successful `GET /api/services`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub status: ResponseStatus,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub results: Vec<ServiceResultResponse>,
}

impl From<&ServicesPage> for ServicesResponse {
    fn from(page: &ServicesPage) -> Self {
        Self {
            status: ResponseStatus::Success,
            total: page.total,
            page: page.page,
            limit: page.limit,
            results: page.results.iter().map(Into::into).collect(),
        }
    }
}

/// One service or accommodation listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResultResponse {
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
    /// Kilometres from the search centre, present on proximity searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_data: Option<AccommodationData>,
}

impl From<&UnifiedResult> for ServiceResultResponse {
    fn from(result: &UnifiedResult) -> Self {
        Self {
            id: result.id.clone(),
            name: result.name.clone(),
            description: result.description.clone(),
            category: result.category.clone(),
            subcategory: result.subcategory.clone(),
            organisation: result.organisation.clone(),
            organisation_slug: result.organisation_slug.clone(),
            address: result.address.clone(),
            location: result.location,
            opening_times: result.opening_times.clone(),
            is_appointment_only: result.is_appointment_only,
            is_telephone_service: result.is_telephone_service,
            is_open_247: result.is_open_247,
            distance: result.distance_km,
            source_type: result.source_type,
            accommodation_data: result.accommodation.clone(),
        }
    }
}

/// Body of `GET /api/service-providers/{providerId}/accommodation`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAccommodationResponse {
    pub status: ResponseStatus,
    pub total: usize,
    pub results: Vec<ServiceResultResponse>,
}

impl From<Vec<UnifiedResult>> for ProviderAccommodationResponse {
    fn from(results: Vec<UnifiedResult>) -> Self {
        Self {
            status: ResponseStatus::Success,
            total: results.len(),
            results: results.iter().map(Into::into).collect(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}
