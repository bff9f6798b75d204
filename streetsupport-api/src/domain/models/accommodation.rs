use serde::Serialize;

use super::{Address, DiscretionaryValue};

/// A temporary accommodation listing, normalised to a fixed shape.
///
/// Every group is always present; missing source values are replaced by
/// empty strings, `false` or [`DiscretionaryValue::Unspecified`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccommodationRecord {
    pub id: String,
    pub name: String,
    pub synopsis: String,
    pub description: String,
    pub provider_id: String,
    pub address: Address,
    pub details: AccommodationDetails,
    pub features: AccommodationFeatures,
    pub resident_criteria: ResidentCriteria,
    pub support: SupportProvided,
    pub contact: ContactInformation,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationDetails {
    pub accommodation_type: String,
    pub is_open_access: bool,
    pub referral_is_required: bool,
    pub referral_notes: String,
    pub price: String,
    pub food_is_included: DiscretionaryValue,
    pub availability_of_meals: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationFeatures {
    pub accepts_housing_benefit: DiscretionaryValue,
    pub accepts_pets: DiscretionaryValue,
    pub accepts_visitors: DiscretionaryValue,
    pub has_disabled_access: DiscretionaryValue,
    pub is_suitable_for_wheelchairs: DiscretionaryValue,
    pub has_single_rooms: DiscretionaryValue,
    pub has_shared_rooms: DiscretionaryValue,
    pub has_shower_bathroom_facilities: DiscretionaryValue,
    pub has_access_to_kitchen: DiscretionaryValue,
    pub has_laundry_facilities: DiscretionaryValue,
    pub has_lounge: DiscretionaryValue,
    pub has_on_site_manager: DiscretionaryValue,
    pub additional_features: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentCriteria {
    pub accepts_men: DiscretionaryValue,
    pub accepts_women: DiscretionaryValue,
    pub accepts_couples: DiscretionaryValue,
    pub accepts_young_people: DiscretionaryValue,
    pub accepts_families: DiscretionaryValue,
    pub accepts_benefits_claimants: DiscretionaryValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportProvided {
    pub support_offered: Vec<String>,
    pub support_info: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformation {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub additional_info: String,
}
