//! Conversions from raw BSON documents to domain models.
//!
//! Stored documents are loosely typed: flags appear as booleans or numbers,
//! numbers as strings, and whole groups may be missing. Readers here never
//! fail on shape, they fall back to the field's empty value.

use mongodb::bson::{Bson, Document};

use crate::domain::{
    models::{
        AccommodationDetails, AccommodationFeatures, AccommodationRecord, Address,
        ContactInformation, Coordinates, DiscretionaryValue, OpeningTime, ProviderSummary,
        ResidentCriteria, ServiceRecord, SupportProvided,
    },
    FetchError,
};

pub(super) fn text(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::Int32(value)) => value.to_string(),
        Some(Bson::Int64(value)) => value.to_string(),
        Some(Bson::Double(value)) => value.to_string(),
        _ => String::new(),
    }
}

pub(super) fn flag(doc: &Document, key: &str) -> bool {
    match doc.get(key) {
        Some(Bson::Boolean(value)) => *value,
        Some(Bson::Int32(value)) => *value != 0,
        Some(Bson::Int64(value)) => *value != 0,
        _ => false,
    }
}

pub(super) fn discretionary(doc: &Document, key: &str) -> DiscretionaryValue {
    let raw = match doc.get(key) {
        Some(Bson::Boolean(true)) => Some(1),
        Some(Bson::Int32(value)) => Some(i64::from(*value)),
        Some(Bson::Int64(value)) => Some(*value),
        Some(Bson::Double(value)) if value.is_finite() => Some(*value as i64),
        _ => None,
    };
    DiscretionaryValue::from_falsy_coalesced(raw)
}

fn strings(doc: &Document, key: &str) -> Vec<String> {
    match doc.get(key) {
        Some(Bson::Array(values)) => values
            .iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(value) => Some(*value),
        Bson::Int32(value) => Some(f64::from(*value)),
        Bson::Int64(value) => Some(*value as f64),
        _ => None,
    }
}

pub(super) fn group<'a>(doc: &'a Document, key: &str) -> Option<&'a Document> {
    doc.get_document(key).ok()
}

fn id(doc: &Document) -> Option<String> {
    match doc.get("_id")? {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads a GeoJSON point, `{ type: "Point", coordinates: [lng, lat] }`.
pub(super) fn point(doc: &Document) -> Option<Coordinates> {
    let coordinates = doc.get_array("coordinates").ok()?;
    let longitude = number(coordinates.first()?)?;
    let latitude = number(coordinates.get(1)?)?;
    Some(Coordinates::new(latitude, longitude))
}

fn address(doc: Option<&Document>) -> Address {
    let Some(doc) = doc else {
        return Address::default();
    };
    Address {
        street1: text(doc, "Street1"),
        street2: text(doc, "Street2"),
        street3: text(doc, "Street3"),
        city: text(doc, "City"),
        postcode: text(doc, "Postcode"),
        location: group(doc, "Location").and_then(point),
    }
}

fn opening_times(doc: &Document) -> Vec<OpeningTime> {
    let Ok(entries) = doc.get_array("openingTimes") else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Bson::as_document)
        .map(|entry| OpeningTime {
            day: text(entry, "Day"),
            start_time: text(entry, "StartTime"),
            end_time: text(entry, "EndTime"),
        })
        .collect()
}

fn provider_summary(doc: &Document) -> Option<ProviderSummary> {
    let organisation = group(doc, "organisation")?;
    Some(ProviderSummary {
        key: text(organisation, "Key"),
        name: text(organisation, "Name"),
        is_verified: flag(organisation, "IsVerified"),
        short_description: text(organisation, "ShortDescription"),
    })
}

/// Converts one document produced by the services pipeline.
pub fn to_domain_service(doc: &Document) -> Result<ServiceRecord, FetchError> {
    let id = id(doc).ok_or_else(|| FetchError::Decode("service without _id".to_string()))?;

    Ok(ServiceRecord {
        id,
        name: text(doc, "name"),
        description: text(doc, "description"),
        category: text(doc, "category"),
        subcategory: text(doc, "subcategory"),
        provider_key: text(doc, "providerKey"),
        organisation: provider_summary(doc),
        address: address(group(doc, "address")),
        opening_times: opening_times(doc),
        is_appointment_only: flag(doc, "isAppointmentOnly"),
        is_telephone_service: flag(doc, "isTelephoneService"),
        is_open_247: flag(doc, "isOpen247"),
        is_published: true,
        distance_metres: doc.get("distance").and_then(number),
    })
}

/// Normalises one `TemporaryAccommodation` document.
///
/// Discretionary fields are read with falsy coalescing, so a stored `0` is
/// reported as unspecified. A missing location becomes `(0, 0)`.
pub fn to_domain_accommodation(doc: &Document) -> AccommodationRecord {
    let empty = Document::new();
    let general = group(doc, "GeneralInfo").unwrap_or(&empty);
    let pricing = group(doc, "PricingAndRequirementsInfo").unwrap_or(&empty);
    let features = group(doc, "FeaturesWithDiscretionary").unwrap_or(&empty);
    let residents = group(doc, "ResidentCriteriaInfo").unwrap_or(&empty);
    let support = group(doc, "SupportProvidedInfo").unwrap_or(&empty);
    let contact = group(doc, "ContactInformation").unwrap_or(&empty);

    let mut address = address(group(doc, "Address"));
    address.location = Some(address.location.unwrap_or_default());

    AccommodationRecord {
        id: id(doc).unwrap_or_default(),
        name: text(general, "Name"),
        synopsis: text(general, "Synopsis"),
        description: text(general, "Description"),
        provider_id: text(general, "ServiceProviderId"),
        address,
        details: AccommodationDetails {
            accommodation_type: text(general, "AccommodationType"),
            is_open_access: flag(general, "IsOpenAccess"),
            referral_is_required: flag(pricing, "ReferralIsRequired"),
            referral_notes: text(pricing, "ReferralNotes"),
            price: text(pricing, "Price"),
            food_is_included: discretionary(pricing, "FoodIsIncluded"),
            availability_of_meals: text(pricing, "AvailabilityOfMeals"),
        },
        features: AccommodationFeatures {
            accepts_housing_benefit: discretionary(features, "AcceptsHousingBenefit"),
            accepts_pets: discretionary(features, "AcceptsPets"),
            accepts_visitors: discretionary(features, "AcceptsVisitors"),
            has_disabled_access: discretionary(features, "HasDisabledAccess"),
            is_suitable_for_wheelchairs: discretionary(features, "IsSuitableForWheelchairs"),
            has_single_rooms: discretionary(features, "HasSingleRooms"),
            has_shared_rooms: discretionary(features, "HasSharedRooms"),
            has_shower_bathroom_facilities: discretionary(
                features,
                "HasShowerBathroomFacilities",
            ),
            has_access_to_kitchen: discretionary(features, "HasAccessToKitchen"),
            has_laundry_facilities: discretionary(features, "HasLaundryFacilities"),
            has_lounge: discretionary(features, "HasLounge"),
            has_on_site_manager: discretionary(features, "HasOnSiteManager"),
            additional_features: text(features, "AdditionalFeatures"),
        },
        resident_criteria: ResidentCriteria {
            accepts_men: discretionary(residents, "AcceptsMen"),
            accepts_women: discretionary(residents, "AcceptsWomen"),
            accepts_couples: discretionary(residents, "AcceptsCouples"),
            accepts_young_people: discretionary(residents, "AcceptsYoungPeople"),
            accepts_families: discretionary(residents, "AcceptsFamilies"),
            accepts_benefits_claimants: discretionary(residents, "AcceptsBenefitsClaimants"),
        },
        support: SupportProvided {
            support_offered: strings(support, "SupportOffered"),
            support_info: text(support, "SupportInfo"),
        },
        contact: ContactInformation {
            name: text(contact, "Name"),
            email: text(contact, "Email"),
            telephone: text(contact, "Telephone"),
            additional_info: text(contact, "AdditionalInfo"),
        },
    }
}
