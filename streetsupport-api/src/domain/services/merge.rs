//! Merging of primary services and accommodation into one page.

use std::cmp::Ordering;

use crate::domain::{
    decode_text,
    geo::{haversine_km, metres_to_rounded_km},
    models::{
        AccommodationData, AccommodationRecord, GeoFilter, OrganisationSummary, SearchHit,
        ServiceMatches, ServiceQuery, ServicesPage, SourceType, UnifiedResult,
        ACCOMMODATION_CATEGORY,
    },
};

const DEFAULT_ACCOMMODATION_TYPE: &str = "other";

/// Turns accommodation rows into hits, re-checking the radius in memory.
///
/// With a proximity filter, rows further than the radius are dropped and the
/// survivors carry their distance in metres, like primary results do.
pub fn accommodation_hits(
    records: Vec<AccommodationRecord>,
    geo: Option<GeoFilter>,
) -> Vec<SearchHit> {
    match geo {
        None => records
            .into_iter()
            .map(|record| SearchHit::Accommodation {
                record,
                distance_metres: None,
            })
            .collect(),
        Some(geo) => records
            .into_iter()
            .filter_map(|record| {
                let location = record.address.location.unwrap_or_default();
                let distance_km = haversine_km(geo.centre, location);
                (distance_km <= geo.radius_km).then(|| SearchHit::Accommodation {
                    record,
                    distance_metres: Some(distance_km * 1000.0),
                })
            })
            .collect(),
    }
}

/// Nearest first. Hits without a distance keep their relative order and sort
/// after those with one.
pub fn sort_by_distance(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| match (a.distance_metres(), b.distance_metres()) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Combines both sources into the requested page.
///
/// `primary` must have been read with [`ServiceQuery::primary_window`].
pub fn merge_page(
    query: &ServiceQuery,
    primary: ServiceMatches,
    accommodation: Vec<AccommodationRecord>,
) -> ServicesPage {
    let accommodation = accommodation_hits(accommodation, query.geo);
    let total = primary.total + accommodation.len() as u64;

    let mut hits: Vec<SearchHit> = primary
        .records
        .into_iter()
        .map(SearchHit::Service)
        .chain(accommodation)
        .collect();
    sort_by_distance(&mut hits);

    let pagination = query.pagination;
    let offset = pagination
        .skip()
        .saturating_sub(query.primary_window().skip);

    let results = hits
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(pagination.limit as usize)
        .map(into_unified)
        .collect();

    ServicesPage {
        total,
        page: pagination.page,
        limit: pagination.limit,
        results,
    }
}

/// Output shape of a hit: decoded text, resolved slug and kilometres.
pub fn into_unified(hit: SearchHit) -> UnifiedResult {
    let distance_km = hit.distance_metres().map(metres_to_rounded_km);
    let source_type = hit.source_type();

    match hit {
        SearchHit::Service(record) => {
            let organisation = record.organisation.map(|org| OrganisationSummary {
                name: decode_text(&org.name),
                slug: org.key,
                is_verified: org.is_verified,
            });
            let organisation_slug = organisation
                .as_ref()
                .map(|org| org.slug.clone())
                .filter(|slug| !slug.is_empty())
                .unwrap_or(record.provider_key);

            UnifiedResult {
                id: record.id,
                name: decode_text(&record.name),
                description: decode_text(&record.description),
                category: record.category,
                subcategory: record.subcategory,
                organisation,
                organisation_slug,
                location: record.address.location,
                address: record.address,
                opening_times: record.opening_times,
                is_appointment_only: record.is_appointment_only,
                is_telephone_service: record.is_telephone_service,
                is_open_247: record.is_open_247,
                distance_km,
                source_type,
                accommodation: None,
            }
        }
        SearchHit::Accommodation { record, .. } => {
            let subcategory = if record.details.accommodation_type.is_empty() {
                DEFAULT_ACCOMMODATION_TYPE.to_string()
            } else {
                record.details.accommodation_type.clone()
            };
            let description = if record.description.is_empty() {
                &record.synopsis
            } else {
                &record.description
            };

            UnifiedResult {
                id: record.id,
                name: decode_text(&record.name),
                description: decode_text(description),
                category: ACCOMMODATION_CATEGORY.to_string(),
                subcategory,
                organisation: Some(OrganisationSummary {
                    name: String::new(),
                    slug: record.provider_id.clone(),
                    is_verified: false,
                }),
                organisation_slug: record.provider_id,
                location: record.address.location,
                address: record.address,
                opening_times: Vec::new(),
                is_appointment_only: false,
                is_telephone_service: false,
                is_open_247: false,
                distance_km,
                source_type,
                accommodation: Some(AccommodationData {
                    synopsis: decode_text(&record.synopsis),
                    details: record.details,
                    features: record.features,
                    resident_criteria: record.resident_criteria,
                    support: record.support,
                    contact: record.contact,
                }),
            }
        }
    }
}
