//! Validation of `/api/services` query parameters.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::models::{
    Coordinates, GeoFilter, Pagination, ServiceQuery, DEFAULT_LIMIT, DEFAULT_PAGE,
    DEFAULT_RADIUS_KM,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryValidationError {
    #[error("Invalid page or limit value")]
    InvalidPagination,
    #[error("Both lat and lng parameters are required for geospatial queries")]
    IncompleteCoordinates,
    #[error("Invalid latitude or longitude values")]
    InvalidCoordinates,
    #[error("Latitude must be between -90 and 90 and longitude between -180 and 180")]
    CoordinatesOutOfRange,
    #[error("Invalid radius value")]
    InvalidRadius,
}

/// Raw query string of `GET /api/services`. Every value is kept as text so
/// malformed numbers surface as validation errors rather than extractor
/// rejections.
#[derive(Debug, Default, Deserialize)]
pub struct ServicesQueryParams {
    pub location: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads the leading integer of `raw`, so `"1.5"` and `"2abc"` count as 1 and 2.
fn leading_int(raw: &str) -> Option<i64> {
    let digits_start = usize::from(raw.starts_with(['-', '+']));
    let digits_end = raw[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |end| digits_start + end);
    if digits_end == digits_start {
        return None;
    }
    raw[..digits_end].parse().ok()
}

fn positive_int(value: Option<String>, default: u32) -> Result<u32, QueryValidationError> {
    match present(value) {
        None => Ok(default),
        Some(raw) => leading_int(&raw)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .ok_or(QueryValidationError::InvalidPagination),
    }
}

fn finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl ServicesQueryParams {
    pub fn into_query(self) -> Result<ServiceQuery, QueryValidationError> {
        let page = positive_int(self.page, DEFAULT_PAGE)?;
        let limit = positive_int(self.limit, DEFAULT_LIMIT)?;

        let radius_km = present(self.radius)
            .map(|raw| {
                finite(&raw)
                    .filter(|r| *r > 0.0)
                    .ok_or(QueryValidationError::InvalidRadius)
            })
            .transpose()?;

        let geo = match (present(self.lat), present(self.lng)) {
            (None, None) => None,
            (Some(lat), Some(lng)) => {
                let (latitude, longitude) = finite(&lat)
                    .zip(finite(&lng))
                    .ok_or(QueryValidationError::InvalidCoordinates)?;
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude)
                {
                    return Err(QueryValidationError::CoordinatesOutOfRange);
                }
                Some(GeoFilter::new(
                    Coordinates::new(latitude, longitude),
                    radius_km.unwrap_or(DEFAULT_RADIUS_KM),
                ))
            }
            _ => return Err(QueryValidationError::IncompleteCoordinates),
        };

        Ok(ServiceQuery {
            location: present(self.location),
            category: present(self.category),
            subcategory: present(self.subcategory),
            geo,
            pagination: Pagination::new(page, limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ServicesQueryParams {
        let mut params = ServicesQueryParams::default();
        for (name, value) in pairs {
            let value = Some(value.to_string());
            match *name {
                "location" => params.location = value,
                "category" => params.category = value,
                "subcategory" => params.subcategory = value,
                "lat" => params.lat = value,
                "lng" => params.lng = value,
                "radius" => params.radius = value,
                "page" => params.page = value,
                "limit" => params.limit = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        params
    }

    fn error(pairs: &[(&str, &str)]) -> QueryValidationError {
        params(pairs).into_query().unwrap_err()
    }

    #[test]
    fn defaults_apply_to_empty_query() {
        let query = params(&[]).into_query().unwrap();
        assert_eq!(query.pagination, Pagination::new(1, 20));
        assert!(query.geo.is_none());
        assert!(query.category.is_none());
    }

    #[test]
    fn blank_values_are_absent() {
        let query = params(&[("location", "  "), ("lat", ""), ("lng", ""), ("page", "")])
            .into_query()
            .unwrap();
        assert!(query.location.is_none());
        assert!(query.geo.is_none());
        assert_eq!(query.pagination.page, 1);
    }

    #[test]
    fn pagination_must_be_positive_integers() {
        for bad in ["0", "-1", "abc", "-", ".5", "99999999999"] {
            assert_eq!(error(&[("page", bad)]), QueryValidationError::InvalidPagination);
            assert_eq!(error(&[("limit", bad)]), QueryValidationError::InvalidPagination);
        }
    }

    #[test]
    fn pagination_reads_leading_integer() {
        let query = params(&[("page", "1.5"), ("limit", "10abc")])
            .into_query()
            .unwrap();
        assert_eq!(query.pagination, Pagination::new(1, 10));

        let query = params(&[("page", "+3")]).into_query().unwrap();
        assert_eq!(query.pagination.page, 3);
    }

    #[test]
    fn radius_is_checked_without_coordinates() {
        for bad in ["0", "-5", "abc"] {
            assert_eq!(
                error(&[("radius", bad)]),
                QueryValidationError::InvalidRadius
            );
        }

        let query = params(&[("radius", "2")]).into_query().unwrap();
        assert!(query.geo.is_none());
    }

    #[test]
    fn coordinates_come_in_pairs() {
        assert_eq!(
            error(&[("lat", "53.8")]),
            QueryValidationError::IncompleteCoordinates
        );
        assert_eq!(
            error(&[("lng", "-1.5")]),
            QueryValidationError::IncompleteCoordinates
        );
    }

    #[test]
    fn coordinates_must_be_numbers_in_range() {
        assert_eq!(
            error(&[("lat", "north"), ("lng", "-1.5")]),
            QueryValidationError::InvalidCoordinates
        );
        assert_eq!(
            error(&[("lat", "NaN"), ("lng", "-1.5")]),
            QueryValidationError::InvalidCoordinates
        );
        assert_eq!(
            error(&[("lat", "91"), ("lng", "0")]),
            QueryValidationError::CoordinatesOutOfRange
        );
        assert_eq!(
            error(&[("lat", "0"), ("lng", "181")]),
            QueryValidationError::CoordinatesOutOfRange
        );
    }

    #[test]
    fn radius_must_be_positive() {
        for bad in ["0", "-5", "wide", "inf"] {
            assert_eq!(
                error(&[("lat", "53.8"), ("lng", "-1.5"), ("radius", bad)]),
                QueryValidationError::InvalidRadius
            );
        }
    }

    #[test]
    fn radius_defaults_to_five_km() {
        let query = params(&[("lat", "53.8008"), ("lng", "-1.5491")])
            .into_query()
            .unwrap();
        let geo = query.geo.unwrap();
        assert_eq!(geo.radius_km, 5.0);
        assert_eq!(geo.centre, Coordinates::new(53.8008, -1.5491));
    }

    #[test]
    fn error_messages_are_client_facing() {
        assert_eq!(
            QueryValidationError::IncompleteCoordinates.to_string(),
            "Both lat and lng parameters are required for geospatial queries"
        );
        assert_eq!(
            QueryValidationError::InvalidRadius.to_string(),
            "Invalid radius value"
        );
    }
}
