use serde::{Deserialize, Serialize};

use crate::domain::geo::EARTH_RADIUS_KM;

/// Category key under which temporary accommodation is listed.
pub const ACCOMMODATION_CATEGORY: &str = "accom";

/// Radius used when coordinates are given without one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Proximity constraint of a search: centre point and radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub centre: Coordinates,
    pub radius_km: f64,
}

impl GeoFilter {
    pub fn new(centre: Coordinates, radius_km: f64) -> Self {
        Self { centre, radius_km }
    }

    pub fn radius_metres(&self) -> f64 {
        self.radius_km * 1000.0
    }

    /// Radius as an angle on the sphere, as `$centerSphere` expects it.
    pub fn radius_radians(&self) -> f64 {
        self.radius_km / EARTH_RADIUS_KM
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Number of merged rows that precede this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Slice of the primary services collection to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultWindow {
    pub skip: u64,
    pub limit: u64,
}

impl ResultWindow {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}

/// A validated `/api/services` search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceQuery {
    pub location: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub geo: Option<GeoFilter>,
    pub pagination: Pagination,
}

impl ServiceQuery {
    /// Accommodation listings only join results for the exact accommodation category.
    pub fn includes_accommodation(&self) -> bool {
        self.category.as_deref() == Some(ACCOMMODATION_CATEGORY)
    }

    /// Window of primary rows needed to assemble the requested page.
    ///
    /// When accommodation rows are merged in, pagination happens after the
    /// merge, so every primary row up to the end of the page is required.
    pub fn primary_window(&self) -> ResultWindow {
        let end = self.pagination.skip() + u64::from(self.pagination.limit);
        if self.includes_accommodation() {
            ResultWindow::new(0, end)
        } else {
            ResultWindow::new(self.pagination.skip(), u64::from(self.pagination.limit))
        }
    }
}

/// Filters applied to the accommodation collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccommodationFilter {
    pub location: Option<String>,
    pub accommodation_type: Option<String>,
    pub geo: Option<GeoFilter>,
}

impl From<&ServiceQuery> for AccommodationFilter {
    fn from(query: &ServiceQuery) -> Self {
        Self {
            location: query.location.clone(),
            accommodation_type: query.subcategory.clone(),
            geo: query.geo,
        }
    }
}
