use std::{collections::BTreeMap, fmt};

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::domain::models::ServiceQuery;

/// Deterministic identity of a services query.
///
/// Built from every parameter that affects the response, in a fixed key
/// order, so equal queries always produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn generate(query: &ServiceQuery) -> Self {
        let geo = query.geo;
        let params: BTreeMap<&'static str, Value> = BTreeMap::from([
            ("location", json!(query.location)),
            ("category", json!(query.category)),
            ("subcategory", json!(query.subcategory)),
            ("lat", json!(geo.map(|g| g.centre.latitude))),
            ("lng", json!(geo.map(|g| g.centre.longitude))),
            ("radius", json!(geo.map(|g| g.radius_km))),
            ("page", json!(query.pagination.page)),
            ("limit", json!(query.pagination.limit)),
        ]);

        let canonical = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Self(format!("services:{:x}", hasher.finalize()))
    }

    /// Short stable prefix of the hash, used in validators such as `ETag`.
    pub fn fingerprint(&self) -> &str {
        let hash = self.0.trim_start_matches("services:");
        hash.get(..16).unwrap_or(hash)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
