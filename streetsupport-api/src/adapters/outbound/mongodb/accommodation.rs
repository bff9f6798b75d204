use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};

use super::{
    conversions::to_domain_accommodation, map_mongo_error, pipeline::prefix_regex,
    ACCOMMODATION_COLLECTION,
};
use crate::domain::{
    models::{AccommodationFilter, AccommodationRecord},
    ports::outbound::AccommodationRepository,
    FetchError,
};

/// Rows must belong to a provider: the id exists, is a string and is not empty.
fn provider_clause() -> Document {
    doc! {
        "GeneralInfo.ServiceProviderId": { "$exists": true, "$type": "string", "$ne": "" }
    }
}

/// Publicly visible or published. Rows carrying neither flag are treated as
/// visible unless `IsPubliclyVisible` is explicitly `false`.
fn visibility_clause() -> Document {
    doc! {
        "$or": [
            { "GeneralInfo.IsPubliclyVisible": true },
            { "GeneralInfo.IsPublished": true },
            {
                "GeneralInfo.IsPubliclyVisible": { "$exists": false },
                "GeneralInfo.IsPublished": { "$exists": false },
            },
        ]
    }
}

/// Query document for accommodation listed alongside a services search.
pub fn accommodation_filter(filter: &AccommodationFilter) -> Document {
    let mut clauses = vec![provider_clause(), visibility_clause()];

    if let Some(location) = filter.location.as_deref() {
        clauses.push(doc! { "Address.City": prefix_regex(location) });
    }
    if let Some(kind) = filter.accommodation_type.as_deref() {
        clauses.push(doc! { "GeneralInfo.AccommodationType": prefix_regex(kind) });
    }
    if let Some(geo) = filter.geo {
        clauses.push(doc! {
            "Address.Location": {
                "$geoWithin": {
                    "$centerSphere": [
                        [geo.centre.longitude, geo.centre.latitude],
                        geo.radius_radians(),
                    ],
                },
            },
        });
    }

    doc! { "$and": clauses }
}

/// Query document for every visible accommodation row of one provider.
pub fn provider_filter(provider_id: &str) -> Document {
    doc! {
        "$and": [
            { "GeneralInfo.ServiceProviderId": provider_id },
            visibility_clause(),
        ]
    }
}

/// Reads `TemporaryAccommodation` and normalises each row.
pub struct MongoAccommodationAdapter {
    accommodation: Collection<Document>,
}

impl MongoAccommodationAdapter {
    pub fn new(database: &Database) -> Self {
        Self {
            accommodation: database.collection(ACCOMMODATION_COLLECTION),
        }
    }

    async fn find(&self, filter: Document) -> Result<Vec<AccommodationRecord>, FetchError> {
        let documents: Vec<Document> = self
            .accommodation
            .find(filter)
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        Ok(documents.iter().map(to_domain_accommodation).collect())
    }
}

#[async_trait]
impl AccommodationRepository for MongoAccommodationAdapter {
    async fn find_accommodation(
        &self,
        filter: &AccommodationFilter,
    ) -> Result<Vec<AccommodationRecord>, FetchError> {
        self.find(accommodation_filter(filter)).await
    }

    async fn find_by_provider(
        &self,
        provider_id: &str,
    ) -> Result<Vec<AccommodationRecord>, FetchError> {
        self.find(provider_filter(provider_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Coordinates, GeoFilter};

    fn clauses(filter: &Document) -> Vec<Document> {
        filter
            .get_array("$and")
            .unwrap()
            .iter()
            .map(|clause| clause.as_document().unwrap().clone())
            .collect()
    }

    #[test]
    fn bare_filter_requires_provider_and_visibility() {
        let filter = accommodation_filter(&AccommodationFilter::default());
        assert_eq!(clauses(&filter), vec![provider_clause(), visibility_clause()]);
    }

    #[test]
    fn visibility_has_three_branches() {
        let branches = visibility_clause().get_array("$or").unwrap().len();
        assert_eq!(branches, 3);
    }

    #[test]
    fn optional_filters_are_appended() {
        let filter = accommodation_filter(&AccommodationFilter {
            location: Some("Leeds".to_string()),
            accommodation_type: Some("hostel".to_string()),
            geo: Some(GeoFilter::new(Coordinates::new(53.8008, -1.5491), 6.371)),
        });
        let clauses = clauses(&filter);
        assert_eq!(clauses.len(), 5);

        assert_eq!(
            clauses[2].get_document("Address.City").unwrap(),
            &prefix_regex("Leeds")
        );
        assert_eq!(
            clauses[3].get_document("GeneralInfo.AccommodationType").unwrap(),
            &prefix_regex("hostel")
        );

        let sphere = clauses[4]
            .get_document("Address.Location")
            .unwrap()
            .get_document("$geoWithin")
            .unwrap()
            .get_array("$centerSphere")
            .unwrap();
        let radius = sphere[1].as_f64().unwrap();
        assert!((radius - 0.001).abs() < 1e-12);
        let centre = sphere[0].as_array().unwrap();
        assert_eq!(centre[0].as_f64(), Some(-1.5491));
        assert_eq!(centre[1].as_f64(), Some(53.8008));
    }

    #[test]
    fn provider_filter_keeps_visibility_rule() {
        let filter = provider_filter("hope");
        let clauses = clauses(&filter);
        assert_eq!(
            clauses[0].get_str("GeneralInfo.ServiceProviderId").unwrap(),
            "hope"
        );
        assert_eq!(clauses[1], visibility_clause());
    }
}
