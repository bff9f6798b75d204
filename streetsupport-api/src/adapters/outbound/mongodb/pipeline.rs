use mongodb::bson::{doc, Document};

use super::PROVIDERS_COLLECTION;
use crate::domain::models::{ResultWindow, ServiceQuery};

/// Case-insensitive "starts with" match on user supplied text.
pub(super) fn prefix_regex(value: &str) -> Document {
    doc! {
        "$regex": format!("^{}", regex::escape(value)),
        "$options": "i",
    }
}

/// Aggregation over `ProvidedServices` for one services query.
pub struct ServicePipeline<'a> {
    query: &'a ServiceQuery,
}

impl<'a> ServicePipeline<'a> {
    pub fn new(query: &'a ServiceQuery) -> Self {
        Self { query }
    }

    /// Stages returning the requested window of matches, shaped for
    /// conversion into service records.
    pub fn page_stages(&self, window: ResultWindow) -> Vec<Document> {
        let mut stages = vec![self.entry_stage()];
        stages.extend(join_stages());
        stages.push(projection_stage());
        stages.push(doc! { "$skip": to_i64(window.skip) });
        stages.push(doc! { "$limit": to_i64(window.limit.max(1)) });

        tracing::trace!("Service pipeline: {:?}", stages);
        stages
    }

    /// Stages counting every match, ignoring the window.
    pub fn count_stages(&self) -> Vec<Document> {
        vec![self.entry_stage(), doc! { "$count": "total" }]
    }

    fn filter(&self) -> Document {
        let mut filter = doc! { "IsPublished": true };
        if self.query.geo.is_none() {
            if let Some(location) = self.query.location.as_deref() {
                filter.insert("Address.City", prefix_regex(location));
            }
        }
        if let Some(category) = self.query.category.as_deref() {
            filter.insert("ParentCategoryKey", prefix_regex(category));
        }
        if let Some(subcategory) = self.query.subcategory.as_deref() {
            filter.insert("SubCategoryKey", prefix_regex(subcategory));
        }
        filter
    }

    /// `$geoNear` when the query has coordinates (it must open the pipeline
    /// and sorts nearest first), a plain `$match` otherwise.
    fn entry_stage(&self) -> Document {
        match self.query.geo {
            Some(geo) => doc! {
                "$geoNear": {
                    "near": {
                        "type": "Point",
                        "coordinates": [geo.centre.longitude, geo.centre.latitude],
                    },
                    "distanceField": "distance",
                    "maxDistance": geo.radius_metres(),
                    "spherical": true,
                    "key": "Address.Location",
                    "query": self.filter(),
                }
            },
            None => doc! { "$match": self.filter() },
        }
    }
}

fn join_stages() -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": PROVIDERS_COLLECTION,
                "let": { "providerKey": "$ServiceProviderKey" },
                "pipeline": [
                    { "$match": { "$expr": { "$eq": ["$Key", "$$providerKey"] } } },
                    { "$project": {
                        "_id": 0,
                        "Key": 1,
                        "Name": 1,
                        "IsVerified": 1,
                        "ShortDescription": 1,
                    } },
                ],
                "as": "providers",
            }
        },
        doc! {
            "$set": {
                "organisation": {
                    "$ifNull": [{ "$arrayElemAt": ["$providers", 0] }, null],
                },
                "name": { "$ifNull": ["$Title", "$ServiceProviderName"] },
                "description": "$Info",
            }
        },
    ]
}

fn projection_stage() -> Document {
    doc! {
        "$project": {
            "_id": 1,
            "name": 1,
            "description": 1,
            "organisation": 1,
            "category": "$ParentCategoryKey",
            "subcategory": "$SubCategoryKey",
            "providerKey": "$ServiceProviderKey",
            "address": "$Address",
            "openingTimes": "$OpeningTimes",
            "isAppointmentOnly": "$IsAppointmentOnly",
            "isTelephoneService": "$IsTelephoneService",
            "isOpen247": "$IsOpen247",
            "distance": 1,
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;
    use crate::domain::models::{Coordinates, GeoFilter, Pagination};

    fn query() -> ServiceQuery {
        ServiceQuery {
            location: Some("Leeds".to_string()),
            category: Some("food".to_string()),
            pagination: Pagination::new(2, 10),
            ..Default::default()
        }
    }

    fn stage_names(stages: &[Document]) -> Vec<&str> {
        stages
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect()
    }

    #[test]
    fn plain_query_matches_city_and_category() {
        let query = query();
        let stages = ServicePipeline::new(&query).page_stages(query.primary_window());

        assert_eq!(
            stage_names(&stages),
            vec!["$match", "$lookup", "$set", "$project", "$skip", "$limit"]
        );

        let filter = stages[0].get_document("$match").unwrap();
        assert!(filter.get_bool("IsPublished").unwrap());
        assert_eq!(
            filter.get_document("Address.City").unwrap(),
            &prefix_regex("Leeds")
        );
        assert_eq!(
            filter.get_document("ParentCategoryKey").unwrap(),
            &prefix_regex("food")
        );
        assert!(filter.get("SubCategoryKey").is_none());

        assert_eq!(stages[4].get_i64("$skip").unwrap(), 10);
        assert_eq!(stages[5].get_i64("$limit").unwrap(), 10);
    }

    #[test]
    fn geo_query_opens_with_geo_near_and_ignores_city() {
        let mut query = query();
        query.subcategory = Some("meals".to_string());
        query.geo = Some(GeoFilter::new(Coordinates::new(53.8008, -1.5491), 2.5));

        let stages = ServicePipeline::new(&query).page_stages(query.primary_window());
        let geo_near = stages[0].get_document("$geoNear").unwrap();

        let coordinates = geo_near
            .get_document("near")
            .unwrap()
            .get_array("coordinates")
            .unwrap();
        assert_eq!(coordinates, &vec![Bson::Double(-1.5491), Bson::Double(53.8008)]);
        assert_eq!(geo_near.get_f64("maxDistance").unwrap(), 2500.0);
        assert_eq!(geo_near.get_str("key").unwrap(), "Address.Location");
        assert_eq!(geo_near.get_str("distanceField").unwrap(), "distance");

        let filter = geo_near.get_document("query").unwrap();
        assert!(filter.get("Address.City").is_none());
        assert!(filter.get("SubCategoryKey").is_some());
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(
            prefix_regex("St. Helens (town)").get_str("$regex").unwrap(),
            r"^St\. Helens \(town\)"
        );
    }

    #[test]
    fn count_stages_skip_join_and_window() {
        let query = query();
        let stages = ServicePipeline::new(&query).count_stages();
        assert_eq!(stage_names(&stages), vec!["$match", "$count"]);
        assert_eq!(stages[1].get_str("$count").unwrap(), "total");
    }

    #[test]
    fn lookup_projects_provider_summary_only() {
        let query = query();
        let stages = ServicePipeline::new(&query).page_stages(query.primary_window());
        let lookup = stages[1].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "ServiceProviders");

        let inner = lookup.get_array("pipeline").unwrap();
        let projection = inner[1]
            .as_document()
            .unwrap()
            .get_document("$project")
            .unwrap();
        let mut fields: Vec<_> = projection.keys().map(String::as_str).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["IsVerified", "Key", "Name", "ShortDescription", "_id"]);
    }
}
