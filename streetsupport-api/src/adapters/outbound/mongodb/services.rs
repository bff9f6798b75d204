use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{Bson, Document},
    Collection, Database,
};

use super::{
    conversions::to_domain_service, map_mongo_error, pipeline::ServicePipeline,
    SERVICES_COLLECTION,
};
use crate::domain::{
    models::{ResultWindow, ServiceMatches, ServiceQuery},
    ports::outbound::ServiceRepository,
    FetchError,
};

/// Reads published services from `ProvidedServices`.
pub struct MongoServiceAdapter {
    services: Collection<Document>,
}

impl MongoServiceAdapter {
    pub fn new(database: &Database) -> Self {
        Self {
            services: database.collection(SERVICES_COLLECTION),
        }
    }

    async fn run(&self, stages: Vec<Document>) -> Result<Vec<Document>, FetchError> {
        self.services
            .aggregate(stages)
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)
    }
}

#[async_trait]
impl ServiceRepository for MongoServiceAdapter {
    async fn find_services(
        &self,
        query: &ServiceQuery,
        window: ResultWindow,
    ) -> Result<ServiceMatches, FetchError> {
        let pipeline = ServicePipeline::new(query);
        let (page, count) = tokio::try_join!(
            self.run(pipeline.page_stages(window)),
            self.run(pipeline.count_stages()),
        )?;

        let records = page
            .iter()
            .map(to_domain_service)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ServiceMatches {
            records,
            total: count_total(&count),
        })
    }
}

/// Reads `{ total: n }` from a `$count` stage; no documents means no matches.
fn count_total(documents: &[Document]) -> u64 {
    match documents.first().and_then(|doc| doc.get("total")) {
        Some(Bson::Int32(total)) => u64::try_from(*total).unwrap_or_default(),
        Some(Bson::Int64(total)) => u64::try_from(*total).unwrap_or_default(),
        _ => 0,
    }
}
