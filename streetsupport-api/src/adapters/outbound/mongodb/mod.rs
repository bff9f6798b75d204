mod accommodation;
mod conversions;
mod pipeline;
mod services;

pub use accommodation::{accommodation_filter, provider_filter, MongoAccommodationAdapter};
pub use pipeline::ServicePipeline;
pub use services::MongoServiceAdapter;

use crate::domain::FetchError;

const SERVICES_COLLECTION: &str = "ProvidedServices";
const PROVIDERS_COLLECTION: &str = "ServiceProviders";
const ACCOMMODATION_COLLECTION: &str = "TemporaryAccommodation";

fn map_mongo_error(err: mongodb::error::Error) -> FetchError {
    FetchError::Database(err.to_string())
}
