mod cache_policy;
mod query_params;
mod responses;

pub use cache_policy::HttpCachePolicy;
pub use query_params::{QueryValidationError, ServicesQueryParams};
pub use responses::*;
