pub(crate) mod error;
pub(crate) mod service_providers;
pub(crate) mod services;

pub(crate) use error::ApiError;
