use thiserror::Error;

/// Failure of a single read against a data source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("database error: {0}")]
    Database(String),
    #[error("failed to decode document: {0}")]
    Decode(String),
}

/// Errors surfaced by the service directory once fallbacks are exhausted.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("service directory unavailable: {0}")]
    Unavailable(String),
}
