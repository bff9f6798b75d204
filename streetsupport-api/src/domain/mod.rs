mod cache_key;
mod error;
pub mod geo;
pub mod models;
pub mod ports;
pub mod services;
mod text;

pub use cache_key::CacheKey;
pub use error::*;
pub use text::decode_text;
