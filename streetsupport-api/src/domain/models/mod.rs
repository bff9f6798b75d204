mod accommodation;
mod discretionary;
mod query;
mod service;
mod unified;

pub use accommodation::*;
pub use discretionary::*;
pub use query::*;
pub use service::*;
pub use unified::*;
