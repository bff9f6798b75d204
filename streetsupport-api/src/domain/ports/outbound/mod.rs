mod accommodation;
mod cache;
mod services;

pub use accommodation::*;
pub use cache::*;
pub use services::*;
