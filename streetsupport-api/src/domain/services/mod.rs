mod accommodation;
mod directory;
pub mod merge;

pub use accommodation::AccommodationLoader;
pub use directory::ServiceDirectoryImpl;
