mod accommodation;
mod cache;
mod services;

pub use accommodation::InMemoryAccommodationRepository;
pub use cache::MokaQueryCache;
pub use services::InMemoryServiceRepository;

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(&prefix.to_lowercase())
}
