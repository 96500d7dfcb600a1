//! In-memory cache of computed build information

pub mod build_information_cache;

// Re-export the main cache type
pub use build_information_cache::{BuildInformationCache, CacheEntry};
