mod tiered_cache_service;

pub use tiered_cache_service::TieredCache;
