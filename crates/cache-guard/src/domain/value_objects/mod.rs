// crates/cache-guard/src/domain/value_objects/mod.rs

mod cache_key;
mod ttl;
mod value_object;

pub use cache_key::CacheKey;
pub use ttl::Ttl;
pub use value_object::ValueObject;
