// crates/cache-guard/src/infrastructure/mod.rs

pub mod locking;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "redis")]
pub mod bootstrap;
