// crates/cache-guard/tests/common/mod.rs

mod setup_redis_test_cache;

pub use setup_redis_test_cache::{init_tracing, setup_guarded_redis, setup_redis_test_cache};
