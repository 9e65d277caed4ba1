// crates/cache-guard/tests/common/setup_redis_test_cache.rs

use std::sync::Once;
use cache_guard::application::stampede_guard::GuardConfig;
use cache_guard::infrastructure::redis::utils::RedisTestContext;

static TRACING: Once = Once::new();

/// Logs visibles avec `RUST_LOG=cache_guard=debug cargo test -- --nocapture`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub async fn setup_redis_test_cache() -> RedisTestContext {
    init_tracing();
    RedisTestContext::builder().build().await
}

pub async fn setup_guarded_redis(config: GuardConfig) -> RedisTestContext {
    init_tracing();
    RedisTestContext::builder().with_guard_config(config).build().await
}
