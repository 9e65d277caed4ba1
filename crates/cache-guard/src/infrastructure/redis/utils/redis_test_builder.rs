// crates/cache-guard/src/infrastructure/redis/utils/redis_test_builder.rs

use crate::application::stampede_guard::GuardConfig;
use crate::infrastructure::redis::utils::redis_test_context::RedisTestContext;

/// Redis éphémère + TTL du guard utilisés par `RedisTestContext::guard`
#[derive(Default)]
pub struct RedisTestContextBuilder {
    pub(crate) guard_config: GuardConfig,
}

impl RedisTestContextBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn with_guard_config(mut self, config: GuardConfig) -> Self {
        self.guard_config = config;
        self
    }

    pub async fn build(self) -> RedisTestContext {
        RedisTestContext::restore(self).await
    }
}
