// crates/cache-guard/src/infrastructure/redis/factories/redis_context_builder.rs

use std::time::Duration;
use crate::errors::Result;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContext};

#[derive(Default)]
pub struct RedisContextBuilder {
    pub(crate) config: RedisConfig,
}

impl RedisContextBuilder {
    /// Part de l'environnement (`CACHE_REDIS_*`)
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: RedisConfig::from_env()?,
        })
    }

    pub fn with_config(mut self, config: RedisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.config.max_clients = max;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.config.connection_timeout = timeout;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    pub async fn build(self) -> Result<RedisContext> {
        RedisContext::restore(self).await
    }
}
