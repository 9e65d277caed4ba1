// crates/cache-guard/src/infrastructure/redis/factories/redis_config.rs

use crate::domain::utils::parse_positive;
use crate::errors::{CacheError, Result};
use crate::infrastructure::redis::repositories::RedisKeyValueStore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub url: String,
    pub max_clients: usize,
    pub connection_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_clients: 16,
            connection_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            url: std::env::var("CACHE_REDIS_URL")
                .map_err(|_| CacheError::config("CACHE_REDIS_URL must be set"))?,
            max_clients: match std::env::var("CACHE_REDIS_MAX_CLIENTS") {
                Ok(raw) => usize::try_from(parse_positive("CACHE_REDIS_MAX_CLIENTS", &raw)?)
                    .map_err(|_| CacheError::config("Invalid CACHE_REDIS_MAX_CLIENTS"))?,
                Err(_) => defaults.max_clients,
            },
            connection_timeout: match std::env::var("CACHE_REDIS_CONNECT_TIMEOUT_MS") {
                Ok(raw) => Duration::from_millis(parse_positive("CACHE_REDIS_CONNECT_TIMEOUT_MS", &raw)?),
                Err(_) => defaults.connection_timeout,
            },
            command_timeout: match std::env::var("CACHE_REDIS_COMMAND_TIMEOUT_MS") {
                Ok(raw) => Duration::from_millis(parse_positive("CACHE_REDIS_COMMAND_TIMEOUT_MS", &raw)?),
                Err(_) => defaults.command_timeout,
            },
        })
    }
}

pub async fn create_redis_store(config: &RedisConfig) -> Result<Arc<RedisKeyValueStore>> {
    let store = RedisKeyValueStore::new(config).await?;
    Ok(Arc::new(store))
}
