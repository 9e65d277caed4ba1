// crates/cache-guard/src/infrastructure/redis/factories/redis_context.rs

use std::sync::Arc;
use crate::errors::Result;
use crate::infrastructure::redis::repositories::RedisKeyValueStore;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};

/// Client Redis construit une seule fois puis partagé (`Arc`) par tous les composants.
pub struct RedisContext {
    store: Arc<RedisKeyValueStore>,
    config: RedisConfig,
}

impl RedisContext {
    pub fn builder() -> Result<RedisContextBuilder> {
        RedisContextBuilder::new()
    }

    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    pub fn store(&self) -> Arc<RedisKeyValueStore> {
        self.store.clone()
    }

    pub fn url(&self) -> String {
        self.config.url.clone()
    }

    pub fn config(&self) -> RedisConfig {
        self.config.clone()
    }

    pub(crate) async fn restore(builder: RedisContextBuilder) -> Result<Self> {
        let config = builder.config;
        let store = RedisKeyValueStore::new(&config).await?;

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }
}
