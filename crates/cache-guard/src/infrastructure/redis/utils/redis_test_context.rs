// crates/cache-guard/src/infrastructure/redis/utils/redis_test_context.rs

use std::sync::Arc;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::redis::Redis as RedisImage;
use crate::application::stampede_guard::{GuardConfig, StampedeGuard};
use crate::infrastructure::locking::StoreLock;
use crate::infrastructure::redis::factories::RedisContext;
use crate::infrastructure::redis::repositories::RedisKeyValueStore;
use crate::infrastructure::redis::utils::redis_test_builder::RedisTestContextBuilder;

const REDIS_TAG: &str = "7.2-alpine";
const REDIS_PORT: u16 = 6379;

pub struct RedisTestContext {
    context: RedisContext,
    guard_config: GuardConfig,
    pub container: ContainerAsync<RedisImage>,
}

impl RedisTestContext {
    pub fn builder() -> RedisTestContextBuilder {
        RedisTestContextBuilder::new()
    }

    pub fn store(&self) -> Arc<RedisKeyValueStore> {
        self.context.store()
    }

    pub fn url(&self) -> String {
        self.context.url()
    }

    pub fn guard_config(&self) -> GuardConfig {
        self.guard_config
    }

    /// Guard branché sur le Redis du container, verrou `StoreLock` sur le même pool
    pub fn guard(&self) -> StampedeGuard {
        let store = self.store();
        StampedeGuard::new(store.clone(), Arc::new(StoreLock::new(store)), self.guard_config)
    }

    pub(crate) async fn restore(builder: RedisTestContextBuilder) -> Self {
        let container = RedisImage::default()
            .with_tag(REDIS_TAG)
            .start()
            .await
            .expect("redis container did not start");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(REDIS_PORT).await.unwrap();

        // builder_raw : l'URL du container, jamais CACHE_REDIS_URL
        let context = RedisContext::builder_raw()
            .with_url(format!("redis://{host}:{port}"))
            .build()
            .await
            .expect("store did not connect to the redis container");

        Self {
            context,
            guard_config: builder.guard_config,
            container,
        }
    }
}
