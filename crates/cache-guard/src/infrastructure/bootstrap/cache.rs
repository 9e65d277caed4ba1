// crates/cache-guard/src/infrastructure/bootstrap/cache.rs

use std::sync::Arc;
use crate::application::stampede_guard::{GuardConfig, StampedeGuard};
use crate::domain::repositories::{DistributedLock, KeyValueStore};
use crate::errors::Result;
use crate::infrastructure::locking::StoreLock;
use crate::infrastructure::redis::factories::{create_redis_store, RedisConfig};

/// Un seul client Redis, partagé par le cache et par le verrou
pub async fn connect_stampede_guard(redis: &RedisConfig, guard: GuardConfig) -> Result<StampedeGuard> {
    tracing::info!(
        lock_ttl = ?guard.lock_ttl,
        cache_ttl = ?guard.cache_ttl,
        "🚀 Starting stampede-guarded cache..."
    );

    let store: Arc<dyn KeyValueStore> = create_redis_store(redis).await?;
    let lock: Arc<dyn DistributedLock> = Arc::new(StoreLock::new(store.clone()));

    Ok(StampedeGuard::new(store, lock, guard))
}

/// `CACHE_REDIS_*` + `CACHE_LOCK_TTL_MS` / `CACHE_TTL_SECS`
pub async fn stampede_guard_from_env() -> Result<StampedeGuard> {
    let redis = RedisConfig::from_env()?;
    let guard = GuardConfig::from_env()?;

    connect_stampede_guard(&redis, guard).await
}
