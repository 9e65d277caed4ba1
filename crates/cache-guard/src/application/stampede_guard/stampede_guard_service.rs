// crates/cache-guard/src/application/stampede_guard/stampede_guard_service.rs

//! # StampedeGuard - Refresh élu à l'échelle de la flotte
//!
//! Sur un miss du tier rapide, un seul appelant (tous process confondus) est élu via un
//! verrou `SET NX` dans le store. Les autres ne l'attendent pas : ils lisent le tier lent,
//! qui vit deux fois plus longtemps et a donc plus de chances d'être encore chaud.
//!
//! ### Limite assumée
//! Si les deux tiers sont froids en même temps, chaque appelant non élu passe par un
//! `TieredCache` sans protection et peut interroger l'origine lui-même. L'élection ne couvre
//! que le cas "clé chaude, verrou disputé, tier lent chaud".

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::stampede_guard::GuardConfig;
use crate::application::tiered_cache::TieredCache;
use crate::domain::entities::CacheEntry;
use crate::domain::repositories::{DistributedLock, KeyValueStore, LockAcquisition};
use crate::domain::value_objects::{CacheKey, Ttl};
use crate::errors::{CacheError, Result};

pub struct StampedeGuard {
    tiers: TieredCache,
    lock: Arc<dyn DistributedLock>,
    config: GuardConfig,
}

impl StampedeGuard {
    pub fn new(store: Arc<dyn KeyValueStore>, lock: Arc<dyn DistributedLock>, config: GuardConfig) -> Self {
        Self {
            tiers: TieredCache::new(store),
            lock,
            config,
        }
    }

    pub fn with_defaults(store: Arc<dyn KeyValueStore>, lock: Arc<dyn DistributedLock>) -> Self {
        Self::new(store, lock, GuardConfig::default())
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn tiers(&self) -> &TieredCache {
        &self.tiers
    }

    /// `fetch_with_guard` avec les TTL de la configuration
    pub async fn fetch<T, F, Fut, E>(&self, key: &CacheKey, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.fetch_with_guard(key, self.config.lock_ttl, self.config.cache_ttl, loader)
            .await
    }

    pub async fn fetch_with_guard<T, F, Fut, E>(
        &self,
        key: &CacheKey,
        lock_ttl: Duration,
        cache_ttl: Duration,
        loader: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        // 1. TIER RAPIDE : un hit court-circuite tout, même si le verrou est libre
        if let Some(value) = self.tiers.probe::<T>(key.as_str()).await? {
            return Ok(value);
        }

        // Les TTL ne servent qu'au verrou et aux écritures
        let cache_ttl = Ttl::try_new(cache_ttl)?;
        Ttl::try_new(lock_ttl)?;

        // 2. ÉLECTION : une panne du store remonte telle quelle, jamais de repli silencieux
        let lease = match self.lock.try_acquire(&key.lock(), lock_ttl).await? {
            LockAcquisition::Acquired(lease) => lease,
            LockAcquisition::Contended => {
                // 3. Non élu : on lit le tier lent (qui peut lui-même appeler le loader)
                tracing::debug!(key = %key, "refresh already in flight, reading slow tier");
                return self
                    .tiers
                    .get(&key.slow_tier(), cache_ttl.as_duration(), loader)
                    .await;
            }
        };

        // 4. Élu : le verrou couvre le loader ET les deux écritures
        tracing::debug!(key = %key, lock_ttl = ?lock_ttl, "elected as refresher");
        let refreshed = self.refresh(key, cache_ttl, loader).await;

        // Relâché quelle que soit l'issue du refresh
        if let Err(e) = self.lock.release(lease).await {
            // La valeur est déjà écrite ; le verrou expirera de lui-même après lock_ttl
            tracing::warn!(key = %key, error = %e, "failed to release refresh lock");
        }

        refreshed
    }

    /// Supprime tier rapide et tier lent de chaque clé
    pub async fn invalidate(&self, keys: &[CacheKey]) -> Result<u64> {
        let slow_keys: Vec<String> = keys.iter().map(CacheKey::slow_tier).collect();
        let all: Vec<&str> = keys
            .iter()
            .map(CacheKey::as_str)
            .chain(slow_keys.iter().map(String::as_str))
            .collect();

        self.tiers.store().delete(&all).await
    }

    async fn refresh<T, F, Fut, E>(&self, key: &CacheKey, cache_ttl: Ttl, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let value = loader().await.map_err(|e| CacheError::loader(key.as_str(), e))?;

        // Tier lent d'abord (2x), puis tier rapide
        let slow_key = CacheKey::try_new(key.slow_tier())?;
        let slow = CacheEntry::new(slow_key, value, cache_ttl.doubled());
        self.tiers.put(&slow).await?;

        let fast = CacheEntry::new(key.clone(), slow.into_value(), cache_ttl);
        self.tiers.put(&fast).await?;

        Ok(fast.into_value())
    }
}
