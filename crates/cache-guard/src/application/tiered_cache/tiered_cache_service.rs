// crates/cache-guard/src/application/tiered_cache/tiered_cache_service.rs

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::CacheEntry;
use crate::domain::repositories::KeyValueStore;
use crate::domain::value_objects::{CacheKey, Ttl};
use crate::errors::{CacheError, Result};

/// Cache-aside sur un seul tier : probe, loader sur miss, remplissage.
///
/// Aucune protection contre le stampede : N miss concurrents = N appels au loader.
/// À réserver aux clés froides / peu sollicitées, ou comme brique du `StampedeGuard`.
#[derive(Clone)]
pub struct TieredCache {
    store: Arc<dyn KeyValueStore>,
}

impl TieredCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Lecture seule. `Ok(None)` = miss, une erreur de store n'est jamais un miss.
    pub async fn probe<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.store.get(key).await? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| CacheError::decode::<T>(key, e))?;
                tracing::debug!(key, "cache hit");
                Ok(Some(value))
            }
            None => {
                tracing::debug!(key, "cache miss");
                Ok(None)
            }
        }
    }

    pub async fn put<T>(&self, entry: &CacheEntry<T>) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = entry.encode()?;
        self.store
            .put(entry.key().as_str(), &bytes, entry.ttl().as_duration())
            .await
    }

    pub async fn get<T, F, Fut, E>(&self, key: &str, ttl: Duration, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        // Un ttl nul ne doit déclencher aucun appel au store
        let ttl = Ttl::try_new(ttl)?;
        let key = CacheKey::try_new(key)?;

        // 1. Probe
        if let Some(value) = self.probe::<T>(key.as_str()).await? {
            return Ok(value);
        }

        // 2. Miss : on interroge l'origine. En cas d'échec, rien n'est écrit.
        let value = loader().await.map_err(|e| CacheError::loader(key.as_str(), e))?;

        // 3. Remplissage
        let entry = CacheEntry::new(key, value, ttl);
        self.put(&entry).await?;

        Ok(entry.into_value())
    }
}
