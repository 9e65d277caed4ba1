// crates/cache-guard/src/domain/repositories/key_value_store.rs

use crate::errors::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Port vers le store clé/valeur externe (Redis en prod).
///
/// `get` distingue l'absence (`Ok(None)`) de la panne (`Err`) : tout le reste du cache repose dessus.
/// Les écritures avec un ttl nul sont rejetées (`CacheError::Config`) avant tout appel réseau.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// SET NX avec expiration, atomique. `true` si la clé a été créée.
    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool>;

    /// Invalidation explicite. Retourne le nombre de clés effectivement supprimées.
    async fn delete(&self, keys: &[&str]) -> Result<u64>;

    /// Supprime `key` seulement si sa valeur vaut `expected` (compare-and-delete atomique).
    async fn delete_if_equals(&self, key: &str, expected: &[u8]) -> Result<bool>;

    async fn set_add(&self, key: &str, members: &[&str]) -> Result<u64>;

    async fn set_remove(&self, key: &str, members: &[&str]) -> Result<u64>;

    async fn set_cardinality(&self, key: &str) -> Result<u64>;
}
