// crates/cache-guard/src/infrastructure/locking/store_lock.rs

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::repositories::{DistributedLock, KeyValueStore, LockAcquisition, LockLease};
use crate::errors::Result;

/// Verrou distribué posé sur le store : existence de la clé = détenu, absence = libre.
///
/// La valeur écrite est un token UUID v7 propre à chaque acquisition. Le relâchement est un
/// compare-and-delete sur ce token : un détenteur dont le bail a expiré ne peut pas supprimer
/// le verrou repris entre-temps par quelqu'un d'autre.
pub struct StoreLock {
    store: Arc<dyn KeyValueStore>,
}

impl StoreLock {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DistributedLock for StoreLock {
    async fn try_acquire(&self, lock_key: &str, ttl: Duration) -> Result<LockAcquisition> {
        let token = Uuid::now_v7().to_string();

        if self.store.set_if_absent(lock_key, token.as_bytes(), ttl).await? {
            Ok(LockAcquisition::Acquired(LockLease::new(lock_key, token, ttl)))
        } else {
            Ok(LockAcquisition::Contended)
        }
    }

    async fn release(&self, lease: LockLease) -> Result<()> {
        let deleted = self
            .store
            .delete_if_equals(lease.key(), lease.token().as_bytes())
            .await?;

        if !deleted {
            tracing::debug!(
                lock_key = lease.key(),
                expired = lease.is_expired(),
                "lock already expired or taken over, nothing to release"
            );
        }
        Ok(())
    }
}
