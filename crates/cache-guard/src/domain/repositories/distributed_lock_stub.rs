// crates/cache-guard/src/domain/repositories/distributed_lock_stub.rs

use crate::domain::repositories::{DistributedLock, LockAcquisition, LockLease};
use crate::errors::{CacheError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Verrou en mémoire pour piloter chaque branche du guard de façon déterministe.
#[derive(Default)]
pub struct DistributedLockStub {
    pub held: Mutex<HashSet<String>>,
    pub released: Mutex<Vec<String>>,
    pub acquire_calls: AtomicUsize,
    /// Toute tentative répond `Contended`
    pub force_contended: bool,
    /// Toute opération échoue comme un store injoignable
    pub fail_all: bool,
}

impl DistributedLockStub {
    pub fn contended() -> Self {
        Self {
            force_contended: true,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn is_held(&self, lock_key: &str) -> bool {
        self.held.lock().unwrap().contains(lock_key)
    }

    pub fn release_count(&self) -> usize {
        self.released.lock().unwrap().len()
    }
}

#[async_trait]
impl DistributedLock for DistributedLockStub {
    async fn try_acquire(&self, lock_key: &str, ttl: Duration) -> Result<LockAcquisition> {
        self.acquire_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all {
            return Err(CacheError::transport("SET NX", lock_key, "Lock Down"));
        }
        if self.force_contended || !self.held.lock().unwrap().insert(lock_key.to_string()) {
            return Ok(LockAcquisition::Contended);
        }
        Ok(LockAcquisition::Acquired(LockLease::new(lock_key, "stub", ttl)))
    }

    async fn release(&self, lease: LockLease) -> Result<()> {
        if self.fail_all {
            return Err(CacheError::transport("DEL", lease.key(), "Lock Down"));
        }
        self.held.lock().unwrap().remove(lease.key());
        self.released.lock().unwrap().push(lease.key().to_string());
        Ok(())
    }
}
