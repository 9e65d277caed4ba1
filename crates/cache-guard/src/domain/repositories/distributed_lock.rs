// crates/cache-guard/src/domain/repositories/distributed_lock.rs

use crate::errors::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Preuve de détention d'un verrou.
///
/// Volontairement non `Clone` : `release` la consomme, un détenteur ne peut pas relâcher deux fois.
/// Le `token` est unique par acquisition et sert au relâchement conditionnel.
#[derive(Debug)]
pub struct LockLease {
    key: String,
    token: String,
    ttl: Duration,
    acquired_at: Instant,
}

impl LockLease {
    pub fn new(key: impl Into<String>, token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            ttl,
            acquired_at: Instant::now(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Estimation locale : passé ce délai, le store a pu réattribuer le verrou
    pub fn is_expired(&self) -> bool {
        self.acquired_at.elapsed() >= self.ttl
    }
}

/// Issue d'une tentative d'acquisition.
///
/// `Contended` n'est PAS une erreur : quelqu'un d'autre rafraîchit déjà.
/// L'échec (store injoignable) passe par le `Err` du `Result` englobant.
#[derive(Debug)]
#[must_use = "an acquired lease must be released"]
pub enum LockAcquisition {
    Acquired(LockLease),
    Contended,
}

impl LockAcquisition {
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }

    pub fn into_lease(self) -> Option<LockLease> {
        match self {
            Self::Acquired(lease) => Some(lease),
            Self::Contended => None,
        }
    }
}

/// Verrou d'exclusion mutuelle auto-expirant, partagé entre process.
///
/// Une seule tentative par appel : pas d'attente, pas de file, pas de réentrance.
#[async_trait]
pub trait DistributedLock: Send + Sync {
    async fn try_acquire(&self, lock_key: &str, ttl: Duration) -> Result<LockAcquisition>;

    async fn release(&self, lease: LockLease) -> Result<()>;
}
