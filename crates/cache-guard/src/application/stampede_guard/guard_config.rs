// crates/cache-guard/src/application/stampede_guard/guard_config.rs

use crate::domain::utils::parse_positive;
use crate::errors::Result;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// Durée max d'un refresh élu. Borne aussi la staleness si le détenteur crashe.
    pub lock_ttl: Duration,
    /// TTL du tier rapide. Le tier lent vit deux fois plus longtemps.
    pub cache_ttl: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(180),
        }
    }
}

impl GuardConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let lock_ttl = match std::env::var("CACHE_LOCK_TTL_MS") {
            Ok(raw) => Duration::from_millis(parse_positive("CACHE_LOCK_TTL_MS", &raw)?),
            Err(_) => defaults.lock_ttl,
        };

        let cache_ttl = match std::env::var("CACHE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(parse_positive("CACHE_TTL_SECS", &raw)?),
            Err(_) => defaults.cache_ttl,
        };

        Ok(Self { lock_ttl, cache_ttl })
    }

    pub fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        self.lock_ttl = ttl;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
