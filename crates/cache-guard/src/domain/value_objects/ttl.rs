// crates/cache-guard/src/domain/value_objects/ttl.rs

use crate::domain::value_objects::ValueObject;
use crate::errors::{CacheError, Result};
use std::fmt;
use std::time::Duration;

/// Durée de vie d'une entrée. Toujours strictement positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(Duration);

impl Ttl {
    pub fn try_new(duration: Duration) -> Result<Self> {
        let ttl = Self(duration);
        ttl.validate()?;
        Ok(ttl)
    }

    pub fn from_secs(secs: u64) -> Result<Self> {
        Self::try_new(Duration::from_secs(secs))
    }

    pub fn from_millis(millis: u64) -> Result<Self> {
        Self::try_new(Duration::from_millis(millis))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// TTL du tier lent : exactement le double du TTL demandé
    pub fn doubled(&self) -> Self {
        Self(self.0.saturating_mul(2))
    }

    /// Millisecondes pour `SET ... PX`. Arrondi au supérieur : 1µs ne doit pas devenir 0ms.
    pub fn as_store_millis(&self) -> i64 {
        let millis = self.0.as_nanos().div_ceil(1_000_000);
        i64::try_from(millis).unwrap_or(i64::MAX)
    }
}

impl ValueObject for Ttl {
    fn validate(&self) -> Result<()> {
        if self.0.is_zero() {
            return Err(CacheError::config("ttl must be strictly positive"));
        }
        Ok(())
    }
}

impl TryFrom<Duration> for Ttl {
    type Error = CacheError;

    fn try_from(duration: Duration) -> Result<Self> {
        Self::try_new(duration)
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
