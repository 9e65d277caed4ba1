// crates/cache-guard/src/domain/value_objects/cache_key.rs

use crate::domain::value_objects::ValueObject;
use crate::errors::{CacheError, Result};
use std::fmt;

/// Clé de base d'une entrée cache.
///
/// Convention : `service:[model:]function:params`, séparateur `:`.
/// Aucune détection de collision si `params` contient lui-même `:`, c'est à l'appelant d'éviter l'ambiguïté.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub const DELIMITER: char = ':';
    pub const SLOW_TIER_SUFFIX: &'static str = ":l2";
    pub const LOCK_SUFFIX: &'static str = ":lock";

    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let key = Self(value.into());
        key.validate()?;
        Ok(key)
    }

    /// Construit `service:segment1:segment2...`
    pub fn compose<I, S>(service: &str, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = service.to_string();
        for segment in segments {
            raw.push(Self::DELIMITER);
            raw.push_str(segment.as_ref());
        }
        Self::try_new(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn slow_tier(&self) -> String {
        format!("{}{}", self.0, Self::SLOW_TIER_SUFFIX)
    }

    pub fn lock(&self) -> String {
        format!("{}{}", self.0, Self::LOCK_SUFFIX)
    }
}

impl ValueObject for CacheKey {
    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(CacheError::config("cache key cannot be empty"));
        }

        if !self.0.is_ascii() || self.0.chars().any(|c| c.is_ascii_whitespace() || c.is_ascii_control()) {
            return Err(CacheError::config(format!(
                "cache key '{}' must be printable ASCII without whitespace",
                self.0.escape_debug()
            )));
        }
        Ok(())
    }
}

impl TryFrom<&str> for CacheKey {
    type Error = CacheError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_new(value)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
