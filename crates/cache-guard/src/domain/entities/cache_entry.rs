// crates/cache-guard/src/domain/entities/cache_entry.rs

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::domain::value_objects::{CacheKey, Ttl};
use crate::errors::{CacheError, Result};

/// Une ligne du cache : clé, valeur typée, durée de vie.
/// Créée au remplissage, écrasée au refresh, expirée passivement par le store.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    key: CacheKey,
    value: T,
    ttl: Ttl,
}

impl<T> CacheEntry<T> {
    pub fn new(key: CacheKey, value: T, ttl: Ttl) -> Self {
        Self { key, value, ttl }
    }

    /// Validation depuis des types bruts (ttl nul => ConfigError)
    pub fn try_new(key: impl Into<String>, value: T, ttl: Duration) -> Result<Self> {
        Ok(Self::new(CacheKey::try_new(key)?, value, Ttl::try_new(ttl)?))
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Serialize> CacheEntry<T> {
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value).map_err(|e| CacheError::encode(self.key.as_str(), e))
    }
}

impl<T: DeserializeOwned> CacheEntry<T> {
    pub fn decode(key: CacheKey, bytes: &[u8], ttl: Ttl) -> Result<Self> {
        let value = serde_json::from_slice(bytes).map_err(|e| CacheError::decode::<T>(key.as_str(), e))?;
        Ok(Self::new(key, value, ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rsp {
        list: String,
    }

    #[test]
    fn test_zero_ttl_entry_is_rejected() {
        let result = CacheEntry::try_new("gw:rsp:1", Rsp { list: "x".into() }, Duration::ZERO);
        assert!(matches!(result, Err(CacheError::Config { .. })));
    }

    #[test]
    fn test_encode_then_decode_preserves_value() {
        let entry = CacheEntry::try_new("gw:rsp:1", vec![Rsp { list: "Hello world".into() }], Duration::from_secs(180)).unwrap();
        let bytes = entry.encode().unwrap();

        let decoded = CacheEntry::<Vec<Rsp>>::decode(entry.key().clone(), &bytes, entry.ttl()).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_decode_into_incompatible_shape_is_type_mismatch() {
        let key = CacheKey::try_new("gw:rsp:1").unwrap();
        let ttl = Ttl::from_secs(1).unwrap();

        let result = CacheEntry::<Rsp>::decode(key, br#"[{"list":"a"}]"#, ttl);
        assert!(matches!(result, Err(CacheError::TypeMismatch { .. })));
    }
}
