// crates/cache-guard/src/errors/cache_error.rs

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Erreur boxée renvoyée par un loader (l'origine : DB, service distant...)
pub type LoaderSource = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Paramètre invalide détecté avant tout appel réseau (ttl nul, clé vide, env mal formé)
    #[error("Invalid cache configuration: {reason}")]
    Config {
        reason: String,
    },

    /// Store injoignable, timeout, commande rejetée
    #[error("Store {operation} failed for key '{key}': {message}")]
    Transport {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// Payload illisible (JSON tronqué, encodage impossible)
    #[error("Serialization failed for key '{key}': {message}")]
    Serialization {
        key: String,
        message: String,
    },

    /// L'origine a échoué. Aucun tier n'a été écrit.
    #[error("Loader failed for key '{key}': {source}")]
    Loader {
        key: String,
        #[source]
        source: LoaderSource,
    },

    /// Payload bien formé mais dont la forme ne correspond pas au type demandé
    #[error("Type mismatch for key '{key}' (expected {expected}): {message}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        message: String,
    },
}

impl CacheError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config { reason: reason.into() }
    }

    pub fn transport(operation: &'static str, key: impl Into<String>, err: impl ToString) -> Self {
        Self::Transport {
            operation,
            key: key.into(),
            message: err.to_string(),
        }
    }

    pub fn loader<E>(key: impl Into<String>, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Loader {
            key: key.into(),
            source: Arc::new(err),
        }
    }

    /// Traduit une erreur de décodage serde_json.
    /// Category::Data = JSON valide mais mauvaise forme => TypeMismatch.
    pub fn decode<T>(key: impl Into<String>, err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::TypeMismatch {
                key: key.into(),
                expected: std::any::type_name::<T>(),
                message: err.to_string(),
            },
            _ => Self::Serialization {
                key: key.into(),
                message: err.to_string(),
            },
        }
    }

    pub fn encode(key: impl Into<String>, err: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            message: err.to_string(),
        }
    }

    /// Le store est en cause (et non la donnée ou l'origine)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_loader(&self) -> bool {
        matches!(self, Self::Loader { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Sample {
        id: u32,
    }

    #[test]
    fn test_wrong_shape_is_type_mismatch() {
        let err = serde_json::from_str::<Sample>(r#"["not", "an", "object"]"#).unwrap_err();
        let mapped = CacheError::decode::<Sample>("svc:sample:1", err);

        assert!(matches!(mapped, CacheError::TypeMismatch { .. }));
        assert!(mapped.to_string().contains("Sample"));
    }

    #[test]
    fn test_truncated_payload_is_serialization_error() {
        let err = serde_json::from_str::<Sample>(r#"{"id": 4"#).unwrap_err();
        let mapped = CacheError::decode::<Sample>("svc:sample:1", err);

        assert!(matches!(mapped, CacheError::Serialization { .. }));
    }

    #[test]
    fn test_loader_error_keeps_its_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "db down");
        let err = CacheError::loader("svc:sample:1", cause);

        assert!(err.is_loader());
        assert_eq!(err.source().map(|s| s.to_string()), Some("db down".to_string()));
    }
}
