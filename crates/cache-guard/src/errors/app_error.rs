use crate::errors::{CacheError, ErrorCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize, Clone)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<CacheError> for AppError {
    fn from(error: CacheError) -> Self {
        match error {
            // 1. Cas : mauvaise configuration du cache (400 côté appelant)
            CacheError::Config { reason } => Self {
                code: ErrorCode::ValidationFailed,
                message: "Invalid cache configuration".to_string(),
                details: Some(serde_json::json!({ "reason": reason })),
            },

            // 2. Cas : Redis down (503) - l'appelant décide du retry
            CacheError::Transport { operation, key, message } => {
                tracing::error!(operation, key = %key, "Cache store failure: {}", message);
                Self::new(
                    ErrorCode::ServiceUnavailable,
                    "Cache store is unavailable. Please try again later.",
                )
            }

            // 3. Cas : l'origine a échoué (502/500)
            CacheError::Loader { key, source } => {
                tracing::error!(key = %key, "Origin fetch failed: {}", source);
                Self::new(
                    ErrorCode::InfrastructureFailure,
                    "Upstream data source failed",
                )
            }

            // 4. Cas : donnée corrompue ou incompatible (500)
            // On masque le détail au client
            CacheError::Serialization { .. } | CacheError::TypeMismatch { .. } => {
                tracing::error!("Cache payload error: {}", error);
                Self::new(
                    ErrorCode::InternalError,
                    "An unexpected error occurred. Please try again later.",
                )
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
