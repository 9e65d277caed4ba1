use crate::errors::{AppError, CacheError};

/// RESULT DU CACHE (Interne)
/// Utilisé par : Store, Lock, TieredCache, StampedeGuard.
pub type Result<T> = std::result::Result<T, CacheError>;

/// RESULT D'APPLICATION (Frontière)
/// Utilisé par : le code de traitement des requêtes qui consomme le cache (HTTP, gRPC...).
pub type AppResult<T> = std::result::Result<T, AppError>;
