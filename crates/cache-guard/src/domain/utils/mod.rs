use crate::errors::{CacheError, Result};

/// Entier strictement positif lu depuis une variable d'environnement
pub(crate) fn parse_positive(var: &str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(CacheError::config(format!("Invalid {var}: '{raw}'"))),
        Ok(value) => Ok(value),
    }
}
