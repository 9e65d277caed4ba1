// crates/cache-guard/src/errors/mod.rs

mod app_error;
mod cache_error;
mod error_code;
mod result;

pub use app_error::AppError;
pub use cache_error::{CacheError, LoaderSource};
pub use error_code::ErrorCode;
pub use result::{AppResult, Result};
