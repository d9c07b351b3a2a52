//! Error types for bannerctl-core
//!
//! "No such banner" is not an error: operations return `Ok(None)`.

use std::time::Duration;

use thiserror::Error;

use crate::db::StoreError;
use crate::models::ValidationError;

pub type BannerResult<T> = Result<T, BannerError>;

#[derive(Error, Debug)]
pub enum BannerError {
    /// Malformed or incomplete request
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Query execution, connectivity or decoding failure, never retried here
    #[error("backend failure: {0}")]
    Backend(#[from] StoreError),

    /// Caller deadline elapsed; the in-flight query was dropped
    #[error("operation exceeded deadline of {}ms", .timeout.as_millis())]
    DeadlineExceeded { timeout: Duration },
}

impl BannerError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
