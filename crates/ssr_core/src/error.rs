//! Core SSR error types (pure - no I/O variants).

use thiserror::Error;

/// Maximum length of a request URL accepted for rendering (8KB).
pub const MAX_URL_LEN: usize = 8 * 1024;

/// Core SSR errors (pure - no I/O variants).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SsrCoreError {
    #[error("Request URL is empty")]
    EmptyUrl,

    #[error("Request URL too long: {len} bytes (max: {max} bytes)")]
    UrlTooLong { len: usize, max: usize },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Render timeout must be positive")]
    InvalidTimeout,
}

pub type Result<T> = std::result::Result<T, SsrCoreError>;
