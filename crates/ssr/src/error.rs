//! SSR errors including I/O operations.

use marquee_ssr_core::SsrCoreError;
use thiserror::Error;

/// SSR errors including I/O operations.
#[derive(Error, Debug)]
pub enum SsrError {
    #[error("Core error: {0}")]
    Core(#[from] SsrCoreError),

    #[error("Failed to load server bundle from {path}: {reason}")]
    BundleLoad { path: String, reason: String },

    #[error("Failed to load template from {path}: {reason}")]
    TemplateLoad { path: String, reason: String },

    #[error("JavaScript render failed: {stack}")]
    Render { stack: String },

    #[error("Render reported no outcome")]
    NoOutcome,

    #[error("Worker channel closed")]
    ChannelClosed,

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    #[error("Render pool overloaded, retry after {retry_after_secs}s")]
    Overloaded { retry_after_secs: u32 },
}

pub type Result<T> = std::result::Result<T, SsrError>;

impl SsrError {
    /// Text carried into the error response body: the raw JS stack when the
    /// failure came out of the runtime, the error display otherwise.
    pub fn detail(&self) -> String {
        match self {
            SsrError::Render { stack } => stack.clone(),
            other => other.to_string(),
        }
    }
}
