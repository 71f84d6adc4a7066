//! Pool configuration with validation.

use crate::error::{Result, SsrCoreError};

/// Configuration for the SSR worker pool (validated).
#[derive(Clone, Debug)]
pub struct SsrPoolConfig {
    /// Number of worker threads.
    pub worker_count: usize,
    /// Maximum pending requests per worker before rejecting.
    pub max_pending: usize,
    /// Render timeout in milliseconds.
    pub render_timeout_ms: u64,
    /// NODE_ENV value handed to the bundle.
    pub node_env: String,
}

impl SsrPoolConfig {
    /// Create and validate pool config.
    pub fn new(
        worker_count: usize,
        max_pending: usize,
        render_timeout_ms: u64,
        node_env: String,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(SsrCoreError::InvalidWorkerCount);
        }
        if render_timeout_ms == 0 {
            return Err(SsrCoreError::InvalidTimeout);
        }

        Ok(Self {
            worker_count,
            max_pending,
            render_timeout_ms,
            node_env,
        })
    }

    /// Create with defaults (100 pending, 10s timeout, production).
    pub fn with_defaults(worker_count: usize) -> Result<Self> {
        Self::new(worker_count, 100, 10_000, "production".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_valid() {
        let config = SsrPoolConfig::new(4, 100, 10_000, "production".to_string()).unwrap();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.max_pending, 100);
        assert_eq!(config.render_timeout_ms, 10_000);
        assert_eq!(config.node_env, "production");
    }

    #[test]
    fn test_pool_config_zero_workers() {
        let result = SsrPoolConfig::new(0, 100, 10_000, "production".to_string());
        assert!(matches!(result, Err(SsrCoreError::InvalidWorkerCount)));
    }

    #[test]
    fn test_pool_config_zero_timeout() {
        let result = SsrPoolConfig::new(4, 100, 0, "development".to_string());
        assert!(matches!(result, Err(SsrCoreError::InvalidTimeout)));
    }

    #[test]
    fn test_pool_config_with_defaults() {
        let config = SsrPoolConfig::with_defaults(8).unwrap();
        assert_eq!(config.worker_count, 8);
        assert_eq!(config.max_pending, 100);
        assert_eq!(config.render_timeout_ms, 10_000);
        assert_eq!(config.node_env, "production");
    }
}
