use std::{env, time::Duration};

/// Locations inside the project root, matching the frontend build layout.
pub const DEV_TEMPLATE: &str = "index.html";
pub const PROD_TEMPLATE: &str = "dist/client/index.html";
pub const SERVER_ENTRY: &str = "dist/server/entry-server.js";
pub const CLIENT_ASSETS: &str = "dist/client";

/// Tuning configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SSR worker threads (default: available parallelism)
    pub worker_count: usize,
    /// Maximum queued renders per worker before rejecting (default: 100)
    pub max_pending: usize,
    /// Per-render timeout in milliseconds (default: 10,000)
    pub render_timeout_ms: u64,
    /// Dev watcher poll interval in milliseconds (default: 100)
    pub watch_poll_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SSR_WORKERS` - SSR worker threads (default: available parallelism)
    /// - `SSR_MAX_PENDING` - Queued renders per worker (default: 100)
    /// - `SSR_RENDER_TIMEOUT_MS` - Per-render timeout (default: 10,000)
    /// - `WATCH_POLL_MS` - Dev watcher poll interval (default: 100)
    pub fn from_env() -> Self {
        let default_workers = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);

        Self {
            worker_count: env::var("SSR_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_workers),
            max_pending: env::var("SSR_MAX_PENDING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            render_timeout_ms: env::var("SSR_RENDER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            watch_poll_ms: env::var("WATCH_POLL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Get the dev watcher poll interval as a Duration.
    pub fn watch_poll_interval(&self) -> Duration {
        Duration::from_millis(self.watch_poll_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
