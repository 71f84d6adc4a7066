//! SSR worker pool for concurrent rendering.
//!
//! The pool manages multiple worker threads, distributing render requests
//! using round-robin scheduling with backpressure support.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use marquee_ssr_core::{RenderOutcome, SsrPoolConfig};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::{
    error::{Result, SsrError},
    worker::{RenderRequest, SsrWorker},
};

/// A pool of SSR workers for concurrent rendering.
pub struct SsrPool {
    workers: Vec<SsrWorker>,
    next_worker: AtomicUsize,
    config: Arc<SsrPoolConfig>,
}

impl SsrPool {
    /// Create a new SSR pool and spawn its worker threads.
    pub fn new(config: SsrPoolConfig) -> Self {
        let config = Arc::new(config);

        let workers: Vec<_> = (0..config.worker_count)
            .map(|_| SsrWorker::spawn(Arc::clone(&config)))
            .collect();

        tracing::info!(
            worker_count = workers.len(),
            node_env = %config.node_env,
            "SSR pool initialized"
        );

        Self {
            workers,
            next_worker: AtomicUsize::new(0),
            config,
        }
    }

    /// Render one URL against the given server-entry bundle.
    ///
    /// Uses round-robin scheduling to distribute requests across workers.
    /// Returns `Overloaded` error if no workers have capacity.
    pub async fn render(&self, bundle: Arc<str>, url: &str) -> Result<RenderOutcome> {
        // Check capacity before queueing (backpressure)
        let available = self.workers.iter().filter(|w| w.has_capacity()).count();
        if available == 0 {
            return Err(SsrError::Overloaded {
                retry_after_secs: 5,
            });
        }

        let (response_tx, response_rx) = oneshot::channel();

        // Round-robin worker selection
        let worker_idx = self.next_worker.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        let worker = &self.workers[worker_idx];

        // Send request to worker
        worker
            .sender()
            .send(RenderRequest {
                bundle,
                url: url.to_string(),
                response_tx,
            })
            .await
            .map_err(|_| SsrError::ChannelClosed)?;

        // Wait for response with timeout
        let timeout = tokio::time::Duration::from_millis(self.config.render_timeout_ms);
        match tokio::time::timeout(timeout, response_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SsrError::ChannelClosed),
            Err(_) => Err(SsrError::Timeout(self.config.render_timeout_ms)),
        }
    }

    /// Get pool statistics (passive - no I/O).
    pub fn stats(&self) -> SsrPoolStats {
        SsrPoolStats {
            worker_count: self.workers.len(),
            workers_with_capacity: self.workers.iter().filter(|w| w.has_capacity()).count(),
        }
    }

    /// Active health check - pushes a probe render through a worker.
    pub async fn health_check(&self, bundle: Arc<str>) -> HealthStatus {
        let start = std::time::Instant::now();

        match self.render(bundle, "/").await {
            Ok(_) => HealthStatus {
                healthy: true,
                latency_ms: start.elapsed().as_millis() as u64,
                stats: self.stats(),
                error: None,
            },
            Err(e) => HealthStatus {
                healthy: false,
                latency_ms: start.elapsed().as_millis() as u64,
                stats: self.stats(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Pool statistics (passive data).
#[derive(Debug, Clone, Serialize)]
pub struct SsrPoolStats {
    pub worker_count: usize,
    pub workers_with_capacity: usize,
}

/// Health check result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency_ms: u64,
    pub stats: SsrPoolStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
