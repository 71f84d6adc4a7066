//! Shared application state passed to request handlers.
//!
//! Cloned for each request handler; everything inside is read-only after
//! startup, so handlers never coordinate through ambient globals.

use std::sync::Arc;

use marquee_ssr::SsrPool;
use tokio::sync::broadcast;

use crate::source::RenderSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Mode-resolved template and bundle source.
    pub source: Arc<RenderSource>,
    /// SSR worker pool.
    pub pool: Arc<SsrPool>,
    /// Shutdown signal sender for SSE connections.
    shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(source: RenderSource, pool: SsrPool) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            source: Arc::new(source),
            pool: Arc::new(pool),
            shutdown_tx,
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all SSE connections to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
