//! SSR Worker Pool - Imperative Shell.
//!
//! This crate orchestrates I/O operations using pure functions from
//! `marquee_ssr_core`. It provides a worker pool that evaluates a
//! JavaScript server-entry bundle per request using `deno_core`.
//!
//! # Architecture
//!
//! - **Functional Core** (`marquee_ssr_core`): template substitution,
//!   driver/prelude generation, config validation
//! - **Imperative Shell** (this crate): bundle I/O, threading, JsRuntime
//!   execution
//!
//! The bundle travels with each render request rather than being baked into
//! the pool, so callers decide the caching policy: a production server hands
//! the same `Arc<str>` to every request while a development server re-reads
//! the bundle from disk each time.
//!
//! # Example
//!
//! ```ignore
//! use marquee_ssr::{load_bundle, RenderOutcome, SsrPool, SsrPoolConfig};
//! use std::path::Path;
//!
//! let pool = SsrPool::new(SsrPoolConfig::with_defaults(4).unwrap());
//! let bundle = load_bundle(Path::new("dist/server/entry-server.js")).unwrap();
//!
//! match pool.render(bundle, "/about").await.unwrap() {
//!     RenderOutcome::Rendered(markup) => { /* substitute into template */ }
//!     RenderOutcome::Redirect(location) => { /* 301 */ }
//! }
//! ```

mod bundle;
mod error;
mod pool;
mod runtime;
mod worker;

// Re-export core types for convenience
pub use marquee_ssr_core::{
    inject_app_html, RenderOutcome, SsrCoreError, SsrPoolConfig, MAX_URL_LEN, SSR_OUTLET,
};

// Export shell types
pub use bundle::load_bundle;
pub use error::{Result, SsrError};
pub use pool::{HealthStatus, SsrPool, SsrPoolStats};
pub use runtime::ENTRY_SCRIPT_NAME;
