//! Pure SSR logic - no I/O, no async, no side effects.
//!
//! This crate provides:
//! - Template substitution for the SSR outlet marker
//! - The render outcome type (document vs. redirect)
//! - Prelude and per-request driver script generation
//! - Pool configuration with validation
//!
//! # Example
//!
//! ```
//! use marquee_ssr_core::{generate_driver, inject_app_html, SsrPoolConfig, SSR_OUTLET};
//!
//! // Substitute rendered markup into a template
//! let template = format!("<body>{SSR_OUTLET}</body>");
//! let html = inject_app_html(&template, "<p>hello</p>");
//! assert_eq!(html, "<body><p>hello</p></body>");
//!
//! // Generate the driver script for a request URL (pure string transformation)
//! let driver = generate_driver("/about?tab=1").unwrap();
//! assert!(driver.contains("JSON.parse"));
//!
//! // Create pool config with validation
//! let pool_config = SsrPoolConfig::with_defaults(4).unwrap();
//! assert_eq!(pool_config.worker_count, 4);
//! ```

mod config;
mod driver;
mod error;
mod outcome;
mod polyfills;
mod template;

pub use config::SsrPoolConfig;
pub use driver::generate_driver;
pub use error::{Result, SsrCoreError, MAX_URL_LEN};
pub use outcome::RenderOutcome;
pub use polyfills::generate_prelude;
pub use template::{inject_app_html, SSR_OUTLET};
