//! JsRuntime execution for a single render.
//!
//! This module contains the impure side-effect code that executes
//! JavaScript using deno_core's JsRuntime.

use std::cell::RefCell;

use deno_core::{extension, op2, JsRuntime, RuntimeOptions};
use marquee_ssr_core::{generate_driver, generate_prelude, RenderOutcome};

use crate::error::{Result, SsrError};

/// Script name the server-entry bundle is evaluated under. JS stack traces
/// reference it; the dev server rewrites it back to the on-disk path.
pub const ENTRY_SCRIPT_NAME: &str = "<entry-server>";

const PRELUDE_SCRIPT_NAME: &str = "<prelude>";
const DRIVER_SCRIPT_NAME: &str = "<driver>";

thread_local! {
    /// Thread-local slot for the render outcome.
    /// This is used because deno_core ops can't easily return complex values.
    static OUTCOME: RefCell<Option<RenderOutcome>> = const { RefCell::new(None) };
}

/// Custom op to receive rendered markup from JavaScript.
#[op2(fast)]
fn op_emit_html(#[string] markup: String) {
    OUTCOME.with(|cell| {
        *cell.borrow_mut() = Some(RenderOutcome::Rendered(markup));
    });
}

/// Custom op to receive a redirect location from JavaScript.
#[op2(fast)]
fn op_emit_redirect(#[string] location: String) {
    OUTCOME.with(|cell| {
        *cell.borrow_mut() = Some(RenderOutcome::Redirect(location));
    });
}

extension!(ssr_ext, ops = [op_emit_html, op_emit_redirect]);

/// Evaluate the server-entry bundle and drive one render for `url`.
///
/// **MUST be called from a dedicated thread** - `JsRuntime` is not `Send`.
/// Uses pure `generate_prelude`/`generate_driver` from the core crate.
pub async fn render(bundle_code: &str, url: &str, node_env: &str) -> Result<RenderOutcome> {
    // Pure calls from core - generate the scripts around the bundle
    let prelude = generate_prelude(node_env);
    let driver = generate_driver(url).map_err(SsrError::Core)?;

    // Discard any outcome left behind by an earlier render on this thread
    OUTCOME.with(|cell| cell.borrow_mut().take());

    // Impure: Create and execute JsRuntime
    let mut runtime = JsRuntime::new(RuntimeOptions {
        extensions: vec![ssr_ext::init()],
        ..Default::default()
    });

    runtime
        .execute_script(PRELUDE_SCRIPT_NAME, prelude)
        .map_err(|e| SsrError::Render {
            stack: e.to_string(),
        })?;

    // Evaluate the bundle; this defines globalThis.render
    runtime
        .execute_script(ENTRY_SCRIPT_NAME, bundle_code.to_string())
        .map_err(|e| SsrError::Render {
            stack: e.to_string(),
        })?;

    // Call render(url, context) and report the outcome through the ops
    runtime
        .execute_script(DRIVER_SCRIPT_NAME, driver)
        .map_err(|e| SsrError::Render {
            stack: e.to_string(),
        })?;

    // Drain microtasks the bundle may have queued during evaluation
    runtime
        .run_event_loop(Default::default())
        .await
        .map_err(|e| SsrError::Render {
            stack: e.to_string(),
        })?;

    // Extract the outcome from thread-local storage
    OUTCOME
        .with(|cell| cell.borrow_mut().take())
        .ok_or(SsrError::NoOutcome)
}
