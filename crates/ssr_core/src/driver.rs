//! Per-request driver script generation.
//!
//! The driver runs after the server-entry bundle has been evaluated: it
//! builds the request context, calls `render(url, context)`, and reports the
//! outcome through the host ops. A redirect requested via `context.url` wins
//! over any returned markup.

use crate::error::{Result, SsrCoreError, MAX_URL_LEN};

/// Generate the driver script for one request URL.
///
/// Uses safe JSON injection via double-encoding so a hostile request path
/// cannot break out of the string literal.
pub fn generate_driver(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(SsrCoreError::EmptyUrl);
    }
    if url.len() > MAX_URL_LEN {
        return Err(SsrCoreError::UrlTooLong {
            len: url.len(),
            max: MAX_URL_LEN,
        });
    }

    // Double-encode: JS string literal containing a JSON document
    let url_json =
        serde_json::to_string(url).map_err(|e| SsrCoreError::Serialization(e.to_string()))?;
    let url_escaped =
        serde_json::to_string(&url_json).map_err(|e| SsrCoreError::Serialization(e.to_string()))?;

    Ok(format!(
        r#"
(() => {{
    const url = JSON.parse({url_escaped});
    const context = {{}};
    const markup = globalThis.render(url, context);
    if (context.url !== undefined && context.url !== null) {{
        Deno.core.ops.op_emit_redirect(String(context.url));
    }} else {{
        Deno.core.ops.op_emit_html(String(markup));
    }}
}})();
"#
    ))
}
