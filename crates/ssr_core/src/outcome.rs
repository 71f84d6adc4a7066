//! Result of a single render invocation.

/// What the application's `render` function decided for a URL.
///
/// The JS side signals a redirect by assigning `context.url`; the driver
/// script converts that out-parameter into an explicit variant before the
/// result crosses back into Rust, so request logic never inspects a context
/// object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Markup to substitute into the HTML template.
    Rendered(String),
    /// Respond with a redirect to this location instead of a document.
    Redirect(String),
}
