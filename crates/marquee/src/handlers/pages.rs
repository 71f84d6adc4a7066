//! The universal render handler.
//!
//! Every path and method that no explicit route or static file claims lands
//! here and is rendered by the application bundle.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use marquee_ssr::{inject_app_html, RenderOutcome, SsrError};

use crate::state::AppState;

/// Catch-all dispatcher: render the application for any URL.
pub async fn render_page(State(state): State<AppState>, req: Request) -> Response {
    let url = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    match render_flow(&state, &url).await {
        Ok(response) => response,
        Err(err) => error_response(&state, &url, err),
    }
}

/// Resolve the template and bundle, render, and emit the document or the
/// redirect the application asked for.
async fn render_flow(state: &AppState, url: &str) -> Result<Response, SsrError> {
    let page = state.source.resolve()?;

    match state.pool.render(page.bundle, url).await? {
        RenderOutcome::Redirect(location) => {
            Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
        }
        RenderOutcome::Rendered(markup) => {
            let html = inject_app_html(&page.template, &markup);
            Ok(Html(html).into_response())
        }
    }
}

/// Shared failure path: log the error text and echo it into the response
/// body. The status is set to 500 explicitly so body and status agree.
fn error_response(state: &AppState, url: &str, err: SsrError) -> Response {
    let message = state.source.fix_stack_trace(&err.detail());

    tracing::error!(%url, "Render failed: {message}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "statusCode": 500,
            "error": "Internal Server Error",
            "message": message,
        })),
    )
        .into_response()
}
