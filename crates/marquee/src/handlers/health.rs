//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (active SSR render check)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting
/// connections. Does NOT touch the SSR pool.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe (active SSR health check).
///
/// Resolves the page source and pushes a probe render through the pool.
/// Returns 200 with health status if healthy, 503 if unhealthy.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let page = match state.source.resolve() {
        Ok(page) => page,
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let status = state.pool.health_check(page.bundle).await;
    if status.healthy {
        (StatusCode::OK, Json(status)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
    }
}
