//! Development-only handlers for live reload.
//!
//! Only routed when the server runs in development mode.

use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};

use crate::state::AppState;

/// GET /_dev/events - SSE endpoint for live-reload signals.
///
/// Browsers connect to this endpoint to receive reload notifications.
/// - "connected" event: sent once on subscribe
/// - "reload" event: signals the browser to refresh the page
///
/// The stream closes when the server shuts down.
pub async fn dev_events(State(state): State<AppState>) -> Response {
    let Some(server) = state.source.dev_server() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut reload_rx = server.subscribe_reload();
    let mut shutdown_rx = state.subscribe_shutdown();

    let stream = async_stream::stream! {
        // Send initial connection event
        yield Ok::<_, Infallible>(Event::default().event("connected").data("{}"));

        loop {
            tokio::select! {
                // Reload signal received
                Ok(()) = reload_rx.recv() => {
                    yield Ok(Event::default().event("reload").data("{}"));
                }
                // Shutdown signal - close connection
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    };

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
