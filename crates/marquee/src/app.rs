//! Router assembly: per-mode asset serving ahead of the universal render
//! handler.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{dev::dev_events, health::livez, health::readyz, pages::render_page},
    source::RenderSource,
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// Static assets are tried first (the build output in production, the
/// project root in development); anything unmatched falls through to the
/// render handler. Directory requests never get an auto index, so `/`
/// always reaches the dispatcher.
pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz));

    if state.source.is_dev() {
        router = router.route("/_dev/events", get(dev_events));
    }

    let catch_all = any(render_page).with_state(state.clone());
    let assets_root = match state.source.as_ref() {
        RenderSource::Dev { root, .. } => root.clone(),
        RenderSource::Prod { assets_dir, .. } => assets_dir.clone(),
    };
    let assets = ServeDir::new(assets_root)
        .append_index_html_on_directories(false)
        .call_fallback_on_method_not_allowed(true)
        .fallback(catch_all);
    let router = router.fallback_service(assets);

    // Response compression is a production concern only
    let router = if state.source.is_dev() {
        router
    } else {
        router.layer(CompressionLayer::new())
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::DevServer;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use marquee_ssr::{SsrPool, SsrPoolConfig, SSR_OUTLET};
    use std::{fs, path::Path, time::Duration};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const TEST_BUNDLE: &str = r#"
globalThis.render = (url, context) => {
    if (url.startsWith('/account')) {
        context.url = '/login';
        return '';
    }
    if (url.startsWith('/boom')) {
        throw new Error('render exploded');
    }
    return '<p data-url="' + url + '">rendered</p>';
};
"#;

    fn test_template(title: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>{title}</title></head>\
             <body><div id=\"root\">{SSR_OUTLET}</div></body></html>"
        )
    }

    fn write_build_output(root: &Path, title: &str) {
        fs::create_dir_all(root.join("dist/client")).unwrap();
        fs::create_dir_all(root.join("dist/server")).unwrap();
        fs::write(root.join("dist/client/index.html"), test_template(title)).unwrap();
        fs::write(root.join("dist/client/app.js"), "console.log('client');").unwrap();
        fs::write(root.join("dist/server/entry-server.js"), TEST_BUNDLE).unwrap();
    }

    fn prod_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        write_build_output(dir.path(), "prod app");

        let source = RenderSource::prod(dir.path()).unwrap();
        let pool = SsrPool::new(SsrPoolConfig::with_defaults(1).unwrap());
        let app = create_app(AppState::new(source, pool));
        (dir, app)
    }

    fn dev_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist/server")).unwrap();
        fs::write(dir.path().join("index.html"), test_template("dev app")).unwrap();
        fs::write(dir.path().join("dist/server/entry-server.js"), TEST_BUNDLE).unwrap();

        let server = DevServer::spawn(dir.path(), Duration::from_millis(100)).unwrap();
        let source = RenderSource::dev(dir.path(), server);
        let pool = SsrPool::new(
            SsrPoolConfig::new(1, 100, 10_000, "development".to_string()).unwrap(),
        );
        let app = create_app(AppState::new(source, pool));
        (dir, app)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_render_page() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/some/path?tab=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = body_string(response).await;
        assert!(html.contains("<p data-url=\"/some/path?tab=1\">rendered</p>"));
        assert!(html.contains("<title>prod app</title>"));
        assert!(!html.contains(SSR_OUTLET));
    }

    #[tokio::test]
    async fn test_render_page_any_method() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<p data-url=\"/submit\">rendered</p>"));
    }

    #[tokio::test]
    async fn test_redirect_from_context() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/account/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[tokio::test]
    async fn test_render_error_is_explicit_500_json() {
        let (_dir, app) = prod_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["error"], "Internal Server Error");
        assert!(json["message"].as_str().unwrap().contains("render exploded"));

        // A failed render must not poison the process; the next request
        // still succeeds
        let response = app
            .oneshot(Request::builder().uri("/next").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_asset_served_in_prod() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert_eq!(body, "console.log('client');");
    }

    #[tokio::test]
    async fn test_root_reaches_dispatcher() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<p data-url=\"/\">rendered</p>"));
    }

    #[tokio::test]
    async fn test_prod_template_cached_across_requests() {
        let (dir, app) = prod_app();

        // Mutating the on-disk template after startup must not show up
        fs::write(
            dir.path().join("dist/client/index.html"),
            test_template("mutated"),
        )
        .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("<title>prod app</title>"));
        assert!(!html.contains("mutated"));
    }

    #[tokio::test]
    async fn test_dev_template_and_bundle_fresh_per_request() {
        let (dir, app) = dev_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("<title>dev app</title>"));
        // The dev transform injects the live-reload client
        assert!(html.contains("EventSource('/_dev/events')"));

        // Both the template and the bundle change without a restart
        fs::write(dir.path().join("index.html"), test_template("dev app v2")).unwrap();
        fs::write(
            dir.path().join("dist/server/entry-server.js"),
            "globalThis.render = () => '<p>second build</p>';",
        )
        .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("<title>dev app v2</title>"));
        assert!(html.contains("<p>second build</p>"));
    }

    #[tokio::test]
    async fn test_livez() {
        let (_dir, app) = prod_app();

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
