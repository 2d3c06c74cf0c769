use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

use super::*;

fn runtime() -> RuntimeConfig {
    RuntimeConfig {
        backend_url: "https://db.example.test".to_owned(),
        anon_key: "anon".to_owned(),
        site_url: String::new(),
    }
}

async fn get_path(app: Router, path: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let response = get_path(host_routes(&runtime()), "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn runtime_config_is_uncached_javascript() {
    let response = get_path(host_routes(&runtime()), "/runtime-config.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("window.ROSTER_CONFIG = "));
    assert!(body.contains("\"anon_key\":\"anon\""));
}

#[tokio::test]
async fn unknown_host_route_is_not_found_without_leptos() {
    let response = get_path(host_routes(&runtime()), "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_home_points_at_root() {
    let response = redirect_home().await.into_response();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/");
}
