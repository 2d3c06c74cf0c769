//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the Leptos shell for the three app paths, the WASM bundle under
//! `/pkg`, the browser runtime config and a health check. All auth, data and
//! file traffic goes from the browser straight to the hosted platform; this
//! process holds no session state.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, RuntimeConfig};

/// Non-Leptos routes.
pub fn host_routes(runtime: &RuntimeConfig) -> Router {
    let script = Arc::new(runtime.to_script());
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/runtime-config.js",
            get(move || {
                let script = Arc::clone(&script);
                async move {
                    (
                        [
                            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
                            (header::CACHE_CONTROL, "no-store"),
                        ],
                        script.as_str().to_owned(),
                    )
                        .into_response()
                }
            }),
        )
}

/// Host routes + Leptos SSR + static assets.
///
/// # Errors
///
/// Returns `ConfigError::Leptos` if the Leptos configuration cannot be loaded (missing or
/// malformed `[package.metadata.leptos]` section and no `LEPTOS_*` env).
pub fn leptos_app(runtime: &RuntimeConfig) -> Result<Router, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(host_routes(runtime)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback(redirect_home)
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Unknown paths render the same screens as `/`.
async fn redirect_home() -> Redirect {
    Redirect::temporary("/")
}
