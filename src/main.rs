mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env loaded: {e}");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::HostConfig::from_env().expect("invalid configuration");
    if config.runtime.backend_url.is_empty() || config.runtime.anon_key.is_empty() {
        tracing::warn!("ROSTER_BACKEND_URL/ROSTER_ANON_KEY not set; relying on build-time client config");
    }

    let app = routes::leptos_app(&config.runtime).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "roster listening");
    axum::serve(listener, app).await.expect("server failed");
}
