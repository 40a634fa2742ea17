use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use giromilano_server::giromilano::{GiromilanoClient, GiromilanoConfig};
use giromilano_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Base URLs are overridable for local testing against a mock upstream.
    let mut config = GiromilanoConfig::default();
    if let Ok(base_url) = std::env::var("GIROMILANO_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Ok(status_url) = std::env::var("GIROMILANO_STATUS_URL") {
        config = config.with_status_url(status_url);
    }

    let client = GiromilanoClient::new(config).expect("Failed to create GiroMilano client");
    let state = AppState::new(client);
    let app = create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("GiroMilano transit API listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /               - API index");
    println!("  GET  /health         - Health check");
    println!("  GET  /lines          - All transit lines");
    println!("  GET  /lines/{{id}}     - Line details (stops, geometry)");
    println!("  GET  /stops/{{id}}     - Stop details (serving lines)");
    println!("  GET  /status/metro   - Metro line status");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
