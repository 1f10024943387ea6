use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use scholar_server::app_state::AppState;
use scholar_tools::ToolsConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = std::env::var("SCHOLAR_CONFIG")
        .unwrap_or_else(|_| "config/tools.yaml".to_string());
    let host = std::env::var("SCHOLAR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SCHOLAR_PORT").unwrap_or_else(|_| "3000".to_string());

    // Any configuration problem aborts before the listener binds; the
    // process never accepts connections half-initialized.
    let config = ToolsConfig::load(Path::new(&config_path))
        .expect("Failed to load tool configuration");
    let registry = Arc::new(
        scholar_tools::build_registry(&config).expect("Failed to build tool registry"),
    );
    tracing::info!("Registered tools: {:?}", registry.methods());

    let state = AppState {
        registry: Arc::clone(&registry),
    };
    let app = scholar_server::router::create_router(state);

    let addr = format!("{host}:{port}");
    tracing::info!("Scholar gateway listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    registry.shutdown().await;
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
