use gallery_api::{config::ApiConfig, metrics::init_metrics, state::ApiState};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    gallery_api::tracing::init_tracing(&config.env);
    let metrics = init_metrics()?;

    let state = ApiState::new(&config).with_metrics(metrics);
    tracing::info!(
        total_users = config.total_users,
        snapshot_dir = %config.snapshot_dir.display(),
        public_dir = %config.public_dir.display(),
        cursor_latency_ms = config.cursor_latency_ms,
        "Application state ready"
    );

    let app = gallery_api::router::app(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
