//! Termcomplete - HTTP server entry point

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use termcomplete::api::http::create_router;
use termcomplete::api::state::AppState;
use termcomplete::Config;

#[tokio::main]
async fn main() -> termcomplete::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let votes = config.graph.is_some();

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(
        version = termcomplete::VERSION,
        addr = %bind_addr,
        vote_signals = votes,
        "terminology service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
