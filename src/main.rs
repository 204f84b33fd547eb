use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use resume_qa_backend::config::AppConfig;
use resume_qa_backend::{logging, server, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Best-effort .env load; real environment wins.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    logging::init(&config.log_dir);

    let state = AppState::initialize(config)
        .await
        .context("Startup failed before the server could accept requests")?;

    let bind_addr = format!("127.0.0.1:{}", state.config.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "Index ready: {} chunks via {}",
        state.index.len(),
        state.provider.name()
    );

    let app: Router = server::router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
