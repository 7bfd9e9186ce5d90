use anyhow::Context;
use tokio::net::TcpListener;

use ragchat_backend::core::config::{AppConfig, AppPaths};
use ragchat_backend::logging;
use ragchat_backend::server;
use ragchat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new();
    let config = AppConfig::load(&paths)?;
    logging::init(&paths);

    let port = config.server.port;
    let state = AppState::new(config)?;

    let bind_addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    println!("RAGCHAT_PORT={}", addr.port());
    tracing::info!("Listening on {}", addr);

    let app = server::router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
