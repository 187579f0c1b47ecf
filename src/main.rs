use habit_grid::{load_store, resolve_data_path, router, AppState};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path();
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = load_store(&data_path).await;
    let app = router(AppState::new(data_path, store));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => error!("failed to listen for shutdown signal: {err}"),
    }
}
