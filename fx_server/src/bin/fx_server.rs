use anyhow::Context;
use fx_server::config::ServerConfig;
use fx_server::routes;
use fx_server::state::AppState;
use fx_server::tracing_setup;
use fx_store::RateTable;
use tracing::Level;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = tracing_setup::init("fx_server", "logs", Level::INFO);

    let config = ServerConfig::from_env();

    // A table that cannot be loaded is fatal; nothing binds without it
    let table = RateTable::load(&config.rates_file)
        .with_context(|| format!("Error loading exchange rates from {}", config.rates_file.display()))?;

    let app = routes::router(AppState::new(table));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Unable to bind port {}", config.port))?;
    info!("Listening on port {}", config.port);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            tracing::warn!("Unable to listen for shutdown signal: {err}");
            // Without a signal handler there is nothing to wait for; park
            // instead of shutting the server down immediately.
            std::future::pending::<()>().await;
        }
    }
}
