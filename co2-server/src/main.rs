use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use co2_server::config::{Catalog, ServerConfig};
use co2_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Routes and factors are fixed for the lifetime of the process
    let catalog = Catalog::load_or_default(config.catalog_path.as_deref())?;
    let state = AppState::new(catalog);
    info!(
        routes = state.routes.len(),
        cities = state.cities.len(),
        "catalog ready"
    );

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("CO2 calculator listening on http://{}", config.bind_addr);
    info!("  GET  /               - Calculator form");
    info!("  GET  /about          - Emission factors");
    info!("  GET  /api/cities     - Known cities");
    info!("  POST /calculate      - Calculate (form)");
    info!("  POST /api/calculate  - Calculate (JSON)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
}
