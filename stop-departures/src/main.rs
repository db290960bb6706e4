use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stop_departures::aggregator::Aggregator;
use stop_departures::config::AppConfig;
use stop_departures::source::DefaultStopSource;
use stop_departures::web::{AppState, DEPARTURES_ROUTE, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "stop_departures=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
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
    let config = AppConfig::from_env()?;

    // Fail fast if the database is unreachable
    let source = DefaultStopSource::connect(&config.database, config.nextrip.clone()).await?;
    info!(base_url = %config.nextrip.base_url, "NexTrip client ready");

    let state = AppState::new(Aggregator::new(source));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "stop departures listening");
    info!("  GET  /health - Health check");
    info!("  GET  {DEPARTURES_ROUTE} - Stop details and live departures");

    axum::serve(listener, app).await?;
    Ok(())
}
