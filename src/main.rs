mod air_quality;
mod conditions;
mod config;
mod display;
mod error;
mod forecast;
mod scheduler;
mod store;

use std::time::Duration;

use reqwest::Client;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::air_quality::{AirQualityService, AIR_QUALITY_API_URL};
use crate::config::AppConfig;
use crate::forecast::{ForecastService, FORECAST_API_URL};
use crate::scheduler::PollService;
use crate::store::DashboardStore;

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Create shared HTTP client with connection pooling
fn create_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping refresh loop");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meteodash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        lat = config.latitude,
        lon = config.longitude,
        interval_secs = config.refresh_interval_secs,
        "Configuration loaded"
    );

    // Shared HTTP client for both providers
    let http_client = create_http_client();

    let forecast_service = ForecastService::new(
        http_client.clone(),
        FORECAST_API_URL,
        config.latitude,
        config.longitude,
    );
    let air_quality_service = AirQualityService::new(
        http_client,
        AIR_QUALITY_API_URL,
        config.latitude,
        config.longitude,
    );

    // The poller owns the store's writer; this receiver is the
    // presentation side.
    let store = DashboardStore::new();
    let mut updates = store.subscribe();

    let poller = PollService::new(
        forecast_service,
        air_quality_service,
        store,
        Duration::from_secs(config.refresh_interval_secs),
    );
    let poll_task = tokio::spawn(poller.run(shutdown_signal()));

    // Re-render on every state change until the poller stops and drops
    // the store.
    loop {
        let snapshot = updates.borrow_and_update().clone();
        println!("{}", display::render(&snapshot, &config.display));
        if updates.changed().await.is_err() {
            break;
        }
    }

    poll_task.await?;
    tracing::info!("Shutdown complete");

    Ok(())
}
