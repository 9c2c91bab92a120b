use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::air_quality::AirQualityService;
use crate::forecast::ForecastService;
use crate::store::{CycleOutcome, DashboardStore};

/// Drives the refresh loop: one cycle immediately at startup, then one
/// per fixed interval until shutdown.
///
/// Cycles are serialized; a cycle running past the interval swallows the
/// missed trigger instead of queuing it, so last-updated timestamps are
/// monotonic.
pub struct PollService {
    forecast: ForecastService,
    air_quality: AirQualityService,
    store: DashboardStore,
    interval: Duration,
}

impl PollService {
    pub fn new(
        forecast: ForecastService,
        air_quality: AirQualityService,
        store: DashboardStore,
        interval: Duration,
    ) -> Self {
        Self {
            forecast,
            air_quality,
            store,
            interval,
        }
    }

    /// Run until `shutdown` resolves. The first tick fires immediately.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Refresh loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    /// One complete fetch-and-normalize pass. The two requests run
    /// concurrently and merge into the store independently; a cycle where
    /// both fail leaves the previous records and timestamp untouched.
    pub async fn run_cycle(&self) {
        self.store.begin_cycle();

        let (weather, air_quality) =
            tokio::join!(self.forecast.fetch(), self.air_quality.fetch());

        let mut outcome = CycleOutcome::default();
        match weather {
            Ok(records) => outcome.record_weather(records),
            Err(e) => tracing::warn!(error = %e, "Weather fetch failed"),
        }
        match air_quality {
            Ok(snapshot) => outcome.record_air_quality(snapshot),
            Err(e) => tracing::warn!(error = %e, "Air quality fetch failed"),
        }

        if outcome.succeeded() {
            tracing::info!("Refresh cycle completed");
        } else {
            tracing::warn!("Refresh cycle produced no data");
        }
        self.store.complete_cycle(outcome);
    }
}
