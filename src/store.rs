//! Single-writer state bundle for the dashboard.
//!
//! The poller is the only writer; the presentation layer holds
//! `watch::Receiver`s and re-renders on every change. Records are
//! replaced wholesale on success and left untouched on failure.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::watch;

use crate::air_quality::AirQualitySnapshot;
use crate::forecast::{CurrentConditions, DailyForecast, HourlyPoint, WeatherRecords};

/// Snapshot of everything the presentation layer reads. All records are
/// `None` until the first successful cycle.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// A refresh cycle is in flight
    pub loading: bool,
    pub current: Option<CurrentConditions>,
    pub hourly: Option<Vec<HourlyPoint>>,
    pub daily: Option<Vec<DailyForecast>>,
    pub air_quality: Option<AirQualitySnapshot>,
    /// Wall-clock time of the most recent successful cycle
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            loading: true,
            current: None,
            hourly: None,
            daily: None,
            air_quality: None,
            last_updated: None,
        }
    }
}

impl Dashboard {
    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }
}

/// What one refresh cycle produced. Sections left unset keep their
/// previous value in the store.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    weather: Option<WeatherRecords>,
    air_quality: Option<AirQualitySnapshot>,
    succeeded: bool,
}

impl CycleOutcome {
    pub fn record_weather(&mut self, records: WeatherRecords) {
        self.weather = Some(records);
        self.succeeded = true;
    }

    pub fn record_air_quality(&mut self, snapshot: Option<AirQualitySnapshot>) {
        self.air_quality = snapshot;
        self.succeeded = true;
    }

    /// At least one request completed this cycle.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }
}

/// Observable store over the dashboard snapshot.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    tx: Arc<watch::Sender<Dashboard>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Dashboard::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<Dashboard> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Dashboard {
        self.tx.borrow().clone()
    }

    /// A cycle has started; observers see `loading = true`.
    pub fn begin_cycle(&self) {
        self.tx.send_modify(|d| d.loading = true);
    }

    /// A cycle has finished. Produced sections replace their predecessors;
    /// an empty outcome (both requests failed) changes nothing but the
    /// loading flag.
    pub fn complete_cycle(&self, outcome: CycleOutcome) {
        self.tx.send_modify(|d| {
            if let Some(records) = outcome.weather {
                if let Some(current) = records.current {
                    d.current = Some(current);
                }
                if let Some(hourly) = records.hourly {
                    d.hourly = Some(hourly);
                }
                if let Some(daily) = records.daily {
                    d.daily = Some(daily);
                }
            }
            if let Some(air_quality) = outcome.air_quality {
                d.air_quality = Some(air_quality);
            }
            if outcome.succeeded {
                d.last_updated = Some(Local::now());
            }
            d.loading = false;
        });
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
