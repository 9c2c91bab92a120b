pub mod models;
mod service;

pub use models::{CurrentConditions, DailyForecast, HourlyPoint, WeatherRecords};
pub use service::{ForecastService, FORECAST_API_URL};
