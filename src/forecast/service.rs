use reqwest::header::CACHE_CONTROL;
use reqwest::Client;

use super::models::{self, ForecastResponse, WeatherRecords};
use crate::error::FetchError;

pub const FORECAST_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                              precipitation,rain,snowfall,weather_code,cloud_cover,pressure_msl,\
                              surface_pressure,wind_speed_10m,wind_direction_10m,is_day";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation_probability,\
                             weather_code,wind_speed_10m,dew_point_2m,visibility";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,\
                            precipitation_probability_max,uv_index_max";
const FORECAST_DAYS: &str = "7";

/// Fetches and normalizes the Open-Meteo forecast for one fixed location.
pub struct ForecastService {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl ForecastService {
    pub fn new(client: Client, base_url: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            latitude,
            longitude,
        }
    }

    /// Run one fetch-and-normalize pass. Any transport, status, decode, or
    /// schema failure surfaces as a single `FetchError`; partial results
    /// are never returned.
    pub async fn fetch(&self) -> Result<WeatherRecords, FetchError> {
        tracing::debug!(lat = self.latitude, lon = self.longitude, "Fetching forecast");

        let response = self
            .client
            .get(&self.base_url)
            // Always fetch fresh data, never a shared-cache copy
            .header(CACHE_CONTROL, "no-cache")
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("timezone", "auto".to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let raw: ForecastResponse = response.json().await?;
        let records = models::normalize(&raw)?;

        tracing::debug!(
            current = records.current.is_some(),
            hourly = records.hourly.as_ref().map_or(0, Vec::len),
            daily = records.daily.as_ref().map_or(0, Vec::len),
            "Forecast normalized"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Pictogram, WeatherCode};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn synthetic_forecast() -> serde_json::Value {
        serde_json::json!({
            "current": {
                "temperature_2m": 23.6,
                "relative_humidity_2m": 64,
                "apparent_temperature": 25.2,
                "precipitation": 0.4,
                "snowfall": 0.0,
                "weather_code": 61,
                "cloud_cover": 80,
                "pressure_msl": 1004.6,
                "wind_speed_10m": 11.3,
                "wind_direction_10m": 210.0,
                "is_day": 1
            },
            "hourly": {
                "time": ["2026-08-29T00:00", "2026-08-29T01:00"],
                "temperature_2m": [22.4, 22.1],
                "relative_humidity_2m": [70, 72],
                "precipitation_probability": [20, 25],
                "weather_code": [61, 61],
                "wind_speed_10m": [8.2, 7.9],
                "dew_point_2m": [18.4, 18.3],
                "visibility": [24140.0, 22000.0]
            },
            "daily": {
                "time": ["2026-08-29"],
                "weather_code": [61],
                "temperature_2m_max": [32.4],
                "temperature_2m_min": [24.6],
                "sunrise": ["2026-08-29T06:02"],
                "sunset": ["2026-08-29T18:47"],
                "precipitation_probability_max": [65],
                "uv_index_max": [7.5]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_normalizes_synthetic_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("timezone", "auto"))
            .and(query_param("forecast_days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(synthetic_forecast()))
            .mount(&server)
            .await;

        let service = ForecastService::new(Client::new(), server.uri(), 28.748635, 77.119972);
        let records = service.fetch().await.unwrap();

        let current = records.current.unwrap();
        assert_eq!(current.temperature, 24);
        assert_eq!(current.code, WeatherCode::LightRain);
        assert_eq!(current.code.label(), "Light rain");
        assert_eq!(current.code.pictogram(), Pictogram::Rain);
        assert_eq!(current.visibility_km, 24);
        assert_eq!(records.hourly.unwrap().len(), 2);
        assert_eq!(records.daily.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_tolerates_missing_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hourly": {
                    "time": ["2026-08-29T00:00"],
                    "temperature_2m": [22.4],
                    "relative_humidity_2m": [70],
                    "weather_code": [0],
                    "wind_speed_10m": [8.2]
                }
            })))
            .mount(&server)
            .await;

        let service = ForecastService::new(Client::new(), server.uri(), 28.748635, 77.119972);
        let records = service.fetch().await.unwrap();

        assert!(records.current.is_none());
        assert!(records.daily.is_none());
        assert_eq!(records.hourly.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = ForecastService::new(Client::new(), server.uri(), 28.748635, 77.119972);
        assert!(service.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_fails_on_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let service = ForecastService::new(Client::new(), server.uri(), 28.748635, 77.119972);
        assert!(service.fetch().await.is_err());
    }
}
