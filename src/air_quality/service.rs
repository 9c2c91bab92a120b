use reqwest::header::CACHE_CONTROL;
use reqwest::Client;

use super::models::{self, AirQualityResponse, AirQualitySnapshot};
use crate::error::FetchError;

pub const AIR_QUALITY_API_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &str = "us_aqi,pm10,pm2_5,nitrogen_dioxide,ozone,carbon_monoxide";

/// Fetches and normalizes the Open-Meteo air-quality reading for one
/// fixed location.
pub struct AirQualityService {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl AirQualityService {
    pub fn new(client: Client, base_url: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            latitude,
            longitude,
        }
    }

    /// Returns `Ok(None)` when the request succeeded but the provider
    /// omitted the current block.
    pub async fn fetch(&self) -> Result<Option<AirQualitySnapshot>, FetchError> {
        tracing::debug!(lat = self.latitude, lon = self.longitude, "Fetching air quality");

        let response = self
            .client
            .get(&self.base_url)
            .header(CACHE_CONTROL, "no-cache")
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let raw: AirQualityResponse = response.json().await?;
        let snapshot = models::normalize(&raw);

        if let Some(ref s) = snapshot {
            tracing::debug!(aqi = s.aqi, "Air quality normalized");
        }

        Ok(snapshot)
    }
}
