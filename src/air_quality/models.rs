//! Raw Open-Meteo air-quality models and the normalized snapshot.
//!
//! Every pollutant and the AQI itself default to 0 when the provider
//! omits them; concentrations are rounded to the nearest whole unit.

use serde::Deserialize;

use crate::forecast::models::round_whole;

#[derive(Debug, Deserialize, Default)]
pub struct AirQualityResponse {
    #[serde(default)]
    pub current: Option<AirQualityBlock>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AirQualityBlock {
    #[serde(default)]
    pub us_aqi: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub nitrogen_dioxide: Option<f64>,
    #[serde(default)]
    pub ozone: Option<f64>,
    #[serde(default)]
    pub carbon_monoxide: Option<f64>,
}

/// Current air quality at the monitored location. Concentrations are in
/// µg/m³, AQI on the US EPA scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualitySnapshot {
    pub aqi: i32,
    pub pm10: i32,
    pub pm2_5: i32,
    pub no2: i32,
    pub o3: i32,
    pub co: i32,
}

/// Normalize an air-quality response; `None` when the provider omitted
/// the current block entirely.
pub fn normalize(raw: &AirQualityResponse) -> Option<AirQualitySnapshot> {
    let c = raw.current.as_ref()?;
    Some(AirQualitySnapshot {
        aqi: round_whole(c.us_aqi.unwrap_or(0.0)),
        pm10: round_whole(c.pm10.unwrap_or(0.0)),
        pm2_5: round_whole(c.pm2_5.unwrap_or(0.0)),
        no2: round_whole(c.nitrogen_dioxide.unwrap_or(0.0)),
        o3: round_whole(c.ozone.unwrap_or(0.0)),
        co: round_whole(c.carbon_monoxide.unwrap_or(0.0)),
    })
}
