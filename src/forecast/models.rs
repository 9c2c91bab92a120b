//! Raw Open-Meteo forecast models and their normalized, display-ready
//! counterparts.
//!
//! Normalization applies a fixed default-value table when the provider
//! omits a field:
//!
//! | field                             | source                        | default |
//! |-----------------------------------|-------------------------------|---------|
//! | visibility (km)                   | hourly `visibility[0]` (m)    | 10      |
//! | dew point                         | hourly `dew_point_2m[0]`      | 0       |
//! | UV index                          | daily `uv_index_max[0]`       | 0.0     |
//! | precipitation, snowfall           | current block                 | 0.0     |
//! | hourly precipitation probability  | `precipitation_probability`   | 0       |
//! | daily precipitation probability   | `precipitation_probability_max` | 0     |
//! | daily max UV                      | `uv_index_max`                | 0.0     |
//!
//! Temperature-like fields, pressure, and wind speed are rounded to the
//! nearest whole unit at normalization time. Timestamps stay as the
//! provider-local strings Open-Meteo returns.

use serde::Deserialize;

use crate::conditions::WeatherCode;
use crate::error::FetchError;

/// Hourly points kept per cycle.
pub const HOURLY_POINTS: usize = 24;

/// Fallback visibility when the provider omits the hourly series.
pub const DEFAULT_VISIBILITY_KM: i32 = 10;

// ============================================================================
// Raw API response (parallel arrays, indexed by hour/day)
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentBlock>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: i32,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub snowfall: Option<f64>,
    pub weather_code: u16,
    pub cloud_cover: i32,
    pub pressure_msl: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub is_day: u8,
}

#[derive(Debug, Deserialize, Default)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<i32>,
    #[serde(default)]
    pub precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub weather_code: Vec<u16>,
    #[serde(default)]
    pub wind_speed_10m: Vec<f64>,
    #[serde(default)]
    pub dew_point_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub visibility: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<u16>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub uv_index_max: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Normalized records (replaced wholesale each cycle)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: i32,
    pub wind_speed: i32,
    pub wind_direction: f64,
    pub pressure: i32,
    pub visibility_km: i32,
    pub dew_point: i32,
    pub cloud_cover: i32,
    pub uv_index: f64,
    pub precipitation: f64,
    pub snowfall: f64,
    pub is_day: bool,
    pub code: WeatherCode,
    /// Provider-local timestamp, e.g. "2026-08-29T06:05"
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    pub time: String,
    pub temperature: i32,
    pub humidity: i32,
    pub precipitation_probability: i32,
    pub code: WeatherCode,
    pub wind_speed: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: String,
    pub temperature_max: i32,
    pub temperature_min: i32,
    pub code: WeatherCode,
    pub precipitation_probability: i32,
    pub sunrise: String,
    pub sunset: String,
    pub uv_index_max: f64,
}

/// Everything one forecast response normalizes to. Each section is `None`
/// when the provider omitted the corresponding block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherRecords {
    pub current: Option<CurrentConditions>,
    pub hourly: Option<Vec<HourlyPoint>>,
    pub daily: Option<Vec<DailyForecast>>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Round a display value to the nearest whole unit.
pub(crate) fn round_whole(value: f64) -> i32 {
    value.round() as i32
}

fn series_at<T: Copy>(series: &[T], idx: usize, name: &'static str) -> Result<T, FetchError> {
    series
        .get(idx)
        .copied()
        .ok_or(FetchError::TruncatedSeries(name))
}

fn opt_series_at(series: &Option<Vec<Option<f64>>>, idx: usize) -> Option<f64> {
    series.as_ref().and_then(|v| v.get(idx)).copied().flatten()
}

/// Normalize a full forecast response. The `current`, `hourly`, and
/// `daily` blocks are independent: a missing block yields `None` for its
/// section without affecting the others.
pub fn normalize(raw: &ForecastResponse) -> Result<WeatherRecords, FetchError> {
    Ok(WeatherRecords {
        current: normalize_current(raw)?,
        hourly: raw.hourly.as_ref().map(normalize_hourly).transpose()?,
        daily: raw.daily.as_ref().map(normalize_daily).transpose()?,
    })
}

/// Normalize the current-instant block. Visibility and dew point come from
/// hourly index 0, UV and sun times from daily index 0.
pub fn normalize_current(
    raw: &ForecastResponse,
) -> Result<Option<CurrentConditions>, FetchError> {
    let Some(c) = &raw.current else {
        return Ok(None);
    };
    let hourly = raw.hourly.as_ref();
    let daily = raw.daily.as_ref();

    let visibility_km = hourly
        .and_then(|h| opt_series_at(&h.visibility, 0))
        .map(|metres| round_whole(metres / 1000.0))
        .unwrap_or(DEFAULT_VISIBILITY_KM);
    let dew_point = hourly
        .and_then(|h| opt_series_at(&h.dew_point_2m, 0))
        .map(round_whole)
        .unwrap_or(0);
    let uv_index = daily
        .and_then(|d| opt_series_at(&d.uv_index_max, 0))
        .unwrap_or(0.0);

    Ok(Some(CurrentConditions {
        temperature: round_whole(c.temperature_2m),
        feels_like: round_whole(c.apparent_temperature),
        humidity: c.relative_humidity_2m,
        wind_speed: round_whole(c.wind_speed_10m),
        wind_direction: c.wind_direction_10m,
        pressure: round_whole(c.pressure_msl),
        visibility_km,
        dew_point,
        cloud_cover: c.cloud_cover,
        uv_index,
        precipitation: c.precipitation.unwrap_or(0.0),
        snowfall: c.snowfall.unwrap_or(0.0),
        is_day: c.is_day == 1,
        code: WeatherCode::from_code(c.weather_code)?,
        sunrise: daily.and_then(|d| d.sunrise.first().cloned()),
        sunset: daily.and_then(|d| d.sunset.first().cloned()),
    }))
}

/// Normalize the hourly series: the first 24 entries of the time axis, in
/// original order (fewer if the provider returned fewer).
pub fn normalize_hourly(hourly: &HourlyBlock) -> Result<Vec<HourlyPoint>, FetchError> {
    let mut points = Vec::with_capacity(hourly.time.len().min(HOURLY_POINTS));
    for (i, time) in hourly.time.iter().take(HOURLY_POINTS).enumerate() {
        points.push(HourlyPoint {
            time: time.clone(),
            temperature: round_whole(series_at(&hourly.temperature_2m, i, "temperature_2m")?),
            humidity: series_at(&hourly.relative_humidity_2m, i, "relative_humidity_2m")?,
            precipitation_probability: opt_series_at(&hourly.precipitation_probability, i)
                .map(round_whole)
                .unwrap_or(0),
            code: WeatherCode::from_code(series_at(&hourly.weather_code, i, "weather_code")?)?,
            wind_speed: round_whole(series_at(&hourly.wind_speed_10m, i, "wind_speed_10m")?),
        });
    }
    Ok(points)
}

/// Normalize the daily series: every entry in the provider's date axis.
pub fn normalize_daily(daily: &DailyBlock) -> Result<Vec<DailyForecast>, FetchError> {
    let mut days = Vec::with_capacity(daily.time.len());
    for (i, date) in daily.time.iter().enumerate() {
        days.push(DailyForecast {
            date: date.clone(),
            temperature_max: round_whole(series_at(
                &daily.temperature_2m_max,
                i,
                "temperature_2m_max",
            )?),
            temperature_min: round_whole(series_at(
                &daily.temperature_2m_min,
                i,
                "temperature_2m_min",
            )?),
            code: WeatherCode::from_code(series_at(&daily.weather_code, i, "weather_code")?)?,
            precipitation_probability: opt_series_at(&daily.precipitation_probability_max, i)
                .map(round_whole)
                .unwrap_or(0),
            sunrise: daily
                .sunrise
                .get(i)
                .cloned()
                .ok_or(FetchError::TruncatedSeries("sunrise"))?,
            sunset: daily
                .sunset
                .get(i)
                .cloned()
                .ok_or(FetchError::TruncatedSeries("sunset"))?,
            uv_index_max: opt_series_at(&daily.uv_index_max, i).unwrap_or(0.0),
        });
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_block() -> CurrentBlock {
        CurrentBlock {
            temperature_2m: 23.6,
            relative_humidity_2m: 64,
            apparent_temperature: 25.2,
            precipitation: Some(0.4),
            snowfall: Some(0.0),
            weather_code: 61,
            cloud_cover: 80,
            pressure_msl: 1004.6,
            wind_speed_10m: 11.3,
            wind_direction_10m: 210.0,
            is_day: 1,
        }
    }

    fn hourly_block(len: usize) -> HourlyBlock {
        HourlyBlock {
            time: (0..len).map(|i| format!("2026-08-29T{:02}:00", i % 24)).collect(),
            temperature_2m: (0..len).map(|i| 20.0 + i as f64 * 0.3).collect(),
            relative_humidity_2m: vec![60; len],
            precipitation_probability: Some((0..len).map(|_| Some(15.0)).collect()),
            weather_code: vec![61; len],
            wind_speed_10m: vec![9.5; len],
            dew_point_2m: Some(vec![Some(18.4); len]),
            visibility: Some(vec![Some(24140.0); len]),
        }
    }

    fn daily_block() -> DailyBlock {
        DailyBlock {
            time: vec!["2026-08-29".into(), "2026-08-30".into()],
            weather_code: vec![61, 3],
            temperature_2m_max: vec![32.4, 30.1],
            temperature_2m_min: vec![24.6, 23.9],
            sunrise: vec!["2026-08-29T06:02".into(), "2026-08-30T06:03".into()],
            sunset: vec!["2026-08-29T18:47".into(), "2026-08-30T18:46".into()],
            precipitation_probability_max: Some(vec![Some(65.0), None]),
            uv_index_max: Some(vec![Some(7.5), Some(6.0)]),
        }
    }

    #[test]
    fn test_rounding_is_idempotent() {
        assert_eq!(round_whole(24.0), 24);
        assert_eq!(round_whole(round_whole(23.6) as f64), 24);
        assert_eq!(round_whole(-0.4), 0);
    }

    #[test]
    fn test_normalize_current_rounds_display_fields() {
        let raw = ForecastResponse {
            current: Some(current_block()),
            hourly: Some(hourly_block(24)),
            daily: Some(daily_block()),
        };
        let current = normalize_current(&raw).unwrap().unwrap();
        assert_eq!(current.temperature, 24);
        assert_eq!(current.feels_like, 25);
        assert_eq!(current.pressure, 1005);
        assert_eq!(current.wind_speed, 11);
        assert_eq!(current.visibility_km, 24);
        assert_eq!(current.dew_point, 18);
        assert_eq!(current.uv_index, 7.5);
        assert!(current.is_day);
        assert_eq!(current.sunrise.as_deref(), Some("2026-08-29T06:02"));
    }

    #[test]
    fn test_missing_visibility_defaults_to_ten_km() {
        let mut hourly = hourly_block(24);
        hourly.visibility = None;
        let raw = ForecastResponse {
            current: Some(current_block()),
            hourly: Some(hourly),
            daily: Some(daily_block()),
        };
        let current = normalize_current(&raw).unwrap().unwrap();
        assert_eq!(current.visibility_km, 10);
    }

    #[test]
    fn test_missing_hourly_block_defaults_derived_fields() {
        let raw = ForecastResponse {
            current: Some(current_block()),
            hourly: None,
            daily: None,
        };
        let current = normalize_current(&raw).unwrap().unwrap();
        assert_eq!(current.visibility_km, 10);
        assert_eq!(current.dew_point, 0);
        assert_eq!(current.uv_index, 0.0);
        assert_eq!(current.sunrise, None);
        assert_eq!(current.sunset, None);
    }

    #[test]
    fn test_missing_precipitation_defaults_to_zero() {
        let mut block = current_block();
        block.precipitation = None;
        block.snowfall = None;
        let raw = ForecastResponse {
            current: Some(block),
            hourly: None,
            daily: None,
        };
        let current = normalize_current(&raw).unwrap().unwrap();
        assert_eq!(current.precipitation, 0.0);
        assert_eq!(current.snowfall, 0.0);
    }

    #[test]
    fn test_hourly_truncates_to_24_points_in_order() {
        let points = normalize_hourly(&hourly_block(30)).unwrap();
        assert_eq!(points.len(), 24);
        assert_eq!(points[0].time, "2026-08-29T00:00");
        assert_eq!(points[23].time, "2026-08-29T23:00");
        assert_eq!(points[0].temperature, 20);
    }

    #[test]
    fn test_hourly_shorter_than_24_kept_as_is() {
        let points = normalize_hourly(&hourly_block(6)).unwrap();
        assert_eq!(points.len(), 6);
    }

    #[test]
    fn test_hourly_missing_precipitation_probability_defaults_to_zero() {
        let mut hourly = hourly_block(3);
        hourly.precipitation_probability = None;
        let points = normalize_hourly(&hourly).unwrap();
        assert!(points.iter().all(|p| p.precipitation_probability == 0));
    }

    #[test]
    fn test_hourly_ragged_series_is_rejected() {
        let mut hourly = hourly_block(4);
        hourly.temperature_2m.truncate(2);
        assert!(matches!(
            normalize_hourly(&hourly),
            Err(FetchError::TruncatedSeries("temperature_2m"))
        ));
    }

    #[test]
    fn test_daily_maps_every_entry() {
        let days = normalize_daily(&daily_block()).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature_max, 32);
        assert_eq!(days[0].temperature_min, 25);
        assert_eq!(days[0].precipitation_probability, 65);
        // Null element falls back to the default
        assert_eq!(days[1].precipitation_probability, 0);
        assert_eq!(days[1].uv_index_max, 6.0);
    }

    #[test]
    fn test_sections_are_independent() {
        let raw = ForecastResponse {
            current: None,
            hourly: Some(hourly_block(24)),
            daily: None,
        };
        let records = normalize(&raw).unwrap();
        assert!(records.current.is_none());
        assert_eq!(records.hourly.unwrap().len(), 24);
        assert!(records.daily.is_none());
    }

    #[test]
    fn test_unknown_weather_code_fails_normalization() {
        let mut block = current_block();
        block.weather_code = 42;
        let raw = ForecastResponse {
            current: Some(block),
            hourly: None,
            daily: None,
        };
        assert!(matches!(
            normalize(&raw),
            Err(FetchError::UnknownWeatherCode(42))
        ));
    }
}
