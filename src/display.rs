//! Text rendering of the dashboard snapshot.
//!
//! This is the only place pictogram categories turn into glyphs and
//! classification bands turn into printed labels.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::conditions::{compass_point, AqiBand, Pictogram, UvBand};
use crate::config::DisplayConfig;
use crate::store::Dashboard;

const PROVIDER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn glyph(pictogram: Pictogram) -> &'static str {
    match pictogram {
        Pictogram::Sun => "\u{2600}",            // BLACK SUN WITH RAYS
        Pictogram::SunBehindCloud => "\u{26C5}", // SUN BEHIND CLOUD
        Pictogram::Cloud => "\u{2601}",          // CLOUD
        Pictogram::Fog => "\u{1F32B}",           // FOG
        Pictogram::Rain => "\u{1F327}",          // CLOUD WITH RAIN
        Pictogram::FreezingRain => "\u{1F328}",  // CLOUD WITH SNOW
        Pictogram::Snow => "\u{1F328}",          // CLOUD WITH SNOW
        Pictogram::Thunderstorm => "\u{26C8}",   // THUNDER CLOUD AND RAIN
    }
}

/// Format a provider-local timestamp as HH:MM, or "--" when unparseable.
fn format_clock(provider_local: &str) -> String {
    NaiveDateTime::parse_from_str(provider_local, PROVIDER_TIME_FORMAT)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| "--".to_string())
}

/// Whole hours of daylight between provider sunrise and sunset strings.
fn daylight_hours(sunrise: &str, sunset: &str) -> Option<i64> {
    let rise = NaiveDateTime::parse_from_str(sunrise, PROVIDER_TIME_FORMAT).ok()?;
    let set = NaiveDateTime::parse_from_str(sunset, PROVIDER_TIME_FORMAT).ok()?;
    Some(((set - rise).num_minutes() as f64 / 60.0).round() as i64)
}

/// Render the full dashboard. Before the first cycle completes this is a
/// loading notice; after a first cycle that produced nothing it is the
/// unable-to-load notice; otherwise the configured panels.
pub fn render(dashboard: &Dashboard, display: &DisplayConfig) -> String {
    if dashboard.loading && !dashboard.has_data() {
        return "Loading environmental data...".to_string();
    }
    let Some(current) = &dashboard.current else {
        return "Unable to load weather data".to_string();
    };

    let mut out = String::new();

    if let Some(updated) = dashboard.last_updated {
        let _ = writeln!(out, "Last updated: {}", updated.format("%H:%M:%S"));
    }
    let _ = writeln!(
        out,
        "{}  {}\u{B0}C  {}  (feels like {}\u{B0}C)",
        glyph(current.code.pictogram()),
        current.temperature,
        current.code.label(),
        current.feels_like,
    );
    let _ = writeln!(out, "Humidity     {}%", current.humidity);
    let _ = writeln!(
        out,
        "Wind         {} km/h {}",
        current.wind_speed,
        compass_point(current.wind_direction),
    );
    let _ = writeln!(out, "Pressure     {} hPa", current.pressure);
    let _ = writeln!(out, "Visibility   {} km", current.visibility_km);
    let _ = writeln!(out, "Dew point    {}\u{B0}C", current.dew_point);
    let _ = writeln!(
        out,
        "UV index     {} ({})",
        current.uv_index,
        UvBand::from_index(current.uv_index).label(),
    );
    let _ = writeln!(out, "Cloud cover  {}%", current.cloud_cover);
    // Suppressed entirely at zero
    if current.precipitation > 0.0 {
        let _ = writeln!(out, "Precipitation {} mm", current.precipitation);
    }
    if current.snowfall > 0.0 {
        let _ = writeln!(out, "Snowfall     {} cm", current.snowfall);
    }

    if display.sun {
        if let (Some(sunrise), Some(sunset)) = (&current.sunrise, &current.sunset) {
            let _ = writeln!(out);
            let _ = writeln!(out, "Sunrise      {}", format_clock(sunrise));
            let _ = writeln!(out, "Sunset       {}", format_clock(sunset));
            if let Some(hours) = daylight_hours(sunrise, sunset) {
                let _ = writeln!(out, "Daylight     {} hours", hours);
            }
        }
    }

    if display.air_quality {
        if let Some(air) = &dashboard.air_quality {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Air quality  AQI {} ({})",
                air.aqi,
                AqiBand::from_index(air.aqi).label(),
            );
            let _ = writeln!(out, "  PM2.5 {} \u{B5}g/m\u{B3}", air.pm2_5);
            let _ = writeln!(out, "  PM10  {} \u{B5}g/m\u{B3}", air.pm10);
            let _ = writeln!(out, "  NO2   {} \u{B5}g/m\u{B3}", air.no2);
            let _ = writeln!(out, "  O3    {} \u{B5}g/m\u{B3}", air.o3);
            let _ = writeln!(out, "  CO    {} \u{B5}g/m\u{B3}", air.co);
        }
    }

    if display.hourly {
        if let Some(hourly) = &dashboard.hourly {
            if !hourly.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "Next hours");
                for point in hourly {
                    let _ = writeln!(
                        out,
                        "  {}  {:>3}\u{B0}  {:>3}%  {}",
                        format_clock(&point.time),
                        point.temperature,
                        point.precipitation_probability,
                        glyph(point.code.pictogram()),
                    );
                }
            }
        }
    }

    if display.daily {
        if let Some(daily) = &dashboard.daily {
            if !daily.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "Next days");
                for day in daily {
                    let _ = writeln!(
                        out,
                        "  {}  {:>3}\u{B0}/{:>3}\u{B0}  {:>3}%  {}",
                        day.date,
                        day.temperature_min,
                        day.temperature_max,
                        day.precipitation_probability,
                        day.code.label(),
                    );
                }
            }
        }
    }

    out
}
