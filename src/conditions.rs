//! WMO weather-interpretation codes and the classification bands derived
//! from them.
//!
//! The code set is closed: every variant must have a label and a pictogram
//! category. The matches below deliberately have no wildcard arm so that
//! adding a variant without extending the tables fails to compile.

use crate::error::FetchError;

/// WMO weather-interpretation code as reported by Open-Meteo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    FreezingDrizzle,
    DenseFreezingDrizzle,
    LightRain,
    ModerateRain,
    HeavyRain,
    FreezingRain,
    HeavyFreezingRain,
    SlightSnow,
    ModerateSnow,
    HeavySnow,
    SnowGrains,
    LightShowers,
    ModerateShowers,
    ViolentShowers,
    SnowShowers,
    HeavySnowShowers,
    Thunderstorm,
    ThunderstormWithHail,
    SevereThunderstormWithHail,
}

/// Pictogram category a code renders as. Glyph selection lives in the
/// display layer; this is the grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pictogram {
    Sun,
    SunBehindCloud,
    Cloud,
    Fog,
    Rain,
    FreezingRain,
    Snow,
    Thunderstorm,
}

impl WeatherCode {
    /// Every supported code, in numeric order.
    pub const ALL: [WeatherCode; 28] = [
        Self::ClearSky,
        Self::MainlyClear,
        Self::PartlyCloudy,
        Self::Overcast,
        Self::Fog,
        Self::RimeFog,
        Self::LightDrizzle,
        Self::ModerateDrizzle,
        Self::DenseDrizzle,
        Self::FreezingDrizzle,
        Self::DenseFreezingDrizzle,
        Self::LightRain,
        Self::ModerateRain,
        Self::HeavyRain,
        Self::FreezingRain,
        Self::HeavyFreezingRain,
        Self::SlightSnow,
        Self::ModerateSnow,
        Self::HeavySnow,
        Self::SnowGrains,
        Self::LightShowers,
        Self::ModerateShowers,
        Self::ViolentShowers,
        Self::SnowShowers,
        Self::HeavySnowShowers,
        Self::Thunderstorm,
        Self::ThunderstormWithHail,
        Self::SevereThunderstormWithHail,
    ];

    /// Map a raw provider code to the enumeration. An unrecognized code is
    /// schema drift and fails the affected response rather than mapping to
    /// a fallback variant.
    pub fn from_code(code: u16) -> Result<Self, FetchError> {
        Ok(match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 => Self::LightDrizzle,
            53 => Self::ModerateDrizzle,
            55 => Self::DenseDrizzle,
            56 => Self::FreezingDrizzle,
            57 => Self::DenseFreezingDrizzle,
            61 => Self::LightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            66 => Self::FreezingRain,
            67 => Self::HeavyFreezingRain,
            71 => Self::SlightSnow,
            73 => Self::ModerateSnow,
            75 => Self::HeavySnow,
            77 => Self::SnowGrains,
            80 => Self::LightShowers,
            81 => Self::ModerateShowers,
            82 => Self::ViolentShowers,
            85 => Self::SnowShowers,
            86 => Self::HeavySnowShowers,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormWithHail,
            99 => Self::SevereThunderstormWithHail,
            other => return Err(FetchError::UnknownWeatherCode(other)),
        })
    }

    /// The numeric WMO code.
    pub fn code(self) -> u16 {
        match self {
            Self::ClearSky => 0,
            Self::MainlyClear => 1,
            Self::PartlyCloudy => 2,
            Self::Overcast => 3,
            Self::Fog => 45,
            Self::RimeFog => 48,
            Self::LightDrizzle => 51,
            Self::ModerateDrizzle => 53,
            Self::DenseDrizzle => 55,
            Self::FreezingDrizzle => 56,
            Self::DenseFreezingDrizzle => 57,
            Self::LightRain => 61,
            Self::ModerateRain => 63,
            Self::HeavyRain => 65,
            Self::FreezingRain => 66,
            Self::HeavyFreezingRain => 67,
            Self::SlightSnow => 71,
            Self::ModerateSnow => 73,
            Self::HeavySnow => 75,
            Self::SnowGrains => 77,
            Self::LightShowers => 80,
            Self::ModerateShowers => 81,
            Self::ViolentShowers => 82,
            Self::SnowShowers => 85,
            Self::HeavySnowShowers => 86,
            Self::Thunderstorm => 95,
            Self::ThunderstormWithHail => 96,
            Self::SevereThunderstormWithHail => 99,
        }
    }

    /// Human-readable label for the code.
    pub fn label(self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::RimeFog => "Depositing rime fog",
            Self::LightDrizzle => "Light drizzle",
            Self::ModerateDrizzle => "Moderate drizzle",
            Self::DenseDrizzle => "Dense drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::DenseFreezingDrizzle => "Dense freezing drizzle",
            Self::LightRain => "Light rain",
            Self::ModerateRain => "Moderate rain",
            Self::HeavyRain => "Heavy rain",
            Self::FreezingRain => "Freezing rain",
            Self::HeavyFreezingRain => "Heavy freezing rain",
            Self::SlightSnow => "Slight snow",
            Self::ModerateSnow => "Moderate snow",
            Self::HeavySnow => "Heavy snow",
            Self::SnowGrains => "Snow grains",
            Self::LightShowers => "Light showers",
            Self::ModerateShowers => "Moderate showers",
            Self::ViolentShowers => "Violent showers",
            Self::SnowShowers => "Snow showers",
            Self::HeavySnowShowers => "Heavy snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::SevereThunderstormWithHail => "Severe thunderstorm with hail",
        }
    }

    /// Pictogram category for the code.
    pub fn pictogram(self) -> Pictogram {
        match self {
            Self::ClearSky => Pictogram::Sun,
            Self::MainlyClear | Self::PartlyCloudy => Pictogram::SunBehindCloud,
            Self::Overcast => Pictogram::Cloud,
            Self::Fog | Self::RimeFog => Pictogram::Fog,
            Self::LightDrizzle
            | Self::ModerateDrizzle
            | Self::DenseDrizzle
            | Self::LightRain
            | Self::ModerateRain
            | Self::HeavyRain
            | Self::LightShowers
            | Self::ModerateShowers
            | Self::ViolentShowers => Pictogram::Rain,
            Self::FreezingDrizzle
            | Self::DenseFreezingDrizzle
            | Self::FreezingRain
            | Self::HeavyFreezingRain => Pictogram::FreezingRain,
            Self::SlightSnow
            | Self::ModerateSnow
            | Self::HeavySnow
            | Self::SnowGrains
            | Self::SnowShowers
            | Self::HeavySnowShowers => Pictogram::Snow,
            Self::Thunderstorm
            | Self::ThunderstormWithHail
            | Self::SevereThunderstormWithHail => Pictogram::Thunderstorm,
        }
    }
}

/// US EPA AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn from_index(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthySensitive,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy (Sensitive)",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// UV index band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvBand {
    pub fn from_index(uv: f64) -> Self {
        if uv <= 2.0 {
            Self::Low
        } else if uv <= 5.0 {
            Self::Moderate
        } else if uv <= 7.0 {
            Self::High
        } else if uv <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass direction for a wind bearing in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    let idx = (degrees / 22.5).round() as usize % 16;
    COMPASS_POINTS[idx]
}
