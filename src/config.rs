use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Latitude of the monitored location
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude of the monitored location
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Seconds between refresh cycles
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Show the 24-hour forecast strip
    #[serde(default = "default_true")]
    pub hourly: bool,

    /// Show the daily forecast table
    #[serde(default = "default_true")]
    pub daily: bool,

    /// Show the air quality panel
    #[serde(default = "default_true")]
    pub air_quality: bool,

    /// Show sunrise/sunset and daylight duration
    #[serde(default = "default_true")]
    pub sun: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hourly: true,
            daily: true,
            air_quality: true,
            sun: true,
        }
    }
}

// Delhi Technological University, Rohini
fn default_latitude() -> f64 {
    28.748635
}

fn default_longitude() -> f64 {
    77.119972
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("latitude", default_latitude())?
            .set_default("longitude", default_longitude())?
            .set_default("refresh_interval_secs", default_refresh_interval_secs())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with METEODASH_)
            .add_source(
                Environment::with_prefix("METEODASH")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
