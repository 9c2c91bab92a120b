pub mod models;
mod service;

pub use models::AirQualitySnapshot;
pub use service::{AirQualityService, AIR_QUALITY_API_URL};
