use thiserror::Error;

/// Failure of a single fetch within a refresh cycle.
///
/// The scheduler does not distinguish causes: any of these means the
/// affected response produced no records this cycle. The distinction only
/// exists for diagnostics.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unknown weather code: {0}")]
    UnknownWeatherCode(u16),

    #[error("series `{0}` shorter than its time axis")]
    TruncatedSeries(&'static str),
}
