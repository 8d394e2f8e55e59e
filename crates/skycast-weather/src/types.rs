use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at the requested coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius.
    pub temperature_c: f64,
    /// Provider-defined WMO weather code.
    pub weather_code: i32,
    /// Observation timestamp as reported by the provider (local time).
    pub observed_at: String,
}

/// One day of the forecast, chronologically ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub weather_code: i32,
}

/// Current weather plus the daily forecast, as one fetch result.
///
/// The forecast is built by zipping the provider's parallel arrays, so
/// index correspondence is guaranteed by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub forecast: Vec<DayForecast>,
    pub fetched_at: DateTime<Utc>,
}

/// Human-readable text for a WMO weather code.
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45..=48 => "Foggy",
        51..=67 => "Rainy",
        71..=77 => "Snowy",
        80..=82 => "Rain showers",
        95..=99 => "Thunderstorm",
        _ => "Partly cloudy",
    }
}

/// Emoji icon for a WMO weather code.
pub fn weather_code_icon(code: i32) -> &'static str {
    match code {
        0 => "\u{2600}\u{fe0f}",
        1..=3 => "\u{26c5}",
        45..=48 => "\u{1f32b}\u{fe0f}",
        51..=67 => "\u{1f327}\u{fe0f}",
        71..=77 => "\u{2744}\u{fe0f}",
        80..=82 => "\u{1f326}\u{fe0f}",
        95..=99 => "\u{26c8}\u{fe0f}",
        _ => "\u{1f324}\u{fe0f}",
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response shape: {0}")]
    UpstreamFormat(String),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Unable to reach the weather service. Check your connection.",
            Self::UpstreamFormat(_) => {
                "The weather service returned an unexpected response. Please try again."
            }
        }
    }
}
