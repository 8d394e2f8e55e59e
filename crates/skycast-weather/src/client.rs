//! Open-Meteo style forecast client.
//!
//! One GET per fetch: current conditions plus the daily max/min/code
//! arrays, timezone resolved by the provider. No retries and no fallback;
//! the caller decides what a failure means.

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{CurrentWeather, DayForecast, WeatherError, WeatherSnapshot};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeatherWire,
    daily: DailyWire,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherWire {
    temperature: f64,
    weathercode: i32,
    time: String,
}

#[derive(Debug, Deserialize)]
struct DailyWire {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch current weather and the daily forecast for the coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::UpstreamFormat(e.to_string()))?;

        Self::into_snapshot(forecast)
    }

    fn into_snapshot(forecast: ForecastResponse) -> Result<WeatherSnapshot, WeatherError> {
        let daily = forecast.daily;
        let days = daily.time.len();
        if daily.temperature_2m_max.len() != days
            || daily.temperature_2m_min.len() != days
            || daily.weathercode.len() != days
        {
            return Err(WeatherError::UpstreamFormat(format!(
                "daily arrays disagree on length: time={}, max={}, min={}, code={}",
                days,
                daily.temperature_2m_max.len(),
                daily.temperature_2m_min.len(),
                daily.weathercode.len()
            )));
        }

        let forecast_days = daily
            .time
            .into_iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.temperature_2m_min)
            .zip(daily.weathercode)
            .map(|(((date, max_temp_c), min_temp_c), weather_code)| DayForecast {
                date,
                max_temp_c,
                min_temp_c,
                weather_code,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            temperature = forecast.current_weather.temperature,
            days = forecast_days.len(),
            "Fetched weather snapshot"
        );

        Ok(WeatherSnapshot {
            current: CurrentWeather {
                temperature_c: forecast.current_weather.temperature,
                weather_code: forecast.current_weather.weathercode,
                observed_at: forecast.current_weather.time,
            },
            forecast: forecast_days,
            fetched_at: Utc::now(),
        })
    }
}
