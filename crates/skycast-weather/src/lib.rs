//! Weather data for Skycast.
//!
//! Fetches current conditions and the daily forecast from an Open-Meteo
//! style provider and maps the current temperature onto a mood news
//! category.

pub mod classify;
pub mod client;
pub mod types;

pub use classify::{classify, MoodCategory};
pub use client::WeatherClient;
pub use types::{CurrentWeather, DayForecast, WeatherError, WeatherSnapshot};
