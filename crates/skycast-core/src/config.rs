use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// News provider settings
    #[serde(default)]
    pub news: NewsConfig,

    /// Fixed coordinates used when no OS location service is available
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the Open-Meteo style forecast endpoint
    #[serde(default = "default_weather_url")]
    pub base_url: String,
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// API key for the keyed headlines provider.
    ///
    /// Optional; without it the keyed tier is skipped entirely. Can also be
    /// supplied via the `SKYCAST_NEWS_API_KEY` environment variable, which
    /// takes precedence over the file.
    pub api_key: Option<String>,

    /// Base URL of the keyed headlines provider
    #[serde(default = "default_keyed_url")]
    pub keyed_base_url: String,

    /// Base URL of the keyless headlines provider
    #[serde(default = "default_free_url")]
    pub free_base_url: String,

    /// Number of headlines requested per fetch
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_keyed_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_free_url() -> String {
    "https://saurav.tech/NewsAPI/top-headlines/category".to_string()
}

fn default_page_size() -> u32 {
    20
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            keyed_base_url: default_keyed_url(),
            free_base_url: default_free_url(),
            page_size: default_page_size(),
        }
    }
}

impl NewsConfig {
    /// Effective API key: environment variable wins over the config file.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var("SKYCAST_NEWS_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Greenwich
        Self {
            latitude: 51.4779,
            longitude: -0.0015,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            news: NewsConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.news.keyed_base_url, "news.keyed_base_url", &mut result);
        self.validate_url(&self.news.free_base_url, "news.free_base_url", &mut result);

        if self.news.page_size == 0 {
            result.add_error("news.page_size", "must be at least 1");
        }

        if !(-90.0..=90.0).contains(&self.location.latitude) {
            result.add_error("location.latitude", "must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            result.add_error("location.longitude", "must be between -180 and 180");
        }

        if self.news.effective_api_key().is_none() {
            result.add_warning(
                "news.api_key",
                "no API key configured; the keyed headlines tier will be skipped",
            );
        }

        result
    }

    fn validate_url(&self, value: &str, field: &str, result: &mut ValidationResult) {
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                result.add_error(field, format!("unsupported URL scheme: {}", url.scheme()));
            }
            Err(e) => {
                result.add_error(field, format!("invalid URL: {e}"));
            }
        }
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("skycast");
        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let validation = config.validate();
        assert!(validation.is_valid(), "{}", validation.error_summary());
    }

    #[test]
    fn test_missing_api_key_is_a_warning_not_an_error() {
        let config = Config {
            news: NewsConfig {
                api_key: None,
                ..NewsConfig::default()
            },
            ..Config::default()
        };
        let validation = config.validate();
        assert!(validation.is_valid());
        assert!(validation
            .warnings
            .iter()
            .any(|w| w.field == "news.api_key"));
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let config = Config {
            weather: WeatherConfig {
                base_url: "not a url".to_string(),
            },
            news: NewsConfig {
                free_base_url: "ftp://example.com".to_string(),
                ..NewsConfig::default()
            },
            ..Config::default()
        };
        let validation = config.validate();
        assert_eq!(validation.errors.len(), 2);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let config = Config {
            location: LocationConfig {
                latitude: 91.0,
                longitude: -181.0,
            },
            ..Config::default()
        };
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 2);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.weather.base_url, config.weather.base_url);
        assert_eq!(parsed.news.page_size, 20);
    }
}
