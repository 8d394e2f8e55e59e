//! Core types for Skycast: user settings and application configuration.
//!
//! This crate sits at the bottom of the workspace; every other crate may
//! depend on it, it depends on no other Skycast crate.

pub mod config;
pub mod settings;

pub use config::{Config, ValidationResult};
pub use settings::{Settings, SettingsPatch, TemperatureUnit};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
