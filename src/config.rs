//! Configuration management for the `AeroSight` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AeroSightError;
use crate::map::MapConfig;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `AeroSight` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AeroSightConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Forecast synthesis settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Forecast playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Forecast synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of hourly points per forecast
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: u32,
    /// IANA timezone used for hour-of-day (e.g. "America/Los_Angeles")
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Fixed random seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

/// Forecast playback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Time between playback steps in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_horizon_hours() -> u32 {
    48
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_hours: default_horizon_hours(),
            timezone: default_timezone(),
            seed: None,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ForecastConfig {
    /// Parsed display timezone
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            AeroSightError::config(format!("Unknown timezone '{}'", self.timezone)).into()
        })
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl AeroSightConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. AEROSIGHT_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("AEROSIGHT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AeroSightConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aerosight").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.forecast.timezone.is_empty() {
            self.forecast.timezone = default_timezone();
        }
        if self.playback.tick_millis == 0 {
            self.playback.tick_millis = default_tick_millis();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.horizon_hours > 168 {
            return Err(AeroSightError::config(
                "Forecast horizon cannot exceed 168 hours (1 week)"
            ).into());
        }

        if !(50..=60_000).contains(&self.playback.tick_millis) {
            return Err(AeroSightError::config(
                "Playback tick must be between 50 and 60000 milliseconds"
            ).into());
        }

        if self.map.focus_zoom < self.map.default_zoom {
            return Err(AeroSightError::config(
                "Map focus zoom cannot be lower than the default zoom"
            ).into());
        }

        if self.map.marker_size == 0 || self.map.marker_size > 256 {
            return Err(AeroSightError::config(
                "Map marker size must be between 1 and 256 pixels"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AeroSightError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AeroSightError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        self.forecast.timezone()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AeroSightConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.forecast.horizon_hours, 48);
        assert_eq!(config.forecast.timezone, "UTC");
        assert!(config.forecast.seed.is_none());
        assert_eq!(config.playback.tick(), Duration::from_secs(1));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.map.focus_zoom, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AeroSightConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AeroSightConfig::default();
        config.forecast.horizon_hours = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("horizon cannot exceed"));

        let mut config = AeroSightConfig::default();
        config.playback.tick_millis = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timezone() {
        let mut config = AeroSightConfig::default();
        config.forecast.timezone = "America/Chicago".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.forecast.timezone().unwrap(), chrono_tz::America::Chicago);

        config.forecast.timezone = "Mars/Olympus_Mons".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Unknown timezone"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AeroSightConfig::default();
        config.server.port = 0;
        config.logging.format = String::new();
        config.playback.tick_millis = 0;
        config.apply_defaults();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.playback.tick_millis, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("aerosight-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[forecast]\nhorizon_hours = 24\ntimezone = \"America/New_York\"\nseed = 7\n\n[playback]\ntick_millis = 250\n"
        )
        .unwrap();

        let config = AeroSightConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.forecast.horizon_hours, 24);
        assert_eq!(config.forecast.seed, Some(7));
        assert_eq!(config.playback.tick_millis, 250);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AeroSightConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("aerosight"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
