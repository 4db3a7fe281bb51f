//! `AeroSight` - simulated hyperlocal air quality forecasts
//!
//! This library provides AQI classification, mock forecast and
//! explainability synthesis, and the dashboard session served to the
//! front end.

pub mod api;
pub mod aqi;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod map;
pub mod models;
pub mod synthesis;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use aqi::{AqiCategory, AqiLevel, classify, pollutant_display_name};
pub use config::AeroSightConfig;
pub use dashboard::{Dashboard, DashboardState, HealthAdvisory};
pub use error::AeroSightError;
pub use models::{ExplainabilityData, Forecast, ForecastPoint, Station, StationCatalog};
pub use synthesis::{ForecastSynthesizer, RandomSource, SequenceSource, explain, synthesize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AeroSightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
