//! Data models for the AeroSight dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Station: monitoring stations and the built-in catalog
//! - Forecast: hourly forecast points and collections
//! - Explainability: feature attribution view-model

pub mod explainability;
pub mod forecast;
pub mod station;

// Re-export all public types for convenient access
pub use explainability::{DataQuality, ExplainabilityData, FeatureAttribution};
pub use forecast::{ContributionPercentages, Contributions, Forecast, ForecastPoint};
pub use station::{Pollutants, Station, StationCatalog};
