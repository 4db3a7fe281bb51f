//! Mock data synthesis
//!
//! Simulates the outputs of a satellite-driven forecasting pipeline:
//! - Forecast: hourly series with a rush-hour pattern and random jitter
//! - Explain: fixed SHAP-style attribution for a forecast point
//! - Random: injectable random sources

pub mod explain;
pub mod forecast;
pub mod random;

pub use explain::explain;
pub use forecast::{DEFAULT_HORIZON_HOURS, ForecastSynthesizer, rush_hour_factor, synthesize};
pub use random::{RandomSource, SequenceSource};
