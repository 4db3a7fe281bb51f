//! Simulated model explainability
//!
//! There is no model behind the forecast, so the attribution is a fixed
//! narrative: six features with constant impacts, three of which echo values
//! from the selected forecast point.

use crate::models::{DataQuality, ExplainabilityData, FeatureAttribution, ForecastPoint};

pub const MODEL_CONFIDENCE: f64 = 0.87;

pub const DATA_QUALITY: DataQuality = DataQuality {
    tempo: 0.92,
    openaq: 0.88,
    weather: 0.95,
};

/// Explain a forecast point. Reads only the point's NO₂, O₃ and AQI.
#[must_use]
pub fn explain(point: &ForecastPoint) -> ExplainabilityData {
    let feature = |name: &str, value: f64, impact: f64| FeatureAttribution {
        name: name.to_string(),
        value,
        impact,
    };

    ExplainabilityData {
        features: vec![
            feature("TEMPO NO₂ Column", point.pollutants.no2, 0.35),
            feature("Wind Speed", 8.5, -0.22),
            feature("Temperature", 72.0, 0.15),
            feature("Historical Pattern", f64::from(point.aqi) * 0.8, 0.18),
            feature("Traffic Density", 0.65, 0.28),
            feature("TEMPO O₃ Column", point.pollutants.o3, 0.12),
        ],
        model_confidence: MODEL_CONFIDENCE,
        data_quality: DATA_QUALITY,
    }
}
