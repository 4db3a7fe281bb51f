//! Explainability view-model shown next to a forecast point

use serde::{Deserialize, Serialize};

/// SHAP-style attribution of one input feature
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeatureAttribution {
    pub name: String,
    pub value: f64,
    /// Positive values push the AQI up, negative values pull it down
    pub impact: f64,
}

impl FeatureAttribution {
    #[must_use]
    pub fn raises_aqi(&self) -> bool {
        self.impact > 0.0
    }
}

/// Quality scores (0-1) of each data source
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DataQuality {
    pub tempo: f64,
    pub openaq: f64,
    pub weather: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExplainabilityData {
    pub features: Vec<FeatureAttribution>,
    pub model_confidence: f64,
    pub data_quality: DataQuality,
}
