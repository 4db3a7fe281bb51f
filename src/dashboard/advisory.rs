//! Health advisory panel view-model

use serde::Serialize;

use crate::aqi::{self, AdvisoryTone, AqiLevel};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthAdvisory {
    pub aqi: u32,
    pub level: AqiLevel,
    pub label: &'static str,
    /// Panel subtitle, e.g. "Moderate Air Quality"
    pub headline: String,
    pub health_message: &'static str,
    pub recommendations: &'static [&'static str],
    pub tone: AdvisoryTone,
}

impl HealthAdvisory {
    #[must_use]
    pub fn for_aqi(aqi: u32) -> Self {
        let category = aqi::classify(i64::from(aqi));
        Self {
            aqi,
            level: category.level,
            label: category.label,
            headline: format!("{} Air Quality", category.label),
            health_message: category.health_message,
            recommendations: category.recommendations,
            tone: category.level.tone(),
        }
    }
}
