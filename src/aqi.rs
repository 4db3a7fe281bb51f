//! Air Quality Index classification and health guidance
//!
//! Maps raw AQI readings onto the six EPA severity categories. The category
//! table is a process-wide constant; [`classify`] hands out references into it.

use serde::Serialize;
use std::fmt;

/// Severity tag of an AQI category, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AqiLevel {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthySensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301 and above
    Hazardous,
}

/// How urgently a renderer should present a health advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryTone {
    Safe,
    Caution,
    Alert,
}

/// One row of the AQI category table
#[derive(Debug, PartialEq, Serialize)]
pub struct AqiCategory {
    pub level: AqiLevel,
    pub label: &'static str,
    /// Theme color token used by the presentation layer
    pub color: &'static str,
    /// Inclusive AQI range covered by this category
    pub range: (u32, u32),
    pub health_message: &'static str,
    pub recommendations: &'static [&'static str],
}

pub static AQI_CATEGORIES: [AqiCategory; 6] = [
    AqiCategory {
        level: AqiLevel::Good,
        label: "Good",
        color: "aqi-good",
        range: (0, 50),
        health_message: "Air quality is satisfactory, and air pollution poses little or no risk.",
        recommendations: &[
            "Perfect day for outdoor activities",
            "Open windows to enjoy fresh air",
            "Great conditions for exercise",
        ],
    },
    AqiCategory {
        level: AqiLevel::Moderate,
        label: "Moderate",
        color: "aqi-moderate",
        range: (51, 100),
        health_message: "Air quality is acceptable. However, there may be a risk for some people, particularly those who are unusually sensitive to air pollution.",
        recommendations: &[
            "Outdoor activities are generally safe",
            "Sensitive groups should consider limiting prolonged outdoor exertion",
            "Monitor symptoms if you have respiratory conditions",
        ],
    },
    AqiCategory {
        level: AqiLevel::UnhealthySensitive,
        label: "Unhealthy for Sensitive Groups",
        color: "aqi-unhealthy.sensitive",
        range: (101, 150),
        health_message: "Members of sensitive groups may experience health effects. The general public is less likely to be affected.",
        recommendations: &[
            "Sensitive groups should reduce prolonged outdoor exertion",
            "Keep outdoor activities short and less intense",
            "Consider wearing a mask if sensitive",
        ],
    },
    AqiCategory {
        level: AqiLevel::Unhealthy,
        label: "Unhealthy",
        color: "aqi-unhealthy",
        range: (151, 200),
        health_message: "Some members of the general public may experience health effects; members of sensitive groups may experience more serious health effects.",
        recommendations: &[
            "Everyone should reduce prolonged outdoor exertion",
            "Sensitive groups should avoid outdoor activities",
            "Use air purifiers indoors",
        ],
    },
    AqiCategory {
        level: AqiLevel::VeryUnhealthy,
        label: "Very Unhealthy",
        color: "aqi-unhealthy.very",
        range: (201, 300),
        health_message: "Health alert: The risk of health effects is increased for everyone.",
        recommendations: &[
            "Everyone should avoid outdoor activities",
            "Stay indoors with windows closed",
            "Use air purifiers and wear masks if you must go outside",
        ],
    },
    AqiCategory {
        level: AqiLevel::Hazardous,
        label: "Hazardous",
        color: "aqi-hazardous",
        range: (301, 500),
        health_message: "Health warning of emergency conditions: everyone is more likely to be affected.",
        recommendations: &[
            "Stay indoors and keep activity levels low",
            "Avoid all outdoor activities",
            "Follow emergency health advisories",
        ],
    },
];

/// Classify an AQI reading. Total over all integers: anything at or below 50
/// (negatives included) is good, anything above 300 is hazardous.
#[must_use]
pub fn classify(aqi: i64) -> &'static AqiCategory {
    let index = match aqi {
        a if a <= 50 => 0,
        a if a <= 100 => 1,
        a if a <= 150 => 2,
        a if a <= 200 => 3,
        a if a <= 300 => 4,
        _ => 5,
    };
    &AQI_CATEGORIES[index]
}

/// Human readable name for a pollutant code, falling back to the uppercased code
#[must_use]
pub fn pollutant_display_name(code: &str) -> String {
    match code {
        "no2" => "Nitrogen Dioxide".to_string(),
        "o3" => "Ozone".to_string(),
        "pm25" => "PM2.5".to_string(),
        "pm10" => "PM10".to_string(),
        "so2" => "Sulfur Dioxide".to_string(),
        "co" => "Carbon Monoxide".to_string(),
        other => other.to_uppercase(),
    }
}

impl AqiLevel {
    /// Table entry for this level
    #[must_use]
    pub fn category(self) -> &'static AqiCategory {
        &AQI_CATEGORIES[self as usize]
    }

    /// Anything worse than moderate
    #[must_use]
    pub fn is_elevated(self) -> bool {
        self > AqiLevel::Moderate
    }

    #[must_use]
    pub fn tone(self) -> AdvisoryTone {
        match self {
            AqiLevel::Good | AqiLevel::Moderate => AdvisoryTone::Safe,
            AqiLevel::UnhealthySensitive | AqiLevel::Unhealthy => AdvisoryTone::Caution,
            AqiLevel::VeryUnhealthy | AqiLevel::Hazardous => AdvisoryTone::Alert,
        }
    }

    /// Hex color for map markers
    #[must_use]
    pub fn marker_color(self) -> &'static str {
        match self {
            AqiLevel::Good => "#22c55e",
            AqiLevel::Moderate => "#eab308",
            AqiLevel::UnhealthySensitive => "#f97316",
            AqiLevel::Unhealthy => "#ef4444",
            AqiLevel::VeryUnhealthy => "#dc2626",
            AqiLevel::Hazardous => "#991b1b",
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AqiLevel::Good => write!(f, "good"),
            AqiLevel::Moderate => write!(f, "moderate"),
            AqiLevel::UnhealthySensitive => write!(f, "unhealthy-sensitive"),
            AqiLevel::Unhealthy => write!(f, "unhealthy"),
            AqiLevel::VeryUnhealthy => write!(f, "very-unhealthy"),
            AqiLevel::Hazardous => write!(f, "hazardous"),
        }
    }
}
