//! Hourly air quality forecast model

use super::Pollutants;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Share of a prediction attributed to each data source.
///
/// The weights are drawn independently and are not normalized, so they only
/// approximately sum to 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Contributions {
    /// TEMPO satellite observations
    pub tempo: f64,
    pub weather: f64,
    pub historical: f64,
}

/// Contribution weights rounded to whole percents for display
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ContributionPercentages {
    pub tempo: u32,
    pub weather: u32,
    pub historical: u32,
}

impl Contributions {
    #[must_use]
    pub fn as_percentages(&self) -> ContributionPercentages {
        let pct = |w: f64| (w * 100.0).round().max(0.0) as u32;
        ContributionPercentages {
            tempo: pct(self.tempo),
            weather: pct(self.weather),
            historical: pct(self.historical),
        }
    }

    /// Sum of the raw weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tempo + self.weather + self.historical
    }
}

/// One hour of a synthesized forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Start of the hour, carrying the offset of the clock it was generated with
    pub timestamp: DateTime<FixedOffset>,
    pub aqi: u32,
    pub pollutants: Pollutants,
    pub contributions: Contributions,
}

/// Forecast generated for one station selection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Forecast {
    pub station_id: String,
    /// Hourly points, strictly ascending by timestamp
    pub points: Vec<ForecastPoint>,
    pub generated_at: DateTime<Utc>,
}

impl Forecast {
    #[must_use]
    pub fn new(station_id: String, points: Vec<ForecastPoint>) -> Self {
        Self {
            station_id,
            points,
            generated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&ForecastPoint> {
        self.points.get(index)
    }

    /// Index of the last point, 0 for an empty forecast
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Worst hour of the forecast (first one on ties)
    #[must_use]
    pub fn peak(&self) -> Option<&ForecastPoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.aqi > best.aqi { p } else { best })
    }
}
