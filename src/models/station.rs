//! Monitoring station model and the built-in station catalog

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{AeroSightError, Result};

/// Pollutant concentrations (NO₂ and O₃ in ppb, PM2.5 in µg/m³)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Pollutants {
    pub no2: f64,
    pub o3: f64,
    pub pm25: f64,
}

/// Ground monitoring station
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    pub current_aqi: u32,
    pub pollutants: Pollutants,
}

impl Station {
    /// Create a new station
    #[must_use]
    pub fn new(id: &str, name: &str, lat: f64, lon: f64, current_aqi: u32, pollutants: Pollutants) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lon,
            current_aqi,
            pollutants,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Fixed, immutable set of stations shown on the dashboard
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Arc<[Station]>,
}

impl StationCatalog {
    /// Build a catalog from an explicit station list. The list must not be empty.
    pub fn new(stations: Vec<Station>) -> Result<Self> {
        if stations.is_empty() {
            return Err(AeroSightError::validation("station catalog cannot be empty"));
        }
        Ok(Self {
            stations: stations.into(),
        })
    }

    /// The five demo stations across major US cities
    #[must_use]
    pub fn builtin() -> Self {
        let stations = vec![
            Station::new(
                "sf-downtown",
                "San Francisco Downtown",
                37.7749,
                -122.4194,
                45,
                Pollutants { no2: 22.0, o3: 35.0, pm25: 12.0 },
            ),
            Station::new(
                "la-downtown",
                "Los Angeles Downtown",
                34.0522,
                -118.2437,
                78,
                Pollutants { no2: 38.0, o3: 62.0, pm25: 28.0 },
            ),
            Station::new(
                "nyc-manhattan",
                "New York Manhattan",
                40.7128,
                -74.0060,
                52,
                Pollutants { no2: 28.0, o3: 42.0, pm25: 18.0 },
            ),
            Station::new(
                "chicago-loop",
                "Chicago Loop",
                41.8781,
                -87.6298,
                38,
                Pollutants { no2: 18.0, o3: 32.0, pm25: 14.0 },
            ),
            Station::new(
                "houston-downtown",
                "Houston Downtown",
                29.7604,
                -95.3698,
                65,
                Pollutants { no2: 32.0, o3: 52.0, pm25: 22.0 },
            ),
        ];
        Self {
            stations: stations.into(),
        }
    }

    #[must_use]
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Like [`find`](Self::find) but reports unknown ids as `NotFound`
    pub fn get(&self, id: &str) -> Result<&Station> {
        self.find(id)
            .ok_or_else(|| AeroSightError::not_found(format!("station '{id}'")))
    }

    /// Station selected when the dashboard opens
    #[must_use]
    pub fn default_station(&self) -> &Station {
        &self.stations[0]
    }
}

impl Default for StationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = StationCatalog::builtin();
        assert_eq!(catalog.all().len(), 5);
        assert_eq!(catalog.default_station().id, "sf-downtown");

        let la = catalog.find("la-downtown").unwrap();
        assert_eq!(la.current_aqi, 78);
        assert_eq!(la.pollutants.o3, 62.0);
        assert_eq!(la.format_coordinates(), "34.0522, -118.2437");
    }

    #[test]
    fn test_unknown_station() {
        let catalog = StationCatalog::builtin();
        assert!(catalog.find("atlantis").is_none());
        let err = catalog.get("atlantis").unwrap_err();
        assert!(matches!(err, AeroSightError::NotFound { .. }));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(StationCatalog::new(Vec::new()).is_err());
    }
}
