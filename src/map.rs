//! Map view-model: station markers, viewport and legend
//!
//! Marker styling comes from the [`MapConfig`] the view is built with; there
//! is no shared default icon that gets patched at startup.

use serde::{Deserialize, Serialize};

use crate::aqi::{self, AqiLevel};
use crate::models::Station;

/// Per-instance map settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapConfig {
    /// Initial center latitude (geographic center of the contiguous US)
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    /// Zoom used when a station is selected
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
    /// Marker diameter in pixels
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
}

fn default_center_lat() -> f64 {
    39.8283
}

fn default_center_lon() -> f64 {
    -98.5795
}

fn default_zoom() -> u8 {
    4
}

fn default_focus_zoom() -> u8 {
    12
}

fn default_marker_size() -> u32 {
    32
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            default_zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
            marker_size: default_marker_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationMarker {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Text drawn inside the marker
    pub label: String,
    pub level: AqiLevel,
    pub color: &'static str,
    pub size: u32,
    /// Pixel offset of the marker anchor (its center)
    pub anchor: (u32, u32),
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Viewport {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct MapView {
    config: MapConfig,
}

impl MapView {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    /// One marker per station, colored by its current AQI level
    #[must_use]
    pub fn markers(&self, stations: &[Station], selected_id: Option<&str>) -> Vec<StationMarker> {
        let size = self.config.marker_size;
        stations
            .iter()
            .map(|station| {
                let level = aqi::classify(i64::from(station.current_aqi)).level;
                StationMarker {
                    station_id: station.id.clone(),
                    name: station.name.clone(),
                    lat: station.lat,
                    lon: station.lon,
                    label: station.current_aqi.to_string(),
                    level,
                    color: level.marker_color(),
                    size,
                    anchor: (size / 2, size / 2),
                    selected: selected_id == Some(station.id.as_str()),
                }
            })
            .collect()
    }

    /// Focus on the selected station, or show the whole country
    #[must_use]
    pub fn viewport(&self, selected: Option<&Station>) -> Viewport {
        match selected {
            Some(station) => Viewport {
                lat: station.lat,
                lon: station.lon,
                zoom: self.config.focus_zoom,
            },
            None => Viewport {
                lat: self.config.center_lat,
                lon: self.config.center_lon,
                zoom: self.config.default_zoom,
            },
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

/// Condensed three-entry legend shown on the map
#[must_use]
pub fn legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            label: "Good (0-50)",
            color: AqiLevel::Good.marker_color(),
        },
        LegendEntry {
            label: "Moderate (51-100)",
            color: AqiLevel::Moderate.marker_color(),
        },
        LegendEntry {
            label: "Unhealthy (101+)",
            color: AqiLevel::Unhealthy.marker_color(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pollutants, StationCatalog};

    #[test]
    fn test_markers_follow_station_levels() {
        let catalog = StationCatalog::builtin();
        let view = MapView::new(MapConfig::default());

        let markers = view.markers(catalog.all(), Some("la-downtown"));

        assert_eq!(markers.len(), 5);
        let sf = &markers[0];
        assert_eq!(sf.label, "45");
        assert_eq!(sf.level, AqiLevel::Good);
        assert_eq!(sf.color, "#22c55e");
        assert!(!sf.selected);

        let la = &markers[1];
        assert_eq!(la.level, AqiLevel::Moderate);
        assert_eq!(la.color, "#eab308");
        assert!(la.selected);
        assert_eq!(la.anchor, (16, 16));
    }

    #[test]
    fn test_marker_size_is_per_instance() {
        let station = Station::new("x", "X", 0.0, 0.0, 420, Pollutants { no2: 1.0, o3: 1.0, pm25: 1.0 });
        let small = MapView::new(MapConfig { marker_size: 20, ..MapConfig::default() });
        let large = MapView::default();

        let a = small.markers(std::slice::from_ref(&station), None);
        let b = large.markers(std::slice::from_ref(&station), None);
        assert_eq!(a[0].size, 20);
        assert_eq!(b[0].size, 32);
        assert_eq!(a[0].color, "#991b1b");
    }

    #[test]
    fn test_viewport() {
        let catalog = StationCatalog::builtin();
        let view = MapView::default();

        let overview = view.viewport(None);
        assert_eq!(overview, Viewport { lat: 39.8283, lon: -98.5795, zoom: 4 });

        let chicago = view.viewport(catalog.find("chicago-loop"));
        assert_eq!(chicago, Viewport { lat: 41.8781, lon: -87.6298, zoom: 12 });
    }

    #[test]
    fn test_legend() {
        let entries = legend();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].label, "Unhealthy (101+)");
    }
}
