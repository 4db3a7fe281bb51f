//! Dashboard state: selected station, forecast and time scrubbing
//!
//! Everything here is synchronous. Playback only holds a [`PlaybackTimer`];
//! the task behind it lives in [`super::Dashboard`].

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::debug;

use super::advisory::HealthAdvisory;
use crate::Result;
use crate::aqi::{self, AqiLevel};
use crate::models::{
    ContributionPercentages, ExplainabilityData, Forecast, ForecastPoint, Station, StationCatalog,
};
use crate::synthesis::{ForecastSynthesizer, explain};

/// Handle to a running playback task; aborts the task when dropped
#[derive(Debug)]
pub struct PlaybackTimer {
    handle: JoinHandle<()>,
}

impl PlaybackTimer {
    #[must_use]
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Forward,
    Back,
}

/// Read-only projection of the dashboard for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub station: Station,
    /// Level of the station's current reading (header badge)
    pub station_level: AqiLevel,
    pub index: usize,
    pub last_index: usize,
    pub playing: bool,
    pub point: Option<ForecastPoint>,
    pub advisory: Option<HealthAdvisory>,
    pub contributions: Option<ContributionPercentages>,
}

#[derive(Debug)]
pub struct DashboardState {
    catalog: StationCatalog,
    selected: Station,
    forecast: Forecast,
    index: usize,
    timer: Option<PlaybackTimer>,
    /// Identifies the current playback run; ticks from older runs are ignored
    generation: u64,
    synthesizer: ForecastSynthesizer,
}

impl DashboardState {
    /// Opens on the catalog's default station
    pub fn new(catalog: StationCatalog, mut synthesizer: ForecastSynthesizer) -> Self {
        let selected = catalog.default_station().clone();
        let forecast = synthesizer.forecast(&selected);
        Self {
            catalog,
            selected,
            forecast,
            index: 0,
            timer: None,
            generation: 0,
            synthesizer,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected(&self) -> &Station {
        &self.selected
    }

    #[must_use]
    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Select a station. A different station replaces the forecast; the time
    /// index is kept but clamped into the new forecast.
    pub fn select_station(&mut self, station_id: &str) -> Result<()> {
        let station = self.catalog.get(station_id)?.clone();
        if station.id == self.selected.id {
            debug!(station = %station.id, "Station already selected");
            return Ok(());
        }

        self.forecast = self.synthesizer.forecast(&station);
        self.selected = station;
        self.index = self.index.min(self.forecast.last_index());
        if self.forecast.is_empty() {
            self.stop();
        }
        debug!(station = %self.selected.id, index = self.index, "Selected station");
        Ok(())
    }

    /// Jump to an hour (clamped) and stop playback
    pub fn seek(&mut self, index: usize) {
        self.stop();
        self.index = index.min(self.forecast.last_index());
    }

    pub fn step(&mut self, direction: StepDirection) {
        self.stop();
        self.index = match direction {
            StepDirection::Forward => (self.index + 1).min(self.forecast.last_index()),
            StepDirection::Back => self.index.saturating_sub(1),
        };
    }

    /// Whether a new playback can start; rewinds first when at the last hour
    pub fn prepare_playback(&mut self) -> bool {
        if self.index >= self.forecast.last_index() {
            self.index = 0;
        }
        !self.forecast.is_empty()
    }

    /// Open a new playback run. Hand the returned generation to the tick task.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn start(&mut self, timer: PlaybackTimer) {
        self.timer = Some(timer);
    }

    /// Release the playback timer, if any
    pub fn stop(&mut self) {
        self.timer = None;
    }

    /// One playback tick. Past the last hour playback rewinds to the start
    /// and stops; returns whether playback continues.
    pub fn advance(&mut self) -> bool {
        let next = self.index + 1;
        if next >= self.forecast.len() {
            self.index = 0;
            self.stop();
            return false;
        }
        self.index = next;
        true
    }

    /// Tick from the playback run `generation`. A tick that lost the race
    /// with a pause or manual interaction changes nothing.
    pub fn advance_playback(&mut self, generation: u64) -> bool {
        if !self.is_playing() || generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale playback tick");
            return false;
        }
        self.advance()
    }

    #[must_use]
    pub fn current_point(&self) -> Option<&ForecastPoint> {
        self.forecast.point(self.index)
    }

    #[must_use]
    pub fn explainability(&self) -> Option<ExplainabilityData> {
        self.current_point().map(explain)
    }

    #[must_use]
    pub fn health_advisory(&self) -> Option<HealthAdvisory> {
        self.current_point().map(|p| HealthAdvisory::for_aqi(p.aqi))
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let point = self.current_point().cloned();
        DashboardSnapshot {
            station: self.selected.clone(),
            station_level: aqi::classify(i64::from(self.selected.current_aqi)).level,
            index: self.index,
            last_index: self.forecast.last_index(),
            playing: self.is_playing(),
            advisory: point.as_ref().map(|p| HealthAdvisory::for_aqi(p.aqi)),
            contributions: point.as_ref().map(|p| p.contributions.as_percentages()),
            point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::SequenceSource;
    use chrono_tz::Tz;

    fn state_with_horizon(hours: usize) -> DashboardState {
        let synthesizer =
            ForecastSynthesizer::new(hours, Tz::UTC, Box::new(SequenceSource::constant(0.5)));
        DashboardState::new(StationCatalog::builtin(), synthesizer)
    }

    #[test]
    fn test_opens_on_default_station() {
        let state = state_with_horizon(48);
        assert_eq!(state.selected().id, "sf-downtown");
        assert_eq!(state.forecast().len(), 48);
        assert_eq!(state.index(), 0);
        assert!(!state.is_playing());
        assert!(state.current_point().is_some());
    }

    #[test]
    fn test_select_station_replaces_forecast() {
        let mut state = state_with_horizon(48);
        state.seek(20);

        state.select_station("la-downtown").unwrap();

        assert_eq!(state.selected().id, "la-downtown");
        assert_eq!(state.forecast().station_id, "la-downtown");
        assert_eq!(state.forecast().len(), 48);
        assert_eq!(state.index(), 20);
    }

    #[test]
    fn test_select_unknown_station_keeps_state() {
        let mut state = state_with_horizon(48);
        let err = state.select_station("atlantis").unwrap_err();
        assert!(matches!(err, crate::AeroSightError::NotFound { .. }));
        assert_eq!(state.selected().id, "sf-downtown");
    }

    #[test]
    fn test_seek_and_step_are_clamped() {
        let mut state = state_with_horizon(48);
        state.seek(1_000);
        assert_eq!(state.index(), 47);

        state.step(StepDirection::Forward);
        assert_eq!(state.index(), 47);

        state.seek(0);
        state.step(StepDirection::Back);
        assert_eq!(state.index(), 0);

        state.step(StepDirection::Forward);
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn test_advance_rewinds_at_end() {
        let mut state = state_with_horizon(3);
        assert!(state.advance());
        assert!(state.advance());
        assert_eq!(state.index(), 2);
        assert!(!state.advance());
        assert_eq!(state.index(), 0);
    }

    #[tokio::test]
    async fn test_stale_playback_tick_is_ignored() {
        let mut state = state_with_horizon(48);
        let first = state.next_generation();
        state.start(PlaybackTimer::new(tokio::spawn(async {})));
        assert!(state.advance_playback(first));
        assert_eq!(state.index(), 1);

        // tick arriving after a seek
        state.seek(5);
        assert!(!state.advance_playback(first));
        assert_eq!(state.index(), 5);

        let second = state.next_generation();
        state.start(PlaybackTimer::new(tokio::spawn(async {})));
        assert!(!state.advance_playback(first));
        assert_eq!(state.index(), 5);
        assert!(state.advance_playback(second));
        assert_eq!(state.index(), 6);
    }

    #[test]
    fn test_prepare_playback_rewinds_from_last_hour() {
        let mut state = state_with_horizon(5);
        state.seek(4);
        assert!(state.prepare_playback());
        assert_eq!(state.index(), 0);

        state.seek(2);
        assert!(state.prepare_playback());
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_empty_forecast_projections() {
        let mut state = state_with_horizon(0);
        assert!(state.current_point().is_none());
        assert!(state.explainability().is_none());
        assert!(state.health_advisory().is_none());
        assert!(!state.prepare_playback());

        let snapshot = state.snapshot();
        assert!(snapshot.point.is_none());
        assert_eq!(snapshot.last_index, 0);
    }

    #[test]
    fn test_snapshot_projects_current_point() {
        let mut state = state_with_horizon(48);
        state.seek(3);
        let snapshot = state.snapshot();
        let point = snapshot.point.as_ref().unwrap();

        assert_eq!(snapshot.index, 3);
        assert_eq!(snapshot.station_level, AqiLevel::Good);
        assert_eq!(snapshot.advisory.as_ref().unwrap().aqi, point.aqi);
        assert_eq!(snapshot.contributions.unwrap().tempo, 50);

        let explanation = state.explainability().unwrap();
        assert_eq!(explanation.features[0].value, point.pollutants.no2);
    }
}
