//! Dashboard session
//!
//! [`DashboardState`] holds the selection and the time index. [`Dashboard`]
//! shares it between request handlers and drives timed playback: one step
//! per tick until the end of the forecast, a pause, a manual interaction or
//! the dashboard being dropped.

pub mod advisory;
pub mod state;

pub use advisory::HealthAdvisory;
pub use state::{DashboardSnapshot, DashboardState, PlaybackTimer, StepDirection};

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::aqi;
use crate::config::AeroSightConfig;
use crate::models::{ExplainabilityData, Forecast, StationCatalog};
use crate::synthesis::ForecastSynthesizer;

#[derive(Debug, Clone)]
pub struct Dashboard {
    state: Arc<Mutex<DashboardState>>,
    tick: Duration,
}

impl Dashboard {
    #[must_use]
    pub fn new(state: DashboardState, tick: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            tick,
        }
    }

    /// Dashboard over the built-in catalog with a synthesizer built from config
    pub fn from_config(config: &AeroSightConfig) -> anyhow::Result<Self> {
        let timezone = config.forecast.timezone()?;
        let horizon = usize::try_from(config.forecast.horizon_hours)?;
        let synthesizer = ForecastSynthesizer::seeded(horizon, timezone, config.forecast.seed);
        let state = DashboardState::new(StationCatalog::builtin(), synthesizer);
        Ok(Self::new(state, config.playback.tick()))
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn catalog(&self) -> StationCatalog {
        self.state.lock().await.catalog().clone()
    }

    pub async fn forecast(&self) -> Forecast {
        self.state.lock().await.forecast().clone()
    }

    pub async fn explainability(&self) -> Option<ExplainabilityData> {
        self.state.lock().await.explainability()
    }

    #[instrument(skip(self))]
    pub async fn select_station(&self, station_id: &str) -> Result<DashboardSnapshot> {
        let mut state = self.state.lock().await;
        state.select_station(station_id)?;
        info!(
            station = %state.selected().name,
            coordinates = %state.selected().format_coordinates(),
            "Station selected"
        );
        if let Some(peak) = state.forecast().peak() {
            let level = aqi::classify(i64::from(peak.aqi)).level;
            if level.is_elevated() {
                warn!(aqi = peak.aqi, %level, at = %peak.timestamp, "Forecast peak above moderate");
            }
        }
        Ok(state.snapshot())
    }

    #[instrument(skip(self))]
    pub async fn seek(&self, index: usize) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        state.seek(index);
        state.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn step(&self, direction: StepDirection) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        state.step(direction);
        state.snapshot()
    }

    /// Pause when playing, otherwise start playback (from the start if the
    /// last hour is showing)
    #[instrument(skip(self))]
    pub async fn toggle_play(&self) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        if state.is_playing() {
            state.stop();
            debug!(index = state.index(), "Playback paused");
        } else if state.prepare_playback() {
            let generation = state.next_generation();
            let handle = tokio::spawn(run_playback(
                Arc::downgrade(&self.state),
                generation,
                self.tick,
            ));
            state.start(PlaybackTimer::new(handle));
            debug!(index = state.index(), "Playback started");
        }
        state.snapshot()
    }
}

/// Playback loop for one run. Holds only a weak reference so dropping the
/// dashboard ends it.
async fn run_playback(state: Weak<Mutex<DashboardState>>, generation: u64, tick: Duration) {
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let Some(shared) = state.upgrade() else {
            break;
        };
        let mut guard = shared.lock().await;
        if !guard.advance_playback(generation) {
            debug!(generation, index = guard.index(), "Playback loop finished");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::SequenceSource;
    use chrono_tz::Tz;

    fn dashboard(hours: usize) -> Dashboard {
        let synthesizer =
            ForecastSynthesizer::new(hours, Tz::UTC, Box::new(SequenceSource::constant(0.5)));
        let state = DashboardState::new(StationCatalog::builtin(), synthesizer);
        Dashboard::new(state, Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_advances_each_tick() {
        let dashboard = dashboard(48);

        let started = dashboard.toggle_play().await;
        assert!(started.playing);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.index, 3);
        assert!(snapshot.playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_timer() {
        let dashboard = dashboard(48);
        dashboard.toggle_play().await;
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        let paused = dashboard.toggle_play().await;
        assert!(!paused.playing);
        assert_eq!(paused.index, 2);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(dashboard.snapshot().await.index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_interaction_stops_timer() {
        let dashboard = dashboard(48);
        dashboard.toggle_play().await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        let seeked = dashboard.seek(10).await;
        assert!(!seeked.playing);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(dashboard.snapshot().await.index, 10);

        dashboard.toggle_play().await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        let stepped = dashboard.step(StepDirection::Back).await;
        assert!(!stepped.playing);
        assert_eq!(stepped.index, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_stops_and_rewinds_at_end() {
        let dashboard = dashboard(3);
        dashboard.toggle_play().await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        let snapshot = dashboard.snapshot().await;
        assert!(!snapshot.playing);
        assert_eq!(snapshot.index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_from_last_hour_restarts() {
        let dashboard = dashboard(48);
        dashboard.seek(47).await;

        let snapshot = dashboard.toggle_play().await;
        assert!(snapshot.playing);
        assert_eq!(snapshot.index, 0);
        dashboard.toggle_play().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        let dashboard = dashboard(48);
        dashboard.toggle_play().await;
        let weak = Arc::downgrade(&dashboard.state);

        drop(dashboard);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_empty_forecast_never_plays() {
        let dashboard = dashboard(0);
        let snapshot = dashboard.toggle_play().await;
        assert!(!snapshot.playing);
        assert!(dashboard.explainability().await.is_none());
    }

    #[tokio::test]
    async fn test_select_station() {
        let dashboard = dashboard(48);
        let snapshot = dashboard.select_station("houston-downtown").await.unwrap();
        assert_eq!(snapshot.station.id, "houston-downtown");
        assert_eq!(dashboard.forecast().await.station_id, "houston-downtown");
        assert!(dashboard.select_station("atlantis").await.is_err());
    }
}
