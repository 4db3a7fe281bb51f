//! Mock forecast synthesis
//!
//! Produces an hourly series for a station by scaling its current readings
//! with a diurnal rush-hour factor and a per-hour random jitter. Stands in
//! for a TEMPO + ground station + weather model that does not exist.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::debug;

use super::random::RandomSource;
use crate::models::{Contributions, Forecast, ForecastPoint, Pollutants, Station};

/// Default forecast length in hours
pub const DEFAULT_HORIZON_HOURS: usize = 48;

const RUSH_HOUR_FACTOR: f64 = 1.3;
const JITTER: (f64, f64) = (0.9, 1.1);
const TEMPO_WEIGHT: (f64, f64) = (0.45, 0.55);
const WEATHER_WEIGHT: (f64, f64) = (0.25, 0.35);
const HISTORICAL_WEIGHT: (f64, f64) = (0.15, 0.25);

/// Traffic multiplier for a local hour of day: 1.3 during 7-9 and 17-19, else 1.0
#[must_use]
pub fn rush_hour_factor(hour_of_day: u32) -> f64 {
    match hour_of_day {
        7..=9 | 17..=19 => RUSH_HOUR_FACTOR,
        _ => 1.0,
    }
}

/// Synthesize `horizon_hours` hourly points starting at `now`.
///
/// Hour of day is read in the timezone of `now`. Per point the source is
/// drawn four times: jitter, then the tempo, weather and historical weights.
/// The weights are not normalized.
pub fn synthesize<T, R>(
    station: &Station,
    horizon_hours: usize,
    now: &DateTime<T>,
    rng: &mut R,
) -> Vec<ForecastPoint>
where
    T: TimeZone,
    R: RandomSource + ?Sized,
{
    let mut points = Vec::with_capacity(horizon_hours);

    for i in 0..horizon_hours {
        let timestamp = now.clone() + Duration::hours(i64::try_from(i).unwrap_or(i64::MAX));
        let rush = rush_hour_factor(timestamp.hour());
        let jitter = rng.uniform(JITTER.0, JITTER.1);

        let traffic = rush * jitter;
        // O3 is suppressed while traffic NOx is high
        let ozone = (2.0 - rush) * jitter;

        let contributions = Contributions {
            tempo: rng.uniform(TEMPO_WEIGHT.0, TEMPO_WEIGHT.1),
            weather: rng.uniform(WEATHER_WEIGHT.0, WEATHER_WEIGHT.1),
            historical: rng.uniform(HISTORICAL_WEIGHT.0, HISTORICAL_WEIGHT.1),
        };

        points.push(ForecastPoint {
            timestamp: timestamp.fixed_offset(),
            aqi: (f64::from(station.current_aqi) * traffic).round() as u32,
            pollutants: Pollutants {
                no2: (station.pollutants.no2 * traffic).round(),
                o3: (station.pollutants.o3 * ozone).round(),
                pm25: (station.pollutants.pm25 * traffic).round(),
            },
            contributions,
        });
    }

    points
}

/// Forecast generator bound to a random source, horizon and display timezone
pub struct ForecastSynthesizer {
    horizon_hours: usize,
    timezone: Tz,
    rng: Box<dyn RandomSource + Send>,
}

impl ForecastSynthesizer {
    #[must_use]
    pub fn new(horizon_hours: usize, timezone: Tz, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            horizon_hours,
            timezone,
            rng,
        }
    }

    /// Seeded generator; without a seed one is drawn from the thread RNG
    #[must_use]
    pub fn seeded(horizon_hours: usize, timezone: Tz, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        debug!(seed, horizon_hours, %timezone, "Creating forecast synthesizer");
        Self::new(horizon_hours, timezone, Box::new(StdRng::seed_from_u64(seed)))
    }

    #[must_use]
    pub fn horizon_hours(&self) -> usize {
        self.horizon_hours
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Forecast starting at the current instant in the configured timezone
    pub fn forecast(&mut self, station: &Station) -> Forecast {
        let now = Utc::now().with_timezone(&self.timezone);
        self.forecast_at(station, &now)
    }

    pub fn forecast_at<T: TimeZone>(&mut self, station: &Station, now: &DateTime<T>) -> Forecast {
        let points = synthesize(station, self.horizon_hours, now, self.rng.as_mut());
        debug!(station = %station.id, points = points.len(), "Synthesized forecast");
        Forecast::new(station.id.clone(), points)
    }
}

impl fmt::Debug for ForecastSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastSynthesizer")
            .field("horizon_hours", &self.horizon_hours)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}
