use crate::config::SimParams;
use crate::reference::ResolvedProfiles;
use crate::rng::RandomSource;
use crate::round_to;
use serde::Serialize;

const FRESH_TYRES: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LapRecord {
    /// 1-based
    pub lap: u32,
    /// (s) rounded to 3 decimals, pit loss included
    pub lap_time: f64,
    /// (%) health entering the lap, before wear or a pit reset, rounded to 1 decimal
    pub tyre_health: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapSeries {
    pub records: Vec<LapRecord>,
    /// Laps on which the car pitted, ascending
    pub pit_laps: Vec<u32>,
}

impl LapSeries {
    pub fn lap_times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.lap_time).collect()
    }

    pub fn tyre_health(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tyre_health).collect()
    }
}

/// Lap-invariant part of the lap model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapModel {
    /// (s) lap time on fresh tyres with no variance
    pub base_lap_time: f64,
    /// Health lost per lap
    pub wear_per_lap: f64,
    /// `1 - consistency`
    pub variance_scale: f64,
}

impl LapModel {
    pub fn new(profiles: &ResolvedProfiles, params: &SimParams) -> Self {
        let base_lap_time = profiles.track.base_time
            + (profiles.driver.base_pace - params.reference_pace)
            + profiles.tyre.speed_bonus
            + profiles.weather.time_penalty;
        Self {
            base_lap_time,
            wear_per_lap: profiles.tyre.degradation_rate * profiles.track.degradation_factor,
            variance_scale: 1.0 - profiles.driver.consistency,
        }
    }

    /// Walk `laps` laps from fresh tyres. `planned_stops` are extra pit laps on
    /// top of the forced ones; pass an empty slice for forced stops only.
    /// Draws exactly one `uniform` per lap.
    pub fn run<R: RandomSource>(
        &self,
        laps: u32,
        planned_stops: &[u32],
        params: &SimParams,
        rng: &mut R,
    ) -> LapSeries {
        let mut series = LapSeries {
            records: Vec::with_capacity(laps as usize),
            pit_laps: Vec::new(),
        };
        let mut health = FRESH_TYRES;
        let amplitude = params.variance_amplitude;

        for lap in 1..=laps {
            let variance = rng.uniform(-amplitude, amplitude) * self.variance_scale;
            let tyre_factor = (FRESH_TYRES - health) * params.tyre_penalty;
            let mut lap_time = self.base_lap_time + tyre_factor + variance;
            let entering = health;

            let forced = health < params.pit_threshold;
            if forced || planned_stops.contains(&lap) {
                lap_time += params.pit_loss;
                health = FRESH_TYRES;
                series.pit_laps.push(lap);
                tracing::debug!(lap, forced, tyre_health = entering, "pit stop");
            }

            series.records.push(LapRecord {
                lap,
                lap_time: round_to(lap_time, 3),
                tyre_health: round_to(entering, 1),
            });

            // wear applies to the fitted set, fresh or not
            health = (health - self.wear_per_lap).clamp(0.0, FRESH_TYRES);
        }

        series
    }
}
