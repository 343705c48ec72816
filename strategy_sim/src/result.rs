use crate::config::SimParams;
use crate::laps::LapSeries;
use crate::rng::RandomSource;
use crate::round_to;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// (s) rounded to 3 decimals
    pub avg_lap_time: f64,
    pub pit_strategy: String,
    /// Mock grid position, not a modelled outcome
    pub final_position: u32,
    pub lap_times: Vec<f64>,
    pub tyre_health: Vec<f64>,
    /// (s) sum of `lap_times`, rounded to 3 decimals
    pub total_time: f64,
    pub pit_stops: u32,
    pub pit_laps: Vec<u32>,
}

/// Inputs to the finishing-position draw that come from outside the lap series.
#[derive(Debug, Clone, Copy)]
pub struct Standing {
    pub top_tier: bool,
    /// (s) base lap time of the track
    pub track_base_time: f64,
}

/// Reduce a lap series into the summary. Draws exactly one `pick`.
pub fn aggregate<R: RandomSource>(
    series: LapSeries,
    pit_strategy: String,
    standing: Standing,
    params: &SimParams,
    rng: &mut R,
) -> SimulationResult {
    let lap_times = series.lap_times();
    let total_time: f64 = lap_times.iter().sum();
    let avg_lap_time = if lap_times.is_empty() {
        0.0
    } else {
        total_time / lap_times.len() as f64
    };

    let quick = avg_lap_time < standing.track_base_time + params.top_tier_margin;
    let final_position = if standing.top_tier && quick {
        rng.pick(1, params.top_tier_positions)
    } else {
        rng.pick(1, params.grid_size)
    };

    SimulationResult {
        avg_lap_time: round_to(avg_lap_time, 3),
        pit_strategy,
        final_position,
        tyre_health: series.tyre_health(),
        lap_times,
        total_time: round_to(total_time, 3),
        pit_stops: series.pit_laps.len() as u32,
        pit_laps: series.pit_laps,
    }
}
