use serde::Serialize;
use strategy_sim::SimulationResult;

// Field names match what the dashboard charts read.
#[derive(Debug, Serialize)]
pub struct SimulateOut {
    pub avg_lap_time: f64,
    pub pit_strategy: String,
    pub final_position: u32,
    pub lap_data: Vec<f64>,   // lap times (s), lap 1 first
    pub tyre_data: Vec<f64>,  // tyre health (%) entering each lap
    pub total_time: f64,
    pub pit_stops: u32,
    pub pit_laps: Vec<u32>,
}

impl From<SimulationResult> for SimulateOut {
    fn from(r: SimulationResult) -> Self {
        Self {
            avg_lap_time: r.avg_lap_time,
            pit_strategy: r.pit_strategy,
            final_position: r.final_position,
            lap_data: r.lap_times,
            tyre_data: r.tyre_health,
            total_time: r.total_time,
            pit_stops: r.pit_stops,
            pit_laps: r.pit_laps,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
}
