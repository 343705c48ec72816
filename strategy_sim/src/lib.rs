//! Single-driver race strategy simulation: tyre wear, lap-time composition,
//! forced pit stops and a cosmetic strategy label.

pub mod config;
pub mod error;
pub mod laps;
pub mod reference;
pub mod result;
pub mod rng;
pub mod simulator;
pub mod strategy;

pub use config::{KeyPolicy, SimConfig, SimParams, StrategyMode};
pub use error::{ConfigError, SimError};
pub use laps::{LapRecord, LapSeries};
pub use reference::{
    DriverProfile, RaceOptions, ReferenceTables, ResolvedProfiles, Table, TableKind, TrackProfile,
    TyreProfile, WeatherProfile,
};
pub use result::SimulationResult;
pub use rng::RandomSource;
pub use simulator::{RaceSimulator, SimulationRequest};
pub use strategy::PitPlan;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
