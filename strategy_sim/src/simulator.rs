use crate::config::{SimConfig, StrategyMode};
use crate::error::SimError;
use crate::laps::LapModel;
use crate::reference::RaceOptions;
use crate::result::{aggregate, SimulationResult, Standing};
use crate::rng::RandomSource;
use crate::strategy::PitPlan;
use serde::Deserialize;

/// One race to simulate. Names need not exist in the reference tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationRequest {
    pub driver: String,
    pub track: String,
    pub compound: String,
    pub weather: String,
    /// Signed so that zero and negative counts reach validation.
    pub laps: i64,
}

/// Owns the read-only configuration; share it behind an `Arc` and call
/// [`RaceSimulator::simulate`] from as many tasks as needed.
#[derive(Debug, Clone, Default)]
pub struct RaceSimulator {
    config: SimConfig,
}

impl RaceSimulator {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn options(&self) -> RaceOptions {
        self.config.tables.options()
    }

    /// Run one race. Fails only on a bad lap count or, under the strict key
    /// policy, an unknown name; nothing is drawn from `rng` in either case.
    pub fn simulate<R: RandomSource>(
        &self,
        request: &SimulationRequest,
        rng: &mut R,
    ) -> Result<SimulationResult, SimError> {
        let params = &self.config.params;
        let laps = validate_laps(request.laps, params.max_laps)?;

        let tables = &self.config.tables;
        let profiles = tables.resolve(
            &request.driver,
            &request.track,
            &request.compound,
            &request.weather,
            self.config.key_policy,
        )?;

        let plan = PitPlan::classify(&request.compound, laps);
        let planned_stops = match self.config.strategy_mode {
            StrategyMode::Cosmetic => Vec::new(),
            StrategyMode::Planned => plan.laps(),
        };

        let model = LapModel::new(&profiles, params);
        let series = model.run(laps, &planned_stops, params, rng);

        let standing = Standing {
            top_tier: tables.is_top_tier(&request.driver),
            track_base_time: profiles.track.base_time,
        };
        let result = aggregate(series, plan.to_string(), standing, params, rng);

        tracing::debug!(
            driver = %request.driver,
            track = %request.track,
            laps,
            pit_stops = result.pit_stops,
            avg_lap_time = result.avg_lap_time,
            final_position = result.final_position,
            "simulation finished"
        );
        Ok(result)
    }
}

fn validate_laps(laps: i64, max: u32) -> Result<u32, SimError> {
    if laps < 1 {
        return Err(SimError::InvalidLapCount(laps));
    }
    if laps > i64::from(max) {
        return Err(SimError::TooManyLaps { laps, max });
    }
    Ok(laps as u32)
}
