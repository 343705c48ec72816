use crate::error::ConfigError;
use crate::reference::ReferenceTables;
use serde::Deserialize;
use std::fs;

/// What to do with a driver/track/compound/weather name that is not in its table.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Use the table's default entry.
    #[default]
    Fallback,
    /// Reject the request.
    Strict,
}

/// Whether the strategy label drives pit stops.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    /// Label is descriptive only; the car pits when the tyres fall below the threshold.
    #[default]
    Cosmetic,
    /// The car also pits on the laps named by the label.
    Planned,
}

/// Constants of the lap-time and finishing-position model.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimParams {
    /// (s) Driver base pace that yields no offset
    pub reference_pace: f64,
    /// Half-width of the per-lap uniform variance, before consistency scaling
    pub variance_amplitude: f64,
    /// (s) Lap-time penalty per lost health point
    pub tyre_penalty: f64,
    /// Entering-lap health below which the car is forced to pit
    pub pit_threshold: f64,
    /// (s) Time lost on a pit lap
    pub pit_loss: f64,
    pub grid_size: u32,
    /// Best finish range for a top-tier driver on a quick average
    pub top_tier_positions: u32,
    /// (s) Average lap must beat track base time plus this to count as quick
    pub top_tier_margin: f64,
    pub max_laps: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            reference_pace: 80.0,
            variance_amplitude: 0.5,
            tyre_penalty: 0.05,
            pit_threshold: 30.0,
            pit_loss: 20.0,
            grid_size: 20,
            top_tier_positions: 4,
            top_tier_margin: 2.0,
            max_laps: 500,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimConfig {
    pub tables: ReferenceTables,
    pub params: SimParams,
    pub strategy_mode: StrategyMode,
    pub key_policy: KeyPolicy,
}

impl SimConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tables.validate()?;

        let p = &self.params;
        if p.variance_amplitude < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "variance_amplitude must not be negative, got {}",
                p.variance_amplitude
            )));
        }
        if p.grid_size == 0 {
            return Err(ConfigError::Invalid("grid_size must be at least 1".into()));
        }
        if p.top_tier_positions == 0 || p.top_tier_positions > p.grid_size {
            return Err(ConfigError::Invalid(format!(
                "top_tier_positions must be within 1..={}, got {}",
                p.grid_size, p.top_tier_positions
            )));
        }
        if p.max_laps == 0 {
            return Err(ConfigError::Invalid("max_laps must be at least 1".into()));
        }
        Ok(())
    }
}
