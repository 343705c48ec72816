use crate::config::KeyPolicy;
use crate::error::{ConfigError, SimError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    /// (s) Reference lap-time offset, normalised against the reference pace
    pub base_pace: f64,
    /// 0..1, higher means less lap-to-lap variance
    pub consistency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackProfile {
    /// (s) Nominal lap time
    pub base_time: f64,
    /// Multiplier on the compound's wear rate
    pub degradation_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TyreProfile {
    /// (s) Negative is faster
    pub speed_bonus: f64,
    /// Health points lost per lap before the track factor
    pub degradation_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherProfile {
    /// (s) Added to every lap
    pub time_penalty: f64,
    /// Carried for variance scaling; the lap model does not read it yet
    pub risk_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Driver,
    Track,
    Compound,
    Weather,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Driver => "driver",
            TableKind::Track => "track",
            TableKind::Compound => "compound",
            TableKind::Weather => "weather",
        };
        f.write_str(name)
    }
}

/// Name-keyed profiles in insertion order, plus the entry used when a
/// requested name is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table<P> {
    default: String,
    entries: IndexMap<String, P>,
}

impl<P> Table<P> {
    /// Empty table; `default` must be added with [`Table::with`] before use.
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, profile: P) -> Self {
        self.entries.insert(name.into(), profile);
        self
    }

    pub fn get(&self, name: &str) -> Option<&P> {
        self.entries.get(name)
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self, kind: TableKind) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::Invalid(format!("{kind} table is empty")));
        }
        if !self.entries.contains_key(&self.default) {
            return Err(ConfigError::Invalid(format!(
                "{kind} table default `{}` is not one of its entries",
                self.default
            )));
        }
        Ok(())
    }

    fn resolve(&self, kind: TableKind, key: &str, policy: KeyPolicy) -> Result<&P, SimError> {
        if let Some(profile) = self.entries.get(key) {
            return Ok(profile);
        }
        match policy {
            KeyPolicy::Strict => Err(SimError::UnknownReferenceKey {
                table: kind,
                key: key.to_string(),
            }),
            KeyPolicy::Fallback => {
                tracing::debug!(table = %kind, key, fallback = %self.default, "unknown key, using default");
                self.entries
                    .get(&self.default)
                    .ok_or_else(|| SimError::UnknownReferenceKey {
                        table: kind,
                        key: self.default.clone(),
                    })
            }
        }
    }
}

/// The four lookup tables and the drivers eligible for a front-running
/// finishing position. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    pub drivers: Table<DriverProfile>,
    pub tracks: Table<TrackProfile>,
    pub tyres: Table<TyreProfile>,
    pub weather: Table<WeatherProfile>,
    pub top_tier: Vec<String>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Profiles picked for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProfiles {
    pub driver: DriverProfile,
    pub track: TrackProfile,
    pub tyre: TyreProfile,
    pub weather: WeatherProfile,
}

/// Selectable names per table, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceOptions {
    pub drivers: Vec<String>,
    pub tracks: Vec<String>,
    pub tyres: Vec<String>,
    pub weather: Vec<String>,
}

impl ReferenceTables {
    pub fn builtin() -> Self {
        let driver = |base_pace, consistency| DriverProfile {
            base_pace,
            consistency,
        };
        let track = |base_time, degradation_factor| TrackProfile {
            base_time,
            degradation_factor,
        };
        let tyre = |speed_bonus, degradation_rate| TyreProfile {
            speed_bonus,
            degradation_rate,
        };
        let weather = |time_penalty, risk_factor| WeatherProfile {
            time_penalty,
            risk_factor,
        };

        Self {
            drivers: Table::new("Verstappen")
                .with("Verstappen", driver(80.0, 0.95))
                .with("Hamilton", driver(80.2, 0.94))
                .with("Leclerc", driver(80.1, 0.92))
                .with("Norris", driver(80.3, 0.93))
                .with("Alonso", driver(80.4, 0.96)),
            tracks: Table::new("Monza")
                .with("Monza", track(78.0, 1.1))
                .with("Silverstone", track(86.0, 1.2))
                .with("Spa", track(102.0, 1.3))
                .with("Monaco", track(70.0, 0.8)),
            tyres: Table::new("Medium")
                .with("Soft", tyre(-1.5, 0.15))
                .with("Medium", tyre(-0.8, 0.08))
                .with("Hard", tyre(0.0, 0.04)),
            weather: Table::new("Sunny")
                .with("Sunny", weather(0.0, 1.0))
                .with("Rainy", weather(12.0, 1.5)),
            top_tier: vec![
                "Verstappen".to_string(),
                "Hamilton".to_string(),
                "Leclerc".to_string(),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drivers.check(TableKind::Driver)?;
        self.tracks.check(TableKind::Track)?;
        self.tyres.check(TableKind::Compound)?;
        self.weather.check(TableKind::Weather)?;
        Ok(())
    }

    pub fn resolve(
        &self,
        driver: &str,
        track: &str,
        compound: &str,
        weather: &str,
        policy: KeyPolicy,
    ) -> Result<ResolvedProfiles, SimError> {
        Ok(ResolvedProfiles {
            driver: *self.drivers.resolve(TableKind::Driver, driver, policy)?,
            track: *self.tracks.resolve(TableKind::Track, track, policy)?,
            tyre: *self.tyres.resolve(TableKind::Compound, compound, policy)?,
            weather: *self.weather.resolve(TableKind::Weather, weather, policy)?,
        })
    }

    /// Membership is by requested name; a fallback driver is never top tier.
    pub fn is_top_tier(&self, driver: &str) -> bool {
        self.top_tier.iter().any(|d| d == driver)
    }

    pub fn options(&self) -> RaceOptions {
        RaceOptions {
            drivers: self.drivers.names(),
            tracks: self.tracks.names(),
            tyres: self.tyres.names(),
            weather: self.weather.names(),
        }
    }
}
