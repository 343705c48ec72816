use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use strategy_sim::SimConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON file with tables and model parameters; built-in data when unset
    pub sim_config: Option<String>,
    /// Reseed every request with this value for reproducible responses
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let ip: IpAddr = host
            .parse()
            .with_context(|| format!("BIND_ADDR is not an IP address: {}", host))?;
        let port: u16 = match get("PORT") {
            Some(p) => p
                .parse()
                .with_context(|| format!("PORT is not a port number: {}", p))?,
            None => 8000,
        };
        let seed = match get("SIM_SEED") {
            Some(s) => Some(
                s.parse()
                    .with_context(|| format!("SIM_SEED is not an unsigned integer: {}", s))?,
            ),
            None => None,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            sim_config: get("SIM_CONFIG"),
            seed,
        })
    }

    pub fn load_sim_config(&self) -> Result<SimConfig> {
        match &self.sim_config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("failed to load simulator config {}", path)),
            None => Ok(SimConfig::default()),
        }
    }
}
