use crate::reference::TableKind;
use thiserror::Error;

/// Rejections of a single simulation request. Nothing here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("lap count must be at least 1, got {0}")]
    InvalidLapCount(i64),

    #[error("lap count {laps} exceeds the limit of {max}")]
    TooManyLaps { laps: i64, max: u32 },

    #[error("unknown {table} `{key}`")]
    UnknownReferenceKey { table: TableKind, key: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
