//! Run configuration
//!
//! `PeelConfig` can be built in code, taken from `Default`, or read from a
//! JSON file. Fields missing from the file keep their default values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use peelgraph_algorithms::{SweepMode, Weight, DEFAULT_STRONG_TIE_THRESHOLD};

/// Upper bound (exclusive) for randomly assigned edge weights
pub const DEFAULT_MAX_WEIGHT: Weight = 100;

/// Rounds run by the driver when nothing else is configured
pub const DEFAULT_ROUNDS: usize = 39;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for loading a graph and peeling it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeelConfig {
    /// Number of peeling rounds
    pub rounds: usize,
    /// Weight above which an edge is a strong tie
    pub strong_tie_threshold: Weight,
    /// Random weights are drawn from `[0, max_weight)`
    pub max_weight: Weight,
    /// RNG seed for reproducible weights (None = entropy)
    pub seed: Option<u64>,
    /// Which vertex pairs the betweenness pass visits
    pub sweep: SweepMode,
}

impl Default for PeelConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            strong_tie_threshold: DEFAULT_STRONG_TIE_THRESHOLD,
            max_weight: DEFAULT_MAX_WEIGHT,
            seed: None,
            sweep: SweepMode::AllPairs,
        }
    }
}

impl PeelConfig {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: PeelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_weight == 0 {
            return Err(ConfigError::Invalid("max_weight must be positive".to_string()));
        }
        Ok(())
    }
}
