//! CLI configuration file handling

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use mint_economics::{EmissionParams, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the optional `--config` TOML file.
///
/// ```toml
/// genesis = "2024-02-14T00:00:00Z"
///
/// [logging]
/// level = "info"
///
/// [emission]
/// max_supply = 1000000.0
/// steepness = 100.0
///
/// [simulation]
/// step_seconds = 1.0
/// stop_supply = 550000.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Issuance start, used by `status`
    pub genesis: Option<DateTime<Utc>>,
    pub logging: LoggingConfig,
    pub emission: EmissionParams,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// "pretty" or "compact"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl CliConfig {
    /// Load the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.emission.validate()?;
        Ok(config)
    }
}

/// Per-field overrides of the `[emission]` table.
#[derive(Debug, Clone, Default, Args)]
pub struct ParamOverrides {
    /// Asymptotic ceiling of total issuance
    #[arg(long, global = true)]
    pub max_supply: Option<f64>,
    /// Seconds per normalization year
    #[arg(long, global = true)]
    pub year_seconds: Option<f64>,
    /// Starting per-unit reward
    #[arg(long, global = true)]
    pub base_reward: Option<f64>,
    /// Supply ratio below which the max multiplier applies
    #[arg(long, global = true)]
    pub floor_ratio: Option<f64>,
    /// Multiplier returned below the floor
    #[arg(long, global = true)]
    pub max_multiplier: Option<f64>,
    /// Exponent scaling of the difficulty falloff
    #[arg(long, global = true)]
    pub steepness: Option<f64>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: EmissionParams) -> EmissionParams {
        if let Some(v) = self.max_supply {
            params.max_supply = v;
        }
        if let Some(v) = self.year_seconds {
            params.year_seconds = v;
        }
        if let Some(v) = self.base_reward {
            params.base_reward = v;
        }
        if let Some(v) = self.floor_ratio {
            params.difficulty_floor_ratio = v;
        }
        if let Some(v) = self.max_multiplier {
            params.max_multiplier = v;
        }
        if let Some(v) = self.steepness {
            params.steepness = v;
        }
        params
    }
}
