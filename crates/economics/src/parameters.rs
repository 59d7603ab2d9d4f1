//! Emission parameters and configuration loading

use crate::errors::{EconomicsError, Result};
use crate::types::{Seconds, Supply, YEAR_SECONDS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Reference ceiling of total issuance
pub const DEFAULT_MAX_SUPPLY: Supply = 1_000_000.0;
/// Reference per-unit starting reward
pub const DEFAULT_BASE_REWARD: Supply = 1.0;
/// Ratio below which the max multiplier applies. Tuned by inspection so the
/// falloff formula is roughly continuous with the clamp at the defaults.
pub const DEFAULT_DIFFICULTY_FLOOR_RATIO: f64 = 0.933561;
/// Multiplier returned when issuance has stalled below the floor
pub const DEFAULT_MAX_MULTIPLIER: f64 = 100.0;
/// Exponent scaling of the falloff: each 1/steepness of excess ratio halves the multiplier
pub const DEFAULT_STEEPNESS: f64 = 100.0;

/// Floor and continuity point further apart than this get a warning on load.
const FLOOR_DRIFT_WARN: f64 = 1e-3;

/// Parameters of the emission schedule.
///
/// All three models read these values and nothing else, so any
/// parameterization can be evaluated side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionParams {
    /// Asymptotic ceiling of total issuance
    pub max_supply: Supply,
    /// Seconds per normalization year (one halving of the unissued remainder)
    pub year_seconds: Seconds,
    /// Starting per-unit reward rate
    pub base_reward: Supply,
    /// Supply ratio below which `max_multiplier` is returned
    pub difficulty_floor_ratio: f64,
    /// Multiplier returned below the floor
    pub max_multiplier: f64,
    /// Exponent scaling constant of the falloff
    pub steepness: f64,
}

impl Default for EmissionParams {
    fn default() -> Self {
        Self {
            max_supply: DEFAULT_MAX_SUPPLY,
            year_seconds: YEAR_SECONDS,
            base_reward: DEFAULT_BASE_REWARD,
            difficulty_floor_ratio: DEFAULT_DIFFICULTY_FLOOR_RATIO,
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl EmissionParams {
    /// Check every field is finite and inside its domain.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_supply", self.max_supply),
            ("year_seconds", self.year_seconds),
            ("base_reward", self.base_reward),
            ("difficulty_floor_ratio", self.difficulty_floor_ratio),
            ("max_multiplier", self.max_multiplier),
            ("steepness", self.steepness),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(EconomicsError::NonFinite { field, value });
            }
        }

        if self.max_supply <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "max_supply must be positive",
            ));
        }
        if self.year_seconds <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "year_seconds must be positive",
            ));
        }
        if self.base_reward <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "base_reward must be positive",
            ));
        }
        if self.difficulty_floor_ratio <= 0.0 || self.difficulty_floor_ratio > 1.0 {
            return Err(EconomicsError::InvalidParameter(
                "difficulty_floor_ratio must be in (0, 1]",
            ));
        }
        if self.max_multiplier < 1.0 {
            return Err(EconomicsError::InvalidParameter(
                "max_multiplier must be at least 1",
            ));
        }
        if self.steepness <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "steepness must be positive",
            ));
        }

        Ok(())
    }

    /// Ratio at which the falloff formula itself reaches `max_multiplier`:
    /// `1 - log2(max_multiplier) / steepness`.
    pub fn continuous_floor_ratio(&self) -> f64 {
        1.0 - self.max_multiplier.log2() / self.steepness
    }

    /// Parse params from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let params: EmissionParams =
            toml::from_str(content).map_err(|e| EconomicsError::Config(e.to_string()))?;
        params.validate()?;

        params.log_loaded();
        Ok(params)
    }

    /// Log a loaded parameter set, warning when the floor drifts from the
    /// continuity point of the falloff.
    pub fn log_loaded(&self) {
        info!(
            max_supply = self.max_supply,
            year_seconds = self.year_seconds,
            base_reward = self.base_reward,
            floor = self.difficulty_floor_ratio,
            max_multiplier = self.max_multiplier,
            steepness = self.steepness,
            "loaded emission parameters"
        );

        let continuous = self.continuous_floor_ratio();
        if (self.difficulty_floor_ratio - continuous).abs() > FLOOR_DRIFT_WARN {
            warn!(
                configured = self.difficulty_floor_ratio,
                continuous, "difficulty floor is far from the falloff continuity point"
            );
        }
    }

    /// Load params from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EconomicsError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}
