//! Core types for the halving emission schedule

use serde::{Deserialize, Serialize};

/// Elapsed time since issuance start, in seconds
pub type Seconds = f64;

/// Token amount (cumulative issuance or a single reward)
pub type Supply = f64;

/// One calendar year in seconds (60 * 60 * 24 * 365)
pub const YEAR_SECONDS: Seconds = 31_536_000.0;

/// A single row of the target issuance curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Fractional years since issuance start
    pub years: f64,
    /// Same instant in seconds
    pub seconds: Seconds,
    /// Expected cumulative issuance at this instant
    pub target_supply: Supply,
}

/// Full view of the emission state for a given time and actual supply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionSnapshot {
    pub elapsed: Seconds,
    pub actual_supply: Supply,
    pub target_supply: Supply,
    /// actual / target
    pub supply_ratio: f64,
    pub difficulty_multiplier: f64,
    /// True when the ratio fell below the floor and the max multiplier applied
    pub floor_clamped: bool,
    /// (max_supply - actual) / max_supply
    pub scarcity: f64,
    pub reward: Supply,
    /// Seconds the actual supply is ahead of (positive) or behind (negative)
    /// the target schedule. `None` once the cap has been reached.
    pub schedule_offset: Option<Seconds>,
}

impl EmissionSnapshot {
    /// Schedule offset expressed in days
    pub fn schedule_offset_days(&self) -> Option<f64> {
        self.schedule_offset.map(|s| s / 86_400.0)
    }
}
