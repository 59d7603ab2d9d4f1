//! Issuance simulation driver.
//!
//! Feeds the reward model back into itself: every step grants one reward,
//! adds it to the running supply and advances time. The loop owns the
//! running supply, so a simulation is single-writer by construction.

use crate::errors::{ensure_finite, EconomicsError, Result};
use crate::model::EmissionModel;
use crate::types::{EmissionSnapshot, Seconds, Supply};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Simulation settings. Defaults replay one unit of work per second from
/// `t = 1`, `supply = 1` until 550_000 tokens have been issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_time: Seconds,
    pub start_supply: Supply,
    /// Time between two units of work
    pub step_seconds: Seconds,
    /// Stop once the running supply reaches this amount
    pub stop_supply: Supply,
    /// Hard bound on iterations
    pub max_steps: u64,
    /// Record a snapshot every N steps (0 disables sampling)
    pub sample_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_time: 1.0,
            start_supply: 1.0,
            step_seconds: 1.0,
            stop_supply: 550_000.0,
            max_steps: 100_000_000,
            sample_every: 1_000_000,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self, model: &EmissionModel) -> Result<()> {
        ensure_finite("start_time", self.start_time)?;
        ensure_finite("start_supply", self.start_supply)?;
        ensure_finite("step_seconds", self.step_seconds)?;
        ensure_finite("stop_supply", self.stop_supply)?;

        if self.start_time <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "start_time must be positive",
            ));
        }
        if self.step_seconds <= 0.0 {
            return Err(EconomicsError::InvalidParameter(
                "step_seconds must be positive",
            ));
        }
        if self.start_supply < 0.0 || self.start_supply > model.params().max_supply {
            return Err(EconomicsError::InvalidParameter(
                "start_supply must be within [0, max_supply]",
            ));
        }
        if self.stop_supply > model.params().max_supply {
            return Err(EconomicsError::InvalidParameter(
                "stop_supply must not exceed max_supply",
            ));
        }
        Ok(())
    }
}

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub steps: u64,
    pub final_time: Seconds,
    pub final_supply: Supply,
    /// Tokens granted during the run
    pub issued: Supply,
    /// False when `max_steps` ran out first
    pub reached_stop: bool,
    pub samples: Vec<EmissionSnapshot>,
}

/// Run the accumulation loop described by `config` against `model`.
pub fn simulate(model: &EmissionModel, config: &SimulationConfig) -> Result<SimulationReport> {
    config.validate(model)?;

    let cap = model.params().max_supply;
    let mut t = config.start_time;
    let mut supply = config.start_supply;
    let mut steps = 0u64;
    let mut samples = Vec::new();

    while supply < config.stop_supply && steps < config.max_steps {
        let reward = model.reward(t, supply)?;
        supply = (supply + reward).min(cap);
        t += config.step_seconds;
        steps += 1;

        if config.sample_every > 0 && steps % config.sample_every == 0 {
            let snapshot = model.details(t, supply)?;
            debug!(
                steps,
                t,
                supply,
                ratio = snapshot.supply_ratio,
                multiplier = snapshot.difficulty_multiplier,
                "simulation progress"
            );
            samples.push(snapshot);
        }
    }

    let reached_stop = supply >= config.stop_supply;
    info!(steps, final_time = t, final_supply = supply, reached_stop, "simulation finished");

    Ok(SimulationReport {
        steps,
        final_time: t,
        final_supply: supply,
        issued: supply - config.start_supply,
        reached_stop,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(stop_supply: Supply) -> SimulationConfig {
        SimulationConfig {
            start_time: 3_600.0,
            start_supply: 1.0,
            step_seconds: 3_600.0,
            stop_supply,
            max_steps: 10_000,
            sample_every: 10,
        }
    }

    #[test]
    fn hourly_run_reaches_stop_and_tracks_target() {
        let model = EmissionModel::default();
        let report = simulate(&model, &hourly(10_000.0)).unwrap();

        assert!(report.reached_stop);
        assert!(report.steps < 10_000);
        assert!(report.final_supply >= 10_000.0);
        assert!((report.issued - (report.final_supply - 1.0)).abs() < 1e-9);

        let ratio = model.supply_ratio(report.final_time, report.final_supply).unwrap();
        assert!(ratio > 0.9 && ratio < 1.05, "ratio {ratio}");
    }

    #[test]
    fn samples_are_taken_on_schedule() {
        let model = EmissionModel::default();
        let report = simulate(&model, &hourly(10_000.0)).unwrap();

        assert_eq!(report.samples.len() as u64, report.steps / 10);
        assert!(report
            .samples
            .windows(2)
            .all(|w| w[1].actual_supply > w[0].actual_supply && w[1].elapsed > w[0].elapsed));
    }

    #[test]
    fn max_steps_bounds_the_run() {
        let model = EmissionModel::default();
        let config = SimulationConfig {
            max_steps: 5,
            sample_every: 0,
            ..hourly(500_000.0)
        };
        let report = simulate(&model, &config).unwrap();

        assert_eq!(report.steps, 5);
        assert!(!report.reached_stop);
        assert!(report.samples.is_empty());
        assert_eq!(report.final_time, 6.0 * 3_600.0);
    }

    #[test]
    fn already_at_stop_does_nothing() {
        let model = EmissionModel::default();
        let config = SimulationConfig {
            start_supply: 20.0,
            ..hourly(10.0)
        };
        let report = simulate(&model, &config).unwrap();
        assert_eq!(report.steps, 0);
        assert!(report.reached_stop);
        assert_eq!(report.issued, 0.0);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let model = EmissionModel::default();
        let bad = [
            SimulationConfig {
                start_time: 0.0,
                ..Default::default()
            },
            SimulationConfig {
                step_seconds: -1.0,
                ..Default::default()
            },
            SimulationConfig {
                start_supply: 2_000_000.0,
                ..Default::default()
            },
            SimulationConfig {
                stop_supply: 2_000_000.0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(simulate(&model, &config).is_err(), "{config:?}");
        }
    }
}
