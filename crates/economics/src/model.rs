//! Validated emission model value type

use crate::difficulty::{
    check_ratio, difficulty_multiplier_at, multiplier_for_ratio_at, supply_ratio_at,
};
use crate::emission::{sample_curve_at, target_supply_at, time_for_supply_at};
use crate::errors::{check_time, EconomicsError, Result};
use crate::parameters::EmissionParams;
use crate::reward::{emission_details_at, reward_at, scarcity_factor_at};
use crate::types::{CurvePoint, EmissionSnapshot, Seconds, Supply};

/// Emission schedule bound to a fixed, validated parameter set.
///
/// Parameters are checked once in [`EmissionModel::new`]; the methods only
/// validate their scalar inputs. The model is `Copy` and holds no state
/// between calls, so it can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmissionModel {
    params: EmissionParams,
}

impl EmissionModel {
    /// Create a model, rejecting invalid parameters
    pub fn new(params: EmissionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &EmissionParams {
        &self.params
    }

    pub fn target_supply(&self, t: Seconds) -> Result<Supply> {
        Ok(target_supply_at(check_time(t)?, &self.params))
    }

    pub fn time_for_supply(&self, supply: Supply) -> Result<Seconds> {
        time_for_supply_at(supply, &self.params)
    }

    pub fn sample_curve(&self, years: u32, steps_per_year: u32) -> Result<Vec<CurvePoint>> {
        sample_curve_at(years, steps_per_year, &self.params)
    }

    pub fn supply_ratio(&self, t: Seconds, actual: Supply) -> Result<f64> {
        supply_ratio_at(t, actual, &self.params)
    }

    pub fn multiplier_for_ratio(&self, ratio: f64) -> Result<f64> {
        Ok(multiplier_for_ratio_at(check_ratio(ratio)?, &self.params))
    }

    pub fn difficulty_multiplier(&self, t: Seconds, actual: Supply) -> Result<f64> {
        difficulty_multiplier_at(t, actual, &self.params)
    }

    pub fn scarcity_factor(&self, actual: Supply) -> Result<f64> {
        scarcity_factor_at(actual, &self.params)
    }

    pub fn reward(&self, t: Seconds, actual: Supply) -> Result<Supply> {
        reward_at(t, actual, &self.params)
    }

    pub fn details(&self, t: Seconds, actual: Supply) -> Result<EmissionSnapshot> {
        emission_details_at(t, actual, &self.params)
    }
}

impl TryFrom<EmissionParams> for EmissionModel {
    type Error = EconomicsError;

    fn try_from(params: EmissionParams) -> Result<Self> {
        Self::new(params)
    }
}
