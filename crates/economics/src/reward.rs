//! Per-unit reward derivation.
//!
//! `R(t, s) = ((S_max - s) * R0 / S_max) * M(t, s)`
//!
//! The scarcity term shrinks rewards linearly towards the cap; the
//! difficulty multiplier paces issuance towards the target curve.

use crate::difficulty::{is_floor_clamped, multiplier_for_ratio_at, supply_ratio_at};
use crate::emission::{target_supply_at, time_for_supply_at};
use crate::errors::{check_supply, Result};
use crate::parameters::EmissionParams;
use crate::types::{EmissionSnapshot, Seconds, Supply};

/// `(S_max - actual) / S_max`, in `[0, 1]`.
pub fn scarcity_factor(actual: Supply, params: &EmissionParams) -> Result<f64> {
    params.validate()?;
    scarcity_factor_at(actual, params)
}

/// Reward for the next unit of work given time `t > 0` and the actual supply.
///
/// The caller owns accumulation: add the result to its running supply and
/// pass the updated value on the next call.
pub fn reward(t: Seconds, actual: Supply, params: &EmissionParams) -> Result<Supply> {
    params.validate()?;
    reward_at(t, actual, params)
}

/// Evaluate every stage of the pipeline at once.
pub fn emission_details(
    t: Seconds,
    actual: Supply,
    params: &EmissionParams,
) -> Result<EmissionSnapshot> {
    params.validate()?;
    emission_details_at(t, actual, params)
}

pub(crate) fn scarcity_factor_at(actual: Supply, params: &EmissionParams) -> Result<f64> {
    let actual = check_supply(actual, params.max_supply)?;
    Ok((params.max_supply - actual) / params.max_supply)
}

pub(crate) fn reward_at(t: Seconds, actual: Supply, params: &EmissionParams) -> Result<Supply> {
    let ratio = supply_ratio_at(t, actual, params)?;
    let scarcity = scarcity_factor_at(actual, params)?;
    Ok(scarcity * params.base_reward * multiplier_for_ratio_at(ratio, params))
}

pub(crate) fn emission_details_at(
    t: Seconds,
    actual: Supply,
    params: &EmissionParams,
) -> Result<EmissionSnapshot> {
    let supply_ratio = supply_ratio_at(t, actual, params)?;
    let scarcity = scarcity_factor_at(actual, params)?;
    let difficulty_multiplier = multiplier_for_ratio_at(supply_ratio, params);

    let schedule_offset = if actual < params.max_supply {
        Some(time_for_supply_at(actual, params)? - t)
    } else {
        None
    };

    Ok(EmissionSnapshot {
        elapsed: t,
        actual_supply: actual,
        target_supply: target_supply_at(t, params),
        supply_ratio,
        difficulty_multiplier,
        floor_clamped: is_floor_clamped(supply_ratio, params),
        scarcity,
        reward: scarcity * params.base_reward * difficulty_multiplier,
        schedule_offset,
    })
}
