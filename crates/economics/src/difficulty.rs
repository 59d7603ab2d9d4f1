//! Difficulty adjustment.
//!
//! Compares actual issuance against the target curve and returns a
//! multiplier that slows issuance when ahead and speeds it up when behind:
//!
//! `M(d) = 2^(-(d - 1) * k)` for `d >= floor`, `M_max` otherwise,
//!
//! where `d = actual / target` and `k` is the steepness.

use crate::emission::target_supply_at;
use crate::errors::{check_supply, check_time, ensure_finite, EconomicsError, Result};
use crate::parameters::EmissionParams;
use crate::types::{Seconds, Supply};
use tracing::debug;

/// Ratio of actual to target supply at time `t`.
pub fn supply_ratio(t: Seconds, actual: Supply, params: &EmissionParams) -> Result<f64> {
    params.validate()?;
    supply_ratio_at(t, actual, params)
}

/// Multiplier for an already computed supply ratio.
pub fn multiplier_for_ratio(ratio: f64, params: &EmissionParams) -> Result<f64> {
    params.validate()?;
    Ok(multiplier_for_ratio_at(check_ratio(ratio)?, params))
}

/// Difficulty multiplier for actual supply `actual` at time `t > 0`.
///
/// Strictly positive for moderate ratios; once the ratio passes about
/// `1 + 1075 / steepness` the falloff underflows f64 and returns `0.0`.
pub fn difficulty_multiplier(t: Seconds, actual: Supply, params: &EmissionParams) -> Result<f64> {
    params.validate()?;
    difficulty_multiplier_at(t, actual, params)
}

pub(crate) fn supply_ratio_at(t: Seconds, actual: Supply, params: &EmissionParams) -> Result<f64> {
    let t = check_time(t)?;
    let actual = check_supply(actual, params.max_supply)?;

    let target = target_supply_at(t, params);
    if target <= 0.0 {
        return Err(EconomicsError::ZeroTargetSupply);
    }
    Ok(actual / target)
}

pub(crate) fn check_ratio(ratio: f64) -> Result<f64> {
    let ratio = ensure_finite("supply ratio", ratio)?;
    if ratio < 0.0 {
        return Err(EconomicsError::InvalidParameter(
            "supply ratio must be non-negative",
        ));
    }
    Ok(ratio)
}

pub(crate) fn is_floor_clamped(ratio: f64, params: &EmissionParams) -> bool {
    ratio < params.difficulty_floor_ratio
}

pub(crate) fn multiplier_for_ratio_at(ratio: f64, params: &EmissionParams) -> f64 {
    if is_floor_clamped(ratio, params) {
        return params.max_multiplier;
    }
    (-(ratio - 1.0) * params.steepness).exp2()
}

pub(crate) fn difficulty_multiplier_at(
    t: Seconds,
    actual: Supply,
    params: &EmissionParams,
) -> Result<f64> {
    let ratio = supply_ratio_at(t, actual, params)?;
    if is_floor_clamped(ratio, params) {
        debug!(t, actual, ratio, "supply ratio below floor, clamping multiplier");
    }
    Ok(multiplier_for_ratio_at(ratio, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YEAR_SECONDS;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn on_target_multiplier_is_one() {
        let params = EmissionParams::default();
        let m = difficulty_multiplier(YEAR_SECONDS, 500_000.0, &params).unwrap();
        assert!(close(m, 1.0));
    }

    #[test]
    fn one_year_reference_table() {
        // actual supply at one year -> multiplier
        let params = EmissionParams::default();
        let expected = [
            (100_000.0, 100.0),
            (450_000.0, 100.0),
            (490_000.0, 4.0),
            (495_000.0, 2.0),
            (500_000.0, 1.0),
            (505_000.0, 0.5),
            (510_000.0, 0.25),
            (515_000.0, 0.125),
            (550_000.0, 0.000_976_562_5),
        ];

        for (actual, want) in expected {
            let m = difficulty_multiplier(YEAR_SECONDS, actual, &params).unwrap();
            assert!(close(m, want), "{actual}: {m} != {want}");
        }
    }

    #[test]
    fn twenty_percent_ahead_is_heavily_suppressed() {
        let params = EmissionParams::default();
        let m = difficulty_multiplier(YEAR_SECONDS, 600_000.0, &params).unwrap();
        let want = 2f64.powi(-20);
        assert!((m - want).abs() <= want * 1e-9, "{m} != {want}");
    }

    #[test]
    fn below_floor_returns_max_multiplier_exactly() {
        let params = EmissionParams::default();
        assert_eq!(multiplier_for_ratio(0.9, &params).unwrap(), 100.0);
        assert_eq!(multiplier_for_ratio(0.5, &params).unwrap(), 100.0);
        assert_eq!(multiplier_for_ratio(0.0, &params).unwrap(), 100.0);
        assert_eq!(
            difficulty_multiplier(YEAR_SECONDS, 450_000.0, &params).unwrap(),
            100.0
        );
    }

    #[test]
    fn floor_boundary_is_continuous_enough() {
        let params = EmissionParams::default();
        let at_floor = multiplier_for_ratio(params.difficulty_floor_ratio, &params).unwrap();
        assert!((at_floor - 100.0).abs() < 0.01, "{at_floor}");
    }

    #[test]
    fn custom_floor_and_cap_are_honored() {
        let params = EmissionParams {
            difficulty_floor_ratio: 0.99,
            max_multiplier: 3.0,
            steepness: 10.0,
            ..Default::default()
        };
        assert_eq!(multiplier_for_ratio(0.98, &params).unwrap(), 3.0);
        assert!(close(multiplier_for_ratio(1.1, &params).unwrap(), 0.5));
    }

    #[test]
    fn time_zero_is_undefined() {
        let params = EmissionParams::default();
        let err = difficulty_multiplier(0.0, 10.0, &params).unwrap_err();
        assert!(matches!(err, EconomicsError::ZeroTargetSupply));
        assert_eq!(
            err.to_string(),
            "target supply is zero; difficulty undefined at time zero"
        );
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let params = EmissionParams::default();
        assert!(matches!(
            difficulty_multiplier(-1.0, 10.0, &params),
            Err(EconomicsError::NegativeTime(_))
        ));
        assert!(matches!(
            difficulty_multiplier(1.0, -10.0, &params),
            Err(EconomicsError::NegativeSupply(_))
        ));
        assert!(matches!(
            difficulty_multiplier(1.0, 2_000_000.0, &params),
            Err(EconomicsError::SupplyCapExceeded { .. })
        ));
        assert!(matches!(
            multiplier_for_ratio(f64::INFINITY, &params),
            Err(EconomicsError::NonFinite { .. })
        ));
    }

    #[test]
    fn falloff_underflows_to_zero_far_ahead() {
        let params = EmissionParams::default();
        assert!(multiplier_for_ratio(11.0, &params).unwrap() > 0.0);
        assert_eq!(multiplier_for_ratio(12.0, &params).unwrap(), 0.0);
        assert_eq!(multiplier_for_ratio(45.0, &params).unwrap(), 0.0);

        // one unit issued one second after genesis is ~45x the target
        let ratio = supply_ratio(1.0, 1.0, &params).unwrap();
        assert!(ratio > 45.0 && ratio < 46.0);
        assert_eq!(difficulty_multiplier(1.0, 1.0, &params).unwrap(), 0.0);
        assert_eq!(crate::reward::reward(1.0, 1.0, &params).unwrap(), 0.0);
    }

    #[test]
    fn ratio_is_actual_over_target() {
        let params = EmissionParams::default();
        let ratio = supply_ratio(2.0 * YEAR_SECONDS, 600_000.0, &params).unwrap();
        assert!(close(ratio, 0.8));
    }
}
