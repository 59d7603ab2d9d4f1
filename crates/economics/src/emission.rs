//! Target issuance curve.
//!
//! `S(t) = S_max * (1 - 2^(-t / Y))`
//!
//! Half of the ceiling is issued in the first year, 75% by the second,
//! 87.5% by the third, and so on: every year issues half of what remains.

use crate::errors::{check_time, ensure_finite, EconomicsError, Result};
use crate::parameters::EmissionParams;
use crate::types::{CurvePoint, Seconds, Supply};

/// Upper bound on the rows a single [`sample_curve`] call may produce.
pub const MAX_CURVE_ROWS: usize = 10_000_000;

/// Expected cumulative issuance after `t` seconds.
///
/// Defined for every `t >= 0`; `S(0) = 0`. In f64 the curve saturates at
/// exactly `max_supply` once `t / year_seconds` passes ~53. The difficulty
/// falloff has the mirror limit: past a ratio of about `1 + 1075 / steepness`
/// the multiplier underflows to exactly `0.0`.
pub fn target_supply(t: Seconds, params: &EmissionParams) -> Result<Supply> {
    params.validate()?;
    let t = check_time(t)?;
    Ok(target_supply_at(t, params))
}

/// Elapsed time at which the target curve reaches `supply`.
///
/// Inverse of [`target_supply`]: `t = -Y * log2(1 - supply / S_max)`.
pub fn time_for_supply(supply: Supply, params: &EmissionParams) -> Result<Seconds> {
    params.validate()?;
    time_for_supply_at(supply, params)
}

/// Tabulate the target curve for `years` whole years, `steps_per_year` rows each.
///
/// Fails with [`EconomicsError::InvalidParameter`] when the table would exceed
/// [`MAX_CURVE_ROWS`].
pub fn sample_curve(
    years: u32,
    steps_per_year: u32,
    params: &EmissionParams,
) -> Result<Vec<CurvePoint>> {
    params.validate()?;
    sample_curve_at(years, steps_per_year, params)
}

pub(crate) fn target_supply_at(t: Seconds, params: &EmissionParams) -> Supply {
    params.max_supply * (1.0 - (-t / params.year_seconds).exp2())
}

pub(crate) fn time_for_supply_at(supply: Supply, params: &EmissionParams) -> Result<Seconds> {
    let supply = ensure_finite("supply", supply)?;
    if supply < 0.0 {
        return Err(EconomicsError::NegativeSupply(supply));
    }
    if supply >= params.max_supply {
        return Err(EconomicsError::SupplyUnreachable(supply));
    }

    let remaining = 1.0 - supply / params.max_supply;
    // log2(1) gives -0.0 for a zero supply
    Ok((-params.year_seconds * remaining.log2()).max(0.0))
}

pub(crate) fn sample_curve_at(
    years: u32,
    steps_per_year: u32,
    params: &EmissionParams,
) -> Result<Vec<CurvePoint>> {
    if steps_per_year == 0 {
        return Err(EconomicsError::InvalidParameter(
            "steps_per_year must be positive",
        ));
    }

    let rows = (years as usize)
        .checked_mul(steps_per_year as usize)
        .filter(|&rows| rows <= MAX_CURVE_ROWS)
        .ok_or(EconomicsError::InvalidParameter("curve row count too large"))?;

    let mut points = Vec::with_capacity(rows);
    for year in 0..years {
        for step in 0..steps_per_year {
            let elapsed_years = f64::from(year) + f64::from(step) / f64::from(steps_per_year);
            let seconds = elapsed_years * params.year_seconds;
            points.push(CurvePoint {
                years: elapsed_years,
                seconds,
                target_supply: target_supply_at(seconds, params),
            });
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YEAR_SECONDS;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn curve_starts_at_zero() {
        let params = EmissionParams::default();
        assert_eq!(target_supply(0.0, &params).unwrap(), 0.0);
    }

    #[test]
    fn curve_halves_remaining_supply_each_year() {
        let params = EmissionParams::default();
        let expected = [
            (1.0, 500_000.0),
            (2.0, 750_000.0),
            (3.0, 875_000.0),
            (4.0, 937_500.0),
            (5.0, 968_750.0),
            (10.0, 999_023.437_5),
        ];

        for (years, supply) in expected {
            let value = target_supply(years * YEAR_SECONDS, &params).unwrap();
            assert!(close(value, supply, 1e-9), "year {years}: {value} != {supply}");
        }
    }

    #[test]
    fn half_year_matches_fixed_point_reference() {
        // 292893.218813452475198312 in 18-decimal fixed point
        let params = EmissionParams::default();
        let value = target_supply(15_768_000.0, &params).unwrap();
        assert!(close(value, 292_893.218_813_452_5, 1e-9));
    }

    #[test]
    fn curve_saturates_at_cap_far_out() {
        let params = EmissionParams::default();
        let value = target_supply(100.0 * YEAR_SECONDS, &params).unwrap();
        assert_eq!(value, params.max_supply);
    }

    #[test]
    fn negative_or_nan_time_is_rejected() {
        let params = EmissionParams::default();
        assert!(matches!(
            target_supply(-1.0, &params),
            Err(EconomicsError::NegativeTime(_))
        ));
        assert!(matches!(
            target_supply(f64::NAN, &params),
            Err(EconomicsError::NonFinite { .. })
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = EmissionParams {
            year_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            target_supply(1.0, &params),
            Err(EconomicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn inverse_curve_recovers_time() {
        let params = EmissionParams::default();
        for t in [1.0, 3_600.0, YEAR_SECONDS, 2.5 * YEAR_SECONDS] {
            let supply = target_supply(t, &params).unwrap();
            let back = time_for_supply(supply, &params).unwrap();
            assert!(close(back, t, 1e-6), "{back} != {t}");
        }
        assert_eq!(time_for_supply(0.0, &params).unwrap(), 0.0);
    }

    #[test]
    fn inverse_curve_rejects_cap_and_beyond() {
        let params = EmissionParams::default();
        assert!(matches!(
            time_for_supply(params.max_supply, &params),
            Err(EconomicsError::SupplyUnreachable(_))
        ));
        assert!(matches!(
            time_for_supply(-1.0, &params),
            Err(EconomicsError::NegativeSupply(_))
        ));
    }

    #[test]
    fn sample_curve_tabulates_fractional_years() {
        let params = EmissionParams::default();
        let points = sample_curve(2, 4, &params).unwrap();

        assert_eq!(points.len(), 8);
        assert_eq!(points[0].years, 0.0);
        assert_eq!(points[0].target_supply, 0.0);
        assert_eq!(points[4].years, 1.0);
        assert!(close(points[4].target_supply, 500_000.0, 1e-9));
        assert_eq!(points[7].years, 1.75);
        assert!(points.windows(2).all(|w| w[1].target_supply > w[0].target_supply));
    }

    #[test]
    fn sample_curve_needs_steps() {
        let params = EmissionParams::default();
        assert!(sample_curve(1, 0, &params).is_err());
        assert!(sample_curve(0, 10, &params).unwrap().is_empty());
    }

    #[test]
    fn sample_curve_rejects_oversized_tables() {
        let params = EmissionParams::default();
        assert!(matches!(
            sample_curve(u32::MAX, u32::MAX, &params),
            Err(EconomicsError::InvalidParameter(_))
        ));
        assert!(matches!(
            sample_curve(1_001, 10_000, &params),
            Err(EconomicsError::InvalidParameter(_))
        ));
        assert_eq!(sample_curve(1_000, 10, &params).unwrap().len(), 10_000);
    }
}
