use crate::types::{Seconds, Supply};
use thiserror::Error;

/// Errors that can occur while evaluating the emission schedule.
#[derive(Debug, Error)]
pub enum EconomicsError {
    #[error("invalid economics parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("elapsed time must be non-negative, got {0}")]
    NegativeTime(Seconds),

    #[error("actual supply must be non-negative, got {0}")]
    NegativeSupply(Supply),

    #[error("actual supply {issued} exceeds max supply {cap}")]
    SupplyCapExceeded { cap: Supply, issued: Supply },

    #[error("supply {0} is never reached by the target curve")]
    SupplyUnreachable(Supply),

    #[error("target supply is zero; difficulty undefined at time zero")]
    ZeroTargetSupply,

    #[error("failed to load emission parameters: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EconomicsError>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EconomicsError::NonFinite { field, value })
    }
}

/// Reject NaN/infinite and negative elapsed times.
pub(crate) fn check_time(t: Seconds) -> Result<Seconds> {
    let t = ensure_finite("elapsed time", t)?;
    if t < 0.0 {
        return Err(EconomicsError::NegativeTime(t));
    }
    Ok(t)
}

/// Reject NaN/infinite, negative, and over-cap supplies.
pub(crate) fn check_supply(actual: Supply, cap: Supply) -> Result<Supply> {
    let actual = ensure_finite("actual supply", actual)?;
    if actual < 0.0 {
        return Err(EconomicsError::NegativeSupply(actual));
    }
    if actual > cap {
        return Err(EconomicsError::SupplyCapExceeded {
            cap,
            issued: actual,
        });
    }
    Ok(actual)
}
