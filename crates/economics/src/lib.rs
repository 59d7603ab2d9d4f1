//! Halving Emission Economics
//!
//! Implements a time-based emission schedule with:
//! - An asymptotic target issuance curve (half of the remainder per year)
//! - A difficulty multiplier pacing actual issuance towards that curve
//! - Per-unit reward derivation combining scarcity and difficulty
//! - A caller-driven accumulation simulator for sanity checks

pub mod difficulty;
pub mod emission;
pub mod errors;
pub mod model;
pub mod parameters;
pub mod reward;
pub mod simulation;
pub mod types;

pub use difficulty::*;
pub use emission::*;
pub use errors::*;
pub use model::*;
pub use parameters::*;
pub use reward::*;
pub use simulation::*;
pub use types::*;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
