//! Report rows and table rendering

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use mint_economics::{
    CurvePoint, EmissionModel, EmissionSnapshot, Seconds, SimulationReport, Supply, YEAR_SECONDS,
};
use serde::Serialize;

/// Ratios sampled by the default difficulty sweep
pub const DEFAULT_RATIOS: [f64; 23] = [
    0.93, 0.94, 0.95, 0.96, 0.97, 0.98, 0.99, 0.995, 0.999, 1.0, 1.001, 1.005, 1.01, 1.02, 1.03,
    1.04, 1.05, 1.06, 1.07, 1.08, 1.09, 1.1, 1.2,
];

/// Actual supplies sampled by the default reward sweep
pub const DEFAULT_SUPPLIES: [f64; 10] = [
    100_000.0, 450_000.0, 490_000.0, 495_000.0, 500_000.0, 505_000.0, 510_000.0, 515_000.0,
    550_000.0, 600_000.0,
];

/// Elapsed time used by the default difficulty sweep
pub const DEFAULT_DIFFICULTY_TIME: Seconds = 1_000_000.0;

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyRow {
    pub ratio: f64,
    pub actual_supply: Supply,
    pub multiplier: f64,
    pub floor_clamped: bool,
    /// The implied supply is past `max_supply`; no reward call would accept it
    pub over_cap: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardRow {
    pub actual_supply: Supply,
    pub supply_ratio: f64,
    pub multiplier: f64,
    pub reward: Supply,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub genesis: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub elapsed: Seconds,
    pub target_supply: Supply,
    pub snapshot: Option<EmissionSnapshot>,
}

/// Multiplier for each ratio, with the actual supply that ratio implies at `t`.
///
/// Rows are computed from the ratio alone, so ratios whose implied supply
/// overshoots the cap are still reported (flagged `over_cap`).
pub fn difficulty_rows(
    model: &EmissionModel,
    t: Seconds,
    ratios: &[f64],
) -> Result<Vec<DifficultyRow>> {
    let params = model.params();
    let target = model.target_supply(t)?;
    ratios
        .iter()
        .map(|&ratio| {
            let actual_supply = ratio * target;
            Ok(DifficultyRow {
                ratio,
                actual_supply,
                multiplier: model.multiplier_for_ratio(ratio)?,
                floor_clamped: ratio < params.difficulty_floor_ratio,
                over_cap: actual_supply > params.max_supply,
            })
        })
        .collect()
}

pub fn reward_rows(
    model: &EmissionModel,
    t: Seconds,
    supplies: &[Supply],
) -> Result<Vec<RewardRow>> {
    supplies
        .iter()
        .map(|&actual_supply| {
            let snapshot = model.details(t, actual_supply)?;
            Ok(RewardRow {
                actual_supply,
                supply_ratio: snapshot.supply_ratio,
                multiplier: snapshot.difficulty_multiplier,
                reward: snapshot.reward,
            })
        })
        .collect()
}

pub fn status_report(
    model: &EmissionModel,
    genesis: DateTime<Utc>,
    now: DateTime<Utc>,
    supply: Option<Supply>,
) -> Result<StatusReport> {
    let elapsed_ms = (now - genesis).num_milliseconds();
    if elapsed_ms < 0 {
        bail!("genesis {genesis} is in the future");
    }
    let elapsed = elapsed_ms as f64 / 1000.0;

    let snapshot = match supply {
        Some(actual) => Some(model.details(elapsed, actual)?),
        None => None,
    };

    Ok(StatusReport {
        genesis,
        now,
        elapsed,
        target_supply: model.target_supply(elapsed)?,
        snapshot,
    })
}

pub fn print_curve(points: &[CurvePoint]) {
    println!("Target total supply by year");
    println!("{:>10} {:>16} {:>22}", "year", "seconds", "target_supply");
    for p in points {
        println!("{:>10.2} {:>16.0} {:>22.6}", p.years, p.seconds, p.target_supply);
    }
}

pub fn print_difficulty(t: Seconds, rows: &[DifficultyRow]) {
    println!("Difficulty at t = {t} s");
    println!("{:>8} {:>18} {:>16}", "ratio", "actual_supply", "multiplier");
    for row in rows {
        let note = match (row.floor_clamped, row.over_cap) {
            (true, _) => " (floor)",
            (false, true) => " (over cap)",
            (false, false) => "",
        };
        println!(
            "{:>8} {:>18.3} {:>16.6e}{note}",
            row.ratio, row.actual_supply, row.multiplier
        );
    }
}

pub fn print_rewards(t: Seconds, rows: &[RewardRow]) {
    println!("Rewards at t = {t} s");
    println!(
        "{:>14} {:>10} {:>16} {:>16}",
        "actual_supply", "ratio", "multiplier", "reward"
    );
    for row in rows {
        println!(
            "{:>14.0} {:>10.4} {:>16.6e} {:>16.6e}",
            row.actual_supply, row.supply_ratio, row.multiplier, row.reward
        );
    }
}

pub fn print_simulation(report: &SimulationReport) {
    println!(
        "{:>16} {:>18} {:>10} {:>14}",
        "elapsed", "supply", "ratio", "multiplier"
    );
    for s in &report.samples {
        println!(
            "{:>16.0} {:>18.3} {:>10.4} {:>14.6e}",
            s.elapsed, s.actual_supply, s.supply_ratio, s.difficulty_multiplier
        );
    }
    println!();
    println!("steps:        {}", report.steps);
    println!(
        "final time:   {:.0} s ({:.3} years)",
        report.final_time,
        report.final_time / YEAR_SECONDS
    );
    println!("final supply: {:.3}", report.final_supply);
    println!("issued:       {:.3}", report.issued);
    println!("reached stop: {}", report.reached_stop);
}

pub fn print_status(report: &StatusReport) {
    println!("genesis:       {}", report.genesis.to_rfc3339());
    println!("now:           {}", report.now.to_rfc3339());
    println!("elapsed:       {:.0} s", report.elapsed);
    println!("target supply: {:.6}", report.target_supply);

    if let Some(s) = &report.snapshot {
        println!("actual supply: {:.6}", s.actual_supply);
        println!("supply ratio:  {:.6}", s.supply_ratio);
        let clamp = if s.floor_clamped { " (floor)" } else { "" };
        println!("multiplier:    {:.6e}{clamp}", s.difficulty_multiplier);
        println!("scarcity:      {:.6}", s.scarcity);
        println!("next reward:   {:.6e}", s.reward);
        match s.schedule_offset_days() {
            Some(days) if days >= 0.0 => println!("schedule:      {days:.2} days ahead"),
            Some(days) => println!("schedule:      {:.2} days behind", -days),
            None => println!("schedule:      max supply reached"),
        }
    }
}
