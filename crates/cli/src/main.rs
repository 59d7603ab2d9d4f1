//! Emission Schedule Command Line Interface
//!
//! Tabulates the target issuance curve, difficulty and reward sweeps,
//! accumulation simulations and the live schedule position.

mod config;
mod report;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::{CliConfig, LoggingConfig, ParamOverrides};
use mint_economics::{simulate, EmissionModel, Seconds, SimulationConfig, Supply};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mint-cli")]
#[command(about = "Emission schedule reporting tool", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file with [emission], [simulation] and [logging] tables
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    overrides: ParamOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Target total supply by fractional year
    Curve {
        /// Whole years to tabulate
        #[arg(long, default_value_t = 10)]
        years: u32,
        /// Rows per year
        #[arg(long, default_value_t = 100)]
        steps: u32,
    },
    /// Difficulty multiplier for a sweep of supply ratios
    Difficulty {
        /// Elapsed seconds
        #[arg(long, default_value_t = report::DEFAULT_DIFFICULTY_TIME)]
        time: Seconds,
        /// Comma separated actual/target ratios
        #[arg(long, value_delimiter = ',')]
        ratios: Vec<f64>,
    },
    /// Multiplier and reward for a sweep of actual supplies
    Rewards {
        /// Elapsed seconds (defaults to one year)
        #[arg(long)]
        time: Option<Seconds>,
        /// Comma separated actual supplies
        #[arg(long, value_delimiter = ',')]
        supplies: Vec<Supply>,
    },
    /// Feed rewards back into the supply until a stop supply is reached
    Simulate {
        #[arg(long)]
        stop_supply: Option<Supply>,
        #[arg(long)]
        step_seconds: Option<Seconds>,
        #[arg(long)]
        max_steps: Option<u64>,
        /// Snapshot every N steps (0 disables)
        #[arg(long)]
        sample_every: Option<u64>,
    },
    /// Target supply right now, measured from genesis
    Status {
        /// Actual supply to compare against the target
        #[arg(long)]
        supply: Option<Supply>,
        /// Issuance start (RFC 3339), overrides the config file
        #[arg(long)]
        genesis: Option<DateTime<Utc>>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.log_level.as_deref());
    debug!(path = ?cli.config, genesis = ?config.genesis, "configuration loaded");

    let params = cli.overrides.apply(config.emission);
    let model = EmissionModel::new(params).context("invalid emission parameters")?;
    model.params().log_loaded();

    match cli.command {
        Commands::Curve { years, steps } => {
            let points = model.sample_curve(years, steps)?;
            emit(cli.json, points.as_slice(), report::print_curve)
        }
        Commands::Difficulty { time, ratios } => {
            let ratios = or_default(ratios, &report::DEFAULT_RATIOS);
            let rows = report::difficulty_rows(&model, time, &ratios)?;
            emit(cli.json, rows.as_slice(), |rows| report::print_difficulty(time, rows))
        }
        Commands::Rewards { time, supplies } => {
            let time = time.unwrap_or(model.params().year_seconds);
            let supplies = or_default(supplies, &report::DEFAULT_SUPPLIES);
            let rows = report::reward_rows(&model, time, &supplies)?;
            emit(cli.json, rows.as_slice(), |rows| report::print_rewards(time, rows))
        }
        Commands::Simulate {
            stop_supply,
            step_seconds,
            max_steps,
            sample_every,
        } => {
            let sim = SimulationConfig {
                stop_supply: stop_supply.unwrap_or(config.simulation.stop_supply),
                step_seconds: step_seconds.unwrap_or(config.simulation.step_seconds),
                max_steps: max_steps.unwrap_or(config.simulation.max_steps),
                sample_every: sample_every.unwrap_or(config.simulation.sample_every),
                ..config.simulation
            };
            let outcome = simulate(&model, &sim)?;
            emit(cli.json, &outcome, report::print_simulation)
        }
        Commands::Status { supply, genesis } => {
            let genesis = genesis
                .or(config.genesis)
                .context("no genesis given; pass --genesis or set it in the config file")?;
            let status = report::status_report(&model, genesis, Utc::now(), supply)?;
            emit(cli.json, &status, report::print_status)
        }
    }
}

fn init_logging(config: &LoggingConfig, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(&config.level)));

    // Logs go to stderr so tables and JSON stay clean on stdout
    if config.format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn or_default(values: Vec<f64>, defaults: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        defaults.to_vec()
    } else {
        values
    }
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, print: impl FnOnce(&T)) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value).context("failed to serialize report")?;
        println!("{out}");
    } else {
        print(value);
    }
    Ok(())
}
