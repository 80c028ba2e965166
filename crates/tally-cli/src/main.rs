//! Tally CLI - deterministic personal finance analytics
//!
//! Usage:
//!   tally --snapshot records.json forecast
//!   tally cards --cycles 12
//!   tally payoff --strategy snowball
//!   tally budget --month 2026-03

mod cli;
mod commands;
mod snapshot;


use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let today = resolve_as_of(cli.as_of.as_deref())?;
    let snapshot = snapshot::Snapshot::load(&cli.snapshot)?;

    match cli.command {
        Commands::Forecast => commands::cmd_forecast(&snapshot, today, cli.json),
        Commands::Cards { cycles } => commands::cmd_cards(&snapshot, today, cycles, cli.json),
        Commands::Payoff { strategy } => commands::cmd_payoff(&snapshot, &strategy, cli.json),
        Commands::Recurring => commands::cmd_recurring(&snapshot, today, cli.json),
        Commands::Budget { month } => {
            commands::cmd_budget(&snapshot, today, month.as_deref(), cli.json)
        }
        Commands::Quality => commands::cmd_quality(&snapshot, today, cli.json),
    }
}

/// Resolve the analysis date: --as-of wins, otherwise today's wall clock.
/// The engine itself never reads the clock.
fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(Utc::now().date_naive()),
    }
}
