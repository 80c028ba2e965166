//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - forecasts, payoff plans, and budget health from a record snapshot
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Deterministic personal finance analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Record snapshot file (JSON)
    #[arg(long, default_value = "tally.json", global = true)]
    pub snapshot: PathBuf,

    /// Analysis date (YYYY-MM-DD); defaults to today
    ///
    /// Every calculation is pure over this date, so replaying a snapshot
    /// with the same --as-of reproduces the same report.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Emit JSON instead of text reports
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project net cash over 30/90/365 days and flag bills at risk
    Forecast,

    /// Project each card balance forward cycle by cycle
    Cards {
        /// Billing cycles to project
        #[arg(short, long, default_value_t = tally_core::PROJECTION_CYCLES)]
        cycles: u32,
    },

    /// Rank card balances for overpayment
    Payoff {
        /// Strategy: avalanche or snowball
        #[arg(short, long, default_value = "avalanche")]
        strategy: String,
    },

    /// Mine purchase history for subscription-like patterns
    Recurring,

    /// Score envelope budgets for a month
    Budget {
        /// Month key (YYYY-MM); defaults to the as-of month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Data-quality summary of the purchase history
    Quality,
}
