//! CLI command implementations
//!
//! One module per report:
//! - `forecast` - cashflow windows and bill risk alerts
//! - `cards` - per-card amortization projections
//! - `payoff` - avalanche/snowball overpayment ranking
//! - `recurring` - subscription-like purchase candidates
//! - `budget` - envelope performance for a month
//! - `quality` - duplicate/anomaly/hygiene counters

pub mod budget;
pub mod cards;
pub mod forecast;
pub mod payoff;
pub mod quality;
pub mod recurring;

pub use budget::cmd_budget;
pub use cards::cmd_cards;
pub use forecast::cmd_forecast;
pub use payoff::cmd_payoff;
pub use quality::cmd_quality;
pub use recurring::cmd_recurring;

use anyhow::Result;
use serde::Serialize;

/// Render any view model as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
