//! Payoff ranking command

use anyhow::{anyhow, Result};
use tally_core::{rank_payoff, PayoffStrategy};

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_payoff(snapshot: &Snapshot, strategy: &str, json: bool) -> Result<()> {
    let strategy: PayoffStrategy = strategy.parse().map_err(|e: String| anyhow!(e))?;
    let ranking = rank_payoff(&snapshot.cards, strategy);

    if json {
        return print_json(&ranking);
    }

    println!();
    println!("🎯 Payoff ranking ({})", ranking.strategy);

    match ranking.recommended() {
        None => println!("   No carrying balances; nothing to target"),
        Some(target) => println!("   Overpay target: {}", target.name),
    }

    for (position, entry) in ranking.entries.iter().enumerate() {
        println!(
            "   {}. {} ${:.2} @ {:.2}% APR (interest ${:.2}/mo, minimum ${:.2})",
            position + 1,
            entry.name,
            entry.balance,
            entry.apr,
            entry.monthly_interest,
            entry.minimum_due
        );
    }

    Ok(())
}
