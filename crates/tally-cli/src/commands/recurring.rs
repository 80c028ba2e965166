//! Recurring pattern command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::find_recurring_candidates;

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_recurring(snapshot: &Snapshot, today: NaiveDate, json: bool) -> Result<()> {
    let candidates = find_recurring_candidates(&snapshot.purchases, today);

    if json {
        return print_json(&candidates);
    }

    if candidates.is_empty() {
        println!("No recurring purchase patterns detected");
        return Ok(());
    }

    println!();
    println!("🔁 Recurring purchase candidates");
    for candidate in &candidates {
        println!(
            "   {:>3.0}%  {} ~${:.2} every {:.0} days ({} samples, next ~{})",
            candidate.confidence,
            candidate.merchant,
            candidate.average_amount,
            candidate.mean_gap_days,
            candidate.sample_count,
            candidate.next_expected
        );
    }

    Ok(())
}
