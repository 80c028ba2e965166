//! Card projection command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{project_card, CardProjection};

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_cards(snapshot: &Snapshot, today: NaiveDate, cycles: u32, json: bool) -> Result<()> {
    let projections: Vec<CardProjection> = snapshot
        .cards
        .iter()
        .map(|card| project_card(card, cycles, today))
        .collect();

    if json {
        return print_json(&projections);
    }

    if projections.is_empty() {
        println!("No revolving accounts in snapshot");
        return Ok(());
    }

    for projection in &projections {
        println!();
        println!("💳 {}", projection.name);
        println!(
            "   Balance: ${:.2}{}",
            projection.displayed_balance,
            if projection.due_applied {
                " (after due payment)"
            } else {
                ""
            }
        );
        if projection.over_limit {
            println!("   ⚠ Over the credit limit");
        }
        if projection.payment_below_interest {
            println!("   ⚠ Planned payment does not cover interest; balance grows");
        }
        for row in &projection.rows {
            println!(
                "   cycle {:>2}: start ${:>10.2}  interest ${:>8.2}  pay ${:>9.2}  end ${:>10.2}  util {:>5.1}%",
                row.cycle,
                row.start_balance,
                row.interest,
                row.payment,
                row.ending_balance,
                row.utilization * 100.0
            );
        }
    }

    Ok(())
}
