//! Envelope budget command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::analyze_budgets;

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_budget(
    snapshot: &Snapshot,
    today: NaiveDate,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let month = month
        .map(str::to_string)
        .unwrap_or_else(|| today.format("%Y-%m").to_string());

    let rows = analyze_budgets(&snapshot.budgets, &snapshot.purchases, &month, today)?;

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No budgets defined for {}", month);
        return Ok(());
    }

    println!();
    println!("✉️  Envelope budgets for {}", month);
    for row in &rows {
        println!(
            "   {:<20} spent ${:>9.2} of ${:>9.2}  projected ${:>9.2}  [{}]",
            row.category, row.spent, row.effective_target, row.projected_month_end, row.status
        );
        if let Some(rollover) = row.suggested_rollover {
            println!("   {:<20} rollover candidate ${:.2}", "", rollover);
        }
    }

    Ok(())
}
