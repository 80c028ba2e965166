//! Data-quality command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::summarize_quality;

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_quality(snapshot: &Snapshot, today: NaiveDate, json: bool) -> Result<()> {
    let summary = summarize_quality(&snapshot.purchases, today);

    if json {
        return print_json(&summary);
    }

    println!();
    println!("🔍 Data quality ({} purchases)", summary.purchase_count);
    println!("   Duplicate groups:       {}", summary.duplicate_count);
    println!("   Anomalous amounts:      {}", summary.anomaly_count);
    println!("   Missing categories:     {}", summary.missing_category_count);
    println!("   Pending reconciliation: {}", summary.pending_reconciliation_count);
    println!("   Split mismatches:       {}", summary.split_mismatch_count);

    for anomaly in &summary.anomalies {
        println!(
            "   ⚠ {} ${:.2} on {}",
            anomaly.item, anomaly.amount, anomaly.purchase_date
        );
    }

    Ok(())
}
