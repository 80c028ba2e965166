//! Cashflow forecast command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::build_forecast;

use super::print_json;
use crate::snapshot::Snapshot;

pub fn cmd_forecast(snapshot: &Snapshot, today: NaiveDate, json: bool) -> Result<()> {
    let forecast = build_forecast(
        &snapshot.obligations,
        &snapshot.cards,
        &snapshot.purchases,
        snapshot.liquid_reserves,
        today,
    );

    if json {
        return print_json(&forecast);
    }

    println!();
    println!("📈 Cashflow Forecast (as of {})", today);
    println!("   Income:       ${:>10.2}/mo", forecast.monthly_income);
    println!("   Commitments:  ${:>10.2}/mo", forecast.monthly_commitments);
    println!("   Spend (est):  ${:>10.2}/mo", forecast.monthly_spend_estimate);
    println!("   Net:          ${:>10.2}/mo", forecast.monthly_net);
    println!("   Reserves:     ${:>10.2}", forecast.liquid_reserves);
    println!("   ─────────────────────────────────────────────");

    for window in &forecast.windows {
        println!(
            "   {:>3}d: cash ${:>10.2}  coverage {:>6.2} mo  [{}]",
            window.days, window.projected_cash, window.coverage_months, window.risk
        );
    }

    if !forecast.bill_alerts.is_empty() {
        println!();
        println!("   Upcoming bills:");
        for alert in &forecast.bill_alerts {
            println!(
                "   {:>2}d  {} ${:.2} due {} (expect ${:.2} on hand) [{}]",
                alert.days_away,
                alert.name,
                alert.amount,
                alert.due_date,
                alert.expected_available,
                alert.risk
            );
        }
    }

    Ok(())
}
