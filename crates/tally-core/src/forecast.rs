//! Multi-horizon cashflow forecasting
//!
//! Combines resolved cadences with trailing purchase velocity into 30/90/365
//! day net-cash projections, plus per-bill risk alerts for bills coming due
//! soon.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::card::cycle_figures;
use crate::models::{
    finite_or_zero, round_cents, ObligationKind, Purchase, RecurringObligation, RevolvingAccount,
};

/// Forecast horizons, in days.
pub const FORECAST_HORIZONS_DAYS: [u32; 3] = [30, 90, 365];

/// Coverage reported when monthly commitments are zero. A historical
/// sentinel rather than a real month count; callers rely on the exact value.
pub const COVERAGE_SENTINEL_MONTHS: f64 = 99.0;

/// Purchases inside this trailing window feed the spend velocity estimate.
const VELOCITY_WINDOW_DAYS: i64 = 90;

/// Bills due further out than this produce no alert.
const BILL_ALERT_HORIZON_DAYS: i64 = 45;

/// Expected cash below this multiple of the bill amount is a warning.
const BILL_WARNING_MULTIPLIER: f64 = 1.25;

/// Health of a projected cash position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashRisk {
    Healthy,
    Warning,
    Critical,
}

impl CashRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for CashRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether cash is expected to cover a specific upcoming bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillRisk {
    Good,
    Warning,
    Critical,
}

impl BillRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for BillRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Net-cash projection over one horizon
#[derive(Debug, Clone, Serialize)]
pub struct ForecastWindow {
    pub days: u32,
    pub projected_net: f64,
    pub projected_cash: f64,
    /// Projected cash over monthly commitments; [`COVERAGE_SENTINEL_MONTHS`]
    /// when commitments are zero
    pub coverage_months: f64,
    pub risk: CashRisk,
}

/// A bill coming due with the cash expected to be on hand by then
#[derive(Debug, Clone, Serialize)]
pub struct BillRiskAlert {
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub days_away: i64,
    pub expected_available: f64,
    pub risk: BillRisk,
}

/// The full cashflow picture handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct CashflowForecast {
    pub monthly_income: f64,
    pub monthly_commitments: f64,
    pub monthly_spend_estimate: f64,
    pub monthly_net: f64,
    pub liquid_reserves: f64,
    pub windows: Vec<ForecastWindow>,
    pub bill_alerts: Vec<BillRiskAlert>,
}

/// Project net cash at each horizon and flag bills at risk.
pub fn build_forecast(
    obligations: &[RecurringObligation],
    cards: &[RevolvingAccount],
    purchases: &[Purchase],
    liquid_reserves: f64,
    today: NaiveDate,
) -> CashflowForecast {
    let liquid_reserves = finite_or_zero(liquid_reserves);

    let monthly_income: f64 = obligations
        .iter()
        .filter(|o| o.kind == ObligationKind::Income)
        .map(RecurringObligation::monthly_equivalent)
        .sum();

    let bill_commitments: f64 = obligations
        .iter()
        .filter(|o| o.kind == ObligationKind::Bill)
        .map(RecurringObligation::monthly_equivalent)
        .sum();

    // Loans commit their normalized payment plus any bundled monthly add-on
    let loan_commitments: f64 = obligations
        .iter()
        .filter(|o| o.kind == ObligationKind::Loan)
        .map(|o| {
            o.monthly_equivalent()
                + o.subscription_cost
                    .map(finite_or_zero)
                    .unwrap_or(0.0)
                    .max(0.0)
        })
        .sum();

    // Each card commits its minimum due on the current balance
    let card_minimums: f64 = cards
        .iter()
        .map(|card| {
            let account = card.normalized();
            cycle_figures(&account, account.current_balance()).minimum_due
        })
        .sum();

    let monthly_commitments = bill_commitments + card_minimums + loan_commitments;
    let monthly_spend_estimate = trailing_spend_velocity(purchases, today);
    let monthly_net = monthly_income - monthly_commitments - monthly_spend_estimate;

    debug!(
        "Forecast basis: income {:.2}, commitments {:.2}, spend {:.2}, net {:.2}",
        monthly_income, monthly_commitments, monthly_spend_estimate, monthly_net
    );

    let windows = FORECAST_HORIZONS_DAYS
        .iter()
        .map(|&days| {
            let projected_net = monthly_net * (f64::from(days) / 30.0);
            let projected_cash = liquid_reserves + projected_net;
            let coverage_months = if monthly_commitments > 0.0 {
                projected_cash / monthly_commitments
            } else {
                COVERAGE_SENTINEL_MONTHS
            };
            let risk = if projected_cash < 0.0 {
                CashRisk::Critical
            } else if projected_cash < monthly_commitments {
                CashRisk::Warning
            } else {
                CashRisk::Healthy
            };

            ForecastWindow {
                days,
                projected_net: round_cents(projected_net),
                projected_cash: round_cents(projected_cash),
                coverage_months: round_cents(coverage_months),
                risk,
            }
        })
        .collect();

    let bill_alerts = bill_risk_alerts(obligations, liquid_reserves, monthly_net, today);

    CashflowForecast {
        monthly_income: round_cents(monthly_income),
        monthly_commitments: round_cents(monthly_commitments),
        monthly_spend_estimate: round_cents(monthly_spend_estimate),
        monthly_net: round_cents(monthly_net),
        liquid_reserves: round_cents(liquid_reserves),
        windows,
        bill_alerts,
    }
}

/// Average daily purchase amount over the trailing window, scaled to a
/// 30-day month. Purely statistical; no category awareness.
fn trailing_spend_velocity(purchases: &[Purchase], today: NaiveDate) -> f64 {
    let window_start = today - Duration::days(VELOCITY_WINDOW_DAYS);
    let total: f64 = purchases
        .iter()
        .filter(|p| p.purchase_date >= window_start && p.purchase_date <= today)
        .map(|p| finite_or_zero(p.amount))
        .sum();
    total / VELOCITY_WINDOW_DAYS as f64 * 30.0
}

/// Flag bills due within [`BILL_ALERT_HORIZON_DAYS`] against the cash
/// expected to be available on their due date.
pub fn bill_risk_alerts(
    obligations: &[RecurringObligation],
    liquid_reserves: f64,
    monthly_net: f64,
    today: NaiveDate,
) -> Vec<BillRiskAlert> {
    let mut alerts = Vec::new();

    for obligation in obligations.iter().filter(|o| o.kind == ObligationKind::Bill) {
        let Some(due_date) = obligation.next_occurrence(today) else {
            continue;
        };
        let days_away = (due_date - today).num_days();
        if !(0..=BILL_ALERT_HORIZON_DAYS).contains(&days_away) {
            continue;
        }

        let amount = finite_or_zero(obligation.amount);
        let expected_available = liquid_reserves + (monthly_net / 30.0) * days_away as f64;
        let risk = if expected_available < amount {
            BillRisk::Critical
        } else if expected_available < amount * BILL_WARNING_MULTIPLIER {
            BillRisk::Warning
        } else {
            BillRisk::Good
        };

        alerts.push(BillRiskAlert {
            name: obligation.name.clone(),
            amount: round_cents(amount),
            due_date,
            days_away,
            expected_available: round_cents(expected_available),
            risk,
        });
    }

    alerts.sort_by(|a, b| {
        a.days_away
            .cmp(&b.days_away)
            .then_with(|| b.amount.total_cmp(&a.amount))
    });
    alerts
}
