//! Revolving-credit amortization
//!
//! Projects a single card balance forward cycle by cycle given the interest
//! rate, minimum-payment policy, extra payment, and planned monthly spend.
//! Intermediate balances stay unrounded; rows are rounded to cents only when
//! reported.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::cadence::days_in_month;
use crate::models::{round_cents, MinimumPaymentPolicy, RevolvingAccount};

/// Default projection horizon in billing cycles.
pub const PROJECTION_CYCLES: u32 = 12;

/// Balance comparisons ignore noise below this.
const BALANCE_EPSILON: f64 = 1e-6;

/// One cent. Payments more than this below the interest charge flag a
/// structurally growing balance.
const ONE_CENT: f64 = 0.01;

/// One projected billing cycle, rounded to cents for reporting
#[derive(Debug, Clone, Serialize)]
pub struct CardProjectionRow {
    pub cycle: u32,
    pub start_balance: f64,
    pub interest: f64,
    pub minimum_due: f64,
    pub payment: f64,
    pub ending_balance: f64,
    /// Ending balance over the credit limit, 0 when the limit is 0
    pub utilization: f64,
}

/// Full projection for one account
#[derive(Debug, Clone, Serialize)]
pub struct CardProjection {
    pub name: String,
    /// Statement balance plus pending charges, before any due-date modeling
    pub current_balance: f64,
    /// True when this cycle's due date is already behind "today"
    pub due_applied: bool,
    /// The balance a caller should display: the raw current balance, or the
    /// post-due projected balance once the due date has passed
    pub displayed_balance: f64,
    pub monthly_interest: f64,
    pub minimum_due: f64,
    pub planned_payment: f64,
    pub over_limit: bool,
    pub payment_below_interest: bool,
    pub rows: Vec<CardProjectionRow>,
}

/// Interest, minimum due, and planned payment for one cycle over an
/// unrounded starting balance
#[derive(Debug, Clone, Copy)]
pub(crate) struct CycleFigures {
    pub interest: f64,
    pub due_balance: f64,
    pub minimum_due: f64,
    pub payment: f64,
}

/// Core cycle arithmetic, shared with the payoff ranker and forecaster.
/// Expects an already-normalized account.
pub(crate) fn cycle_figures(account: &RevolvingAccount, start_balance: f64) -> CycleFigures {
    let interest = start_balance * (account.apr / 100.0 / 12.0);
    let due_balance = start_balance + interest;

    let minimum_due = match account.minimum_payment_policy {
        MinimumPaymentPolicy::Fixed => account.minimum_payment_value.min(due_balance),
        MinimumPaymentPolicy::PercentPlusInterest => {
            (start_balance * (account.minimum_payment_value / 100.0) + interest)
                .max(0.0)
                .min(due_balance)
        }
    };

    let payment = due_balance.min(minimum_due + account.extra_payment);

    CycleFigures {
        interest,
        due_balance,
        minimum_due,
        payment,
    }
}

/// Project the account forward `cycles` billing cycles from its current
/// balance. `today` drives only the due-date timing flag.
pub fn project_card(account: &RevolvingAccount, cycles: u32, today: NaiveDate) -> CardProjection {
    let account = account.normalized();
    let current_balance = account.current_balance();

    let first = cycle_figures(&account, current_balance);

    let mut rows = Vec::with_capacity(cycles as usize);
    let mut balance = current_balance;
    for cycle in 1..=cycles {
        let figures = cycle_figures(&account, balance);
        let ending = (figures.due_balance - figures.payment).max(0.0) + account.planned_monthly_spend;
        let utilization = if account.credit_limit > 0.0 {
            ending / account.credit_limit
        } else {
            0.0
        };

        rows.push(CardProjectionRow {
            cycle,
            start_balance: round_cents(balance),
            interest: round_cents(figures.interest),
            minimum_due: round_cents(figures.minimum_due),
            payment: round_cents(figures.payment),
            ending_balance: round_cents(ending),
            utilization,
        });

        balance = ending;
    }

    let due_applied = due_has_passed(account.due_day, today);
    // The balance right after the due payment posts; next cycle's planned
    // spend belongs to the following statement
    let post_due_balance = (first.due_balance - first.payment).max(0.0);
    let displayed_balance = if due_applied {
        round_cents(post_due_balance)
    } else {
        round_cents(current_balance)
    };

    CardProjection {
        name: account.name.clone(),
        current_balance: round_cents(current_balance),
        due_applied,
        displayed_balance,
        monthly_interest: round_cents(first.interest),
        minimum_due: round_cents(first.minimum_due),
        planned_payment: round_cents(first.payment),
        over_limit: current_balance > account.credit_limit + BALANCE_EPSILON,
        payment_below_interest: first.payment + ONE_CENT < first.interest,
        rows,
    }
}

/// Whether this month's due date is already behind `today`. Days past the
/// month's length fall on its last day, matching occurrence clamping.
fn due_has_passed(due_day: Option<u32>, today: NaiveDate) -> bool {
    match due_day {
        Some(day) if day > 0 => {
            let clamped = day.min(days_in_month(today.year(), today.month()));
            today.day() > clamped
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed_card(balance: f64, apr: f64, minimum: f64) -> RevolvingAccount {
        RevolvingAccount {
            name: "Visa".to_string(),
            credit_limit: 5000.0,
            statement_balance: balance,
            pending_charges: 0.0,
            minimum_payment_policy: MinimumPaymentPolicy::Fixed,
            minimum_payment_value: minimum,
            extra_payment: 0.0,
            planned_monthly_spend: 0.0,
            apr,
            statement_day: Some(3),
            due_day: Some(21),
        }
    }

    #[test]
    fn test_first_cycle_matches_hand_math() {
        // $1000 at 24% APR, fixed $35 minimum
        let projection = project_card(&fixed_card(1000.0, 24.0, 35.0), 12, date(2026, 3, 10));
        let row = &projection.rows[0];

        assert_eq!(row.interest, 20.0);
        assert_eq!(row.minimum_due, 35.0);
        assert_eq!(row.payment, 35.0);
        assert_eq!(row.ending_balance, 985.0);
        assert_eq!(projection.rows.len(), 12);
    }

    #[test]
    fn test_percent_plus_interest_minimum() {
        let mut account = fixed_card(2000.0, 24.0, 2.0);
        account.minimum_payment_policy = MinimumPaymentPolicy::PercentPlusInterest;

        let projection = project_card(&account, 1, date(2026, 3, 10));
        let row = &projection.rows[0];

        // 2% of 2000 + 40 interest
        assert_eq!(row.interest, 40.0);
        assert_eq!(row.minimum_due, 80.0);
    }

    #[test]
    fn test_minimum_capped_at_due_balance() {
        let projection = project_card(&fixed_card(20.0, 0.0, 35.0), 1, date(2026, 3, 10));
        let row = &projection.rows[0];

        assert_eq!(row.minimum_due, 20.0);
        assert_eq!(row.payment, 20.0);
        assert_eq!(row.ending_balance, 0.0);
    }

    #[test]
    fn test_planned_spend_refills_balance() {
        let mut account = fixed_card(500.0, 0.0, 500.0);
        account.planned_monthly_spend = 300.0;

        let projection = project_card(&account, 3, date(2026, 3, 10));
        // Paid to zero then refilled by planned spend, every cycle
        for row in &projection.rows {
            assert!(row.ending_balance >= 300.0 - f64::EPSILON);
        }
        assert_eq!(projection.rows[2].ending_balance, 300.0);
    }

    #[test]
    fn test_due_timing_controls_displayed_balance() {
        let card = fixed_card(1000.0, 24.0, 35.0);

        let before_due = project_card(&card, 12, date(2026, 3, 10));
        assert!(!before_due.due_applied);
        assert_eq!(before_due.displayed_balance, 1000.0);

        let after_due = project_card(&card, 12, date(2026, 3, 22));
        assert!(after_due.due_applied);
        // 1020 due balance minus the 35 payment
        assert_eq!(after_due.displayed_balance, 985.0);
    }

    #[test]
    fn test_missing_due_day_never_applies() {
        let mut card = fixed_card(1000.0, 24.0, 35.0);
        card.due_day = None;
        let projection = project_card(&card, 1, date(2026, 3, 31));
        assert!(!projection.due_applied);
        assert_eq!(projection.displayed_balance, 1000.0);
    }

    #[test]
    fn test_over_limit_flag_uses_epsilon() {
        let mut card = fixed_card(5000.0, 24.0, 35.0);
        let projection = project_card(&card, 1, date(2026, 3, 10));
        assert!(!projection.over_limit);

        card.pending_charges = 0.5;
        let projection = project_card(&card, 1, date(2026, 3, 10));
        assert!(projection.over_limit);
    }

    #[test]
    fn test_payment_below_interest_flag() {
        // $10k at 24%: $200/mo interest dwarfs the $35 minimum
        let projection = project_card(&fixed_card(10_000.0, 24.0, 35.0), 1, date(2026, 3, 10));
        assert!(projection.payment_below_interest);

        let healthy = project_card(&fixed_card(1000.0, 24.0, 35.0), 1, date(2026, 3, 10));
        assert!(!healthy.payment_below_interest);
    }

    #[test]
    fn test_zero_limit_utilization_is_zero() {
        let mut card = fixed_card(1000.0, 24.0, 35.0);
        card.credit_limit = 0.0;
        let projection = project_card(&card, 1, date(2026, 3, 10));
        assert_eq!(projection.rows[0].utilization, 0.0);
        assert!(projection.over_limit);
    }

    #[test]
    fn test_ending_balance_never_below_planned_spend() {
        let mut account = fixed_card(750.0, 29.99, 25.0);
        account.extra_payment = 200.0;
        account.planned_monthly_spend = 120.0;

        let projection = project_card(&account, 24, date(2026, 3, 10));
        for row in &projection.rows {
            assert!(row.ending_balance >= account.planned_monthly_spend - ONE_CENT);
        }
    }
}
