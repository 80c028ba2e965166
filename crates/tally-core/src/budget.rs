//! Envelope budget performance
//!
//! Measures each category envelope for a target month against actual spend,
//! projecting month-end totals from the pace so far.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::cadence::days_in_month;
use crate::error::{Error, Result};
use crate::models::{finite_or_zero, normalize_label, round_cents, EnvelopeBudget, Purchase};

/// Projections beyond this share of the effective target get a warning.
const WARNING_BAND: f64 = 0.90;

/// How an envelope is tracking against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One envelope's performance for the target month
#[derive(Debug, Clone, Serialize)]
pub struct BudgetPerformanceRow {
    pub category: String,
    pub month: String,
    pub target_amount: f64,
    pub carryover_amount: f64,
    /// Target plus carryover
    pub effective_target: f64,
    pub spent: f64,
    /// Spend pace so far extrapolated over the whole month
    pub projected_month_end: f64,
    pub status: BudgetStatus,
    /// Unused amount worth carrying into next month, when rollover is on
    pub suggested_rollover: Option<f64>,
}

/// Parse a `YYYY-MM` month key.
pub(crate) fn parse_month_key(key: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidMonthKey(key.to_string());

    let (year_part, month_part) = key.split_once('-').ok_or_else(invalid)?;
    if year_part.len() != 4 || month_part.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Score every envelope defined for `month` against the purchase history.
///
/// Errors only on caller-contract violations: a malformed month key, or the
/// same category budgeted twice in one month.
pub fn analyze_budgets(
    budgets: &[EnvelopeBudget],
    purchases: &[Purchase],
    month: &str,
    today: NaiveDate,
) -> Result<Vec<BudgetPerformanceRow>> {
    let (year, month_number) = parse_month_key(month)?;
    let month_days = days_in_month(year, month_number);

    // Current month projects from days elapsed so far; any other month is
    // taken in full
    let elapsed_days = if (today.year(), today.month()) == (year, month_number) {
        today.day().min(month_days)
    } else {
        month_days
    };

    // Spend per category; a purchase with splits attributes through its
    // split rows only, never both
    let mut spent_by_category: HashMap<String, f64> = HashMap::new();
    for purchase in purchases {
        let date = purchase.purchase_date;
        if (date.year(), date.month()) != (year, month_number) {
            continue;
        }
        if purchase.splits.is_empty() {
            let key = normalize_label(purchase.category.as_deref().unwrap_or(""));
            *spent_by_category.entry(key).or_default() += finite_or_zero(purchase.amount);
        } else {
            for split in &purchase.splits {
                let key = normalize_label(split.category.as_deref().unwrap_or(""));
                *spent_by_category.entry(key).or_default() += finite_or_zero(split.amount);
            }
        }
    }

    let monthly_budgets: Vec<&EnvelopeBudget> =
        budgets.iter().filter(|b| b.month == month).collect();

    let mut seen = HashSet::new();
    for budget in &monthly_budgets {
        if !seen.insert(normalize_label(&budget.category)) {
            return Err(Error::DuplicateBudget {
                category: budget.category.clone(),
                month: month.to_string(),
            });
        }
    }

    let mut rows = Vec::with_capacity(monthly_budgets.len());
    for budget in monthly_budgets {
        let target = finite_or_zero(budget.target_amount);
        let carryover = budget.carryover_amount.map(finite_or_zero).unwrap_or(0.0);
        let effective_target = target + carryover;

        let spent = spent_by_category
            .get(&normalize_label(&budget.category))
            .copied()
            .unwrap_or(0.0);
        let projected = spent / f64::from(elapsed_days) * f64::from(month_days);

        let status = if projected > effective_target {
            BudgetStatus::Over
        } else if projected > effective_target * WARNING_BAND {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        };

        let suggested_rollover = budget
            .rollover_enabled
            .then(|| round_cents((effective_target - spent).max(0.0)));

        rows.push(BudgetPerformanceRow {
            category: budget.category.clone(),
            month: month.to_string(),
            target_amount: round_cents(target),
            carryover_amount: round_cents(carryover),
            effective_target: round_cents(effective_target),
            spent: round_cents(spent),
            projected_month_end: round_cents(projected),
            status,
            suggested_rollover,
        });
    }

    rows.sort_by(|a, b| {
        normalize_label(&a.category).cmp(&normalize_label(&b.category))
    });
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PurchaseSplit;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(category: &str, month: &str, target: f64) -> EnvelopeBudget {
        EnvelopeBudget {
            category: category.to_string(),
            month: month.to_string(),
            target_amount: target,
            carryover_amount: None,
            rollover_enabled: false,
        }
    }

    fn spend(category: &str, amount: f64, purchase_date: NaiveDate) -> Purchase {
        Purchase {
            item: format!("{} purchase", category),
            amount,
            category: Some(category.to_string()),
            purchase_date,
            status: Default::default(),
            splits: Vec::new(),
        }
    }

    #[test]
    fn test_projection_from_mid_month_pace() {
        // April has 30 days; 150 spent by the 15th projects to 300
        let today = date(2026, 4, 15);
        let rows = analyze_budgets(
            &[budget("Groceries", "2026-04", 400.0)],
            &[spend("Groceries", 150.0, date(2026, 4, 10))],
            "2026-04",
            today,
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spent, 150.0);
        assert_eq!(rows[0].projected_month_end, 300.0);
        assert_eq!(rows[0].status, BudgetStatus::OnTrack);
    }

    #[test]
    fn test_status_bands() {
        let today = date(2026, 4, 30);
        let run = |spent: f64| {
            analyze_budgets(
                &[budget("Dining", "2026-04", 100.0)],
                &[spend("Dining", spent, date(2026, 4, 20))],
                "2026-04",
                today,
            )
            .unwrap()[0]
                .status
        };

        assert_eq!(run(50.0), BudgetStatus::OnTrack);
        assert_eq!(run(95.0), BudgetStatus::Warning);
        assert_eq!(run(120.0), BudgetStatus::Over);
    }

    #[test]
    fn test_past_month_uses_full_length() {
        let today = date(2026, 5, 10);
        let rows = analyze_budgets(
            &[budget("Gas", "2026-04", 100.0)],
            &[spend("Gas", 90.0, date(2026, 4, 5))],
            "2026-04",
            today,
        )
        .unwrap();
        // No extrapolation for a closed month
        assert_eq!(rows[0].projected_month_end, 90.0);
    }

    #[test]
    fn test_splits_never_double_count() {
        let today = date(2026, 4, 30);
        let purchase = Purchase {
            item: "Supermarket run".to_string(),
            amount: 100.0,
            category: Some("Groceries".to_string()),
            purchase_date: date(2026, 4, 10),
            status: Default::default(),
            splits: vec![
                PurchaseSplit {
                    category: Some("Groceries".to_string()),
                    amount: 70.0,
                },
                PurchaseSplit {
                    category: Some("Household".to_string()),
                    amount: 30.0,
                },
            ],
        };

        let rows = analyze_budgets(
            &[
                budget("Groceries", "2026-04", 200.0),
                budget("Household", "2026-04", 50.0),
            ],
            &[purchase],
            "2026-04",
            today,
        )
        .unwrap();

        // Split rows carry the attribution; the parent's 100 never lands
        assert_eq!(rows[0].category, "Groceries");
        assert_eq!(rows[0].spent, 70.0);
        assert_eq!(rows[1].category, "Household");
        assert_eq!(rows[1].spent, 30.0);
    }

    #[test]
    fn test_carryover_and_rollover_suggestion() {
        let today = date(2026, 4, 30);
        let mut envelope = budget("Travel", "2026-04", 100.0);
        envelope.carryover_amount = Some(40.0);
        envelope.rollover_enabled = true;

        let rows = analyze_budgets(
            &[envelope],
            &[spend("Travel", 60.0, date(2026, 4, 12))],
            "2026-04",
            today,
        )
        .unwrap();

        assert_eq!(rows[0].effective_target, 140.0);
        assert_eq!(rows[0].suggested_rollover, Some(80.0));
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let today = date(2026, 4, 30);
        let rows = analyze_budgets(
            &[budget("groceries", "2026-04", 200.0)],
            &[spend("  GROCERIES ", 80.0, date(2026, 4, 2))],
            "2026-04",
            today,
        )
        .unwrap();
        assert_eq!(rows[0].spent, 80.0);
    }

    #[test]
    fn test_invalid_month_key_is_an_error() {
        let today = date(2026, 4, 30);
        for bad in ["2026", "26-04", "2026-13", "2026-4", "april"] {
            let result = analyze_budgets(&[], &[], bad, today);
            assert!(matches!(result, Err(Error::InvalidMonthKey(_))), "{}", bad);
        }
    }

    #[test]
    fn test_duplicate_category_is_an_error() {
        let today = date(2026, 4, 30);
        let result = analyze_budgets(
            &[
                budget("Dining", "2026-04", 100.0),
                budget(" dining ", "2026-04", 150.0),
            ],
            &[],
            "2026-04",
            today,
        );
        assert!(matches!(result, Err(Error::DuplicateBudget { .. })));
    }
}
