//! Transaction data-quality analysis
//!
//! Duplicate grouping, statistical outliers, categorization hygiene, and
//! split reconciliation over a purchase set. Everything here reports as
//! data; bad records never raise.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::models::{finite_or_zero, normalize_label, round_cents, Purchase, ReconciliationStatus};

/// Trailing window for outlier statistics.
const ANOMALY_WINDOW_DAYS: i64 = 90;

/// Amounts this many sample standard deviations above the mean are outliers.
const ANOMALY_SIGMA: f64 = 2.5;

/// Absolute floor so low-variance sets never flag trivial amounts.
const ANOMALY_FLOOR: f64 = 50.0;

/// Split totals may differ from the parent by at most one cent.
const SPLIT_TOLERANCE_CENTS: i64 = 1;

/// Category labels that count as missing after trim + case fold.
const MISSING_CATEGORY_LABELS: [&str; 4] = ["", "uncategorized", "other", "misc"];

/// A purchase whose amount sits far outside the recent distribution
#[derive(Debug, Clone, Serialize)]
pub struct AnomalousPurchase {
    pub item: String,
    pub amount: f64,
    pub purchase_date: NaiveDate,
}

/// Hygiene metrics over one purchase set
#[derive(Debug, Clone, Serialize)]
pub struct DataQualitySummary {
    pub purchase_count: usize,
    /// Groups of same-item, same-amount, same-date purchases; each group
    /// counts once regardless of its size
    pub duplicate_count: usize,
    pub anomaly_count: usize,
    pub anomalies: Vec<AnomalousPurchase>,
    pub missing_category_count: usize,
    pub pending_reconciliation_count: usize,
    pub split_mismatch_count: usize,
}

/// Compute the full data-quality summary for a purchase set.
pub fn summarize_quality(purchases: &[Purchase], today: NaiveDate) -> DataQualitySummary {
    let anomalies = find_anomalies(purchases, today);
    let summary = DataQualitySummary {
        purchase_count: purchases.len(),
        duplicate_count: duplicate_group_count(purchases),
        anomaly_count: anomalies.len(),
        anomalies,
        missing_category_count: purchases
            .iter()
            .filter(|p| is_missing_category(p.category.as_deref()))
            .count(),
        pending_reconciliation_count: purchases
            .iter()
            .filter(|p| p.status == ReconciliationStatus::Pending)
            .count(),
        split_mismatch_count: purchases.iter().filter(|p| has_split_mismatch(p)).count(),
    };

    debug!(
        "Quality pass over {} purchases: {} duplicate groups, {} anomalies",
        summary.purchase_count, summary.duplicate_count, summary.anomaly_count
    );
    summary
}

/// Count groups of likely double-entries. Keyed by normalized item text,
/// cents-rounded amount, and exact date; order of the input never matters.
fn duplicate_group_count(purchases: &[Purchase]) -> usize {
    let mut groups: HashMap<(String, i64, NaiveDate), usize> = HashMap::new();
    for purchase in purchases {
        let key = (
            normalize_label(&purchase.item),
            to_cents(purchase.amount),
            purchase.purchase_date,
        );
        *groups.entry(key).or_default() += 1;
    }
    groups.values().filter(|&&members| members > 1).count()
}

/// Flag purchases in the trailing window whose amount exceeds both the
/// 2.5-sigma threshold and the absolute floor.
fn find_anomalies(purchases: &[Purchase], today: NaiveDate) -> Vec<AnomalousPurchase> {
    let window_start = today - Duration::days(ANOMALY_WINDOW_DAYS);
    let recent: Vec<&Purchase> = purchases
        .iter()
        .filter(|p| p.purchase_date >= window_start && p.purchase_date <= today)
        .collect();
    if recent.is_empty() {
        return Vec::new();
    }

    let amounts: Vec<f64> = recent.iter().map(|p| finite_or_zero(p.amount)).collect();
    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    let threshold = mean + ANOMALY_SIGMA * sample_stddev(&amounts, mean);

    let mut anomalies: Vec<AnomalousPurchase> = recent
        .iter()
        .filter(|p| {
            let amount = finite_or_zero(p.amount);
            amount > threshold && amount > ANOMALY_FLOOR
        })
        .map(|p| AnomalousPurchase {
            item: p.item.clone(),
            amount: round_cents(p.amount),
            purchase_date: p.purchase_date,
        })
        .collect();

    anomalies.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.purchase_date.cmp(&b.purchase_date))
    });
    anomalies
}

/// Sample standard deviation (n-1 denominator), 0 below two samples.
fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

fn is_missing_category(category: Option<&str>) -> bool {
    let label = normalize_label(category.unwrap_or(""));
    MISSING_CATEGORY_LABELS.contains(&label.as_str())
}

/// A purchase with splits must reconcile to its own total within a cent,
/// comparing both sides in cents.
fn has_split_mismatch(purchase: &Purchase) -> bool {
    if purchase.splits.is_empty() {
        return false;
    }
    let split_total: f64 = purchase.splits.iter().map(|s| finite_or_zero(s.amount)).sum();
    (to_cents(split_total) - to_cents(purchase.amount)).abs() > SPLIT_TOLERANCE_CENTS
}

fn to_cents(amount: f64) -> i64 {
    (finite_or_zero(amount) * 100.0).round() as i64
}
