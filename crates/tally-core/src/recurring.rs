//! Recurring purchase pattern mining
//!
//! Detects subscription-like repeat purchases from a flat history using
//! interval statistics: group by merchant text, measure the gaps between
//! consecutive purchases, and score how steady the gaps are.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::models::{normalize_label, round_cents, Purchase};

/// Purchases older than this are ignored when mining patterns.
const LOOKBACK_DAYS: i64 = 210;

/// Minimum purchases of one merchant before a pattern is considered.
/// Two could be coincidence; three suggests a real recurring charge.
const MIN_OCCURRENCES: usize = 3;

/// Mean gaps outside this band are too frequent (daily coffee) or too
/// infrequent (annual renewals) to read as a subscription-like pattern.
const MIN_MEAN_GAP_DAYS: f64 = 5.0;
const MAX_MEAN_GAP_DAYS: f64 = 45.0;

/// Only the strongest candidates are reported.
const MAX_CANDIDATES: usize = 8;

/// A merchant whose purchase history repeats at a steady interval
#[derive(Debug, Clone, Serialize)]
pub struct RecurringCandidate {
    pub merchant: String,
    pub sample_count: usize,
    pub mean_gap_days: f64,
    /// 0-100: tighter gaps and more samples score higher
    pub confidence: f64,
    pub average_amount: f64,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    /// Last occurrence plus the mean gap
    pub next_expected: NaiveDate,
}

/// Mine the purchase history for subscription-like repeat merchants.
///
/// Ranked by confidence, then sample count, truncated to the top
/// [`MAX_CANDIDATES`].
pub fn find_recurring_candidates(
    purchases: &[Purchase],
    today: NaiveDate,
) -> Vec<RecurringCandidate> {
    let window_start = today - Duration::days(LOOKBACK_DAYS);

    // Group by case-insensitive, trimmed merchant text
    let mut by_merchant: HashMap<String, Vec<&Purchase>> = HashMap::new();
    for purchase in purchases {
        if purchase.purchase_date < window_start || purchase.purchase_date > today {
            continue;
        }
        by_merchant
            .entry(normalize_label(&purchase.item))
            .or_default()
            .push(purchase);
    }

    let mut candidates = Vec::new();

    for (merchant_key, mut group) in by_merchant {
        if group.len() < MIN_OCCURRENCES {
            continue;
        }
        group.sort_by_key(|p| p.purchase_date);

        let gaps: Vec<f64> = group
            .windows(2)
            .map(|pair| (pair[1].purchase_date - pair[0].purchase_date).num_days() as f64)
            .collect();
        let mean_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;

        if !(MIN_MEAN_GAP_DAYS..=MAX_MEAN_GAP_DAYS).contains(&mean_gap) {
            debug!(
                "Skipping {}: mean gap {:.1}d outside subscription band",
                merchant_key, mean_gap
            );
            continue;
        }

        // Mean absolute deviation of the gaps; tight cadences score high,
        // and every extra sample adds a little credit
        let mad = gaps.iter().map(|gap| (gap - mean_gap).abs()).sum::<f64>() / gaps.len() as f64;
        let confidence =
            (1.0 - mad / 20.0 + 0.04 * group.len() as f64).clamp(0.0, 1.0) * 100.0;

        let latest = group[group.len() - 1];
        let total_amount: f64 = group.iter().map(|p| p.amount).sum();

        candidates.push(RecurringCandidate {
            merchant: latest.item.trim().to_string(),
            sample_count: group.len(),
            mean_gap_days: mean_gap,
            confidence,
            average_amount: round_cents(total_amount / group.len() as f64),
            first_seen: group[0].purchase_date,
            last_seen: latest.purchase_date,
            next_expected: latest.purchase_date + Duration::days(mean_gap.round() as i64),
        });
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.sample_count.cmp(&a.sample_count))
            .then_with(|| a.merchant.to_lowercase().cmp(&b.merchant.to_lowercase()))
    });
    candidates.truncate(MAX_CANDIDATES);

    debug!("Found {} recurring candidates", candidates.len());
    candidates
}
