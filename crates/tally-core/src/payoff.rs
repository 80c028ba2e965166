//! Debt payoff strategy ranking
//!
//! Orders revolving balances by avalanche (APR-first) or snowball
//! (balance-first) priority. The top entry in either ordering is the
//! recommended overpay target.

use serde::Serialize;

use crate::card::cycle_figures;
use crate::models::{round_cents, RevolvingAccount};

/// Which payoff prioritization to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest APR first
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl PayoffStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avalanche => "avalanche",
            Self::Snowball => "snowball",
        }
    }
}

impl std::str::FromStr for PayoffStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avalanche" => Ok(Self::Avalanche),
            "snowball" => Ok(Self::Snowball),
            _ => Err(format!("Unknown payoff strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One account reduced to its payoff-relevant figures
#[derive(Debug, Clone, Serialize)]
pub struct PayoffEntry {
    pub name: String,
    pub balance: f64,
    pub apr: f64,
    pub monthly_interest: f64,
    pub minimum_due: f64,
    pub planned_payment: f64,
}

/// A total ordering of carrying accounts under one strategy
#[derive(Debug, Clone, Serialize)]
pub struct PayoffRanking {
    pub strategy: PayoffStrategy,
    /// Best overpay target first
    pub entries: Vec<PayoffEntry>,
}

impl PayoffRanking {
    /// The recommended overpay target, when any account carries a balance
    pub fn recommended(&self) -> Option<&PayoffEntry> {
        self.entries.first()
    }
}

/// Rank carrying accounts under the given strategy. Accounts with no
/// balance need no payoff target and are excluded.
pub fn rank_payoff(accounts: &[RevolvingAccount], strategy: PayoffStrategy) -> PayoffRanking {
    let mut entries: Vec<PayoffEntry> = accounts
        .iter()
        .map(RevolvingAccount::normalized)
        .filter_map(|account| {
            let balance = account.current_balance();
            if balance <= 0.0 {
                return None;
            }
            let figures = cycle_figures(&account, balance);
            Some(PayoffEntry {
                name: account.name.clone(),
                balance: round_cents(balance),
                apr: account.apr,
                monthly_interest: round_cents(figures.interest),
                minimum_due: round_cents(figures.minimum_due),
                planned_payment: round_cents(figures.payment),
            })
        })
        .collect();

    entries.sort_by(|a, b| match strategy {
        PayoffStrategy::Avalanche => b
            .apr
            .total_cmp(&a.apr)
            .then_with(|| b.monthly_interest.total_cmp(&a.monthly_interest))
            .then_with(|| b.balance.total_cmp(&a.balance))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        PayoffStrategy::Snowball => a
            .balance
            .total_cmp(&b.balance)
            .then_with(|| b.apr.total_cmp(&a.apr))
            .then_with(|| b.monthly_interest.total_cmp(&a.monthly_interest))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    });

    PayoffRanking { strategy, entries }
}
