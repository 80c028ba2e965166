//! Record snapshot loading
//!
//! The engine has no storage of its own; the CLI stands in as the record
//! provider by reading a JSON snapshot of one user's already-fetched
//! collections.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tally_core::{EnvelopeBudget, Purchase, RecurringObligation, RevolvingAccount};

/// Record collections for a single user and time window
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    /// Sum of account balances flagged liquid
    #[serde(default)]
    pub liquid_reserves: f64,
    #[serde(default)]
    pub obligations: Vec<RecurringObligation>,
    #[serde(default)]
    pub cards: Vec<RevolvingAccount>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    #[serde(default)]
    pub budgets: Vec<EnvelopeBudget>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }
}
