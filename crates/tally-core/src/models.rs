//! Domain records for Tally
//!
//! Everything in this module is a read-only input to the engine. Record
//! ownership and lifecycle belong to the caller; the engine never mutates a
//! record, it only derives view models from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a recurring obligation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Repeats every `custom_interval` `custom_unit`s
    Custom,
    /// No recurrence at all
    OneTime,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Custom => "custom",
            Self::OneTime => "one_time",
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            "custom" => Ok(Self::Custom),
            "one_time" | "onetime" => Ok(Self::OneTime),
            _ => Err(format!("Unknown cadence: {}", s)),
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit for `Cadence::Custom` intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl CustomUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

/// What a recurring obligation line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    Income,
    Bill,
    Loan,
}

impl ObligationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Bill => "bill",
            Self::Loan => "loan",
        }
    }
}

/// An income, bill, or loan line with a recurrence schedule
///
/// A `custom` cadence needs both `custom_interval > 0` and `custom_unit`;
/// otherwise the obligation contributes nothing per month and has no next
/// occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringObligation {
    pub name: String,
    pub kind: ObligationKind,
    pub amount: f64,
    pub cadence: Cadence,
    #[serde(default)]
    pub custom_interval: Option<u32>,
    #[serde(default)]
    pub custom_unit: Option<CustomUnit>,
    /// Preferred day for month-based cadences; falls back to the anchor's day
    #[serde(default)]
    pub day_of_month: Option<u32>,
    /// Date the record was created; occurrence search is anchored here
    pub anchor: NaiveDate,
    /// Minimum payment on a loan line, if any
    #[serde(default)]
    pub minimum_payment: Option<f64>,
    /// Monthly add-on cost bundled with a loan (insurance, service fees)
    #[serde(default)]
    pub subscription_cost: Option<f64>,
    #[serde(default)]
    pub autopay: bool,
}

/// How a card's minimum payment is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimumPaymentPolicy {
    /// A configured flat amount
    Fixed,
    /// A percentage of the statement balance plus the cycle's interest
    PercentPlusInterest,
}

impl MinimumPaymentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::PercentPlusInterest => "percent_plus_interest",
        }
    }
}

/// A revolving-credit account (credit card or line of credit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevolvingAccount {
    pub name: String,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub statement_balance: f64,
    #[serde(default)]
    pub pending_charges: f64,
    pub minimum_payment_policy: MinimumPaymentPolicy,
    /// Flat amount for `fixed`, percentage for `percent_plus_interest`
    #[serde(default)]
    pub minimum_payment_value: f64,
    #[serde(default)]
    pub extra_payment: f64,
    #[serde(default)]
    pub planned_monthly_spend: f64,
    /// Annual percentage rate, e.g. 24.0 for 24%
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub statement_day: Option<u32>,
    #[serde(default)]
    pub due_day: Option<u32>,
}

impl RevolvingAccount {
    /// Copy of this account with every monetary/percent field clamped
    /// non-negative and non-finite values zeroed. Components normalize once
    /// on entry instead of re-checking fields at each use.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            credit_limit: non_negative(self.credit_limit),
            statement_balance: non_negative(self.statement_balance),
            pending_charges: non_negative(self.pending_charges),
            minimum_payment_policy: self.minimum_payment_policy,
            minimum_payment_value: non_negative(self.minimum_payment_value),
            extra_payment: non_negative(self.extra_payment),
            planned_monthly_spend: non_negative(self.planned_monthly_spend),
            apr: non_negative(self.apr),
            statement_day: self.statement_day,
            due_day: self.due_day,
        }
    }

    /// Statement balance plus charges that have not hit a statement yet
    pub fn current_balance(&self) -> f64 {
        non_negative(self.statement_balance) + non_negative(self.pending_charges)
    }
}

/// Reconciliation state of a purchase against a bank statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    Pending,
    #[default]
    Posted,
    Reconciled,
}

impl ReconciliationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Posted => "posted",
            Self::Reconciled => "reconciled",
        }
    }
}

/// Portion of a purchase attributed to a different category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseSplit {
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
}

/// A single logged purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub item: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub status: ReconciliationStatus,
    /// When non-empty, the splits carry the category attribution and the
    /// parent category is ignored for budget math
    #[serde(default)]
    pub splits: Vec<PurchaseSplit>,
}

/// A per-category, per-month spending envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeBudget {
    pub category: String,
    /// Month key in `YYYY-MM` form
    pub month: String,
    pub target_amount: f64,
    #[serde(default)]
    pub carryover_amount: Option<f64>,
    #[serde(default)]
    pub rollover_enabled: bool,
}

/// Round to cents (two decimals, half away from zero). Applied at the
/// reporting boundary only; intermediate math stays unrounded.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Clamp to a finite non-negative number
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Zero out NaN and infinities
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Trim + case-fold free text for grouping and comparison
pub(crate) fn normalize_label(text: &str) -> String {
    text.trim().to_lowercase()
}
