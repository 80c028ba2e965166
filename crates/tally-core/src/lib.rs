//! Tally Core Library
//!
//! Deterministic analytics engine for the Tally personal finance tool:
//! - Recurring-cadence date arithmetic and monthly-equivalent amounts
//! - Recurring purchase pattern mining from flat transaction history
//! - Revolving-credit amortization projections
//! - Debt payoff strategy ranking (avalanche / snowball)
//! - Multi-horizon cashflow forecasting and bill risk alerts
//! - Envelope budget performance and data-quality scoring
//!
//! Every entry point is a pure function: record collections and an explicit
//! "today" go in, view models come out. No clock reads, no I/O, no shared
//! state, so callers may run components concurrently on independent inputs.

pub mod budget;
pub mod cadence;
pub mod card;
pub mod error;
pub mod forecast;
pub mod models;
pub mod payoff;
pub mod quality;
pub mod recurring;

pub use budget::{analyze_budgets, BudgetPerformanceRow, BudgetStatus};
pub use cadence::{monthly_equivalent, next_occurrence, MONTH_SEARCH_CAP_MONTHS};
pub use card::{project_card, CardProjection, CardProjectionRow, PROJECTION_CYCLES};
pub use error::{Error, Result};
pub use forecast::{
    build_forecast, BillRisk, BillRiskAlert, CashRisk, CashflowForecast, ForecastWindow,
    COVERAGE_SENTINEL_MONTHS, FORECAST_HORIZONS_DAYS,
};
pub use models::{
    round_cents, Cadence, CustomUnit, EnvelopeBudget, MinimumPaymentPolicy, ObligationKind,
    Purchase, PurchaseSplit, ReconciliationStatus, RecurringObligation, RevolvingAccount,
};
pub use payoff::{rank_payoff, PayoffEntry, PayoffRanking, PayoffStrategy};
pub use quality::{summarize_quality, AnomalousPurchase, DataQualitySummary};
pub use recurring::{find_recurring_candidates, RecurringCandidate};
