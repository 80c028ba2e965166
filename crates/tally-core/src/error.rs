//! Error types for Tally
//!
//! The engine degrades gracefully on malformed numeric/cadence input; only
//! caller-contract violations surface as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid month key (expected YYYY-MM): {0}")]
    InvalidMonthKey(String),

    #[error("Budget category '{category}' appears more than once in {month}")]
    DuplicateBudget { category: String, month: String },
}

pub type Result<T> = std::result::Result<T, Error>;
