//! Error handling for the engine.
//!
//! The engine has no recoverable-error taxonomy of its own: inputs are
//! assumed pre-validated by the caller, negative discounts and taxes clamp
//! to zero, and a missing rate rule falls back to room defaults. The only
//! errors that surface are repository failures and a malformed date range.

use chrono::NaiveDate;

/// Engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("repository error: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wrap an error surfaced by a [`RateRepository`] implementation.
    ///
    /// [`RateRepository`]: crate::repository::RateRepository
    pub fn repository<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        EngineError::Repository(err.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
