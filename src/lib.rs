//! Rate & pricing rule engine for hotel room pricing.
//!
//! Given a room, a guest count, a calendar date (or date range), a sales
//! channel and an optional promotion code, the engine computes the exact
//! nightly price a guest owes: prioritized rate-rule resolution with
//! occupancy overrides, promotional discounts with combinability semantics,
//! tax, and proportional proration of reservation-level discounts across
//! multiple nights. All money math uses `rust_decimal` and rounds half-up
//! to two decimal places, so results are bit-exact and reproducible.
//!
//! Persistence, transport and configuration management live outside this
//! crate; rule sets arrive through the read-only [`RateRepository`] trait
//! and the engine evaluates applicability in memory. The engine never
//! mutates its inputs and holds no shared state.

pub mod calculators;
pub mod error;
pub mod filters;
pub mod models;
pub mod repository;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use error::EngineError;
pub use repository::{InMemoryRateRepository, RateRepository};
pub use responses::{AppliedPromo, AppliedTax, NightPricing, NightQuote};
pub use services::{compute_rate, compute_rate_range};
