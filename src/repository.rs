//! Read-only access to pricing configuration.
//!
//! The engine never talks to a persistence layer directly. Callers hand it a
//! [`RateRepository`] that supplies the candidate rule sets for a hotel;
//! applicability is then evaluated in memory by the engine itself. The
//! caller's data-access layer owns timeout and retry behavior.

use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{PromoRule, RatePlan, TaxRule};

/// Supplier of candidate rule snapshots for one hotel.
///
/// Implementations may return inactive entries; the engine filters
/// `is_active` itself. Results are treated as immutable for the duration of
/// one computation.
pub trait RateRepository {
    /// Rate plans (with their nested rate rules) configured for a hotel.
    fn rate_plans(&self, hotel_id: Uuid) -> Result<Vec<RatePlan>, EngineError>;

    /// Promotion rules configured for a hotel.
    fn promo_rules(&self, hotel_id: Uuid) -> Result<Vec<PromoRule>, EngineError>;

    /// Tax rules configured for a hotel.
    fn tax_rules(&self, hotel_id: Uuid) -> Result<Vec<TaxRule>, EngineError>;
}

/// Repository over rule sets already resident in memory.
///
/// Embedders that pre-fetch configuration (and the test suite) use this
/// directly; entries for other hotels are filtered out on access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateRepository {
    pub plans: Vec<RatePlan>,
    pub promos: Vec<PromoRule>,
    pub taxes: Vec<TaxRule>,
}

impl RateRepository for InMemoryRateRepository {
    fn rate_plans(&self, hotel_id: Uuid) -> Result<Vec<RatePlan>, EngineError> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    fn promo_rules(&self, hotel_id: Uuid) -> Result<Vec<PromoRule>, EngineError> {
        Ok(self
            .promos
            .iter()
            .filter(|p| p.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    fn tax_rules(&self, hotel_id: Uuid) -> Result<Vec<TaxRule>, EngineError> {
        Ok(self
            .taxes
            .iter()
            .filter(|t| t.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_repository_filters_by_hotel() {
        let hotel_a = Uuid::new_v4();
        let hotel_b = Uuid::new_v4();

        let repo = InMemoryRateRepository {
            plans: vec![
                RatePlan {
                    id: Uuid::new_v4(),
                    hotel_id: hotel_a,
                    code: "BAR".to_string(),
                    name: "Best available".to_string(),
                    priority: 0,
                    is_active: true,
                    rules: vec![],
                },
                RatePlan {
                    id: Uuid::new_v4(),
                    hotel_id: hotel_b,
                    code: "BAR".to_string(),
                    name: "Best available".to_string(),
                    priority: 0,
                    is_active: true,
                    rules: vec![],
                },
            ],
            promos: vec![],
            taxes: vec![],
        };

        let plans = repo.rate_plans(hotel_a).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].hotel_id, hotel_a);
        assert!(repo.promo_rules(hotel_a).unwrap().is_empty());
        assert!(repo.tax_rules(hotel_a).unwrap().is_empty());
    }
}
