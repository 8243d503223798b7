//! Output DTOs for pricing computations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DiscountType, PromoScope, TaxAmountType, TaxScope};

/// Audit entry for one applied promotion.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedPromo {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub scope: PromoScope,
}

/// Audit entry for one applied tax.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedTax {
    pub id: Uuid,
    pub name: String,
    pub amount_type: TaxAmountType,
    pub scope: TaxScope,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Full price breakdown for one night.
///
/// `total_night = max(base_rate + extra_guest_fee - discount, 0) + tax`.
#[derive(Debug, Clone, Serialize)]
pub struct NightPricing {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_guest_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_night: Decimal,
    pub applied_promos: Vec<AppliedPromo>,
    pub applied_taxes: Vec<AppliedTax>,
}

/// One night of a multi-night preview.
#[derive(Debug, Clone, Serialize)]
pub struct NightQuote {
    pub date: NaiveDate,
    pub pricing: NightPricing,
}
