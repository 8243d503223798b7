//! Domain snapshots consumed by the pricing engine.
//!
//! All entities are created and edited by out-of-scope administrative flows;
//! the engine reads immutable snapshots for the duration of one computation
//! and never mutates them.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room descriptor supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub base_price: Decimal,
    /// Guests included in the base price.
    pub capacity: i32,
    pub max_capacity: i32,
    /// Nightly fee charged per guest above `capacity`.
    pub extra_guest_fee: Decimal,
}

/// Seven day-of-week applicability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysOfWeek {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl DaysOfWeek {
    pub const ALL: DaysOfWeek = DaysOfWeek {
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: true,
        sunday: true,
    };

    /// Check whether the flag for the given weekday is set.
    pub fn allows(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

impl Default for DaysOfWeek {
    fn default() -> Self {
        Self::ALL
    }
}

/// How a rate rule's `base_amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceMode {
    /// `base_amount` is the nightly rate.
    Absolute,
    /// `base_amount` is added to the room's base price.
    Delta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoScope {
    PerNight,
    PerReservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxAmountType {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxScope {
    PerNight,
    PerReservation,
    PerGuestPerNight,
}

/// Pricing plan grouping rate rules for a hotel.
///
/// `(hotel, code)` is unique; the administrative flows own that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePlan {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub code: String,
    pub name: String,
    /// Higher wins during rule selection.
    pub priority: i32,
    pub is_active: bool,
    #[serde(default)]
    pub rules: Vec<RateRule>,
}

/// Rule carrying the actual price logic for a date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRule {
    pub id: Uuid,
    /// Inclusive validity window.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: DaysOfWeek,
    /// Narrows the rule to one room. Checked before `target_room_type`,
    /// never combined with it.
    #[serde(default)]
    pub target_room: Option<Uuid>,
    #[serde(default)]
    pub target_room_type: Option<String>,
    /// Sales channel this rule is restricted to (case-sensitive).
    #[serde(default)]
    pub channel: Option<String>,
    pub priority: i32,
    pub price_mode: PriceMode,
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Overrides the room's extra-guest fee when present.
    #[serde(default)]
    pub extra_guest_fee_amount: Option<Decimal>,
    #[serde(default)]
    pub min_stay: Option<i32>,
    #[serde(default)]
    pub max_stay: Option<i32>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub closed_to_arrival: bool,
    #[serde(default)]
    pub closed_to_departure: bool,
    #[serde(default)]
    pub occupancy_prices: Vec<RateOccupancyPrice>,
}

impl RateRule {
    /// Exact occupancy override for the given guest count, if configured.
    pub fn occupancy_price_for(&self, guests: i32) -> Option<Decimal> {
        self.occupancy_prices
            .iter()
            .find(|p| p.occupancy == guests)
            .map(|p| p.price)
    }
}

/// Absolute nightly price for an exact guest count, unique per
/// `(rule, occupancy)`. An exact match replaces base + extra-guest math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateOccupancyPrice {
    pub occupancy: i32,
    pub price: Decimal,
}

/// Promotional discount rule for a hotel, optionally scoped to a rate plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoRule {
    pub id: Uuid,
    pub hotel_id: Uuid,
    #[serde(default)]
    pub rate_plan_id: Option<Uuid>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: DaysOfWeek,
    #[serde(default)]
    pub target_room: Option<Uuid>,
    #[serde(default)]
    pub target_room_type: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    /// Promotion code, compared case-insensitively.
    #[serde(default)]
    pub code: Option<String>,
    pub priority: i32,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub scope: PromoScope,
    /// When false the promotion loop stops after this discount applies.
    pub combinable: bool,
    pub is_active: bool,
}

impl PromoRule {
    /// Case-insensitive exact code comparison. A code-less promo never
    /// matches a coded request.
    pub fn code_matches(&self, code: &str) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(code))
    }
}

/// Tax rule for a hotel. All active matching taxes are applied and summed;
/// `priority` only fixes evaluation order for a reproducible audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRule {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    pub amount_type: TaxAmountType,
    #[serde(default)]
    pub percent: Decimal,
    #[serde(default)]
    pub fixed_amount: Decimal,
    pub scope: TaxScope,
    #[serde(default)]
    pub channel: Option<String>,
    pub priority: i32,
    pub is_active: bool,
}
