//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no repository access. Rule selection,
//! nightly base resolution, promotion discounts and taxes all live here;
//! orchestration and range proration live in [`crate::services`].

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::filters::{channel_allows, promo_applies, rate_rule_applies};
use crate::models::{
    DiscountType, PriceMode, PromoRule, PromoScope, RatePlan, RateRule, Room, TaxAmountType,
    TaxRule, TaxScope,
};
use crate::responses::{AppliedPromo, AppliedTax};

/// Round to specified decimal places using round-half-up
/// (ROUND_HALF_UP, away from zero at the midpoint).
///
/// All monetary outputs of the engine pass through this, so identical
/// inputs always produce bit-identical results.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use roomrate_engine::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Rate rule picked by the selector, together with the plan it came from.
#[derive(Debug, Clone, Copy)]
pub struct SelectedRule<'a> {
    pub plan: &'a RatePlan,
    pub rule: &'a RateRule,
}

/// Select the rate rule pricing a night: first match wins, never a merge.
///
/// Active plans are visited in `(priority desc, id asc)` order; rules within
/// a plan in `priority desc` order (the sort is stable, so equal priorities
/// keep their stored order). A lower-priority rule is never consulted once a
/// higher-priority one matches. Returns `None` when nothing matches and the
/// caller falls back to room defaults.
pub fn select_rate_rule<'a>(
    plans: &'a [RatePlan],
    room: &Room,
    date: NaiveDate,
    channel: Option<&str>,
) -> Option<SelectedRule<'a>> {
    let mut ordered: Vec<&RatePlan> = plans
        .iter()
        .filter(|p| p.is_active && p.hotel_id == room.hotel_id)
        .collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));

    for plan in ordered {
        let mut rules: Vec<&RateRule> = plan.rules.iter().collect();
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));

        for rule in rules {
            if rate_rule_applies(rule, room, date, channel) {
                debug!(plan = %plan.code, rule = %rule.id, %date, "rate rule matched");
                return Some(SelectedRule { plan, rule });
            }
        }
    }

    None
}

/// Resolved nightly base before promotions and tax.
#[derive(Debug, Clone)]
pub struct NightBase {
    pub base_rate: Decimal,
    pub extra_guest_fee: Decimal,
    /// An exact occupancy price matched; the generic extra-guest fee is
    /// suppressed for all downstream steps.
    pub occupancy_override: bool,
}

impl NightBase {
    pub fn subtotal(&self) -> Decimal {
        self.base_rate + self.extra_guest_fee
    }
}

/// Resolve the nightly base rate and extra-guest fee.
///
/// Resolution order: exact occupancy price on the matched rule, then the
/// rule's `base_amount` (absolute or delta over the room base price), then
/// the room base price. Guest counts below 1 clamp up to 1.
pub fn resolve_night_base(room: &Room, guests: i32, rule: Option<&RateRule>) -> NightBase {
    let guests = guests.max(1);
    let extra_guests = (guests - room.capacity).max(0);

    if let Some(rule) = rule {
        if let Some(price) = rule.occupancy_price_for(guests) {
            return NightBase {
                base_rate: round_money(price, 2),
                extra_guest_fee: Decimal::ZERO,
                occupancy_override: true,
            };
        }
    }

    let base_rate = match rule.and_then(|r| r.base_amount.map(|amount| (r.price_mode, amount))) {
        Some((PriceMode::Absolute, amount)) => amount,
        Some((PriceMode::Delta, amount)) => room.base_price + amount,
        None => room.base_price,
    };

    let fee_per_guest = rule
        .and_then(|r| r.extra_guest_fee_amount)
        .unwrap_or(room.extra_guest_fee);
    let extra_guest_fee = fee_per_guest * Decimal::from(extra_guests);

    NightBase {
        base_rate: round_money(base_rate, 2),
        extra_guest_fee: round_money(extra_guest_fee, 2),
        occupancy_override: false,
    }
}

/// Discount amount for one promo row against a base amount. Negative
/// results clamp to zero.
pub(crate) fn discount_amount(
    discount_type: DiscountType,
    discount_value: Decimal,
    base: Decimal,
) -> Decimal {
    let amount = match discount_type {
        DiscountType::Percent => round_money(base * discount_value / Decimal::ONE_HUNDRED, 2),
        DiscountType::Fixed => round_money(discount_value, 2),
    };
    amount.max(Decimal::ZERO)
}

/// Accumulated promotion outcome for one night.
#[derive(Debug, Clone, Default)]
pub struct PromoOutcome {
    pub discount: Decimal,
    pub applied: Vec<AppliedPromo>,
}

/// Apply per-night promotions to a night's subtotal.
///
/// Without a promo code no promotions are considered at all. Candidates are
/// active per-night promos of the room's hotel whose code matches the
/// request case-insensitively, visited in `priority desc` order; each must
/// also pass the window/day/target/channel filter and, when plan-scoped,
/// match the plan of the selected rate rule. A non-combinable promo stops
/// the loop after the first non-zero discount.
pub fn apply_night_promotions(
    promos: &[PromoRule],
    room: &Room,
    date: NaiveDate,
    channel: Option<&str>,
    promo_code: Option<&str>,
    matched_plan: Option<Uuid>,
    subtotal: Decimal,
) -> PromoOutcome {
    let Some(code) = promo_code else {
        return PromoOutcome::default();
    };

    let mut candidates: Vec<&PromoRule> = promos
        .iter()
        .filter(|p| {
            p.is_active
                && p.hotel_id == room.hotel_id
                && p.scope == PromoScope::PerNight
                && p.code_matches(code)
        })
        .collect();
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut outcome = PromoOutcome::default();
    for promo in candidates {
        if !promo_applies(promo, room, date, channel) {
            continue;
        }
        if let Some(plan_id) = promo.rate_plan_id {
            if matched_plan != Some(plan_id) {
                continue;
            }
        }

        let amount = discount_amount(promo.discount_type, promo.discount_value, subtotal);
        outcome.discount += amount;
        outcome.applied.push(AppliedPromo {
            id: promo.id,
            name: promo.name.clone(),
            code: promo.code.clone(),
            discount_type: promo.discount_type,
            discount_value: promo.discount_value,
            amount,
            scope: PromoScope::PerNight,
        });
        debug!(promo = %promo.name, %amount, %date, "per-night promo applied");

        if !promo.combinable && amount > Decimal::ZERO {
            break;
        }
    }

    outcome
}

/// Accumulated tax outcome for one night.
#[derive(Debug, Clone, Default)]
pub struct TaxOutcome {
    pub tax: Decimal,
    pub applied: Vec<AppliedTax>,
}

/// Apply all active matching taxes to a night's taxable base.
///
/// Every matching tax is summed; `priority desc` only fixes the audit trail
/// order. Reservation-scoped fixed taxes contribute nothing to a nightly
/// pass. Zero rows are not recorded.
pub fn apply_night_taxes(
    taxes: &[TaxRule],
    hotel_id: Uuid,
    guests: i32,
    channel: Option<&str>,
    taxable_base: Decimal,
) -> TaxOutcome {
    let guests = guests.max(1);

    let mut ordered: Vec<&TaxRule> = taxes
        .iter()
        .filter(|t| t.is_active && t.hotel_id == hotel_id)
        .collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut outcome = TaxOutcome::default();
    for tax in ordered {
        if !channel_allows(tax.channel.as_deref(), channel) {
            continue;
        }

        let amount = match tax.amount_type {
            TaxAmountType::Percent => {
                round_money(taxable_base * tax.percent / Decimal::ONE_HUNDRED, 2)
            }
            TaxAmountType::Fixed => match tax.scope {
                TaxScope::PerNight => round_money(tax.fixed_amount, 2),
                TaxScope::PerGuestPerNight => {
                    round_money(tax.fixed_amount * Decimal::from(guests), 2)
                }
                // Reservation-level, not a nightly charge.
                TaxScope::PerReservation => Decimal::ZERO,
            },
        };
        let amount = amount.max(Decimal::ZERO);
        if amount.is_zero() {
            continue;
        }

        outcome.tax += amount;
        outcome.applied.push(AppliedTax {
            id: tax.id,
            name: tax.name.clone(),
            amount_type: tax.amount_type,
            scope: tax.scope,
            amount,
        });
    }

    outcome
}
