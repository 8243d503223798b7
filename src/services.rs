//! Pricing operations over a rate repository.
//!
//! `compute_rate` prices a single night; `compute_rate_range` prices every
//! night of a stay and then distributes reservation-scoped promotions
//! proportionally across the nights. Rule sets are fetched once per call;
//! everything after the fetch is pure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calculators::{
    apply_night_promotions, apply_night_taxes, discount_amount, resolve_night_base, round_money,
    select_rate_rule,
};
use crate::error::EngineError;
use crate::filters::{channel_matches_strict, code_matches_strict, promo_targets_room, promo_window_allows};
use crate::models::{PromoRule, PromoScope, RatePlan, Room, TaxRule};
use crate::repository::RateRepository;
use crate::responses::{AppliedPromo, NightPricing, NightQuote};

/// Compute the price breakdown for one night.
///
/// Without a promo code no promotions are queried at all. Unknown rooms and
/// malformed inputs are the caller's responsibility; a night with no
/// matching rule falls back to the room's own price and fee.
pub fn compute_rate<R: RateRepository>(
    repo: &R,
    room: &Room,
    guests: i32,
    date: NaiveDate,
    channel: Option<&str>,
    promo_code: Option<&str>,
) -> Result<NightPricing, EngineError> {
    let plans = repo.rate_plans(room.hotel_id)?;
    let promos = if promo_code.is_some() {
        repo.promo_rules(room.hotel_id)?
    } else {
        Vec::new()
    };
    let taxes = repo.tax_rules(room.hotel_id)?;

    Ok(price_night(&plans, &promos, &taxes, room, guests, date, channel, promo_code).pricing)
}

/// Compute per-night price breakdowns for an inclusive date range,
/// applying reservation-scoped promotions proportionally across nights.
pub fn compute_rate_range<R: RateRepository>(
    repo: &R,
    room: &Room,
    guests: i32,
    start: NaiveDate,
    end: NaiveDate,
    channel: Option<&str>,
    promo_code: Option<&str>,
) -> Result<Vec<NightQuote>, EngineError> {
    if start > end {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let plans = repo.rate_plans(room.hotel_id)?;
    let promos = repo.promo_rules(room.hotel_id)?;
    let taxes = repo.tax_rules(room.hotel_id)?;

    let mut nights = Vec::new();
    let mut date = start;
    loop {
        nights.push((
            date,
            price_night(&plans, &promos, &taxes, room, guests, date, channel, promo_code),
        ));
        if date == end {
            break;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    apply_reservation_promos(&mut nights, &promos, room, channel, promo_code);

    Ok(nights
        .into_iter()
        .map(|(date, night)| NightQuote {
            date,
            pricing: night.pricing,
        })
        .collect())
}

/// One night's computation plus the context the range prorator needs.
struct NightComputation {
    pricing: NightPricing,
    matched_plan: Option<Uuid>,
    /// `max(base_rate + extra_guest_fee - discount, 0)` after the
    /// per-night pass.
    net_base: Decimal,
}

#[allow(clippy::too_many_arguments)]
fn price_night(
    plans: &[RatePlan],
    promos: &[PromoRule],
    taxes: &[TaxRule],
    room: &Room,
    guests: i32,
    date: NaiveDate,
    channel: Option<&str>,
    promo_code: Option<&str>,
) -> NightComputation {
    let guests = guests.max(1);

    let selected = select_rate_rule(plans, room, date, channel);
    let matched_plan = selected.map(|s| s.plan.id);

    let base = resolve_night_base(room, guests, selected.map(|s| s.rule));
    let subtotal = base.subtotal();

    let promo = apply_night_promotions(
        promos, room, date, channel, promo_code, matched_plan, subtotal,
    );

    let taxable_base = (subtotal - promo.discount).max(Decimal::ZERO);
    let taxed = apply_night_taxes(taxes, room.hotel_id, guests, channel, taxable_base);

    NightComputation {
        matched_plan,
        net_base: taxable_base,
        pricing: NightPricing {
            base_rate: base.base_rate,
            extra_guest_fee: base.extra_guest_fee,
            discount: promo.discount,
            tax: taxed.tax,
            total_night: round_money(taxable_base + taxed.tax, 2),
            applied_promos: promo.applied,
            applied_taxes: taxed.applied,
        },
    }
}

/// Distribute reservation-scoped promotions proportionally across nights.
///
/// Candidate promos match the hotel, use the strict null-vs-match rule for
/// both channel and code, target the room, satisfy their plan scope on at
/// least one night, and have a validity window/day-of-week matching at
/// least one night of the stay. The reservation-level discount is computed
/// against the sum of the nights' net bases, clamped to that sum, and each
/// night's share is rounded to 2 decimals independently - the rounding
/// remainder is not redistributed.
///
/// Per-night taxes are NOT recomputed against the newly discounted base;
/// each night keeps the tax from the per-night pass.
fn apply_reservation_promos(
    nights: &mut [(NaiveDate, NightComputation)],
    promos: &[PromoRule],
    room: &Room,
    channel: Option<&str>,
    promo_code: Option<&str>,
) {
    let total_base: Decimal = nights.iter().map(|(_, n)| n.net_base).sum();
    if total_base <= Decimal::ZERO {
        return;
    }

    let mut candidates: Vec<&PromoRule> = promos
        .iter()
        .filter(|p| {
            p.is_active
                && p.hotel_id == room.hotel_id
                && p.scope == PromoScope::PerReservation
                && channel_matches_strict(p.channel.as_deref(), channel)
                && code_matches_strict(p.code.as_deref(), promo_code)
                && promo_targets_room(p, room)
                && plan_scope_satisfied(p, nights)
                && nights.iter().any(|(date, _)| promo_window_allows(p, *date))
        })
        .collect();
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut total_discount = Decimal::ZERO;
    let mut applied: Vec<(&PromoRule, Decimal)> = Vec::new();
    for promo in candidates {
        let raw = discount_amount(promo.discount_type, promo.discount_value, total_base);
        // Never discount more than the remaining reservation base, so no
        // night's share can exceed its own net base.
        let amount = raw.min(total_base - total_discount);
        total_discount += amount;
        applied.push((promo, amount));
        debug!(promo = %promo.name, %amount, "reservation promo applied");

        if !promo.combinable && raw > Decimal::ZERO {
            break;
        }
    }

    if applied.is_empty() || total_discount.is_zero() {
        return;
    }

    for (_, night) in nights.iter_mut() {
        if night.net_base <= Decimal::ZERO {
            continue;
        }
        let ratio = night.net_base / total_base;
        let share = round_money(total_discount * ratio, 2);
        if share.is_zero() {
            continue;
        }

        night.pricing.discount += share;
        night.pricing.total_night =
            round_money((night.net_base - share).max(Decimal::ZERO) + night.pricing.tax, 2);

        for (promo, amount) in &applied {
            night.pricing.applied_promos.push(AppliedPromo {
                id: promo.id,
                name: promo.name.clone(),
                code: promo.code.clone(),
                discount_type: promo.discount_type,
                discount_value: promo.discount_value,
                amount: round_money(*amount * ratio, 2),
                scope: PromoScope::PerReservation,
            });
        }
    }
}

fn plan_scope_satisfied(promo: &PromoRule, nights: &[(NaiveDate, NightComputation)]) -> bool {
    match promo.rate_plan_id {
        Some(plan_id) => nights
            .iter()
            .any(|(_, n)| n.matched_plan == Some(plan_id)),
        None => true,
    }
}
