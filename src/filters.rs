//! Rule applicability predicates.
//!
//! Pure functions with no side effects: identical inputs always yield
//! identical output. Checks run in a fixed order and short-circuit on the
//! first failure, replacing the persistence-level filtering the rule sets
//! were born with.

use chrono::{Datelike, NaiveDate};

use crate::models::{DaysOfWeek, PromoRule, RateRule, Room};

/// Date within the inclusive window and the day-of-week flag set.
pub(crate) fn window_allows(
    start: NaiveDate,
    end: NaiveDate,
    days: &DaysOfWeek,
    date: NaiveDate,
) -> bool {
    date >= start && date <= end && days.allows(date.weekday())
}

/// Room targeting: a room target is checked first; a room-type target is
/// only consulted when no room target is set. The two never combine.
pub(crate) fn target_allows(
    target_room: Option<uuid::Uuid>,
    target_room_type: Option<&str>,
    room: &Room,
) -> bool {
    if let Some(room_id) = target_room {
        return room_id == room.id;
    }
    if let Some(room_type) = target_room_type {
        return room_type == room.room_type;
    }
    true
}

/// Channel matching for rate rules, per-night promos and taxes: a declared
/// channel requires the caller channel to be present and equal
/// (case-sensitive); an undeclared channel matches any caller channel.
pub fn channel_allows(required: Option<&str>, caller: Option<&str>) -> bool {
    match required {
        Some(required) => caller == Some(required),
        None => true,
    }
}

/// Strict channel matching used by reservation-scope promos: a channel-less
/// promo only matches a channel-less request (case-sensitive otherwise).
pub fn channel_matches_strict(required: Option<&str>, caller: Option<&str>) -> bool {
    match (required, caller) {
        (None, None) => true,
        (Some(required), Some(caller)) => required == caller,
        _ => false,
    }
}

/// Strict code matching used by reservation-scope promos: a code-less promo
/// only matches a code-less request; codes compare case-insensitively.
pub fn code_matches_strict(required: Option<&str>, caller: Option<&str>) -> bool {
    match (required, caller) {
        (None, None) => true,
        (Some(required), Some(caller)) => required.eq_ignore_ascii_case(caller),
        _ => false,
    }
}

/// Full applicability check for a rate rule against a room, date and
/// caller channel. A closed rule never prices a night.
pub fn rate_rule_applies(
    rule: &RateRule,
    room: &Room,
    date: NaiveDate,
    channel: Option<&str>,
) -> bool {
    window_allows(rule.start_date, rule.end_date, &rule.days, date)
        && target_allows(rule.target_room, rule.target_room_type.as_deref(), room)
        && channel_allows(rule.channel.as_deref(), channel)
        && !rule.closed
}

/// Window, day-of-week, target and channel applicability for a promo rule.
/// Code, scope and plan checks belong to the promotion engine.
pub fn promo_applies(
    promo: &PromoRule,
    room: &Room,
    date: NaiveDate,
    channel: Option<&str>,
) -> bool {
    promo_window_allows(promo, date)
        && target_allows(promo.target_room, promo.target_room_type.as_deref(), room)
        && channel_allows(promo.channel.as_deref(), channel)
}

/// Window and day-of-week check only. The range prorator uses this to find
/// promos matching at least one night of a stay.
pub fn promo_window_allows(promo: &PromoRule, date: NaiveDate) -> bool {
    window_allows(promo.start_date, promo.end_date, &promo.days, date)
}

/// Room targeting check for a promo rule.
pub fn promo_targets_room(promo: &PromoRule, room: &Room) -> bool {
    target_allows(promo.target_room, promo.target_room_type.as_deref(), room)
}

/// Stay restrictions consumed by availability checks, not by the pricing
/// pipeline: min/max stay and closed-to-arrival/departure flags.
pub fn stay_restrictions_allow(
    rule: &RateRule,
    stay_nights: i32,
    is_arrival: bool,
    is_departure: bool,
) -> bool {
    if rule.closed {
        return false;
    }
    if is_arrival && rule.closed_to_arrival {
        return false;
    }
    if is_departure && rule.closed_to_departure {
        return false;
    }
    if rule.min_stay.is_some_and(|min| stay_nights < min) {
        return false;
    }
    if rule.max_stay.is_some_and(|max| stay_nights > max) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceMode, Room};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn room() -> Room {
        Room {
            id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            room_type: "double".to_string(),
            base_price: dec!(100.00),
            capacity: 2,
            max_capacity: 4,
            extra_guest_fee: dec!(20.00),
        }
    }

    fn rule() -> RateRule {
        RateRule {
            id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            days: Default::default(),
            target_room: None,
            target_room_type: None,
            channel: None,
            priority: 0,
            price_mode: PriceMode::Absolute,
            base_amount: None,
            extra_guest_fee_amount: None,
            min_stay: None,
            max_stay: None,
            closed: false,
            closed_to_arrival: false,
            closed_to_departure: false,
            occupancy_prices: vec![],
        }
    }

    fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
    }

    // ==================== window tests ====================

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let room = room();
        let rule = rule();
        assert!(rate_rule_applies(&rule, &room, july(1), None));
        assert!(rate_rule_applies(&rule, &room, july(31), None));
        assert!(!rate_rule_applies(
            &rule,
            &room,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            None
        ));
        assert!(!rate_rule_applies(
            &rule,
            &room,
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            None
        ));
    }

    #[test]
    fn test_day_of_week_flag_gates_the_date() {
        let room = room();
        let mut rule = rule();
        // 2026-07-04 is a Saturday
        rule.days.saturday = false;
        assert!(!rate_rule_applies(&rule, &room, july(4), None));
        assert!(rate_rule_applies(&rule, &room, july(5), None)); // Sunday
    }

    // ==================== target tests ====================

    #[test]
    fn test_target_room_must_equal_room_id() {
        let room = room();
        let mut rule = rule();
        rule.target_room = Some(room.id);
        assert!(rate_rule_applies(&rule, &room, july(10), None));

        rule.target_room = Some(Uuid::new_v4());
        assert!(!rate_rule_applies(&rule, &room, july(10), None));
    }

    #[test]
    fn test_target_room_type_only_consulted_without_room_target() {
        let room = room();
        let mut rule = rule();
        rule.target_room_type = Some("double".to_string());
        assert!(rate_rule_applies(&rule, &room, july(10), None));

        rule.target_room_type = Some("suite".to_string());
        assert!(!rate_rule_applies(&rule, &room, july(10), None));

        // A room target takes precedence over a non-matching room type.
        rule.target_room = Some(room.id);
        assert!(rate_rule_applies(&rule, &room, july(10), None));
    }

    // ==================== channel tests ====================

    #[test]
    fn test_channel_rule_never_matches_unspecified_caller_channel() {
        let room = room();
        let mut rule = rule();
        rule.channel = Some("web".to_string());
        assert!(!rate_rule_applies(&rule, &room, july(10), None));
        assert!(rate_rule_applies(&rule, &room, july(10), Some("web")));
        assert!(!rate_rule_applies(&rule, &room, july(10), Some("ota")));
        // Channel comparison is case-sensitive.
        assert!(!rate_rule_applies(&rule, &room, july(10), Some("WEB")));
    }

    #[test]
    fn test_channel_less_rule_matches_any_caller_channel() {
        let room = room();
        let rule = rule();
        assert!(rate_rule_applies(&rule, &room, july(10), None));
        assert!(rate_rule_applies(&rule, &room, july(10), Some("ota")));
    }

    #[test]
    fn test_strict_channel_matching_requires_null_on_both_sides() {
        assert!(channel_matches_strict(None, None));
        assert!(!channel_matches_strict(None, Some("web")));
        assert!(!channel_matches_strict(Some("web"), None));
        assert!(channel_matches_strict(Some("web"), Some("web")));
        assert!(!channel_matches_strict(Some("web"), Some("ota")));
        assert!(!channel_matches_strict(Some("web"), Some("WEB")));
    }

    #[test]
    fn test_strict_code_matching_is_case_insensitive() {
        assert!(code_matches_strict(None, None));
        assert!(!code_matches_strict(None, Some("STAY3")));
        assert!(!code_matches_strict(Some("STAY3"), None));
        assert!(code_matches_strict(Some("STAY3"), Some("stay3")));
        assert!(!code_matches_strict(Some("STAY3"), Some("stay4")));
    }

    // ==================== closed / stay restriction tests ====================

    #[test]
    fn test_closed_rule_never_applies() {
        let room = room();
        let mut rule = rule();
        rule.closed = true;
        assert!(!rate_rule_applies(&rule, &room, july(10), None));
    }

    #[test]
    fn test_stay_restrictions() {
        let mut rule = rule();
        rule.min_stay = Some(2);
        rule.max_stay = Some(7);

        assert!(!stay_restrictions_allow(&rule, 1, false, false));
        assert!(stay_restrictions_allow(&rule, 2, false, false));
        assert!(stay_restrictions_allow(&rule, 7, false, false));
        assert!(!stay_restrictions_allow(&rule, 8, false, false));

        rule.closed_to_arrival = true;
        assert!(!stay_restrictions_allow(&rule, 3, true, false));
        assert!(stay_restrictions_allow(&rule, 3, false, false));

        rule.closed_to_departure = true;
        assert!(!stay_restrictions_allow(&rule, 3, false, true));

        rule.closed = true;
        assert!(!stay_restrictions_allow(&rule, 3, false, false));
    }
}
