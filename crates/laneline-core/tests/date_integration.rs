//! Round-trip properties of the day-number date model.

use chrono::NaiveDate;
use laneline_core::date::representable_days;
use laneline_core::{from_day_number, to_day_number};
use proptest::prelude::*;

proptest! {
    #[test]
    fn day_number_round_trips(day in representable_days()) {
        let ymd = from_day_number(day).unwrap();
        prop_assert_eq!(to_day_number(ymd.as_str()).unwrap(), day);
    }

    #[test]
    fn ymd_string_round_trips(year in 1i32..=9999, ordinal in 1u32..=365) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let ymd = date.format("%Y-%m-%d").to_string();
        let day = to_day_number(ymd.as_str()).unwrap();
        prop_assert_eq!(from_day_number(day).unwrap(), ymd);
        prop_assert_eq!(to_day_number(date).unwrap(), day);
    }

    #[test]
    fn consecutive_days_differ_by_one(day in -1_000_000i64..1_000_000) {
        let today = to_day_number(from_day_number(day).unwrap().as_str()).unwrap();
        let tomorrow = to_day_number(from_day_number(day + 1).unwrap().as_str()).unwrap();
        prop_assert_eq!(tomorrow - today, 1);
    }

    #[test]
    fn garbage_never_parses_silently(s in "[0-9a-z-]{0,12}") {
        if let Ok(day) = to_day_number(s.as_str()) {
            // Anything accepted must be canonical modulo zero padding.
            let canonical = from_day_number(day).unwrap();
            prop_assert_eq!(to_day_number(canonical.as_str()).unwrap(), day);
            prop_assert!(s.bytes().all(|b| b.is_ascii_digit() || b == b'-'));
        }
    }
}

#[test]
fn year_boundaries() {
    let dec31 = to_day_number("2023-12-31").unwrap();
    let jan1 = to_day_number("2024-01-01").unwrap();
    assert_eq!(jan1 - dec31, 1);
    assert_eq!(from_day_number(jan1 - 1).unwrap(), "2023-12-31");
}
