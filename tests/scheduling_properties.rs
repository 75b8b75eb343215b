//! Property tests for the time model, pricing and the availability scheduler

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use cinemadb::core::round_cents;
use cinemadb::core::time::{compute_end_time, intervals_overlap_with_buffer, round_up_to_5_minutes};
use cinemadb::models::{DiscountKind, DiscountPolicy, Showtime};
use cinemadb::storage::codec::{format_row, split_line};
use cinemadb::{SchedulingConfig, Slot, available_auditoriums};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 6, 5)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn showtime(id: usize, auditorium: &str, start_minute: i64, length: i64) -> Showtime {
    let slot = Slot::for_runtime(
        base().date(),
        (base() + Duration::minutes(start_minute)).time(),
        length,
    );
    Showtime {
        id: format!("ST{:04}", id),
        movie_id: "M0001".into(),
        auditorium_id: auditorium.into(),
        date: slot.date(),
        start_time: slot.start_time(),
        end_time: slot.end_time(),
        normal_price: 15.0,
        discounted_price: None,
        discount_id: None,
    }
}

proptest! {
    #[test]
    fn prop_round_up_lands_on_grid(minutes in 0i64..(48 * 60), seconds in 0u32..60) {
        let t = base() + Duration::minutes(minutes) + Duration::seconds(i64::from(seconds));
        let rounded = round_up_to_5_minutes(t);
        prop_assert_eq!(rounded.minute() % 5, 0);
        prop_assert_eq!(rounded.second(), 0);
        prop_assert!(rounded >= t.with_second(0).unwrap());
        prop_assert!(rounded - t < Duration::minutes(5));
        prop_assert_eq!(round_up_to_5_minutes(rounded), rounded);
    }

    #[test]
    fn prop_end_time_is_never_before_raw_end(start in 0u32..(24 * 60), duration in 1i64..500) {
        let start = NaiveTime::from_hms_opt(start / 60, start % 60, 0).unwrap();
        let end = compute_end_time(start, duration);
        prop_assert_eq!(end.minute() % 5, 0);
        let raw = (base().date().and_time(start) + Duration::minutes(duration)).time();
        let gap = (end - raw).num_minutes().rem_euclid(24 * 60);
        prop_assert!(gap < 5);
    }

    #[test]
    fn prop_overlap_is_symmetric(
        a in 0i64..1000, a_len in 0i64..300,
        b in 0i64..1000, b_len in 0i64..300,
        buffer in 0i64..60,
    ) {
        prop_assert_eq!(
            intervals_overlap_with_buffer(a, a + a_len, b, b + b_len, buffer),
            intervals_overlap_with_buffer(b, b + b_len, a, a + a_len, buffer)
        );
    }

    #[test]
    fn prop_identical_slots_always_overlap(a in 0i64..1000, len in 0i64..300, buffer in 0i64..60) {
        prop_assert!(intervals_overlap_with_buffer(a, a + len, a, a + len, buffer));
    }

    #[test]
    fn prop_round_cents_is_stable(amount in 0.0f64..100_000.0) {
        let once = round_cents(amount);
        prop_assert_eq!(round_cents(once), once);
        prop_assert!((once - amount).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn prop_discount_never_negative_or_above_price(
        price in 0.0f64..500.0,
        amount in 0.0f64..600.0,
        rate in 0.0f64..=1.0,
    ) {
        for kind in [DiscountKind::fixed(amount).unwrap(), DiscountKind::percentage(rate).unwrap()] {
            let policy = DiscountPolicy {
                id: "D01".into(),
                name: "Any".into(),
                kind,
                policy_text: String::new(),
            };
            let discounted = policy.apply(price);
            prop_assert!(discounted >= 0.0);
            prop_assert!(discounted <= round_cents(price) + 0.005);
        }
    }

    #[test]
    fn prop_split_line_recovers_linted_fields(fields in prop::collection::vec("[A-Za-z0-9 ,.;|\"-]{0,12}", 1..8)) {
        let line = format_row(&fields);
        let expected: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();
        prop_assert_eq!(split_line(&line), expected);
    }

    #[test]
    fn prop_scheduler_keeps_configured_order(
        existing in prop::collection::vec((1usize..=8, 0i64..1200, 30i64..240), 0..12),
        start in 0i64..1200,
        length in 30i64..240,
    ) {
        let config = SchedulingConfig::default();
        let showtimes: Vec<Showtime> = existing
            .iter()
            .enumerate()
            .map(|(i, (aud, s, len))| showtime(i + 1, &format!("AUD{:02}", aud), *s, *len))
            .collect();
        let slot = Slot::for_runtime(
            base().date(),
            (base() + Duration::minutes(start)).time(),
            length,
        );

        let free = available_auditoriums(&slot, None, &showtimes, &[], &config);

        let positions: Vec<usize> = free
            .iter()
            .map(|id| config.auditorium_ids.iter().position(|c| c == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for showtime in &showtimes {
            if slot.overlaps(&showtime.slot(), config.buffer()) {
                prop_assert!(!free.contains(&showtime.auditorium_id));
            }
        }
    }
}
