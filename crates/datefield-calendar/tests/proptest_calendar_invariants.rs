//! Property-based invariant tests for the calendar model.
//!
//! Verifies:
//! 1. Round trip: parse_complete(format(d)) == d for every date in 0001..=9999
//! 2. format always yields exactly ten characters with separators at 2 and 5
//! 3. auto_format_keystroke is idempotent
//! 4. auto_format_keystroke output is a prefix-shape of DD.MM.YYYY
//! 5. auto_format_keystroke keeps the first eight digits in order
//! 6. Grid: 42 cells, Monday start, consecutive days, first of month present
//! 7. Grid: in_current_month agrees with the view month
//! 8. Bounds: is_selectable matches the inclusive interval definition
//! 9. Month shifts clamp the day and land in the requested month
//! 10. parse_complete never panics on arbitrary input

use chrono::Weekday;
use datefield_calendar::codec::MAX_DIGITS;
use datefield_calendar::{
    Bounds, CalendarDate, DISPLAY_LEN, GRID_CELLS, ViewMonth, auto_format_keystroke,
    build_grid, format, is_selectable, parse_complete,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_window_date() -> impl Strategy<Value = CalendarDate> {
    (CalendarDate::EARLIEST.days_from_ce()..=CalendarDate::LATEST.days_from_ce())
        .prop_map(|n| CalendarDate::from_days_from_ce(n).unwrap())
}

fn arb_view_month() -> impl Strategy<Value = ViewMonth> {
    (1i32..=9999, 1u32..=12).prop_map(|(y, m)| ViewMonth::new(y, m).unwrap())
}

fn arb_typing() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => proptest::char::range('0', '9'),
            1 => Just('.'),
            1 => any::<char>(),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn is_display_prefix(text: &str) -> bool {
    text.len() <= DISPLAY_LEN
        && text.chars().enumerate().all(|(i, c)| {
            if i == 2 || i == 5 {
                c == '.'
            } else {
                c.is_ascii_digit()
            }
        })
        && !text.ends_with('.')
}

proptest! {
    #[test]
    fn format_parse_roundtrip(date in arb_window_date()) {
        prop_assert_eq!(parse_complete(&format(date)), Ok(date));
    }

    #[test]
    fn format_shape(date in arb_window_date()) {
        let text = format(date);
        prop_assert_eq!(text.len(), DISPLAY_LEN);
        prop_assert!(is_display_prefix(&text));
    }

    #[test]
    fn auto_format_idempotent(raw in arb_typing()) {
        let once = auto_format_keystroke(&raw);
        prop_assert_eq!(auto_format_keystroke(&once), once.clone());
    }

    #[test]
    fn auto_format_shape(raw in arb_typing()) {
        let out = auto_format_keystroke(&raw);
        prop_assert!(is_display_prefix(&out), "{:?} -> {:?}", raw, out);
    }

    #[test]
    fn auto_format_keeps_leading_digits(raw in arb_typing()) {
        let expected: String = raw.chars().filter(char::is_ascii_digit).take(MAX_DIGITS).collect();
        let kept: String = auto_format_keystroke(&raw).chars().filter(char::is_ascii_digit).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn grid_structure(view in arb_view_month()) {
        let grid = build_grid(view);
        prop_assert_eq!(grid.start().weekday(), Weekday::Mon);
        let cells: Vec<_> = grid.collect();
        prop_assert_eq!(cells.len(), GRID_CELLS);
        for pair in cells.windows(2) {
            prop_assert_eq!(pair[0].date.add_days(1), Some(pair[1].date));
        }
        prop_assert!(cells.iter().any(|c| c.date == view.first_day()));
        prop_assert!(cells.iter().any(|c| c.date == view.last_day()));
    }

    #[test]
    fn grid_membership(view in arb_view_month()) {
        let in_month = build_grid(view).filter(|c| c.in_current_month).count();
        prop_assert_eq!(in_month as u32, view.days_in_month());
        for cell in build_grid(view) {
            let same = cell.date.year() == view.year() && cell.date.month() == view.month();
            prop_assert_eq!(cell.in_current_month, same);
        }
    }

    #[test]
    fn bounds_match_interval(
        date in arb_window_date(),
        min in proptest::option::of(arb_window_date()),
        max in proptest::option::of(arb_window_date()),
    ) {
        let bounds = Bounds::new(min, max);
        let expected = min.is_none_or(|m| m <= date) && max.is_none_or(|m| date <= m);
        prop_assert_eq!(is_selectable(date, &bounds), expected);
    }

    #[test]
    fn month_shift_clamps(date in arb_window_date(), months in -24i32..=24) {
        if let Some(moved) = date.shift_months(months) {
            let target = date.view_month().shift_months(months).unwrap();
            prop_assert!(target.contains(moved));
            prop_assert_eq!(moved.day(), date.day().min(target.days_in_month()));
            prop_assert!(moved.in_text_window());
        } else {
            prop_assert!(date.view_month().shift_months(months).is_none());
        }
    }

    #[test]
    fn parse_never_panics(text in ".{0,16}") {
        let _ = parse_complete(&text);
    }
}
