//! Property-based invariant tests for picker navigation and editing.
//!
//! Verifies:
//! 1. After any action sequence the focused date lies inside the view month
//! 2. Focus never leaves the 0001-9999 window, even when hammering the edges
//! 3. Commit outcomes only ever carry selectable dates
//! 4. A pointer subscription is held exactly while the picker is open
//! 5. Text stays a prefix of DD.MM.YYYY under arbitrary key input
//! 6. A controlled field never changes its own value
//! 7. A disabled field ignores every key

use datefield_calendar::{Bounds, CalendarDate, FixedClock, is_selectable};
use datefield_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use datefield_widgets::date_field::navigation::{NavAction, NavOutcome, OpenState};
use datefield_widgets::{DateFieldConfig, DateFieldState, PointerHub};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (CalendarDate::EARLIEST.days_from_ce()..=CalendarDate::LATEST.days_from_ce())
        .prop_map(|n| CalendarDate::from_days_from_ce(n).unwrap())
}

fn arb_edge_date() -> impl Strategy<Value = CalendarDate> {
    prop_oneof![
        (0i64..60).prop_map(|n| CalendarDate::EARLIEST.add_days(n).unwrap()),
        (0i64..60).prop_map(|n| CalendarDate::LATEST.add_days(-n).unwrap()),
    ]
}

fn arb_action() -> impl Strategy<Value = NavAction> {
    prop_oneof![
        (-40i64..=40).prop_map(NavAction::MoveDays),
        Just(NavAction::WeekStart),
        Just(NavAction::WeekEnd),
        (-30i32..=30).prop_map(NavAction::ShiftMonths),
        (-5i32..=5).prop_map(NavAction::ShiftYears),
        Just(NavAction::FocusToday),
        arb_date().prop_map(NavAction::FocusDate),
        Just(NavAction::Commit),
    ]
}

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (prop::option::of(arb_date()), prop::option::of(arb_date()))
        .prop_map(|(min, max)| Bounds::new(min, max))
}

fn arb_key() -> impl Strategy<Value = KeyEvent> {
    let code = prop_oneof![
        6 => proptest::char::range('0', '9').prop_map(KeyCode::Char),
        1 => any::<char>().prop_map(KeyCode::Char),
        2 => Just(KeyCode::Backspace),
        1 => Just(KeyCode::Delete),
        1 => Just(KeyCode::Left),
        1 => Just(KeyCode::Right),
        1 => Just(KeyCode::Up),
        1 => Just(KeyCode::Down),
        1 => Just(KeyCode::Home),
        1 => Just(KeyCode::End),
        1 => Just(KeyCode::PageUp),
        1 => Just(KeyCode::PageDown),
        1 => Just(KeyCode::Enter),
        1 => Just(KeyCode::Escape),
        1 => Just(KeyCode::F(4)),
    ];
    let modifiers = prop_oneof![
        8 => Just(Modifiers::NONE),
        1 => Just(Modifiers::SHIFT),
        1 => Just(Modifiers::ALT),
    ];
    (code, modifiers).prop_map(|(code, m)| KeyEvent::new(code).with_modifiers(m))
}

fn is_display_prefix(text: &str) -> bool {
    text.len() <= 10
        && text.chars().enumerate().all(|(i, c)| {
            if i == 2 || i == 5 {
                c == '.'
            } else {
                c.is_ascii_digit()
            }
        })
        && !text.ends_with('.')
}

fn today() -> CalendarDate {
    CalendarDate::new(2024, 1, 31).unwrap()
}

proptest! {
    #[test]
    fn focus_stays_in_view(
        start in arb_date(),
        actions in prop::collection::vec(arb_action(), 0..40),
    ) {
        let mut state = OpenState::opened(Some(start), today());
        for action in actions {
            state.apply(action, &Bounds::default(), today());
            prop_assert!(state.is_open());
            let view = state.view().unwrap();
            let focused = state.focused().unwrap();
            prop_assert!(view.contains(focused), "{focused:?} outside {view}");
        }
    }

    #[test]
    fn focus_stays_in_window_at_edges(
        start in arb_edge_date(),
        actions in prop::collection::vec(arb_action(), 0..60),
    ) {
        let mut state = OpenState::opened(Some(start), today());
        for action in actions {
            state.apply(action, &Bounds::default(), today());
            let focused = state.focused().unwrap();
            prop_assert!(focused.in_text_window());
        }
    }

    #[test]
    fn commits_are_selectable(
        start in arb_date(),
        bounds in arb_bounds(),
        actions in prop::collection::vec(arb_action(), 0..30),
    ) {
        let mut state = OpenState::opened(Some(start), today());
        for action in actions {
            if let NavOutcome::Commit(date) = state.apply(action, &bounds, today()) {
                prop_assert!(is_selectable(date, &bounds));
            }
        }
    }

    #[test]
    fn subscription_held_exactly_while_open(
        keys in prop::collection::vec(arb_key(), 0..80),
    ) {
        let hub = PointerHub::new();
        let mut state = DateFieldState::new(
            DateFieldConfig::new()
                .with_clock(FixedClock(today()))
                .with_pointer_hub(hub.clone()),
        );
        state.focus();
        for key in keys {
            state.handle_event(&Event::Key(key));
            prop_assert_eq!(hub.listener_count(), usize::from(state.is_open()));
            prop_assert_eq!(state.listener_id().is_some(), state.is_open());
        }
    }

    #[test]
    fn text_keeps_display_shape(
        keys in prop::collection::vec(arb_key(), 0..80),
    ) {
        let mut state = DateFieldState::new(
            DateFieldConfig::new().with_clock(FixedClock(today())),
        );
        state.focus();
        for key in keys {
            state.handle_event(&Event::Key(key));
            prop_assert!(is_display_prefix(state.text()), "{:?}", state.text());
            state.apply_pending_caret();
            prop_assert!(state.caret() <= state.text().chars().count());
        }
    }

    #[test]
    fn controlled_value_is_stable(
        initial in prop::option::of(arb_date()),
        keys in prop::collection::vec(arb_key(), 0..80),
    ) {
        let mut state = DateFieldState::new(
            DateFieldConfig::new()
                .with_clock(FixedClock(today()))
                .with_value(initial),
        );
        state.focus();
        for key in keys {
            state.handle_event(&Event::Key(key));
            prop_assert_eq!(state.value(), initial);
        }
        state.blur();
        prop_assert_eq!(state.value(), initial);
    }

    #[test]
    fn disabled_ignores_keys(
        initial in prop::option::of(arb_date()),
        keys in prop::collection::vec(arb_key(), 0..40),
    ) {
        let mut state = DateFieldState::new(
            DateFieldConfig::new()
                .with_clock(FixedClock(today()))
                .with_initial_value(initial)
                .with_disabled(true),
        );
        let text = state.text().to_string();
        state.focus();
        for key in keys {
            prop_assert!(!state.handle_event(&Event::Key(key)));
        }
        prop_assert_eq!(state.text(), text.as_str());
        prop_assert_eq!(state.value(), initial);
        prop_assert!(!state.is_open());
    }
}
