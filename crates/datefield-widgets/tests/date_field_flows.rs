#![forbid(unsafe_code)]

//! End-to-end flows through the public `DateFieldState` API.

use std::cell::RefCell;
use std::rc::Rc;

use datefield_calendar::{CalendarDate, FixedClock, Locale, ViewMonth};
use datefield_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use datefield_core::geometry::Rect;
use datefield_render::frame::{Frame, HitId};
use datefield_widgets::{DateField, DateFieldConfig, DateFieldState, PointerHub, StatefulWidget};

type Log = Rc<RefCell<Vec<Option<CalendarDate>>>>;

fn d(y: i32, m: u32, day: u32) -> CalendarDate {
    CalendarDate::new(y, m, day).unwrap()
}

fn field(config: DateFieldConfig) -> (DateFieldState, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let state = DateFieldState::new(
        config
            .with_clock(FixedClock(d(2024, 1, 31)))
            .with_on_change(move |v| sink.borrow_mut().push(v)),
    );
    (state, log)
}

fn key(state: &mut DateFieldState, code: KeyCode) -> bool {
    state.handle_event(&Event::key(code))
}

fn type_str(state: &mut DateFieldState, text: &str) {
    for c in text.chars() {
        key(state, KeyCode::Char(c));
    }
}

fn left_down(x: u16, y: u16) -> MouseEvent {
    MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y)
}

#[test]
fn typing_a_full_date_notifies_once() {
    let (mut state, log) = field(DateFieldConfig::new());
    state.focus();
    type_str(&mut state, "01011990");
    assert_eq!(state.text(), "01.01.1990");
    assert_eq!(*log.borrow(), vec![Some(d(1990, 1, 1))]);
}

#[test]
fn blurring_partial_text_with_no_value_clears_silently() {
    let (mut state, log) = field(DateFieldConfig::new());
    state.focus();
    type_str(&mut state, "0101");
    assert_eq!(state.text(), "01.01");
    state.blur();
    assert_eq!(state.text(), "");
    assert_eq!(state.value(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn arrow_down_from_end_of_january() {
    let (mut state, _log) = field(DateFieldConfig::new().with_initial_value(Some(d(2024, 1, 31))));
    state.focus();
    state.open();
    assert_eq!(state.view_month(), ViewMonth::new(2024, 1));
    key(&mut state, KeyCode::Down);
    assert_eq!(state.focused_date(), Some(d(2024, 2, 7)));
    assert_eq!(state.view_month(), ViewMonth::new(2024, 2));
}

#[test]
fn page_keys_shift_month_and_year_with_clamping() {
    let (mut state, _log) = field(DateFieldConfig::new());
    state.focus();
    state.open();
    key(&mut state, KeyCode::PageDown);
    assert_eq!(state.focused_date(), Some(d(2024, 2, 29)));
    state.handle_event(&Event::Key(
        KeyEvent::new(KeyCode::PageDown).with_modifiers(Modifiers::SHIFT),
    ));
    assert_eq!(state.focused_date(), Some(d(2025, 2, 28)));
    key(&mut state, KeyCode::PageUp);
    assert_eq!(state.focused_date(), Some(d(2025, 1, 28)));
}

#[test]
fn bounds_block_selection() {
    let (mut state, log) = field(
        DateFieldConfig::new()
            .with_min_date(Some(d(2024, 1, 10)))
            .with_max_date(Some(d(2024, 1, 20))),
    );
    state.focus();
    state.open();
    // Today (31st) is past the max.
    key(&mut state, KeyCode::Enter);
    assert!(state.is_open());
    for _ in 0..11 {
        key(&mut state, KeyCode::Left);
    }
    assert_eq!(state.focused_date(), Some(d(2024, 1, 20)));
    key(&mut state, KeyCode::Enter);
    assert_eq!(*log.borrow(), vec![Some(d(2024, 1, 20))]);
    assert!(!state.is_open());
}

#[test]
fn typed_dates_outside_bounds_still_commit() {
    // Bounds restrict the picker only; typed text is reconciled by parsing.
    let (mut state, log) = field(DateFieldConfig::new().with_max_date(Some(d(2024, 1, 20))));
    state.focus();
    type_str(&mut state, "25012024");
    assert_eq!(*log.borrow(), vec![Some(d(2024, 1, 25))]);
}

#[test]
fn outside_pointer_down_closes_and_detaches() {
    let hub = PointerHub::new();
    let (mut state, _log) = field(
        DateFieldConfig::new()
            .with_pointer_hub(hub.clone())
            .with_hit_id(HitId::new(3)),
    );
    let mut frame = Frame::with_hit_grid(40, 12);
    state.open();
    DateField::new().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
    assert_eq!(hub.listener_count(), 1);

    let hit = frame.hit_test(35, 11);
    assert_eq!(hit, None);
    assert!(state.handle_mouse(&left_down(35, 11), hit));
    assert!(!state.is_open());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn clicks_inside_popup_keep_it_open() {
    let (mut state, _log) = field(DateFieldConfig::new().with_hit_id(HitId::new(3)));
    let mut frame = Frame::with_hit_grid(40, 12);
    state.open();
    DateField::new().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);

    // Between the month arrows and the title.
    let hit = frame.hit_test(2, 1);
    assert!(hit.is_some());
    assert!(state.handle_mouse(&left_down(2, 1), hit));
    assert!(state.is_open());

    // Next-month arrow.
    let hit = frame.hit_test(19, 1);
    state.handle_mouse(&left_down(19, 1), hit);
    assert_eq!(state.view_month(), ViewMonth::new(2024, 2));
    assert_eq!(state.focused_date(), Some(d(2024, 2, 29)));
}

#[test]
fn hub_routes_outside_pointer_to_listeners() {
    let hub = PointerHub::new();
    let (mut a, _) = field(DateFieldConfig::new().with_pointer_hub(hub.clone()));
    let (mut b, _) = field(DateFieldConfig::new().with_pointer_hub(hub.clone()));
    a.open();
    b.open();
    assert_eq!(hub.listener_count(), 2);

    for id in hub.listeners() {
        for state in [&mut a, &mut b] {
            if state.listener_id() == Some(id) {
                state.handle_outside_pointer();
            }
        }
    }
    assert!(!a.is_open());
    assert!(!b.is_open());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn repeated_open_close_cycles_do_not_leak() {
    let hub = PointerHub::new();
    let (mut state, _) = field(DateFieldConfig::new().with_pointer_hub(hub.clone()));
    state.focus();
    for _ in 0..50 {
        key(&mut state, KeyCode::F(4));
        key(&mut state, KeyCode::Escape);
    }
    for _ in 0..50 {
        state.toggle();
        state.toggle();
    }
    assert_eq!(hub.listener_count(), 0);
    drop(state);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn dropping_an_open_field_detaches() {
    let hub = PointerHub::new();
    let (mut state, _) = field(DateFieldConfig::new().with_pointer_hub(hub.clone()));
    state.open();
    drop(state);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn stale_caret_correction_is_never_applied() {
    let (mut state, _) = field(DateFieldConfig::new());
    state.focus();
    key(&mut state, KeyCode::Char('1'));
    let first = state.caret_generation();
    key(&mut state, KeyCode::Char('2'));
    key(&mut state, KeyCode::Char('3'));
    assert!(!state.resolve_caret(first));

    // The render applies the newest correction against the newest text.
    let mut frame = Frame::new(20, 1);
    DateField::new().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
    assert_eq!(state.text(), "12.3");
    assert_eq!(state.caret(), 4);
    assert_eq!(frame.cursor_position, Some((4, 0)));
}

#[test]
fn editing_in_the_middle_keeps_caret_after_typed_digit() {
    let (mut state, _) = field(DateFieldConfig::new());
    state.focus();
    type_str(&mut state, "0103");
    key(&mut state, KeyCode::Home);
    key(&mut state, KeyCode::Right);
    key(&mut state, KeyCode::Right);
    key(&mut state, KeyCode::Right);
    key(&mut state, KeyCode::Char('9'));
    state.apply_pending_caret();
    assert_eq!(state.text(), "01.90.3");
    assert_eq!(state.caret(), 4);
}

#[test]
fn disabled_field_is_inert() {
    let hub = PointerHub::new();
    let (mut state, log) = field(
        DateFieldConfig::new()
            .with_disabled(true)
            .with_pointer_hub(hub.clone())
            .with_initial_value(Some(d(2024, 5, 5))),
    );
    state.focus();
    assert!(!key(&mut state, KeyCode::Char('1')));
    assert!(!key(&mut state, KeyCode::F(4)));
    assert!(!state.open());
    assert!(!state.toggle());
    assert!(!state.handle_mouse(&left_down(0, 0), None));
    state.clear();
    state.blur();
    assert_eq!(state.text(), "05.05.2024");
    assert_eq!(state.value(), Some(d(2024, 5, 5)));
    assert!(log.borrow().is_empty());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn controlled_field_only_changes_through_set_value() {
    let (mut state, log) = field(DateFieldConfig::new().with_value(None));
    state.focus();
    type_str(&mut state, "24122024");
    assert_eq!(state.value(), None);
    assert_eq!(*log.borrow(), vec![Some(d(2024, 12, 24))]);

    state.blur();
    assert_eq!(state.value(), None);

    // Host accepts the edit.
    state.set_value(Some(d(2024, 12, 24)));
    assert_eq!(state.value(), Some(d(2024, 12, 24)));
    assert_eq!(state.text(), "24.12.2024");

    // Host rewrites the value; no notification.
    let before = log.borrow().len();
    state.set_value(Some(d(2000, 1, 1)));
    assert_eq!(state.text(), "01.01.2000");
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn auto_open_on_focus() {
    let (mut state, _) = field(DateFieldConfig::new().with_auto_open_on_focus(true));
    state.focus();
    assert!(state.is_open());
    state.blur();
    assert!(!state.is_open());
}

#[test]
fn locale_only_changes_labels() {
    let (mut state, _) = field(DateFieldConfig::new().with_locale(Locale::Fr));
    state.focus();
    type_str(&mut state, "14072024");
    assert_eq!(state.text(), "14.07.2024");
    state.open();

    let mut frame = Frame::new(30, 12);
    DateField::new().render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
    let title: String = frame.buffer.row_cells(1).iter().map(|c| c.content).collect();
    assert!(title.contains("juillet 2024"), "{title}");
    let footer: String = frame.buffer.row_cells(9).iter().map(|c| c.content).collect();
    assert!(footer.contains("Aujourd'hui"), "{footer}");
}
