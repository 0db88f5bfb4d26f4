#![forbid(unsafe_code)]

//! Picker open/closed state and keyboard navigation.
//!
//! The viewed month and focused day only exist while the picker is open,
//! so they live inside [`OpenState::Open`]. Every move keeps the focused
//! date inside the viewed month: when focus leaves the month, the view
//! follows it. Moves that would leave years 0001-9999 are ignored.

use datefield_calendar::{Bounds, CalendarDate, ViewMonth, is_selectable};
use datefield_core::event::{KeyCode, KeyEvent};

/// Whether the calendar picker is showing, and what it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Open {
        /// Month displayed by the grid.
        view: ViewMonth,
        /// Day reachable by the keyboard. Always inside `view`.
        focused: CalendarDate,
    },
}

/// A navigation request, from a key or a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Move focus by whole days.
    MoveDays(i64),
    /// Focus Monday of the focused week.
    WeekStart,
    /// Focus Sunday of the focused week.
    WeekEnd,
    /// Shift the view by whole months, keeping the day-of-month.
    ShiftMonths(i32),
    /// Shift the view by whole years, keeping the day-of-month.
    ShiftYears(i32),
    /// Focus today.
    FocusToday,
    /// Focus a specific date.
    FocusDate(CalendarDate),
    /// Commit the focused date.
    Commit,
    /// Close without committing.
    Close,
}

/// Result of applying a [`NavAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing changed.
    Unchanged,
    /// View or focus moved.
    Moved,
    /// The focused date should become the value. The state is still open;
    /// the caller commits and closes.
    Commit(CalendarDate),
    /// Commit requested on a date the bounds reject.
    Rejected(CalendarDate),
    /// The picker closed.
    Closed,
}

fn window_clamp(date: CalendarDate) -> CalendarDate {
    date.clamp(CalendarDate::EARLIEST, CalendarDate::LATEST)
}

impl OpenState {
    /// State on entering `Open`.
    ///
    /// Focus starts on `anchor` (the current value) when it lies in the
    /// text window, else on `today`.
    #[must_use]
    pub fn opened(anchor: Option<CalendarDate>, today: CalendarDate) -> Self {
        let focused = anchor
            .filter(|d| d.in_text_window())
            .unwrap_or_else(|| window_clamp(today));
        Self::Open {
            view: ViewMonth::containing(focused),
            focused,
        }
    }

    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    #[inline]
    pub const fn view(&self) -> Option<ViewMonth> {
        match *self {
            Self::Open { view, .. } => Some(view),
            Self::Closed => None,
        }
    }

    #[inline]
    pub const fn focused(&self) -> Option<CalendarDate> {
        match *self {
            Self::Open { focused, .. } => Some(focused),
            Self::Closed => None,
        }
    }

    /// Apply `action`. A closed state ignores everything.
    pub fn apply(&mut self, action: NavAction, bounds: &Bounds, today: CalendarDate) -> NavOutcome {
        let Self::Open { view, focused } = *self else {
            return NavOutcome::Unchanged;
        };

        let target = match action {
            NavAction::Close => {
                *self = Self::Closed;
                return NavOutcome::Closed;
            }
            NavAction::Commit => {
                return if focused.in_text_window() && is_selectable(focused, bounds) {
                    NavOutcome::Commit(focused)
                } else {
                    NavOutcome::Rejected(focused)
                };
            }
            NavAction::ShiftMonths(months) => {
                return self.shift_view(view.shift_months(months), focused);
            }
            NavAction::ShiftYears(years) => {
                return self.shift_view(view.shift_years(years), focused);
            }
            NavAction::MoveDays(days) => focused.add_days(days),
            NavAction::WeekStart => focused.start_of_week(),
            NavAction::WeekEnd => focused.end_of_week(),
            NavAction::FocusToday => Some(window_clamp(today)),
            NavAction::FocusDate(date) => Some(date),
        };

        match target.filter(|d| d.in_text_window()) {
            Some(next) if next != focused || !view.contains(next) => {
                *self = Self::Open {
                    view: ViewMonth::containing(next),
                    focused: next,
                };
                NavOutcome::Moved
            }
            _ => NavOutcome::Unchanged,
        }
    }

    fn shift_view(&mut self, next_view: Option<ViewMonth>, focused: CalendarDate) -> NavOutcome {
        let Some(view) = next_view else {
            return NavOutcome::Unchanged;
        };
        *self = Self::Open {
            view,
            focused: focused.clamped_into(view),
        };
        NavOutcome::Moved
    }
}

/// Map a key press to a navigation action while the picker is open.
///
/// Returns `None` for keys the picker does not handle, including digits,
/// which keep editing the text.
#[must_use]
pub fn key_action(key: &KeyEvent) -> Option<NavAction> {
    if !key.is_press() {
        return None;
    }
    let action = match key.code {
        KeyCode::Up if key.alt() => NavAction::Close,
        KeyCode::Escape => NavAction::Close,
        KeyCode::Left => NavAction::MoveDays(-1),
        KeyCode::Right => NavAction::MoveDays(1),
        KeyCode::Up => NavAction::MoveDays(-7),
        KeyCode::Down => NavAction::MoveDays(7),
        KeyCode::Home => NavAction::WeekStart,
        KeyCode::End => NavAction::WeekEnd,
        KeyCode::PageUp if key.shift() => NavAction::ShiftYears(-1),
        KeyCode::PageDown if key.shift() => NavAction::ShiftYears(1),
        KeyCode::PageUp => NavAction::ShiftMonths(-1),
        KeyCode::PageDown => NavAction::ShiftMonths(1),
        KeyCode::Enter | KeyCode::Char(' ') => NavAction::Commit,
        KeyCode::Char('t') | KeyCode::Char('T') if !key.ctrl() && !key.alt() => {
            NavAction::FocusToday
        }
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datefield_core::event::{KeyEventKind, Modifiers};

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::new(y, m, day).unwrap()
    }

    fn open_at(date: CalendarDate) -> OpenState {
        OpenState::opened(Some(date), d(2000, 1, 1))
    }

    #[test]
    fn opened_prefers_value_then_today() {
        let today = d(2024, 6, 15);
        let with_value = OpenState::opened(Some(d(2020, 2, 29)), today);
        assert_eq!(with_value.focused(), Some(d(2020, 2, 29)));
        assert_eq!(with_value.view(), ViewMonth::new(2020, 2));

        let without = OpenState::opened(None, today);
        assert_eq!(without.focused(), Some(today));
        assert_eq!(without.view(), ViewMonth::new(2024, 6));
    }

    #[test]
    fn opened_ignores_value_outside_window() {
        let far = CalendarDate::LATEST.add_days(400).unwrap();
        let state = OpenState::opened(Some(far), d(2024, 6, 15));
        assert_eq!(state.focused(), Some(d(2024, 6, 15)));
    }

    #[test]
    fn arrow_down_crosses_month_and_view_follows() {
        let mut state = open_at(d(2024, 1, 31));
        let outcome = state.apply(NavAction::MoveDays(7), &Bounds::default(), d(2024, 1, 1));
        assert_eq!(outcome, NavOutcome::Moved);
        assert_eq!(state.focused(), Some(d(2024, 2, 7)));
        assert_eq!(state.view(), ViewMonth::new(2024, 2));
    }

    #[test]
    fn shift_months_clamps_day() {
        let mut state = open_at(d(2024, 1, 31));
        state.apply(NavAction::ShiftMonths(1), &Bounds::default(), d(2024, 1, 1));
        assert_eq!(state.focused(), Some(d(2024, 2, 29)));
        state.apply(NavAction::ShiftYears(1), &Bounds::default(), d(2024, 1, 1));
        assert_eq!(state.focused(), Some(d(2025, 2, 28)));
        assert_eq!(state.view(), ViewMonth::new(2025, 2));
    }

    #[test]
    fn moves_past_the_window_are_ignored() {
        let mut state = open_at(CalendarDate::EARLIEST);
        let before = state;
        let bounds = Bounds::default();
        let today = d(2024, 1, 1);
        assert_eq!(state.apply(NavAction::MoveDays(-1), &bounds, today), NavOutcome::Unchanged);
        assert_eq!(state.apply(NavAction::ShiftMonths(-1), &bounds, today), NavOutcome::Unchanged);
        assert_eq!(state.apply(NavAction::ShiftYears(-1), &bounds, today), NavOutcome::Unchanged);
        assert_eq!(state, before);

        let mut state = open_at(CalendarDate::LATEST);
        assert_eq!(state.apply(NavAction::MoveDays(1), &bounds, today), NavOutcome::Unchanged);
        assert_eq!(state.apply(NavAction::WeekEnd, &bounds, today), NavOutcome::Unchanged);
        assert_eq!(state.focused(), Some(CalendarDate::LATEST));
    }

    #[test]
    fn week_start_and_end() {
        // 2024-05-15 is a Wednesday.
        let mut state = open_at(d(2024, 5, 15));
        let bounds = Bounds::default();
        state.apply(NavAction::WeekStart, &bounds, d(2024, 1, 1));
        assert_eq!(state.focused(), Some(d(2024, 5, 13)));
        state.apply(NavAction::WeekEnd, &bounds, d(2024, 1, 1));
        assert_eq!(state.focused(), Some(d(2024, 5, 19)));
    }

    #[test]
    fn commit_respects_bounds() {
        let bounds = Bounds::new(Some(d(2024, 1, 10)), Some(d(2024, 1, 20)));
        let mut state = open_at(d(2024, 1, 9));
        assert_eq!(
            state.apply(NavAction::Commit, &bounds, d(2024, 1, 1)),
            NavOutcome::Rejected(d(2024, 1, 9))
        );
        assert!(state.is_open());
        state.apply(NavAction::MoveDays(1), &bounds, d(2024, 1, 1));
        assert_eq!(
            state.apply(NavAction::Commit, &bounds, d(2024, 1, 1)),
            NavOutcome::Commit(d(2024, 1, 10))
        );
    }

    #[test]
    fn close_and_closed_state() {
        let mut state = open_at(d(2024, 1, 1));
        assert_eq!(
            state.apply(NavAction::Close, &Bounds::default(), d(2024, 1, 1)),
            NavOutcome::Closed
        );
        assert_eq!(state, OpenState::Closed);
        assert_eq!(state.focused(), None);
        assert_eq!(
            state.apply(NavAction::MoveDays(1), &Bounds::default(), d(2024, 1, 1)),
            NavOutcome::Unchanged
        );
    }

    #[test]
    fn focus_today_moves_view() {
        let mut state = open_at(d(1999, 12, 31));
        state.apply(NavAction::FocusToday, &Bounds::default(), d(2024, 3, 3));
        assert_eq!(state.focused(), Some(d(2024, 3, 3)));
        assert_eq!(state.view(), ViewMonth::new(2024, 3));
        assert_eq!(
            state.apply(NavAction::FocusToday, &Bounds::default(), d(2024, 3, 3)),
            NavOutcome::Unchanged
        );
    }

    #[test]
    fn key_mapping() {
        let key = |code| KeyEvent::new(code);
        assert_eq!(key_action(&key(KeyCode::Down)), Some(NavAction::MoveDays(7)));
        assert_eq!(key_action(&key(KeyCode::Left)), Some(NavAction::MoveDays(-1)));
        assert_eq!(key_action(&key(KeyCode::Enter)), Some(NavAction::Commit));
        assert_eq!(key_action(&key(KeyCode::Char(' '))), Some(NavAction::Commit));
        assert_eq!(key_action(&key(KeyCode::Escape)), Some(NavAction::Close));
        assert_eq!(key_action(&key(KeyCode::Char('t'))), Some(NavAction::FocusToday));
        assert_eq!(key_action(&key(KeyCode::Char('5'))), None);
        assert_eq!(
            key_action(&key(KeyCode::PageUp).with_modifiers(Modifiers::SHIFT)),
            Some(NavAction::ShiftYears(-1))
        );
        assert_eq!(
            key_action(&key(KeyCode::Up).with_modifiers(Modifiers::ALT)),
            Some(NavAction::Close)
        );
        assert_eq!(
            key_action(&key(KeyCode::Down).with_kind(KeyEventKind::Release)),
            None
        );
    }
}
