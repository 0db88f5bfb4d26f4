#![forbid(unsafe_code)]

//! The demo screen: two labelled date fields and a status line.
//!
//! Both fields share one [`PointerHub`]. Pointer-downs are routed through
//! the hit grid of the last rendered frame: the field that owns the hit
//! gets the event, every other field still listening on the hub is told
//! the pointer landed outside it.

use std::cell::RefCell;
use std::rc::Rc;

use datefield::widgets::{draw_text_span, set_style_area};
use datefield::{
    CalendarDate, Clock, DateField, DateFieldConfig, DateFieldState, DateFieldTheme, Event, Frame,
    HitId, KeyCode, KeyEvent, MouseEvent, PointerHub, Rect, StatefulWidget, SystemClock,
};

use crate::cli::Opts;

/// Column where field labels start.
const LABEL_X: u16 = 1;
/// Column where the fields start.
const FIELD_X: u16 = 14;
/// Field width including the toggle and required marker.
const FIELD_WIDTH: u16 = 24;
/// Input row of each field.
const FIELD_ROWS: [u16; 2] = [2, 5];

const HINT: &str = "Tab: next field  F4: picker  Esc: quit";

/// (field index, value) pairs reported by the fields, oldest first.
type ChangeLog = Rc<RefCell<Vec<(usize, Option<CalendarDate>)>>>;

struct Slot {
    label: &'static str,
    state: DateFieldState,
}

/// Two date fields with focus handling and mouse routing.
pub struct DemoApp {
    slots: Vec<Slot>,
    focus: usize,
    hub: PointerHub,
    widget: DateField,
    theme: DateFieldTheme,
    changes: ChangeLog,
    /// Entries of `changes` already reflected in `status` and echoed back.
    seen: usize,
    controlled: bool,
    status: String,
    quit: bool,
}

impl DemoApp {
    pub fn new(opts: &Opts) -> Self {
        Self::with_clock(opts, SystemClock)
    }

    /// Build the demo with a specific source of "today".
    pub fn with_clock<C: Clock + Clone + 'static>(opts: &Opts, clock: C) -> Self {
        let hub = PointerHub::new();
        let changes: ChangeLog = Rc::new(RefCell::new(Vec::new()));
        let theme = opts.resolved_theme();

        let base = |index: usize| {
            let sink = Rc::clone(&changes);
            let config = DateFieldConfig::new()
                .with_locale(opts.resolved_locale())
                .with_bounds(opts.bounds())
                .with_auto_open_on_focus(opts.auto_open)
                .with_clock(clock.clone())
                .with_pointer_hub(hub.clone())
                .with_hit_id(HitId::new(index as u32 + 1))
                .with_on_change(move |value| sink.borrow_mut().push((index, value)));
            let value = if index == 0 { opts.value } else { None };
            if opts.controlled {
                config.with_value(value)
            } else {
                config.with_initial_value(value)
            }
        };

        let start = base(0).with_required(true).with_helper_text("Required");
        let end = base(1).with_helper_text("Optional");
        let mut slots = vec![
            Slot {
                label: "Start date",
                state: DateFieldState::new(start),
            },
            Slot {
                label: "End date",
                state: DateFieldState::new(end),
            },
        ];
        slots[0].state.focus();

        Self {
            slots,
            focus: 0,
            hub,
            widget: DateField::new().with_theme(theme),
            theme,
            changes,
            seen: 0,
            controlled: opts.controlled,
            status: String::new(),
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn field(&self, index: usize) -> Option<&DateFieldState> {
        self.slots.get(index).map(|slot| &slot.state)
    }

    /// Last change message shown in the status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Every change reported so far, as (field index, value).
    pub fn changes(&self) -> Vec<(usize, Option<CalendarDate>)> {
        self.changes.borrow().clone()
    }

    /// Handle one event. `frame` is the last rendered frame, used for hit
    /// testing pointer events. Returns `true` if anything consumed it.
    pub fn handle_event(&mut self, event: &Event, frame: &Frame) -> bool {
        let handled = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, frame),
            Event::Paste(_) => self.slots[self.focus].state.handle_event(event),
            Event::Resize { .. } | Event::Focus(_) => false,
        };
        self.sync_changes();
        handled
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        if key.ctrl() && key.is_char('c') {
            self.quit = true;
            return true;
        }
        if self.slots[self.focus].state.handle_event(&Event::Key(*key)) {
            return true;
        }
        match key.code {
            KeyCode::Tab => self.move_focus((self.focus + 1) % self.slots.len()),
            KeyCode::BackTab => {
                self.move_focus((self.focus + self.slots.len() - 1) % self.slots.len())
            }
            KeyCode::Escape => self.quit = true,
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, frame: &Frame) -> bool {
        if !mouse.is_down() {
            return false;
        }
        let hit = frame.hit_test(mouse.x, mouse.y);
        let target = hit.and_then(|(id, _, _)| {
            self.slots
                .iter()
                .position(|slot| slot.state.hit_id() == id)
        });

        let listening = self.hub.listeners();
        let mut handled = false;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if Some(index) != target
                && let Some(id) = slot.state.listener_id()
                && listening.contains(&id)
            {
                handled |= slot.state.handle_outside_pointer();
            }
        }

        if let Some(index) = target {
            if index != self.focus {
                self.slots[self.focus].state.blur();
                self.focus = index;
            }
            handled |= self.slots[index].state.handle_mouse(mouse, hit);
        }
        handled
    }

    fn move_focus(&mut self, index: usize) {
        self.slots[self.focus].state.blur();
        self.focus = index;
        self.slots[index].state.focus();
        tracing::debug!(field = self.slots[index].label, "focus moved");
    }

    /// Update the status line from new notifications and, in controlled
    /// mode, feed each value back into its field.
    fn sync_changes(&mut self) {
        let fresh: Vec<_> = self.changes.borrow()[self.seen..].to_vec();
        self.seen += fresh.len();
        for (index, value) in fresh {
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            self.status = match value {
                Some(date) => format!("{}: {date}", slot.label),
                None => format!("{}: cleared", slot.label),
            };
            tracing::info!(field = slot.label, value = ?value, "value changed");
            if self.controlled {
                slot.state.set_value(value);
            }
        }
    }

    /// Draw the screen. The focused field is drawn last so its picker
    /// covers the other field, hit regions included.
    pub fn render(&mut self, frame: &mut Frame) {
        let bounds = frame.bounds();
        let right = bounds.right();
        draw_text_span(
            &mut frame.buffer,
            LABEL_X,
            0,
            "Date fields",
            self.theme.header,
            right,
        );

        for (index, slot) in self.slots.iter().enumerate() {
            let style = if index == self.focus {
                self.theme.header
            } else {
                self.theme.helper
            };
            draw_text_span(
                &mut frame.buffer,
                LABEL_X,
                FIELD_ROWS[index],
                slot.label,
                style,
                FIELD_X.saturating_sub(1),
            );
        }

        let order = (0..self.slots.len())
            .filter(|&index| index != self.focus)
            .chain(std::iter::once(self.focus));
        for index in order {
            let area = Rect::new(FIELD_X, FIELD_ROWS[index], FIELD_WIDTH, 2).intersection(&bounds);
            if area.is_empty() {
                continue;
            }
            self.widget
                .render(area, frame, &mut self.slots[index].state);
        }

        if bounds.height >= 2 {
            let status_y = bounds.bottom() - 2;
            let hint_y = bounds.bottom() - 1;
            draw_text_span(
                &mut frame.buffer,
                LABEL_X,
                status_y,
                &self.status,
                self.theme.field,
                right,
            );
            set_style_area(&mut frame.buffer, bounds.row(hint_y - bounds.y), self.theme.surface);
            draw_text_span(&mut frame.buffer, LABEL_X, hint_y, HINT, self.theme.helper, right);
        }
    }
}
