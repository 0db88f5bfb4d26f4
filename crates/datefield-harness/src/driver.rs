#![forbid(unsafe_code)]

//! Scripted event driver for a single date field.
//!
//! [`FieldDriver`] owns a [`DateFieldState`] and a frame with hit testing.
//! Keys go straight to the state; clicks are rendered first and then routed
//! through [`Frame::hit_test`] the way a host would. Every change
//! notification is appended to a shared [`Notifications`] log.

use std::cell::RefCell;
use std::rc::Rc;

use datefield_calendar::CalendarDate;
use datefield_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use datefield_core::geometry::Rect;
use datefield_render::buffer::Buffer;
use datefield_render::frame::Frame;
use datefield_style::DateFieldTheme;
use datefield_widgets::{DateField, DateFieldConfig, DateFieldState, StatefulWidget};

use crate::buffer_to_text;

/// Shared log of change notifications, oldest first.
pub type Notifications = Rc<RefCell<Vec<Option<CalendarDate>>>>;

/// Drives one field through keys, pastes, and clicks.
pub struct FieldDriver {
    state: DateFieldState,
    widget: DateField,
    frame: Frame,
    area: Rect,
    log: Notifications,
}

impl FieldDriver {
    /// A driver whose frame is `width` × `height` with the field on row 0.
    ///
    /// The field spans the frame width and two rows, leaving room for the
    /// helper line. `config` should carry a fixed clock for stable output.
    pub fn new(config: DateFieldConfig, width: u16, height: u16) -> Self {
        let log: Notifications = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let state = DateFieldState::new(config.with_on_change(move |v| sink.borrow_mut().push(v)));
        Self {
            state,
            widget: DateField::new(),
            frame: Frame::with_hit_grid(width, height),
            area: Rect::new(0, 0, width, height.min(2)),
            log,
        }
    }

    /// Place the field at `area` instead of the top-left corner.
    #[must_use]
    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: DateFieldTheme) -> Self {
        self.widget = self.widget.with_theme(theme);
        self
    }

    pub fn state(&self) -> &DateFieldState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DateFieldState {
        &mut self.state
    }

    /// Handle to the notification log.
    pub fn notifications(&self) -> Notifications {
        Rc::clone(&self.log)
    }

    /// Snapshot of every notification so far.
    pub fn notified(&self) -> Vec<Option<CalendarDate>> {
        self.log.borrow().clone()
    }

    pub fn focus(&mut self) -> &mut Self {
        self.state.focus();
        self
    }

    pub fn blur(&mut self) -> &mut Self {
        self.state.blur();
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.state.open();
        self
    }

    /// Send one key press.
    pub fn press(&mut self, code: KeyCode) -> &mut Self {
        self.state.handle_event(&Event::key(code));
        self
    }

    /// Send one key press with modifiers.
    pub fn press_with(&mut self, code: KeyCode, modifiers: Modifiers) -> &mut Self {
        self.state
            .handle_event(&Event::Key(KeyEvent::new(code).with_modifiers(modifiers)));
        self
    }

    /// Send `code` `times` times.
    pub fn repeat(&mut self, code: KeyCode, times: usize) -> &mut Self {
        for _ in 0..times {
            self.press(code);
        }
        self
    }

    /// Type each character of `text` as its own key press.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
        self
    }

    /// Render, then left-click at (`x`, `y`) through the hit grid.
    pub fn click(&mut self, x: u16, y: u16) -> &mut Self {
        self.render();
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y);
        let hit = self.frame.hit_test(x, y);
        self.state.handle_mouse(&event, hit);
        self
    }

    /// Render the field into a cleared frame and return its buffer.
    pub fn render(&mut self) -> &Buffer {
        self.frame.clear();
        self.widget.render(self.area, &mut self.frame, &mut self.state);
        &self.frame.buffer
    }

    /// Render and return the screen as text.
    pub fn screen(&mut self) -> String {
        buffer_to_text(self.render())
    }

    /// Cursor position from the last render.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.frame.cursor_position
    }
}

impl std::fmt::Debug for FieldDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDriver")
            .field("state", &self.state)
            .field("area", &self.area)
            .field("notified", &self.log.borrow().len())
            .finish_non_exhaustive()
    }
}
