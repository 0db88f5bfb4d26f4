#![forbid(unsafe_code)]

//! Date entry field with a calendar picker.
//!
//! The field shows one line of text in `DD.MM.YYYY` form with a toggle
//! glyph at its right edge, and an optional helper line below it. Typing
//! inserts separators automatically; a complete, valid date is committed as
//! soon as the tenth character lands. The picker opens below the field and
//! is driven by the arrow keys, PageUp/PageDown, or the pointer.
//!
//! # Example
//!
//! ```
//! use datefield_calendar::{CalendarDate, FixedClock};
//! use datefield_core::event::{Event, KeyCode};
//! use datefield_widgets::{DateFieldConfig, DateFieldState};
//!
//! let today = CalendarDate::new(2024, 1, 31).unwrap();
//! let mut state = DateFieldState::new(
//!     DateFieldConfig::new().with_clock(FixedClock(today)),
//! );
//! state.focus();
//! for c in "01011990".chars() {
//!     state.handle_event(&Event::key(KeyCode::Char(c)));
//! }
//! assert_eq!(state.text(), "01.01.1990");
//! assert_eq!(state.value(), CalendarDate::new(1990, 1, 1));
//! ```
//!
//! # Invariants
//!
//! 1. The picker's focused date is always inside its viewed month.
//! 2. A pointer subscription is held exactly while the picker is open.
//! 3. A controlled field never changes its own value; it only notifies.
//! 4. A disabled field ignores every event and keeps the picker closed.

pub mod calendar;
pub mod caret;
pub mod input;
pub mod navigation;
pub mod pointer;
pub mod value;

use std::fmt;

use datefield_calendar::{
    Bounds, CalendarDate, Clock, DISPLAY_LEN, Locale, SystemClock, ViewMonth, format,
    format_value, parse_complete,
};
use datefield_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use datefield_core::geometry::Rect;
use datefield_render::cell::Cell;
use datefield_render::frame::{Frame, HitData, HitId, HitRegion};
use datefield_style::DateFieldTheme;

use crate::{StatefulWidget, Widget, apply_style, draw_text_span};

use calendar::{MonthCalendar, PickerHit, button, decode_hit, popup_rect};
use caret::CaretCorrector;
use navigation::{NavAction, NavOutcome, OpenState, key_action};
use pointer::{ListenerId, PointerHub, PointerSubscription};
use value::{ChangeHandler, ValueResolver};

/// Columns taken by the toggle glyph at the right edge of the field.
const TOGGLE_WIDTH: u16 = 3;
/// Columns taken by the required marker.
const REQUIRED_WIDTH: u16 = 2;

/// Construction options for a [`DateFieldState`].
pub struct DateFieldConfig {
    value: Option<Option<CalendarDate>>,
    initial_value: Option<CalendarDate>,
    bounds: Bounds,
    locale: Locale,
    disabled: bool,
    auto_open_on_focus: bool,
    required: bool,
    invalid: bool,
    invalid_message: Option<String>,
    helper_text: Option<String>,
    on_change: Option<ChangeHandler>,
    clock: Option<Box<dyn Clock>>,
    hub: Option<PointerHub>,
    hit_id: HitId,
}

impl DateFieldConfig {
    pub fn new() -> Self {
        Self {
            value: None,
            initial_value: None,
            bounds: Bounds::default(),
            locale: Locale::default(),
            disabled: false,
            auto_open_on_focus: false,
            required: false,
            invalid: false,
            invalid_message: None,
            helper_text: None,
            on_change: None,
            clock: None,
            hub: None,
            hit_id: HitId::default(),
        }
    }

    /// Make the field controlled with this value.
    ///
    /// The field then only reports edits; feed the accepted value back with
    /// [`DateFieldState::set_value`].
    #[must_use]
    pub fn with_value(mut self, value: Option<CalendarDate>) -> Self {
        self.value = Some(value);
        self
    }

    /// Seed an uncontrolled field. Ignored when a controlled value is set.
    #[must_use]
    pub fn with_initial_value(mut self, value: Option<CalendarDate>) -> Self {
        self.initial_value = value;
        self
    }

    #[must_use]
    pub fn with_min_date(mut self, min: Option<CalendarDate>) -> Self {
        self.bounds.min = min;
        self
    }

    #[must_use]
    pub fn with_max_date(mut self, max: Option<CalendarDate>) -> Self {
        self.bounds.max = max;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_auto_open_on_focus(mut self, auto_open: bool) -> Self {
        self.auto_open_on_focus = auto_open;
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    #[must_use]
    pub fn with_invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, handler: impl FnMut(Option<CalendarDate>) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Where "today" comes from. Defaults to [`SystemClock`].
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Subscribe to `hub` while the picker is open.
    #[must_use]
    pub fn with_pointer_hub(mut self, hub: PointerHub) -> Self {
        self.hub = Some(hub);
        self
    }

    /// Id used for this field's hit regions.
    #[must_use]
    pub fn with_hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }
}

impl Default for DateFieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateFieldConfig")
            .field("value", &self.value)
            .field("initial_value", &self.initial_value)
            .field("bounds", &self.bounds)
            .field("locale", &self.locale)
            .field("disabled", &self.disabled)
            .field("auto_open_on_focus", &self.auto_open_on_focus)
            .field("required", &self.required)
            .field("invalid", &self.invalid)
            .field("hit_id", &self.hit_id)
            .finish_non_exhaustive()
    }
}

/// Mutable state for a [`DateField`].
pub struct DateFieldState {
    resolver: ValueResolver,
    text: String,
    /// Caret as a character offset into `text`.
    caret: usize,
    caret_fix: CaretCorrector,
    open: OpenState,
    bounds: Bounds,
    locale: Locale,
    disabled: bool,
    auto_open_on_focus: bool,
    required: bool,
    invalid: bool,
    invalid_message: Option<String>,
    helper_text: Option<String>,
    focused: bool,
    clock: Box<dyn Clock>,
    hub: Option<PointerHub>,
    subscription: Option<PointerSubscription>,
    hit_id: HitId,
    /// Text input row from the last render, for pointer caret placement.
    input_area: Option<Rect>,
}

impl DateFieldState {
    pub fn new(config: DateFieldConfig) -> Self {
        let mut resolver = match config.value {
            Some(value) => ValueResolver::controlled(value),
            None => ValueResolver::uncontrolled(config.initial_value),
        };
        resolver.set_handler(config.on_change);
        let text = format_value(resolver.current());
        let caret = text.chars().count();
        Self {
            resolver,
            text,
            caret,
            caret_fix: CaretCorrector::new(),
            open: OpenState::Closed,
            bounds: config.bounds,
            locale: config.locale,
            disabled: config.disabled,
            auto_open_on_focus: config.auto_open_on_focus,
            required: config.required,
            invalid: config.invalid,
            invalid_message: config.invalid_message,
            helper_text: config.helper_text,
            focused: false,
            clock: config.clock.unwrap_or_else(|| Box::new(SystemClock)),
            hub: config.hub,
            subscription: None,
            hit_id: config.hit_id,
            input_area: None,
        }
    }

    // --- accessors ---

    /// The authoritative value.
    #[inline]
    pub fn value(&self) -> Option<CalendarDate> {
        self.resolver.current()
    }

    /// Text currently in the input.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position in characters.
    ///
    /// After an edit this is stale until the next render or
    /// [`apply_pending_caret`](Self::apply_pending_caret).
    #[inline]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Generation of the latest edit, for use with
    /// [`resolve_caret`](Self::resolve_caret).
    #[inline]
    pub fn caret_generation(&self) -> u64 {
        self.caret_fix.generation()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    #[inline]
    pub fn open_state(&self) -> OpenState {
        self.open
    }

    /// Month shown by the picker, while open.
    #[inline]
    pub fn view_month(&self) -> Option<ViewMonth> {
        self.open.view()
    }

    /// Keyboard-focused day, while open.
    #[inline]
    pub fn focused_date(&self) -> Option<CalendarDate> {
        self.open.focused()
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.resolver.is_controlled()
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn invalid_message(&self) -> Option<&str> {
        self.invalid_message.as_deref()
    }

    pub fn helper_text(&self) -> Option<&str> {
        self.helper_text.as_deref()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[inline]
    pub fn hit_id(&self) -> HitId {
        self.hit_id
    }

    /// Today according to the configured clock.
    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Hub listener held while the picker is open.
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.subscription.as_ref().map(PointerSubscription::id)
    }

    // --- configuration ---

    /// Disabling also closes the picker.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close_picker();
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn set_invalid(&mut self, invalid: bool, message: Option<String>) {
        self.invalid = invalid;
        self.invalid_message = message;
    }

    pub fn set_helper_text(&mut self, text: Option<String>) {
        self.helper_text = text;
    }

    pub fn set_on_change(&mut self, handler: impl FnMut(Option<CalendarDate>) + 'static) {
        self.resolver.set_handler(Some(Box::new(handler)));
    }

    // --- value ---

    /// Supply a value from the host. Never notifies.
    ///
    /// When the value differs from the current one the text is re-derived
    /// and an open picker moves to the new date. The text is also re-derived
    /// when it holds a complete date other than `value`, so a host that
    /// rejects an edit by echoing its old value gets its text back.
    /// Partial text is left alone.
    pub fn set_value(&mut self, value: Option<CalendarDate>) {
        if !self.resolver.set_external(value) {
            if matches!(parse_complete(&self.text), Ok(typed) if Some(typed) != value) {
                self.replace_text(format_value(value));
            }
            return;
        }
        self.replace_text(format_value(value));
        if self.open.is_open() {
            self.open = OpenState::opened(value, self.today());
        }
    }

    /// Clear the text and report "no date". Always notifies.
    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }
        self.replace_text(String::new());
        self.resolver.commit(None);
        datefield_core::debug!("date field cleared");
    }

    fn replace_text(&mut self, text: String) {
        self.caret_fix.cancel();
        self.caret = text.chars().count();
        self.text = text;
    }

    // --- focus ---

    /// Give the field focus. Opens the picker when auto-open is configured.
    pub fn focus(&mut self) {
        if self.disabled || self.focused {
            return;
        }
        self.focused = true;
        if self.auto_open_on_focus {
            self.open();
        }
    }

    /// Take focus away, finalizing the typed text and closing the picker.
    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        self.focused = false;
        if self.disabled {
            return;
        }
        self.apply_pending_caret();
        self.reconcile_on_blur();
        self.close();
    }

    // --- picker ---

    /// Open the picker on the current value, or today.
    ///
    /// Returns `false` if already open or disabled.
    pub fn open(&mut self) -> bool {
        if self.disabled || self.open.is_open() {
            return false;
        }
        self.open = OpenState::opened(self.value(), self.today());
        self.subscription = self.hub.as_ref().map(PointerHub::subscribe);
        datefield_core::debug!(
            view = %self.open.view().map(|v| v.to_string()).unwrap_or_default(),
            "date picker opened"
        );
        true
    }

    /// Close the picker. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.close_picker()
    }

    fn close_picker(&mut self) -> bool {
        if !self.open.is_open() {
            return false;
        }
        self.open = OpenState::Closed;
        self.subscription = None;
        datefield_core::debug!("date picker closed");
        true
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) -> bool {
        if self.open.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Called by the host for a pointer-down outside every widget while
    /// this field's listener is registered.
    pub fn handle_outside_pointer(&mut self) -> bool {
        self.close()
    }

    // --- caret ---

    /// Apply the pending caret correction, if any.
    ///
    /// Rendering calls this; hosts that do not render between events can
    /// call it directly.
    pub fn apply_pending_caret(&mut self) {
        if let Some(caret) = self.caret_fix.take_resolved(&self.text) {
            self.caret = caret;
        }
    }

    /// Apply the correction for edit `generation` only if no newer edit
    /// happened since.
    pub fn resolve_caret(&mut self, generation: u64) -> bool {
        match self.caret_fix.resolve_if_current(generation, &self.text) {
            Some(caret) => {
                self.caret = caret;
                true
            }
            None => false,
        }
    }

    // --- events ---

    /// Handle a key or paste event. Returns `true` if the event was consumed.
    ///
    /// Mouse events go through [`handle_mouse`](Self::handle_mouse), which
    /// needs the hit-test result.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.disabled || !self.focused {
            return false;
        }
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(paste) => self.edit(|text, caret| input::insert(text, caret, &paste.text)),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        match key.code {
            KeyCode::F(4) => return self.toggle(),
            KeyCode::Down if key.alt() && !self.open.is_open() => return self.open(),
            _ => {}
        }
        if self.open.is_open()
            && let Some(action) = key_action(key)
        {
            self.navigate(action);
            return true;
        }

        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                let typed = c.to_string();
                self.edit(|text, caret| input::insert(text, caret, &typed))
            }
            KeyCode::Backspace => self.edit(input::backspace),
            KeyCode::Delete => self.edit(input::delete),
            KeyCode::Left => self.move_caret(|_, caret| input::move_left(caret)),
            KeyCode::Right => self.move_caret(input::move_right),
            KeyCode::Home => self.move_caret(|_, _| 0),
            KeyCode::End => self.move_caret(|text, _| text.chars().count()),
            _ => false,
        }
    }

    fn move_caret(&mut self, f: impl FnOnce(&str, usize) -> usize) -> bool {
        self.apply_pending_caret();
        let next = f(&self.text, self.caret);
        if next == self.caret {
            return false;
        }
        self.caret = next;
        true
    }

    fn edit(&mut self, f: impl FnOnce(&str, usize) -> Option<input::TextEdit>) -> bool {
        self.apply_pending_caret();
        let Some(edit) = f(&self.text, self.caret) else {
            return false;
        };
        if edit.text == self.text {
            return false;
        }
        self.text = edit.text;
        self.caret = input::clamp_caret(&self.text, self.caret);
        self.caret_fix.schedule(edit.digits_before);
        self.reconcile_live();
        true
    }

    /// Commit as soon as the text is a complete, valid date.
    fn reconcile_live(&mut self) {
        if self.text.chars().count() != DISPLAY_LEN {
            return;
        }
        match parse_complete(&self.text) {
            Ok(date) => {
                datefield_core::debug!(value = %date, source = "typing", "date committed");
                self.resolver.commit(Some(date));
                if self.open.is_open() {
                    let today = self.today();
                    self.open.apply(NavAction::FocusDate(date), &self.bounds, today);
                }
            }
            Err(_err) => {
                datefield_core::trace!(error = %_err, "complete text rejected");
            }
        }
    }

    fn reconcile_on_blur(&mut self) {
        if self.text.is_empty() {
            if self.value().is_some() {
                self.resolver.commit(None);
            }
            return;
        }
        match parse_complete(&self.text) {
            Ok(date) => {
                self.replace_text(format(date));
                datefield_core::debug!(value = %date, source = "blur", "date committed");
                self.resolver.commit(Some(date));
            }
            Err(_err) => {
                datefield_core::debug!(error = %_err, "reverting unparsable text on blur");
                self.replace_text(format_value(self.value()));
            }
        }
    }

    fn navigate(&mut self, action: NavAction) {
        let today = self.today();
        match self.open.apply(action, &self.bounds, today) {
            NavOutcome::Commit(date) => self.commit_date(date),
            NavOutcome::Rejected(_date) => {
                datefield_core::debug!(value = %_date, "commit outside bounds ignored");
            }
            NavOutcome::Closed => {
                self.subscription = None;
                datefield_core::debug!("date picker closed");
            }
            NavOutcome::Moved | NavOutcome::Unchanged => {}
        }
    }

    fn commit_date(&mut self, date: CalendarDate) {
        self.replace_text(format(date));
        datefield_core::debug!(value = %date, source = "picker", "date committed");
        self.resolver.commit(Some(date));
        self.close();
    }

    /// Handle a pointer event given the hit-test result at its position.
    ///
    /// Returns `true` if the event changed or was claimed by the field. Any
    /// pointer-down that misses the field, its toggle, and its popup closes
    /// the picker.
    pub fn handle_mouse(
        &mut self,
        event: &MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> bool {
        if self.disabled || !event.is_down() {
            return false;
        }
        let target = hit
            .filter(|(id, _, _)| *id == self.hit_id)
            .and_then(|(_, region, data)| decode_hit(region, data));
        let Some(target) = target else {
            return self.close();
        };
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return true;
        }

        match target {
            PickerHit::Toggle => {
                self.focused = true;
                self.toggle();
            }
            PickerHit::Field => {
                self.focus();
                if let Some(area) = self.input_area {
                    self.caret_fix.cancel();
                    let offset = usize::from(event.x.saturating_sub(area.x));
                    self.caret = input::clamp_caret(&self.text, offset);
                }
            }
            PickerHit::Surface => {}
            PickerHit::PrevYear => self.navigate(NavAction::ShiftYears(-1)),
            PickerHit::PrevMonth => self.navigate(NavAction::ShiftMonths(-1)),
            PickerHit::NextMonth => self.navigate(NavAction::ShiftMonths(1)),
            PickerHit::NextYear => self.navigate(NavAction::ShiftYears(1)),
            PickerHit::Today => {
                self.navigate(NavAction::FocusToday);
                self.navigate(NavAction::Commit);
            }
            PickerHit::Cell(date) => {
                self.navigate(NavAction::FocusDate(date));
                self.navigate(NavAction::Commit);
            }
        }
        true
    }
}

impl Default for DateFieldState {
    fn default() -> Self {
        Self::new(DateFieldConfig::default())
    }
}

impl fmt::Debug for DateFieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateFieldState")
            .field("resolver", &self.resolver)
            .field("text", &self.text)
            .field("caret", &self.caret)
            .field("open", &self.open)
            .field("bounds", &self.bounds)
            .field("locale", &self.locale)
            .field("disabled", &self.disabled)
            .field("focused", &self.focused)
            .field("listener", &self.listener_id())
            .finish_non_exhaustive()
    }
}

/// Renders a [`DateFieldState`].
#[derive(Debug, Clone)]
pub struct DateField {
    theme: DateFieldTheme,
    placeholder: String,
}

impl DateField {
    pub fn new() -> Self {
        Self {
            theme: DateFieldTheme::default(),
            placeholder: "DD.MM.YYYY".to_string(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: DateFieldTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Text shown while the input is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    fn render_helper(&self, area: Rect, frame: &mut Frame, state: &DateFieldState) {
        let (message, style) = if state.invalid {
            (state.invalid_message.as_deref(), self.theme.error)
        } else {
            (state.helper_text.as_deref(), self.theme.helper)
        };
        if let Some(message) = message {
            draw_text_span(&mut frame.buffer, area.x, area.y, message, style, area.right());
        }
    }
}

impl Default for DateField {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for DateField {
    type State = DateFieldState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "DateField",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        state.apply_pending_caret();

        let theme = &self.theme;
        let row = area.row(0);
        let mut field_style = if state.focused {
            theme.field_focused
        } else {
            theme.field
        };
        if state.invalid {
            field_style = field_style.patch(theme.invalid);
        }
        if state.disabled {
            field_style = field_style.patch(theme.disabled);
        }

        let mut blank = Cell::from_char(' ');
        apply_style(&mut blank, field_style);
        frame.buffer.fill(row, blank);

        let (rest, toggle_area) = row.split_right(TOGGLE_WIDTH);
        let (input_area, marker_area) = if state.required {
            rest.split_right(REQUIRED_WIDTH)
        } else {
            (rest, Rect::new(rest.right(), rest.y, 0, 1))
        };

        if state.text.is_empty() {
            let mut style = theme.placeholder;
            if state.disabled {
                style = style.patch(theme.disabled);
            }
            draw_text_span(
                &mut frame.buffer,
                input_area.x,
                input_area.y,
                &self.placeholder,
                style,
                input_area.right(),
            );
        } else {
            draw_text_span(
                &mut frame.buffer,
                input_area.x,
                input_area.y,
                &state.text,
                field_style,
                input_area.right(),
            );
        }

        if !marker_area.is_empty() {
            draw_text_span(
                &mut frame.buffer,
                marker_area.x,
                marker_area.y,
                " *",
                theme.error,
                marker_area.right(),
            );
        }

        let glyph = if state.open.is_open() { " ▴ " } else { " ▾ " };
        let mut toggle_style = theme.toggle;
        if state.disabled {
            toggle_style = toggle_style.patch(theme.disabled);
        }
        draw_text_span(
            &mut frame.buffer,
            toggle_area.x,
            toggle_area.y,
            glyph,
            toggle_style,
            toggle_area.right(),
        );

        frame.register_hit(input_area, state.hit_id, HitRegion::Content, 0);
        frame.register_hit(toggle_area, state.hit_id, HitRegion::Button, button::TOGGLE);
        state.input_area = Some(input_area);

        if area.height > 1 {
            self.render_helper(area.row(1), frame, state);
        }

        if state.focused && !state.disabled && !state.open.is_open() {
            let offset = u16::try_from(state.caret).unwrap_or(u16::MAX);
            let x = input_area.x.saturating_add(offset);
            if x < input_area.right() {
                frame.set_cursor(Some((x, input_area.y)));
            }
        }

        if let OpenState::Open { view, focused } = state.open {
            let popup = popup_rect(row, frame.bounds());
            MonthCalendar::new(view)
                .with_focused(Some(focused))
                .with_selected(state.value())
                .with_today(state.today())
                .with_bounds(state.bounds)
                .with_locale(state.locale)
                .with_theme(*theme)
                .with_hit_id(state.hit_id)
                .render(popup, frame);
        }
    }
}
