#![forbid(unsafe_code)]

//! Value ownership: controlled or uncontrolled.
//!
//! The mode is fixed when the field is built. In controlled mode the host
//! owns the value: edits only notify, and the host feeds the result back
//! through [`ValueResolver::set_external`]. In uncontrolled mode the field
//! stores edits itself and also notifies.

use std::fmt;

use datefield_calendar::CalendarDate;

/// Callback invoked with the new value, or `None` for "no date".
pub type ChangeHandler = Box<dyn FnMut(Option<CalendarDate>)>;

/// Who owns the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// The host supplies the value; internal edits never change it directly.
    Controlled { value: Option<CalendarDate> },
    /// The field tracks its own value, seeded from an optional initial value.
    Uncontrolled { value: Option<CalendarDate> },
}

impl ValueMode {
    #[inline]
    pub const fn value(&self) -> Option<CalendarDate> {
        match *self {
            Self::Controlled { value } | Self::Uncontrolled { value } => value,
        }
    }

    #[inline]
    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }
}

/// Resolves the current value and routes change notifications.
pub struct ValueResolver {
    mode: ValueMode,
    on_change: Option<ChangeHandler>,
}

impl ValueResolver {
    #[must_use]
    pub fn new(mode: ValueMode) -> Self {
        Self {
            mode,
            on_change: None,
        }
    }

    #[must_use]
    pub fn controlled(value: Option<CalendarDate>) -> Self {
        Self::new(ValueMode::Controlled { value })
    }

    #[must_use]
    pub fn uncontrolled(initial: Option<CalendarDate>) -> Self {
        Self::new(ValueMode::Uncontrolled { value: initial })
    }

    /// Replace the change handler.
    pub fn set_handler(&mut self, handler: Option<ChangeHandler>) {
        self.on_change = handler;
    }

    #[inline]
    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    /// The authoritative value.
    #[inline]
    pub fn current(&self) -> Option<CalendarDate> {
        self.mode.value()
    }

    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.mode.is_controlled()
    }

    /// An edit inside the field produced `next`.
    ///
    /// Uncontrolled fields store it. Both modes notify, even when `next`
    /// equals the current value.
    pub fn commit(&mut self, next: Option<CalendarDate>) {
        if let ValueMode::Uncontrolled { value } = &mut self.mode {
            *value = next;
        }
        if let Some(handler) = self.on_change.as_mut() {
            handler(next);
        }
    }

    /// The host supplied a value. Never notifies.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_external(&mut self, next: Option<CalendarDate>) -> bool {
        let (ValueMode::Controlled { value } | ValueMode::Uncontrolled { value }) = &mut self.mode;
        if *value == next {
            return false;
        }
        *value = next;
        true
    }
}

impl fmt::Debug for ValueResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueResolver")
            .field("mode", &self.mode)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
