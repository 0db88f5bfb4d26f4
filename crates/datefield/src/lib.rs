#![forbid(unsafe_code)]

//! datefield public facade crate.
//!
//! Re-exports the date field widget, the calendar model it is built on, and
//! the event and render types a host needs to drive it, plus a lightweight
//! prelude for day-to-day usage.
//!
//! ```
//! use datefield::prelude::*;
//!
//! let today = CalendarDate::new(2024, 1, 31).unwrap();
//! let mut state = DateFieldState::new(
//!     DateFieldConfig::new()
//!         .with_clock(FixedClock(today))
//!         .with_locale(Locale::De),
//! );
//! state.focus();
//! state.handle_event(&Event::key(KeyCode::F(4)));
//! assert_eq!(state.focused_date(), Some(today));
//!
//! let mut frame = Frame::new(30, 12);
//! DateField::new().render(Rect::new(0, 0, 24, 1), &mut frame, &mut state);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use datefield_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    PasteEvent,
};
pub use datefield_core::geometry::Rect;
#[cfg(not(target_arch = "wasm32"))]
pub use datefield_core::terminal_session::{SessionOptions, TerminalSession};

// --- Calendar re-exports ---------------------------------------------------

pub use datefield_calendar::{
    Bounds, CalendarDate, Clock, FixedClock, Locale, ParseError, SystemClock, UnknownLocale,
    ViewMonth, format, format_value, parse_complete,
};

// --- Render re-exports -----------------------------------------------------

pub use datefield_render::buffer::Buffer;
pub use datefield_render::cell::{Cell, PackedRgba};
pub use datefield_render::frame::{Frame, HitData, HitId, HitRegion};

// --- Style re-exports ------------------------------------------------------

pub use datefield_style::{DateFieldTheme, Style, StyleFlags};

// --- Widget re-exports -----------------------------------------------------

pub use datefield_widgets::{
    DateField, DateFieldConfig, DateFieldState, ListenerId, MonthCalendar, OpenState, PointerHub,
    PointerSubscription, StatefulWidget, ValueMode, Widget,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for datefield apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// A date given outside the widget (CLI flag, config file) did not parse.
    Parse {
        input: String,
        source: ParseError,
    },
    /// A locale tag without a label table.
    Locale(UnknownLocale),
}

impl Error {
    /// Wrap a [`ParseError`] together with the text that failed.
    pub fn parse(input: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            input: input.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Parse { input, source } => write!(f, "invalid date '{input}': {source}"),
            Self::Locale(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::Locale(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<UnknownLocale> for Error {
    fn from(err: UnknownLocale) -> Self {
        Self::Locale(err)
    }
}

/// Standard result type for datefield APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a `DD.MM.YYYY` string supplied from outside the widget.
///
/// Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Result<CalendarDate> {
    let trimmed = input.trim();
    parse_complete(trimmed).map_err(|err| Error::parse(trimmed, err))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bounds, CalendarDate, DateField, DateFieldConfig, DateFieldState, DateFieldTheme, Error,
        Event, FixedClock, Frame, KeyCode, KeyEvent, Locale, Modifiers, MouseEvent, PointerHub,
        Rect, Result, StatefulWidget, Style, ViewMonth, Widget,
    };

    pub use crate::{calendar, core, render, style, widgets};
}

pub use datefield_calendar as calendar;
pub use datefield_core as core;
pub use datefield_render as render;
pub use datefield_style as style;
pub use datefield_widgets as widgets;
