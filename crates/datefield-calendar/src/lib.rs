#![forbid(unsafe_code)]

//! Calendar model for the date field.
//!
//! Everything here is pure: no terminal, no widget state. The widget crate
//! layers navigation and editing on top of these pieces.
//!
//! - [`date`]: [`CalendarDate`] and [`ViewMonth`]
//! - [`codec`]: the `DD.MM.YYYY` display format and keystroke normalization
//! - [`grid`]: the fixed 6 × 7 month grid
//! - [`bounds`]: inclusive min/max selectability
//! - [`locale`]: month names, weekday abbreviations, and the "today" label
//! - [`clock`]: where "today" comes from

pub mod bounds;
pub mod clock;
pub mod codec;
pub mod date;
pub mod grid;
pub mod locale;

pub use bounds::{Bounds, is_selectable};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{
    DISPLAY_LEN, ParseError, SEPARATOR, auto_format_keystroke, format, format_value,
    parse_complete,
};
pub use date::{CalendarDate, ViewMonth, days_in_month, is_leap_year};
pub use grid::{CalendarGrid, GRID_CELLS, GRID_COLUMNS, GRID_ROWS, GridCell, build_grid};
pub use locale::{Locale, UnknownLocale};

pub use chrono::Weekday;
