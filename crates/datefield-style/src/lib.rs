#![forbid(unsafe_code)]

//! Style types and the date field theme.

pub mod style;
pub mod theme;

pub use style::Style;
pub use theme::DateFieldTheme;

pub use datefield_render::cell::{PackedRgba, StyleFlags};
