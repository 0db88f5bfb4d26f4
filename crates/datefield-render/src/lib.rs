#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, and frames with hit testing.

pub mod buffer;
pub mod cell;
pub mod frame;

use unicode_width::UnicodeWidthChar;

/// Display width of a single character in terminal columns.
///
/// Control characters report zero.
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    if c.is_ascii() {
        return usize::from(!c.is_ascii_control());
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of a string in terminal columns.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}
