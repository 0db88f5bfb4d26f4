#![forbid(unsafe_code)]

//! The `DD.MM.YYYY` display format.
//!
//! Three pure functions make up the codec:
//!
//! - [`format`] renders a date as exactly ten characters.
//! - [`parse_complete`] accepts only that exact shape, and only real dates.
//! - [`auto_format_keystroke`] normalizes free-form typing into a prefix of
//!   the display shape so separators never need to be typed.
//!
//! `parse_complete(&format(d)) == Ok(d)` for every date in the text window,
//! and `auto_format_keystroke` is idempotent.

use std::fmt;
use std::str::FromStr;

use crate::date::CalendarDate;

/// Length of a complete display string.
pub const DISPLAY_LEN: usize = 10;

/// Separator between day, month, and year.
pub const SEPARATOR: char = '.';

/// Maximum number of digits a display string carries.
pub const MAX_DIGITS: usize = 8;

/// Render `date` as `DD.MM.YYYY`.
///
/// Dates outside the text window render their year unpadded past four
/// digits; they cannot be parsed back.
#[must_use]
pub fn format(date: CalendarDate) -> String {
    format!(
        "{:02}{sep}{:02}{sep}{:04}",
        date.day(),
        date.month(),
        date.year(),
        sep = SEPARATOR
    )
}

/// Render an optional value; absent values render as the empty string.
#[must_use]
pub fn format_value(value: Option<CalendarDate>) -> String {
    value.map(format).unwrap_or_default()
}

/// Why a string is not a complete, valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Not exactly two digits, separator, two digits, separator, four digits.
    Shape,
    /// Month outside 1-12.
    Month(u32),
    /// The day does not exist in that month and year (including day 0).
    Day { day: u32, month: u32, year: i32 },
    /// Year 0000 is outside the supported range.
    Year,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape => write!(f, "expected DD.MM.YYYY"),
            Self::Month(month) => write!(f, "month {month} is out of range"),
            Self::Day { day, month, year } => {
                write!(f, "day {day} does not exist in {month:02}.{year:04}")
            }
            Self::Year => write!(f, "year 0000 is not supported"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a complete `DD.MM.YYYY` string.
///
/// Rejects anything that is not exactly ten characters of that shape, and
/// any combination that is not a real calendar date: `31.02.2023` and
/// `29.02.2023` fail, `29.02.2024` succeeds.
///
/// # Errors
///
/// Returns the first [`ParseError`] found, checking shape, then year, then
/// month, then day.
pub fn parse_complete(text: &str) -> Result<CalendarDate, ParseError> {
    let bytes = text.as_bytes();
    if bytes.len() != DISPLAY_LEN {
        return Err(ParseError::Shape);
    }
    let sep = SEPARATOR as u8;
    if bytes[2] != sep || bytes[5] != sep {
        return Err(ParseError::Shape);
    }

    let number = |range: std::ops::Range<usize>| -> Result<u32, ParseError> {
        bytes[range].iter().try_fold(0u32, |acc, &b| {
            if b.is_ascii_digit() {
                Ok(acc * 10 + u32::from(b - b'0'))
            } else {
                Err(ParseError::Shape)
            }
        })
    };

    let day = number(0..2)?;
    let month = number(3..5)?;
    let year = number(6..10)?;

    if year == 0 {
        return Err(ParseError::Year);
    }
    if !(1..=12).contains(&month) {
        return Err(ParseError::Month(month));
    }
    // At most 9999, so the cast is lossless.
    let year = year as i32;
    CalendarDate::new(year, month, day).ok_or(ParseError::Day { day, month, year })
}

/// Normalize raw typed text toward the display shape.
///
/// Keeps the first eight ASCII digits and inserts a separator before the
/// third and fifth digit: `"01012024"` becomes `"01.01.2024"`, `"1a2"`
/// becomes `"12"`, and `"010"` becomes `"01.0"`.
#[must_use]
pub fn auto_format_keystroke(raw: &str) -> String {
    let mut out = String::with_capacity(DISPLAY_LEN);
    for (i, c) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .enumerate()
    {
        if i == 2 || i == 4 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Number of ASCII digits among the first `chars` characters of `text`.
#[must_use]
pub fn digits_before(text: &str, chars: usize) -> usize {
    text.chars()
        .take(chars)
        .filter(char::is_ascii_digit)
        .count()
}

/// Character offset just past the `digits`-th digit of `text`.
///
/// Returns 0 for `digits == 0` and the text length when `text` has fewer
/// digits than requested.
#[must_use]
pub fn offset_after_digits(text: &str, digits: usize) -> usize {
    if digits == 0 {
        return 0;
    }
    let mut seen = 0;
    for (i, c) in text.chars().enumerate() {
        if c.is_ascii_digit() {
            seen += 1;
            if seen == digits {
                return i + 1;
            }
        }
    }
    text.chars().count()
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(*self))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CalendarDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse_complete(&text).map_err(serde::de::Error::custom)
    }
}
