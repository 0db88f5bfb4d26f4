#![forbid(unsafe_code)]

//! Semantic styles for the date field.
//!
//! ```
//! use datefield_style::DateFieldTheme;
//!
//! let theme = if DateFieldTheme::detect_dark_mode() {
//!     DateFieldTheme::dark()
//! } else {
//!     DateFieldTheme::light()
//! };
//! assert!(!theme.selected.is_empty());
//! ```

use std::env;

use datefield_render::cell::PackedRgba;

use crate::style::Style;

/// Every style slot the date field and its picker draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFieldTheme {
    /// Text input row.
    pub field: Style,
    /// Text input row while focused.
    pub field_focused: Style,
    /// Placeholder shown when the input is empty.
    pub placeholder: Style,
    /// Layered over the field when disabled.
    pub disabled: Style,
    /// Layered over the field when marked invalid.
    pub invalid: Style,
    /// Toggle glyph at the right edge of the field.
    pub toggle: Style,
    /// Picker background.
    pub surface: Style,
    /// Month/year title and navigation arrows.
    pub header: Style,
    /// Weekday abbreviations row.
    pub weekday: Style,
    /// Day in the viewed month.
    pub day: Style,
    /// Padding day from a neighbouring month.
    pub outside_month: Style,
    /// Today's cell.
    pub today: Style,
    /// The committed value's cell.
    pub selected: Style,
    /// The keyboard-focused cell.
    pub focused_cell: Style,
    /// Layered over days outside the bounds.
    pub unselectable: Style,
    /// "Today" footer button.
    pub footer: Style,
    /// Helper text under the field.
    pub helper: Style,
    /// Error message under the field.
    pub error: Style,
}

impl DateFieldTheme {
    /// Detect whether dark mode should be used.
    ///
    /// Reads `COLORFGBG`; defaults to dark when it is missing or unreadable.
    #[must_use]
    pub fn detect_dark_mode() -> bool {
        Self::detect_dark_mode_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
    }

    fn detect_dark_mode_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
        // "fg;bg" with ANSI indices; 7 and 15 are light backgrounds.
        if let Some(colorfgbg) = colorfgbg
            && let Some(bg_part) = colorfgbg.split(';').next_back()
            && let Ok(bg) = bg_part.trim().parse::<u8>()
        {
            return bg != 7 && bg != 15;
        }
        true
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        let text = PackedRgba::rgb(230, 237, 243);
        let muted = PackedRgba::rgb(110, 118, 129);
        let surface = PackedRgba::rgb(33, 38, 45);
        let accent = PackedRgba::rgb(88, 166, 255);
        let error = PackedRgba::rgb(248, 81, 73);
        Self {
            field: Style::new().fg(text).bg(PackedRgba::rgb(22, 27, 34)),
            field_focused: Style::new().fg(text).bg(PackedRgba::rgb(48, 54, 61)),
            placeholder: Style::new().fg(muted),
            disabled: Style::new().fg(muted).dim(),
            invalid: Style::new().fg(error),
            toggle: Style::new().fg(accent),
            surface: Style::new().fg(text).bg(surface),
            header: Style::new().fg(accent).bold(),
            weekday: Style::new().fg(PackedRgba::rgb(139, 148, 158)),
            day: Style::new().fg(text),
            outside_month: Style::new().fg(muted),
            today: Style::new().underline(),
            selected: Style::new()
                .fg(PackedRgba::WHITE)
                .bg(PackedRgba::rgb(56, 139, 253))
                .bold(),
            focused_cell: Style::new().reverse(),
            unselectable: Style::new().dim().strikethrough(),
            footer: Style::new().fg(accent),
            helper: Style::new().fg(muted),
            error: Style::new().fg(error),
        }
    }

    /// Light theme.
    #[must_use]
    pub fn light() -> Self {
        let text = PackedRgba::rgb(36, 41, 47);
        let muted = PackedRgba::rgb(140, 149, 159);
        let surface = PackedRgba::rgb(246, 248, 250);
        let accent = PackedRgba::rgb(9, 105, 218);
        let error = PackedRgba::rgb(207, 34, 46);
        Self {
            field: Style::new().fg(text).bg(PackedRgba::WHITE),
            field_focused: Style::new().fg(text).bg(PackedRgba::rgb(234, 238, 242)),
            placeholder: Style::new().fg(muted),
            disabled: Style::new().fg(muted).dim(),
            invalid: Style::new().fg(error),
            toggle: Style::new().fg(accent),
            surface: Style::new().fg(text).bg(surface),
            header: Style::new().fg(accent).bold(),
            weekday: Style::new().fg(PackedRgba::rgb(87, 96, 106)),
            day: Style::new().fg(text),
            outside_month: Style::new().fg(muted),
            today: Style::new().underline(),
            selected: Style::new().fg(PackedRgba::WHITE).bg(accent).bold(),
            focused_cell: Style::new().reverse(),
            unselectable: Style::new().dim().strikethrough(),
            footer: Style::new().fg(accent),
            helper: Style::new().fg(muted),
            error: Style::new().fg(error),
        }
    }
}

impl Default for DateFieldTheme {
    fn default() -> Self {
        Self::dark()
    }
}
