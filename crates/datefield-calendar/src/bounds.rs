#![forbid(unsafe_code)]

//! Inclusive selection bounds.

use crate::date::CalendarDate;

/// Optional inclusive lower and upper limits on selectable dates.
///
/// When both are set and `min > max`, no date is selectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    /// No limits.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    #[must_use]
    pub const fn with_min(mut self, min: CalendarDate) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn with_max(mut self, max: CalendarDate) -> Self {
        self.max = Some(max);
        self
    }

    /// Whether `date` may be committed.
    #[inline]
    #[must_use]
    pub fn contains(&self, date: CalendarDate) -> bool {
        is_selectable(date, self)
    }

    /// True when both limits are set and no date can satisfy them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Whether `date` lies within `bounds` (inclusive on both ends).
///
/// Selectability does not consider the text window; callers that commit
/// check that separately.
#[must_use]
pub fn is_selectable(date: CalendarDate, bounds: &Bounds) -> bool {
    bounds.min.is_none_or(|min| date >= min) && bounds.max.is_none_or(|max| date <= max)
}
