#![forbid(unsafe_code)]

//! Calendar dates and the month being viewed.
//!
//! [`CalendarDate`] can hold any proleptic Gregorian date chrono supports,
//! because the month grid pads into neighbouring months and those cells
//! still need a date. The *text window* (years 0001 through 9999) is the
//! range that can be typed, committed, or navigated to; it is exactly the
//! set of dates whose `DD.MM.YYYY` form has a four-digit year.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// A calendar date without time or time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid constant date"),
    }
}

impl CalendarDate {
    /// First date of the text window: 01.01.0001.
    pub const EARLIEST: Self = Self(ymd(1, 1, 1));

    /// Last date of the text window: 31.12.9999.
    pub const LATEST: Self = Self(ymd(9999, 12, 31));

    /// Create a date from year, month (1-12), and day (1-31).
    ///
    /// Returns `None` if the combination does not exist.
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wrap a chrono date.
    #[inline]
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying chrono date.
    #[inline]
    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month, 1-12.
    #[inline]
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-31.
    #[inline]
    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[inline]
    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Whether this date is inside the 0001-9999 text window.
    #[inline]
    #[must_use]
    pub fn in_text_window(self) -> bool {
        self >= Self::EARLIEST && self <= Self::LATEST
    }

    /// Move by `days` (negative moves backwards).
    ///
    /// Returns `None` if the result falls outside chrono's range.
    #[must_use]
    pub fn add_days(self, days: i64) -> Option<Self> {
        let delta = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.0.checked_add_days(delta)
        } else {
            self.0.checked_sub_days(delta)
        };
        moved.map(Self)
    }

    /// Monday of the week containing this date.
    #[must_use]
    pub fn start_of_week(self) -> Option<Self> {
        let back = i64::from(self.0.weekday().num_days_from_monday());
        self.add_days(-back)
    }

    /// Sunday of the week containing this date.
    #[must_use]
    pub fn end_of_week(self) -> Option<Self> {
        let forward = 6 - i64::from(self.0.weekday().num_days_from_monday());
        self.add_days(forward)
    }

    /// The month containing this date.
    #[inline]
    #[must_use]
    pub fn view_month(self) -> ViewMonth {
        ViewMonth(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Same day-of-month in `target`, clamped to the target's length.
    ///
    /// 31 January moved to February lands on the 28th or 29th.
    #[must_use]
    pub fn clamped_into(self, target: ViewMonth) -> Self {
        let day = self.day().min(target.days_in_month());
        Self(target.0.with_day(day).unwrap_or(target.0))
    }

    /// Move by whole months, clamping the day and staying in the text window.
    #[must_use]
    pub fn shift_months(self, months: i32) -> Option<Self> {
        let target = self.view_month().shift_months(months)?;
        Some(self.clamped_into(target))
    }

    /// Move by whole years, clamping the day and staying in the text window.
    ///
    /// 29 February shifted by one year lands on 28 February.
    #[must_use]
    pub fn shift_years(self, years: i32) -> Option<Self> {
        self.shift_months(years.checked_mul(12)?)
    }

    /// Days since 1 January of year 1 CE, where that date is day 1.
    #[inline]
    #[must_use]
    pub fn days_from_ce(self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Inverse of [`days_from_ce`](Self::days_from_ce).
    #[must_use]
    pub fn from_days_from_ce(days: i32) -> Option<Self> {
        NaiveDate::from_num_days_from_ce_opt(days).map(Self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

/// The month shown by an open picker.
///
/// Always the first of a month between January 0001 and December 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth(NaiveDate);

impl ViewMonth {
    /// January 0001.
    pub const EARLIEST: Self = Self(ymd(1, 1, 1));

    /// December 9999.
    pub const LATEST: Self = Self(ymd(9999, 12, 1));

    /// Create a view month. Returns `None` outside January 0001..December 9999.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The view month containing `date`, clamped into the window.
    #[must_use]
    pub fn containing(date: CalendarDate) -> Self {
        date.view_month().clamp(Self::EARLIEST, Self::LATEST)
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month, 1-12.
    #[inline]
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The first day of this month.
    #[inline]
    #[must_use]
    pub fn first_day(self) -> CalendarDate {
        CalendarDate(self.0)
    }

    /// The last day of this month.
    #[must_use]
    pub fn last_day(self) -> CalendarDate {
        CalendarDate(self.0.with_day(self.days_in_month()).unwrap_or(self.0))
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Whether `date` falls in this month.
    #[inline]
    #[must_use]
    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Move by whole months. Returns `None` when the result leaves the window.
    #[must_use]
    pub fn shift_months(self, months: i32) -> Option<Self> {
        let delta = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.0.checked_add_months(delta)
        } else {
            self.0.checked_sub_months(delta)
        }?;
        let view = Self(moved);
        (Self::EARLIEST..=Self::LATEST).contains(&view).then_some(view)
    }

    /// Move by whole years. Returns `None` when the result leaves the window.
    #[must_use]
    pub fn shift_years(self, years: i32) -> Option<Self> {
        self.shift_months(years.checked_mul(12)?)
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:04}", self.month(), self.year())
    }
}

/// Gregorian leap year rule.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. Returns 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}
