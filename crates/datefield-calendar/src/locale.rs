#![forbid(unsafe_code)]

//! Display language for calendar labels.
//!
//! The locale only changes labels: month names in the picker title, the
//! weekday header, and the "today" button. The text format is always
//! `DD.MM.YYYY` and weeks always start on Monday.

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::date::ViewMonth;

/// Supported label languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
    Es,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober",
    "November", "Dezember",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

// Monday first.
const WEEKDAYS_EN: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const WEEKDAYS_DE: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];
const WEEKDAYS_FR: [&str; 7] = ["lu", "ma", "me", "je", "ve", "sa", "di"];
const WEEKDAYS_ES: [&str; 7] = ["lu", "ma", "mi", "ju", "vi", "sá", "do"];

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::De, Locale::Fr, Locale::Es];

    /// Resolve a POSIX or BCP-47 style tag such as `de_DE.UTF-8`, `fr-CA`,
    /// or `es`.
    ///
    /// `C` and `POSIX` resolve to English. Returns `None` for languages
    /// without a label table.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag.split('@').next().unwrap_or(tag);
        let tag = tag.split('.').next().unwrap_or(tag).trim();
        if tag.is_empty() {
            return None;
        }
        if tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
            return Some(Self::En);
        }
        let language = tag.split(['_', '-']).next().unwrap_or(tag);
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            "fr" => Some(Self::Fr),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Detect the locale from the environment.
    ///
    /// Preference order: `LC_ALL`, then `LANG`. Falls back to English when
    /// neither names a supported language.
    #[must_use]
    pub fn detect() -> Self {
        let lc_all = env::var("LC_ALL").ok();
        let lang = env::var("LANG").ok();
        Self::detect_from(lc_all.as_deref(), lang.as_deref())
    }

    fn detect_from(lc_all: Option<&str>, lang: Option<&str>) -> Self {
        lc_all
            .and_then(Self::from_tag)
            .or_else(|| lang.and_then(Self::from_tag))
            .unwrap_or_default()
    }

    /// Short language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    /// Full month name for `month` (1-12). Out-of-range months yield `""`.
    #[must_use]
    pub fn month_name(self, month: u32) -> &'static str {
        let table = match self {
            Self::En => &MONTHS_EN,
            Self::De => &MONTHS_DE,
            Self::Fr => &MONTHS_FR,
            Self::Es => &MONTHS_ES,
        };
        month
            .checked_sub(1)
            .and_then(|i| table.get(i as usize))
            .copied()
            .unwrap_or("")
    }

    /// Two-letter weekday abbreviations, Monday first.
    #[must_use]
    pub const fn weekday_header(self) -> [&'static str; 7] {
        match self {
            Self::En => WEEKDAYS_EN,
            Self::De => WEEKDAYS_DE,
            Self::Fr => WEEKDAYS_FR,
            Self::Es => WEEKDAYS_ES,
        }
    }

    #[must_use]
    pub fn weekday_abbrev(self, weekday: Weekday) -> &'static str {
        self.weekday_header()[weekday.num_days_from_monday() as usize]
    }

    /// Label for the footer button that commits today's date.
    #[must_use]
    pub const fn today_label(self) -> &'static str {
        match self {
            Self::En => "Today",
            Self::De => "Heute",
            Self::Fr => "Aujourd'hui",
            Self::Es => "Hoy",
        }
    }

    /// Picker title: month name and four-digit year.
    #[must_use]
    pub fn title(self, view: ViewMonth) -> String {
        format!("{} {:04}", self.month_name(view.month()), view.year())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a tag names no supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported locale '{}' (expected one of: en, de, fr, es)",
            self.0
        )
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
