#![forbid(unsafe_code)]

//! Command-line options for the demo.
//!
//! Every option can also be set through a `DATEFIELD_DEMO_*` environment
//! variable; flags given on the command line win.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use datefield::{Bounds, CalendarDate, DateFieldTheme, Locale};

#[derive(Debug, Clone, Parser)]
#[command(name = "datefield-demo")]
#[command(about = "Two date fields with calendar pickers in the terminal", long_about = None)]
#[command(version)]
#[command(after_help = "\
KEYBINDINGS:
    Tab / Shift-Tab     Move between fields
    F4 / Alt-Down       Open or close the picker
    Arrows, PgUp/PgDn   Move through the calendar (Shift-PgUp/PgDn: year)
    Enter / Space       Pick the focused day
    t                   Jump to today
    Esc                 Close the picker, or quit when closed
    Ctrl-C              Quit")]
pub struct Opts {
    /// Language for month names and labels (en, de, fr, es). Defaults to $LC_ALL / $LANG.
    #[arg(long, env = "DATEFIELD_DEMO_LOCALE")]
    pub locale: Option<Locale>,

    /// Earliest selectable date, DD.MM.YYYY.
    #[arg(long, env = "DATEFIELD_DEMO_MIN", value_parser = parse_date_arg)]
    pub min: Option<CalendarDate>,

    /// Latest selectable date, DD.MM.YYYY.
    #[arg(long, env = "DATEFIELD_DEMO_MAX", value_parser = parse_date_arg)]
    pub max: Option<CalendarDate>,

    /// Initial value of the first field, DD.MM.YYYY.
    #[arg(long, env = "DATEFIELD_DEMO_VALUE", value_parser = parse_date_arg)]
    pub value: Option<CalendarDate>,

    /// Run both fields in controlled mode; the demo echoes accepted values back.
    #[arg(long, env = "DATEFIELD_DEMO_CONTROLLED")]
    pub controlled: bool,

    /// Open the picker whenever a field gains focus.
    #[arg(long, env = "DATEFIELD_DEMO_AUTO_OPEN")]
    pub auto_open: bool,

    /// Write JSON logs to this file (RUST_LOG controls the filter).
    #[arg(long, env = "DATEFIELD_DEMO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Auto, env = "DATEFIELD_DEMO_THEME")]
    pub theme: ThemeChoice,

    /// Disable mouse capture.
    #[arg(long)]
    pub no_mouse: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    /// Pick from $COLORFGBG.
    Auto,
    Dark,
    Light,
}

impl Opts {
    /// Picker bounds from `--min` / `--max`.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }

    pub fn resolved_locale(&self) -> Locale {
        self.locale.unwrap_or_else(Locale::detect)
    }

    pub fn resolved_theme(&self) -> DateFieldTheme {
        match self.theme {
            ThemeChoice::Dark => DateFieldTheme::dark(),
            ThemeChoice::Light => DateFieldTheme::light(),
            ThemeChoice::Auto if DateFieldTheme::detect_dark_mode() => DateFieldTheme::dark(),
            ThemeChoice::Auto => DateFieldTheme::light(),
        }
    }

    /// Reject `--min` later than `--max`.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(format!("--min {min} is later than --max {max}"));
        }
        Ok(())
    }
}

fn parse_date_arg(s: &str) -> Result<CalendarDate, String> {
    datefield::parse_date(s).map_err(|err| err.to_string())
}
