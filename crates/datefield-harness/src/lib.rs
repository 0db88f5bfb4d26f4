#![forbid(unsafe_code)]

//! Snapshot testing and scripted drivers for datefield widgets.
//!
//! - **Snapshot testing**: captures `Buffer` output as text and compares it
//!   against stored `.snap` files.
//! - **Scripted driving**: [`FieldDriver`] renders a field, routes keys and
//!   clicks through the same hit-test path a host uses, and records every
//!   change notification.
//!
//! # Quick Start
//!
//! ```ignore
//! use datefield_harness::{FieldDriver, assert_snapshot};
//!
//! #[test]
//! fn picker_renders() {
//!     let mut driver = FieldDriver::new(config, 21, 10);
//!     driver.open();
//!     assert_snapshot!("picker_open", driver.render());
//! }
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update snapshot files:
//!
//! ```sh
//! BLESS=1 cargo test -p datefield-harness
//! ```
//!
//! Snapshot files are stored under `tests/snapshots/` relative to the
//! crate's `CARGO_MANIFEST_DIR`.

pub mod driver;

use std::path::{Path, PathBuf};

use datefield_render::buffer::Buffer;

pub use datefield_core::geometry::Rect;
pub use driver::{FieldDriver, Notifications};

/// The screen as text, one line per row.
///
/// The second half of a wide character is skipped, so each line has the
/// display width of the buffer.
pub fn buffer_to_text(buf: &Buffer) -> String {
    (0..buf.height())
        .map(|y| {
            buf.row_cells(y)
                .iter()
                .filter(|cell| !cell.is_continuation())
                .map(|cell| cell.content)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// How strictly a snapshot is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    /// Ignore trailing blanks on each line and trailing empty lines.
    TrimTrailing,
}

pub fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_owned(),
        MatchMode::TrimTrailing => {
            let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
            let keep = lines.iter().rposition(|line| !line.is_empty()).map_or(0, |i| i + 1);
            lines[..keep].join("\n")
        }
    }
}

/// Line diff of `expected` against `actual`; empty when they match.
///
/// Shared lines are prefixed with a space, lines only in `expected` with
/// `-` and lines only in `actual` with `+`.
pub fn diff_text(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::new();
    }
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();
    let mut out = String::new();
    for i in 0..expected.len().max(actual.len()) {
        match (expected.get(i), actual.get(i)) {
            (Some(e), Some(a)) if e == a => {
                out.push(' ');
                out.push_str(e);
                out.push('\n');
            }
            (e, a) => {
                for (sign, line) in [('-', e), ('+', a)] {
                    if let Some(line) = line {
                        out.push(sign);
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
    }
    out
}

fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    [base_dir, Path::new("tests"), Path::new("snapshots")]
        .iter()
        .collect::<PathBuf>()
        .join(format!("{name}.snap"))
}

/// `BLESS=1` (or `true`) rewrites snapshots instead of checking them.
fn blessing() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Compare `buf` with `<base_dir>/tests/snapshots/<name>.snap`.
///
/// # Panics
///
/// When the snapshot is missing or differs, unless `BLESS=1` is set, in
/// which case the file is (re)written instead.
pub fn assert_buffer_snapshot(name: &str, buf: &Buffer, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);
    let actual = buffer_to_text(buf);

    if blessing() {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).expect("create snapshot directory");
        }
        std::fs::write(&path, &actual).expect("write snapshot");
        return;
    }

    let expected = match std::fs::read_to_string(&path) {
        Ok(expected) => expected,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => panic!(
            "snapshot '{name}' missing at {}; rerun with BLESS=1\n\n{actual}",
            path.display()
        ),
        Err(err) => panic!("cannot read snapshot {}: {err}", path.display()),
    };
    let (expected, actual) = (normalize(&expected, mode), normalize(&actual, mode));
    if expected != actual {
        panic!(
            "snapshot '{name}' differs ({mode:?}, {}); rerun with BLESS=1 to accept\n\n{}",
            path.display(),
            diff_text(&expected, &actual)
        );
    }
}

/// Compare a buffer against `tests/snapshots/<name>.snap` in the calling
/// crate, ignoring trailing whitespace unless a [`MatchMode`] is given.
///
/// ```ignore
/// assert_snapshot!("field_closed", &frame.buffer);
/// assert_snapshot!("field_exact", &frame.buffer, MatchMode::Exact);
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $buf:expr) => {
        $crate::assert_snapshot!($name, $buf, $crate::MatchMode::TrimTrailing)
    };
    ($name:expr, $buf:expr, $mode:expr) => {
        $crate::assert_buffer_snapshot($name, $buf, env!("CARGO_MANIFEST_DIR"), $mode)
    };
}

/// Assert that a buffer renders as `expected`, ignoring trailing
/// whitespace.
#[macro_export]
macro_rules! assert_screen {
    ($buf:expr, $expected:expr) => {{
        let mode = $crate::MatchMode::TrimTrailing;
        let actual = $crate::normalize(&$crate::buffer_to_text($buf), mode);
        let expected = $crate::normalize($expected, mode);
        if actual != expected {
            panic!(
                "screen mismatch\n{}",
                $crate::diff_text(&expected, &actual)
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use datefield_render::cell::Cell;

    #[test]
    fn buffer_to_text_skips_continuations() {
        let mut buf = Buffer::new(4, 2);
        buf.set(0, 0, Cell::from_char('日'));
        buf.set(2, 0, Cell::from_char('a'));
        buf.set(0, 1, Cell::from_char('x'));
        assert_eq!(buffer_to_text(&buf), "日a \nx   ");
    }

    #[test]
    fn normalize_modes() {
        let text = "a  b  \nc\n";
        assert_eq!(normalize(text, MatchMode::Exact), text);
        assert_eq!(normalize(text, MatchMode::TrimTrailing), "a  b\nc");
        assert_eq!(normalize("x \n  \n", MatchMode::TrimTrailing), "x");
    }

    #[test]
    fn diff_reports_changed_lines() {
        assert_eq!(diff_text("a\nb", "a\nb"), "");
        let diff = diff_text("a\nb", "a\nc\nd");
        assert_eq!(diff, " a\n-b\n+c\n+d\n");
    }

    #[test]
    fn assert_screen_accepts_trailing_space() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('o'));
        buf.set(1, 0, Cell::from_char('k'));
        assert_screen!(&buf, "ok");
    }

    #[test]
    #[should_panic(expected = "screen mismatch")]
    fn assert_screen_panics_on_mismatch() {
        let buf = Buffer::new(2, 1);
        assert_screen!(&buf, "no");
    }
}
