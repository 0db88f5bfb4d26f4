#![forbid(unsafe_code)]

//! Presenter: state-tracked terminal output.
//!
//! Keeps the previously presented buffer and only writes cells that
//! changed, tracking the current style and cursor position so escape
//! sequences are emitted only when needed. All output is buffered and
//! flushed once per frame.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use datefield::render::buffer::Buffer;
use datefield::render::cell::{Cell, PackedRgba, StyleFlags};
use datefield::render::frame::Frame;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// Writes frames to a terminal.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    previous: Option<Buffer>,
    /// Current style state (None = unknown/reset).
    current_style: Option<CellStyle>,
    /// Where the terminal cursor is after the last write, if known.
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_style: None,
            cursor: None,
        }
    }

    /// Forget what is on screen so the next frame is drawn in full.
    ///
    /// Call after a resize.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.current_style = None;
        self.cursor = None;
    }

    /// Present `frame`, writing only cells that changed since the last call.
    pub fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let buffer = &frame.buffer;
        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != buffer.width() || prev.height() != buffer.height());
        if full {
            queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            self.current_style = None;
            self.cursor = None;
        }

        queue!(self.writer, Hide)?;
        let mut changed = 0usize;
        for y in 0..buffer.height() {
            for (x, cell) in buffer.row_cells(y).iter().enumerate() {
                let x = x as u16;
                let unchanged = !full
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|prev| prev == cell);
                if unchanged || cell.is_continuation() {
                    continue;
                }
                self.emit_cell(x, y, cell)?;
                changed += 1;
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.current_style = None;

        match frame.cursor_position {
            Some((x, y)) if frame.cursor_visible => {
                queue!(self.writer, MoveTo(x, y), Show)?;
                self.cursor = Some((x, y));
            }
            _ => {}
        }

        tracing::trace!(changed, full, "frame presented");
        self.previous = Some(buffer.clone());
        self.writer.flush()
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.writer, MoveTo(x, y))?;
        }
        self.emit_style_changes(cell)?;
        queue!(self.writer, Print(cell.content))?;
        let width = cell.width().max(1) as u16;
        self.cursor = Some((x.saturating_add(width), y));
        Ok(())
    }

    /// Reset and re-apply when the style differs from the current one.
    fn emit_style_changes(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        if self.current_style == Some(style) {
            return Ok(());
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        if let Some(fg) = to_color(style.fg) {
            queue!(self.writer, SetForegroundColor(fg))?;
        }
        if let Some(bg) = to_color(style.bg) {
            queue!(self.writer, SetBackgroundColor(bg))?;
        }
        for (flag, attribute) in ATTRIBUTES {
            if style.attrs.contains(flag) {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }

        self.current_style = Some(style);
        Ok(())
    }

    /// Get the inner writer (consuming the presenter).
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

const ATTRIBUTES: [(StyleFlags, Attribute); 8] = [
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::BLINK, Attribute::SlowBlink),
    (StyleFlags::REVERSE, Attribute::Reverse),
    (StyleFlags::HIDDEN, Attribute::Hidden),
    (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
];

fn to_color(color: PackedRgba) -> Option<Color> {
    (!color.is_transparent()).then(|| Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    })
}
