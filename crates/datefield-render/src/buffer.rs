#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s in row-major order.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Every wide character has its tail columns filled with
//!    [`Cell::CONTINUATION`]; a wide character that does not fit is not
//!    written at all.
//! 3. Writes outside the current scissor region are dropped.
//!
//! ```
//! use datefield_render::buffer::Buffer;
//! use datefield_render::cell::Cell;
//!
//! let mut buffer = Buffer::new(20, 2);
//! buffer.set(0, 0, Cell::from_char('H'));
//! buffer.set(1, 0, Cell::from_char('i'));
//! ```

use datefield_core::geometry::Rect;

use crate::cell::Cell;

/// A 2D grid of terminal cells.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a new buffer filled with default cells.
    ///
    /// Zero dimensions produce an empty buffer that ignores every write.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell, honoring the scissor and wide-character rules.
    ///
    /// The new background is composited over the existing one, so a
    /// transparent background keeps whatever was painted underneath.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.width().max(1);
        let scissor = self.current_scissor();
        for i in 0..width {
            let Ok(dx) = u16::try_from(i) else {
                return;
            };
            let cx = x.saturating_add(dx);
            if self.index(cx, y).is_none() || !scissor.contains(cx, y) {
                return;
            }
        }

        self.cleanup_overlap(x, y);
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let bg = cell.bg.over(self.cells[idx].bg);
        self.cells[idx] = Cell { bg, ..cell };

        for i in 1..width {
            let cx = x + i as u16;
            self.cleanup_overlap(cx, y);
            if let Some(tail) = self.index(cx, y) {
                self.cells[tail] = Cell { bg, ..Cell::CONTINUATION };
            }
        }
    }

    /// Blank out any wide character that (x, y) is part of.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let current = self.cells[idx];
        if current.width() > 1 {
            for i in 1..current.width() {
                let cx = x.saturating_add(i as u16);
                if let Some(tail) = self.index(cx, y) {
                    if self.cells[tail].is_continuation() {
                        self.cells[tail] = Cell::default().with_bg(self.cells[tail].bg);
                    }
                }
            }
        } else if current.is_continuation() {
            let mut hx = x;
            while hx > 0 {
                hx -= 1;
                let Some(head) = self.index(hx, y) else {
                    break;
                };
                let head_cell = self.cells[head];
                if head_cell.is_continuation() {
                    continue;
                }
                if head_cell.width() > 1 {
                    for cx in hx..hx.saturating_add(head_cell.width() as u16) {
                        if let Some(i) = self.index(cx, y) {
                            self.cells[i] = Cell::default().with_bg(self.cells[i].bg);
                        }
                    }
                }
                break;
            }
        }
    }

    /// Fill a rectangular region with the given cell, clipped to the scissor.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        if clipped.is_empty() {
            return;
        }
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells of row `y`; empty when `y` is out of range.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Push a clipping region. The effective region is the intersection of
    /// everything pushed.
    pub fn push_scissor(&mut self, rect: Rect) {
        let intersected = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a clipping region. The base region is never popped.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// The current effective clipping region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    /// Whether two buffers hold identical cells.
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}
