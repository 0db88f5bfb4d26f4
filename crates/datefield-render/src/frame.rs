#![forbid(unsafe_code)]

//! Render target for one pass: cells, cursor, and who owns each cell.
//!
//! Widgets draw into [`Frame::buffer`] and tag the cells they want to react
//! to with [`Frame::register_hit`]. After the pass the host maps a pointer
//! position back to `(widget, region, data)` with [`Frame::hit_test`].
//!
//! ```
//! use datefield_render::cell::Cell;
//! use datefield_render::frame::{Frame, HitId, HitRegion};
//! use datefield_core::geometry::Rect;
//!
//! let mut frame = Frame::with_hit_grid(20, 4);
//! frame.buffer.set(0, 0, Cell::from_char('H'));
//! frame.register_hit(Rect::new(0, 0, 10, 1), HitId::new(7), HitRegion::Content, 0);
//! frame.set_cursor(Some((2, 0)));
//!
//! assert_eq!(frame.hit_test(3, 0), Some((HitId::new(7), HitRegion::Content, 0)));
//! assert_eq!(frame.hit_test(3, 2), None);
//! ```

use datefield_core::geometry::Rect;

use crate::buffer::Buffer;

/// Names the widget instance that owns a hit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Widget-defined payload, e.g. an encoded date or button code.
pub type HitData = u64;

/// What part of a widget a hit cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    #[default]
    None,
    /// Editable or primary content.
    Content,
    /// Background that swallows clicks without acting on them.
    Border,
    /// A button; [`HitData`] says which.
    Button,
    /// Widget-specific tag.
    Custom(u8),
}

/// One owned cell of the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HitCell {
    id: HitId,
    region: HitRegion,
    data: HitData,
}

/// Owner of every screen cell, row-major.
///
/// Later registrations overwrite earlier ones, so a popup drawn after the
/// content below it also owns the hits there.
#[derive(Debug, Clone)]
pub struct HitGrid {
    bounds: Rect,
    cells: Vec<Option<HitCell>>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            bounds: Rect::from_size(width, height),
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    fn row_range(&self, y: u16, x: u16, width: u16) -> std::ops::Range<usize> {
        let start = usize::from(y) * usize::from(self.bounds.width) + usize::from(x);
        start..start + usize::from(width)
    }

    /// Claim every cell of `rect` that lies on the grid.
    pub fn register(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        let Some(rect) = rect.intersection_opt(&self.bounds) else {
            return;
        };
        let owner = Some(HitCell { id, region, data });
        for y in rect.y..rect.bottom() {
            let range = self.row_range(y, rect.x, rect.width);
            self.cells[range].fill(owner);
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let index = self.row_range(y, x, 1).start;
        self.cells[index].map(|cell| (cell.id, cell.region, cell.data))
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// Everything one render pass produces.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    /// `None` for frames that never see pointer input (benchmarks, dumps).
    pub hit_grid: Option<HitGrid>,
    /// Where the terminal cursor goes after presenting, if anywhere.
    pub cursor_position: Option<(u16, u16)>,
    pub cursor_visible: bool,
}

impl Frame {
    /// A frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
            cursor_position: None,
            cursor_visible: true,
        }
    }

    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            hit_grid: Some(HitGrid::new(width, height)),
            ..Self::new(width, height)
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset the buffer, hit grid, and cursor for the next render.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = &mut self.hit_grid {
            grid.clear();
        }
        self.cursor_position = None;
    }

    #[inline]
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    /// Claim `rect` (clipped to the current scissor) for `id`.
    ///
    /// Returns `false` when the frame has no hit grid.
    pub fn register_hit(
        &mut self,
        rect: Rect,
        id: HitId,
        region: HitRegion,
        data: HitData,
    ) -> bool {
        let scissor = self.buffer.current_scissor();
        let Some(grid) = &mut self.hit_grid else {
            return false;
        };
        grid.register(rect.intersection(&scissor), id, region, data);
        true
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref()?.hit_test(x, y)
    }
}
