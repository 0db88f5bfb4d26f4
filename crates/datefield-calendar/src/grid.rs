#![forbid(unsafe_code)]

//! The fixed 6 × 7 month grid.
//!
//! Weeks start on Monday. The grid opens with the Monday on or before the
//! first of the month and always holds 42 cells, so every month (including
//! a 28-day February that starts on Monday) renders with the same height.

use chrono::Days;

use crate::date::{CalendarDate, ViewMonth};

/// Columns per grid row (Monday through Sunday).
pub const GRID_COLUMNS: usize = 7;

/// Rows in every grid.
pub const GRID_ROWS: usize = 6;

/// Cells in every grid.
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// One day slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub date: CalendarDate,
    /// Whether `date` falls in the month being viewed.
    pub in_current_month: bool,
}

/// The 42 cells for one view month, in row-major order.
///
/// Iterating yields each cell once. A clone continues from the same position.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    view: ViewMonth,
    start: CalendarDate,
    next: usize,
}

/// Build the grid for `view`.
#[must_use]
pub fn build_grid(view: ViewMonth) -> CalendarGrid {
    let first = view.first_day();
    let lead = u64::from(first.weekday().num_days_from_monday());
    // ViewMonth stays inside years 1..=9999, far from chrono's limits.
    let start = CalendarDate::from_naive(first.naive() - Days::new(lead));
    CalendarGrid {
        view,
        start,
        next: 0,
    }
}

impl CalendarGrid {
    /// The month this grid was built for.
    #[inline]
    #[must_use]
    pub fn view(&self) -> ViewMonth {
        self.view
    }

    /// Date in the top-left cell.
    #[inline]
    #[must_use]
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    /// Date in the bottom-right cell.
    #[must_use]
    pub fn end(&self) -> CalendarDate {
        self.cell(GRID_CELLS - 1).date
    }

    /// The cell at row-major `index` (0..42), regardless of iteration state.
    ///
    /// Indices past the end continue onto following days; callers stay below
    /// [`GRID_CELLS`].
    #[must_use]
    pub fn cell(&self, index: usize) -> GridCell {
        let date = CalendarDate::from_naive(self.start.naive() + Days::new(index as u64));
        GridCell {
            date,
            in_current_month: self.view.contains(date),
        }
    }

    /// Row and column of `date` in this grid, if it is shown.
    #[must_use]
    pub fn position_of(&self, date: CalendarDate) -> Option<(usize, usize)> {
        let offset = date.days_from_ce() - self.start.days_from_ce();
        let offset = usize::try_from(offset).ok()?;
        (offset < GRID_CELLS).then_some((offset / GRID_COLUMNS, offset % GRID_COLUMNS))
    }

    /// All cells grouped into weeks.
    #[must_use]
    pub fn rows(&self) -> [[GridCell; GRID_COLUMNS]; GRID_ROWS] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.cell(row * GRID_COLUMNS + col)))
    }
}

impl Iterator for CalendarGrid {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.next >= GRID_CELLS {
            return None;
        }
        let cell = self.cell(self.next);
        self.next += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = GRID_CELLS - self.next.min(GRID_CELLS);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CalendarGrid {}

impl std::iter::FusedIterator for CalendarGrid {}
