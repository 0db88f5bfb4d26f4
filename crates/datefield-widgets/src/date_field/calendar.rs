#![forbid(unsafe_code)]

//! Month grid popup.
//!
//! ```text
//! «‹  February 2024  ›»
//!  Mo Tu We Th Fr Sa Su
//!  29 30 31  1  2  3  4
//!   5  6  7  8  9 10 11
//!  ...
//!         Today
//! ```
//!
//! [`MonthCalendar`] only draws and registers hit regions. Clicks come back
//! through [`decode_hit`] and are applied by the field state.

use datefield_calendar::{
    Bounds, CalendarDate, GRID_COLUMNS, Locale, ViewMonth, build_grid, is_selectable,
};
use datefield_core::geometry::Rect;
use datefield_render::cell::Cell;
use datefield_render::frame::{Frame, HitData, HitId, HitRegion};
use datefield_style::{DateFieldTheme, Style};

use crate::{Widget, apply_style, draw_text_span, text_width};

/// Popup width in columns: seven 3-column day cells.
pub const POPUP_WIDTH: u16 = 21;
/// Popup height: header, weekday row, six weeks, footer.
pub const POPUP_HEIGHT: u16 = 9;

const CELL_WIDTH: u16 = 3;
const TITLE_X: u16 = 3;
const TITLE_WIDTH: u16 = 15;
const GRID_Y: u16 = 2;
const FOOTER_Y: u16 = 8;

/// Hit data codes for [`HitRegion::Button`].
pub(crate) mod button {
    use datefield_render::frame::HitData;

    pub const TOGGLE: HitData = 1;
    pub const PREV_YEAR: HitData = 2;
    pub const PREV_MONTH: HitData = 3;
    pub const NEXT_MONTH: HitData = 4;
    pub const NEXT_YEAR: HitData = 5;
    pub const TODAY: HitData = 6;
}

/// [`HitRegion::Custom`] tag for day cells.
const CELL_TAG: u8 = 1;

/// What a pointer landed on, decoded from the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerHit {
    /// The toggle glyph at the end of the field.
    Toggle,
    /// The text input itself.
    Field,
    /// Popup background that is not a control.
    Surface,
    PrevYear,
    PrevMonth,
    NextMonth,
    NextYear,
    /// The footer "today" button.
    Today,
    /// A day cell.
    Cell(CalendarDate),
}

pub(crate) fn encode_cell(date: CalendarDate) -> HitData {
    // Shift into u64 so dates before the epoch day still encode.
    (i64::from(date.days_from_ce()) - i64::from(i32::MIN)) as HitData
}

fn decode_cell(data: HitData) -> Option<CalendarDate> {
    let shifted = i64::try_from(data).ok()?;
    let days = i32::try_from(shifted + i64::from(i32::MIN)).ok()?;
    CalendarDate::from_days_from_ce(days)
}

/// Decode a hit registered by the field or its popup.
#[must_use]
pub fn decode_hit(region: HitRegion, data: HitData) -> Option<PickerHit> {
    match region {
        HitRegion::Content => Some(PickerHit::Field),
        HitRegion::Border => Some(PickerHit::Surface),
        HitRegion::Button => match data {
            button::TOGGLE => Some(PickerHit::Toggle),
            button::PREV_YEAR => Some(PickerHit::PrevYear),
            button::PREV_MONTH => Some(PickerHit::PrevMonth),
            button::NEXT_MONTH => Some(PickerHit::NextMonth),
            button::NEXT_YEAR => Some(PickerHit::NextYear),
            button::TODAY => Some(PickerHit::Today),
            _ => None,
        },
        HitRegion::Custom(CELL_TAG) => decode_cell(data).map(PickerHit::Cell),
        HitRegion::Custom(_) | HitRegion::None => None,
    }
}

/// Where the popup goes for a field whose input row is `field`.
///
/// Below the field when it fits inside `bounds`, otherwise above it when
/// that fits, otherwise below and clipped. Shifted left to stay inside
/// `bounds` horizontally.
#[must_use]
pub fn popup_rect(field: Rect, bounds: Rect) -> Rect {
    let below = field.y.saturating_add(1);
    let y = if below.saturating_add(POPUP_HEIGHT) <= bounds.bottom() {
        below
    } else if field.y >= bounds.y.saturating_add(POPUP_HEIGHT) {
        field.y - POPUP_HEIGHT
    } else {
        below
    };
    let x = if field.x.saturating_add(POPUP_WIDTH) > bounds.right() {
        bounds.right().saturating_sub(POPUP_WIDTH).max(bounds.x)
    } else {
        field.x
    };
    Rect::new(x, y, POPUP_WIDTH, POPUP_HEIGHT)
}

/// Calendar grid for one month.
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    view: ViewMonth,
    focused: Option<CalendarDate>,
    selected: Option<CalendarDate>,
    today: Option<CalendarDate>,
    bounds: Bounds,
    locale: Locale,
    theme: DateFieldTheme,
    hit_id: Option<HitId>,
}

impl MonthCalendar {
    pub fn new(view: ViewMonth) -> Self {
        Self {
            view,
            focused: None,
            selected: None,
            today: None,
            bounds: Bounds::default(),
            locale: Locale::default(),
            theme: DateFieldTheme::default(),
            hit_id: None,
        }
    }

    #[must_use]
    pub fn with_focused(mut self, focused: Option<CalendarDate>) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: Option<CalendarDate>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: DateFieldTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Register hit regions under `id` when rendering.
    #[must_use]
    pub fn with_hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    fn register(&self, frame: &mut Frame, rect: Rect, region: HitRegion, data: HitData) {
        if let Some(id) = self.hit_id {
            frame.register_hit(rect, id, region, data);
        }
    }

    fn day_style(&self, date: CalendarDate, in_month: bool) -> Style {
        let theme = &self.theme;
        let mut style = if in_month {
            theme.day
        } else {
            theme.outside_month
        };
        if self.today == Some(date) {
            style = style.patch(theme.today);
        }
        if self.selected == Some(date) {
            style = style.patch(theme.selected);
        }
        if self.focused == Some(date) {
            style = style.patch(theme.focused_cell);
        }
        if !date.in_text_window() || !is_selectable(date, &self.bounds) {
            style = style.patch(theme.unselectable);
        }
        style
    }

    fn render_header(&self, area: Rect, frame: &mut Frame) {
        let y = area.y;
        let right = area.right();
        let header = self.theme.header;
        let controls = [
            (0, "«", button::PREV_YEAR),
            (1, "‹", button::PREV_MONTH),
            (POPUP_WIDTH - 2, "›", button::NEXT_MONTH),
            (POPUP_WIDTH - 1, "»", button::NEXT_YEAR),
        ];
        for (dx, glyph, code) in controls {
            let x = area.x.saturating_add(dx);
            draw_text_span(&mut frame.buffer, x, y, glyph, header, right);
            self.register(frame, Rect::new(x, y, 1, 1), HitRegion::Button, code);
        }

        let title = self.locale.title(self.view);
        let width = u16::try_from(text_width(&title)).unwrap_or(u16::MAX);
        let pad = TITLE_WIDTH.saturating_sub(width) / 2;
        let start = area.x.saturating_add(TITLE_X);
        draw_text_span(
            &mut frame.buffer,
            start.saturating_add(pad),
            y,
            &title,
            header,
            start.saturating_add(TITLE_WIDTH).min(right),
        );
    }

    fn render_weekdays(&self, area: Rect, frame: &mut Frame) {
        let y = area.y.saturating_add(1);
        for (col, name) in self.locale.weekday_header().iter().enumerate() {
            let x = area.x.saturating_add(col as u16 * CELL_WIDTH);
            let label = format!("{name:>3}");
            draw_text_span(&mut frame.buffer, x, y, &label, self.theme.weekday, area.right());
        }
    }

    fn render_days(&self, area: Rect, frame: &mut Frame) {
        for (index, cell) in build_grid(self.view).enumerate() {
            let row = (index / GRID_COLUMNS) as u16;
            let col = (index % GRID_COLUMNS) as u16;
            let x = area.x.saturating_add(col * CELL_WIDTH);
            let y = area.y.saturating_add(GRID_Y + row);
            let label = format!("{:>2}", cell.date.day());
            let style = self.day_style(cell.date, cell.in_current_month);
            draw_text_span(&mut frame.buffer, x.saturating_add(1), y, &label, style, area.right());
            self.register(
                frame,
                Rect::new(x, y, CELL_WIDTH, 1),
                HitRegion::Custom(CELL_TAG),
                encode_cell(cell.date),
            );
        }
    }

    fn render_footer(&self, area: Rect, frame: &mut Frame) {
        let label = self.locale.today_label();
        let width = u16::try_from(text_width(label)).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(POPUP_WIDTH.saturating_sub(width) / 2);
        let y = area.y.saturating_add(FOOTER_Y);
        draw_text_span(&mut frame.buffer, x, y, label, self.theme.footer, area.right());
        self.register(frame, Rect::new(x, y, width, 1), HitRegion::Button, button::TODAY);
    }
}

impl Widget for MonthCalendar {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "MonthCalendar",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let area = Rect::new(
            area.x,
            area.y,
            area.width.min(POPUP_WIDTH),
            area.height.min(POPUP_HEIGHT),
        );
        if area.is_empty() {
            return;
        }

        frame.buffer.push_scissor(area);

        let mut blank = Cell::from_char(' ');
        apply_style(&mut blank, self.theme.surface);
        frame.buffer.fill(area, blank);
        self.register(frame, area, HitRegion::Border, 0);

        self.render_header(area, frame);
        self.render_weekdays(area, frame);
        self.render_days(area, frame);
        self.render_footer(area, frame);

        frame.buffer.pop_scissor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datefield_render::cell::StyleFlags;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::new(y, m, day).unwrap()
    }

    fn row_text(frame: &Frame, y: u16) -> String {
        frame
            .buffer
            .row_cells(y)
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.content)
            .collect()
    }

    fn render(calendar: &MonthCalendar) -> Frame {
        let mut frame = Frame::with_hit_grid(POPUP_WIDTH, POPUP_HEIGHT);
        calendar.render(frame.bounds(), &mut frame);
        frame
    }

    #[test]
    fn layout_for_february_2024() {
        let frame = render(&MonthCalendar::new(ViewMonth::new(2024, 2).unwrap()));
        assert_eq!(row_text(&frame, 0), "«‹  February 2024  ›»");
        assert_eq!(row_text(&frame, 1), " Mo Tu We Th Fr Sa Su");
        assert_eq!(row_text(&frame, 2), " 29 30 31  1  2  3  4");
        assert_eq!(row_text(&frame, 6), " 26 27 28 29  1  2  3");
        assert_eq!(row_text(&frame, 7), "  4  5  6  7  8  9 10");
        assert_eq!(row_text(&frame, 8), "        Today        ");
    }

    #[test]
    fn localized_labels() {
        let calendar = MonthCalendar::new(ViewMonth::new(2024, 3).unwrap()).with_locale(Locale::De);
        let frame = render(&calendar);
        assert!(row_text(&frame, 0).contains("März 2024"));
        assert_eq!(row_text(&frame, 1), " Mo Di Mi Do Fr Sa So");
        assert!(row_text(&frame, 8).contains("Heute"));
    }

    #[test]
    fn hits_decode_back() {
        let calendar = MonthCalendar::new(ViewMonth::new(2024, 2).unwrap()).with_hit_id(HitId::new(7));
        let frame = render(&calendar);

        let (id, region, data) = frame.hit_test(1, 0).unwrap();
        assert_eq!(id, HitId::new(7));
        assert_eq!(decode_hit(region, data), Some(PickerHit::PrevMonth));
        let (_, region, data) = frame.hit_test(20, 0).unwrap();
        assert_eq!(decode_hit(region, data), Some(PickerHit::NextYear));

        // Thursday column, first row: 1 February.
        let (_, region, data) = frame.hit_test(10, 2).unwrap();
        assert_eq!(decode_hit(region, data), Some(PickerHit::Cell(d(2024, 2, 1))));

        let (_, region, data) = frame.hit_test(10, 8).unwrap();
        assert_eq!(decode_hit(region, data), Some(PickerHit::Today));

        // Gap in the header between the arrows and the title.
        let (_, region, data) = frame.hit_test(2, 0).unwrap();
        assert_eq!(decode_hit(region, data), Some(PickerHit::Surface));
    }

    #[test]
    fn no_hit_id_registers_nothing() {
        let frame = render(&MonthCalendar::new(ViewMonth::new(2024, 2).unwrap()));
        assert_eq!(frame.hit_test(10, 2), None);
    }

    #[test]
    fn unselectable_days_are_struck_through() {
        let calendar = MonthCalendar::new(ViewMonth::new(2024, 1).unwrap())
            .with_bounds(Bounds::new(Some(d(2024, 1, 10)), Some(d(2024, 1, 20))))
            .with_focused(Some(d(2024, 1, 9)));
        let frame = render(&calendar);
        // 2024-01-01 is a Monday, so the 9th is row 1, column 1.
        let nine = frame.buffer.get(5, 3).copied().unwrap();
        assert_eq!(nine.content, '9');
        assert!(nine.attrs.contains(StyleFlags::STRIKETHROUGH | StyleFlags::REVERSE));
        let ten = frame.buffer.get(7, 3).copied().unwrap();
        assert_eq!(ten.content, '1');
        assert!(!ten.attrs.contains(StyleFlags::STRIKETHROUGH));
    }

    #[test]
    fn cell_encoding_round_trips_window_edges() {
        for date in [CalendarDate::EARLIEST, CalendarDate::LATEST, d(2024, 2, 29)] {
            assert_eq!(decode_cell(encode_cell(date)), Some(date));
        }
        assert_eq!(decode_hit(HitRegion::Custom(9), 0), None);
        assert_eq!(decode_hit(HitRegion::Button, 99), None);
    }

    #[test]
    fn popup_placement() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_rect(Rect::new(4, 2, 20, 1), screen), Rect::new(4, 3, 21, 9));
        assert_eq!(popup_rect(Rect::new(4, 20, 20, 1), screen), Rect::new(4, 11, 21, 9));
        assert_eq!(popup_rect(Rect::new(70, 2, 10, 1), screen), Rect::new(59, 3, 21, 9));
        let tiny = Rect::new(0, 0, 30, 5);
        assert_eq!(popup_rect(Rect::new(0, 1, 10, 1), tiny), Rect::new(0, 2, 21, 9));
    }
}
