//! Benchmarks for grid building, rendering, and typing.
//!
//! Run with: cargo bench -p datefield-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use datefield_calendar::{CalendarDate, FixedClock, ViewMonth, build_grid};
use datefield_core::event::{Event, KeyCode};
use datefield_core::geometry::Rect;
use datefield_render::frame::{Frame, HitId};
use datefield_widgets::{
    DateField, DateFieldConfig, DateFieldState, MonthCalendar, StatefulWidget, Widget,
};
use std::hint::black_box;

fn today() -> CalendarDate {
    CalendarDate::new(2024, 1, 31).unwrap()
}

// ============================================================================
// Grid
// ============================================================================

fn bench_build_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar/grid");
    for (y, m) in [(2024, 2), (1, 1), (9999, 12)] {
        let view = ViewMonth::new(y, m).unwrap();
        group.bench_with_input(BenchmarkId::new("collect", format!("{y:04}-{m:02}")), &view, |b, view| {
            b.iter(|| black_box(build_grid(*view).count()))
        });
    }
    group.finish();
}

// ============================================================================
// Rendering
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/date_field");
    let field = DateField::new();
    let area = Rect::new(0, 0, 24, 2);

    let mut closed = DateFieldState::new(
        DateFieldConfig::new()
            .with_clock(FixedClock(today()))
            .with_initial_value(Some(today())),
    );
    let mut frame = Frame::with_hit_grid(40, 12);
    group.bench_function("closed", |b| {
        b.iter(|| {
            frame.clear();
            field.render(area, &mut frame, &mut closed);
            black_box(&frame.buffer);
        })
    });

    let mut open = DateFieldState::new(
        DateFieldConfig::new()
            .with_clock(FixedClock(today()))
            .with_hit_id(HitId::new(1)),
    );
    open.open();
    group.bench_function("open", |b| {
        b.iter(|| {
            frame.clear();
            field.render(area, &mut frame, &mut open);
            black_box(&frame.buffer);
        })
    });

    let calendar = MonthCalendar::new(ViewMonth::new(2024, 2).unwrap()).with_today(today());
    group.bench_function("month_calendar", |b| {
        b.iter(|| {
            frame.clear();
            calendar.render(Rect::new(0, 0, 21, 9), &mut frame);
            black_box(&frame.buffer);
        })
    });
    group.finish();
}

// ============================================================================
// Typing
// ============================================================================

fn bench_typing(c: &mut Criterion) {
    let events: Vec<Event> = "01011990"
        .chars()
        .map(|ch| Event::key(KeyCode::Char(ch)))
        .collect();
    c.bench_function("widget/date_field/type_full_date", |b| {
        b.iter(|| {
            let mut state = DateFieldState::new(DateFieldConfig::new().with_clock(FixedClock(today())));
            state.focus();
            for event in &events {
                state.handle_event(event);
            }
            black_box(state.value())
        })
    });
}

criterion_group!(benches, bench_build_grid, bench_render, bench_typing);
criterion_main!(benches);
