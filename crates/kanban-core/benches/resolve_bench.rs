//! Criterion benchmarks for drop-target resolution.
//!
//! `resolve` runs on every pointer move while a card is dragged, so it is
//! measured against boards of growing size.
//!
//! Run with:
//! ```bash
//! cargo bench --package kanban-core --bench resolve_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kanban_core::{resolve, Board, BoardLayout, Card, CardId, ColumnId, LayoutMetrics, Point};

// ── Fixture builders ──────────────────────────────────────────────────────────

/// Creates a board with `n` cards in every column.
fn build_board_with_n_cards(n: usize) -> Board {
    let mut board = Board::new();
    for column in ColumnId::ALL {
        for i in 0..n {
            board
                .insert(column, i, Card::with_id(format!("{column}-{i}"), "bench"))
                .expect("fixture ids are unique");
        }
    }
    board
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_resolve_over_card(c: &mut Criterion) {
    let metrics = LayoutMetrics::default();
    let mut group = c.benchmark_group("resolve_over_last_card");

    for n in [4usize, 32, 256] {
        let board = build_board_with_n_cards(n);
        let layout = BoardLayout::compute(&board, &metrics);
        let last = &layout
            .column(ColumnId::Done)
            .expect("done column is laid out")
            .cards[n - 1];
        let pointer = Point::new(last.rect.x + 4.0, last.rect.mid_y() + 1.0);
        let dragged = CardId::new("todo-0");

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| resolve(black_box(&layout), black_box(pointer), black_box(&dragged)))
        });
    }
    group.finish();
}

fn bench_resolve_background(c: &mut Criterion) {
    let board = build_board_with_n_cards(32);
    let layout = BoardLayout::compute(&board, &LayoutMetrics::default());
    let dragged = CardId::new("todo-0");

    c.bench_function("resolve_background", |b| {
        b.iter(|| resolve(black_box(&layout), black_box(Point::new(-50.0, -50.0)), &dragged))
    });
}

fn bench_layout_compute(c: &mut Criterion) {
    let board = build_board_with_n_cards(64);
    let metrics = LayoutMetrics::default();

    c.bench_function("layout_compute_64_per_column", |b| {
        b.iter(|| BoardLayout::compute(black_box(&board), black_box(&metrics)))
    });
}

criterion_group!(
    benches,
    bench_resolve_over_card,
    bench_resolve_background,
    bench_layout_compute
);
criterion_main!(benches);
