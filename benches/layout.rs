//! Бенчмарки построения карты мест.
//!
//! Запуск: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use seat_map::services::layout::{generate_layout, parse_blocked_seats};
use seat_map::services::popularity::score_seats;
use seat_map::services::view::render_rows;
use seat_map::{AircraftProfile, SeatMapOptions, SeatStore, SelectionController};

fn bench_generate_layout(c: &mut Criterion) {
    let profile = AircraftProfile::boeing_737_800();
    let blocked = parse_blocked_seats(["1A", "8C", "12F", "20A", "27E"]);

    c.bench_function("generate_layout_737", |b| {
        let mut store = SeatStore::new();
        b.iter(|| {
            let rows = generate_layout(black_box(&profile), &blocked, &mut store);
            black_box(rows)
        })
    });
}

fn bench_score_and_render(c: &mut Criterion) {
    let profile = AircraftProfile::boeing_737_800();
    let blocked = parse_blocked_seats(["1A", "8C"]);
    let mut store = SeatStore::new();
    let Ok(layout) = generate_layout(&profile, &blocked, &mut store) else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("score_seats_737", |b| {
        b.iter(|| score_seats(black_box(&mut store), &mut rng))
    });

    c.bench_function("render_rows_heat_map", |b| {
        b.iter(|| black_box(render_rows(&layout, &store, true)))
    });
}

fn bench_toggle(c: &mut Criterion) {
    let options = SeatMapOptions {
        popularity_seed: Some(7),
        ..SeatMapOptions::default()
    };
    let Ok(mut map) = SelectionController::with_reference_profile(options) else {
        return;
    };

    // Каждое переключение пересобирает все ряды
    c.bench_function("toggle_seat_roundtrip", |b| {
        b.iter(|| {
            map.toggle_seat(black_box("14C"));
            map.toggle_seat(black_box("14C"));
        })
    });
}

criterion_group!(benches, bench_generate_layout, bench_score_and_render, bench_toggle);
criterion_main!(benches);
