use criterion::{black_box, criterion_group, criterion_main, Criterion};

use turfwar::board::{DistrictId, UnitType, ALL_UNIT_TYPES};
use turfwar::geometry::{point_in_polygon, Point, Size};
use turfwar::setup::{night_city, GANG_INFO};

fn bench_point_in_polygon(c: &mut Criterion) {
    let board = night_city().unwrap();
    let heywood = board.district(DistrictId(3)).unwrap();
    let p = Point::new(300.0, 900.0);
    c.bench_function("point_in_polygon_heywood", |b| {
        b.iter(|| point_in_polygon(black_box(p), black_box(heywood.boundary())))
    });
}

fn bench_select_at(c: &mut Criterion) {
    let mut board = night_city().unwrap();
    let surface = Size::new(400.0, 600.0);
    // Santo Domingo is last in registration order: worst case for first-match.
    let p = Point::new(850.0 * 400.0 / 1024.0, 1200.0 * 600.0 / 1536.0);
    c.bench_function("select_at_last_district", |b| {
        b.iter(|| {
            board
                .select_at(black_box(p), black_box(surface))
                .unwrap()
                .map(|d| d.id())
        })
    });
}

/// A crowded board: every gang holds a few hundred units spread over all
/// districts.
fn crowded_board() -> turfwar::board::Board {
    let mut board = night_city().unwrap();
    for i in 0..300u32 {
        let district = DistrictId(i % 6);
        let gang = GANG_INFO[(i as usize * 7) % GANG_INFO.len()].id;
        let unit_type: UnitType = ALL_UNIT_TYPES[i as usize % ALL_UNIT_TYPES.len()];
        board.spawn_unit(district, gang, unit_type).unwrap();
    }
    board
}

fn bench_aggregate_queries(c: &mut Criterion) {
    let board = crowded_board();
    c.bench_function("dominant_gang_all_districts", |b| {
        b.iter(|| {
            for d in board.districts() {
                black_box(board.dominant_gang(d.id()).unwrap());
            }
        })
    });
    c.bench_function("territories_and_totals_all_gangs", |b| {
        b.iter(|| {
            for g in board.gangs() {
                black_box(board.territories_of(&g.id).unwrap().len());
                black_box(board.total_units_of(&g.id).unwrap());
            }
        })
    });
    c.bench_function("unit_counts_all_pairs", |b| {
        b.iter(|| {
            for d in board.districts() {
                for g in board.gangs() {
                    black_box(board.unit_counts(d.id(), &g.id).unwrap());
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_point_in_polygon,
    bench_select_at,
    bench_aggregate_queries
);
criterion_main!(benches);
