use criterion::{black_box, criterion_group, criterion_main, Criterion};
use distinto::{
    examples::{map_colouring, sudoku},
    solver::search::BacktrackingSearch,
};

fn bench_map_colouring(c: &mut Criterion) {
    c.bench_function("map_colouring_mrv", |b| {
        b.iter(|| {
            let mut store = map_colouring::australia().unwrap();
            let (solution, _stats) = BacktrackingSearch::mrv_with_propagation().solve(&mut store);
            black_box(solution)
        })
    });

    c.bench_function("map_colouring_chronological", |b| {
        b.iter(|| {
            let mut store = map_colouring::australia().unwrap();
            let (solution, _stats) = BacktrackingSearch::chronological().solve(&mut store);
            black_box(solution)
        })
    });
}

fn bench_latin_square_ac3(c: &mut Criterion) {
    c.bench_function("latin_square_4x4_ac3", |b| {
        b.iter(|| {
            let mut store = sudoku::latin_square_store(4, &[(0, 0, 1)]).unwrap();
            black_box(store.arc_consistency())
        })
    });
}

fn bench_latin_square_search(c: &mut Criterion) {
    c.bench_function("latin_square_6x6_solve", |b| {
        b.iter(|| {
            let mut store = sudoku::latin_square_store(6, &[(0, 0, 1), (1, 1, 2)]).unwrap();
            black_box(store.backtracking_search())
        })
    });
}

criterion_group!(
    benches,
    bench_map_colouring,
    bench_latin_square_ac3,
    bench_latin_square_search
);
criterion_main!(benches);
