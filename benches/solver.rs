use criterion::{black_box, criterion_group, criterion_main, Criterion};

use klotski_solver::board::Board;
use klotski_solver::config::SolverConfig;
use klotski_solver::Solve;

fn bench_small_boards(c: &mut Criterion) {
    bench_board(c, "two-move", include_str!("../boards/two-move.txt"));
    bench_board(c, "one-move", include_str!("../boards/one-move.txt"));
}

fn bench_board(c: &mut Criterion, name: &str, board: &str) {
    let board: Board = board.parse().unwrap();
    let config = SolverConfig::default().with_workers(1);

    c.bench_function(name, |b| {
        b.iter(|| black_box(&board).solve(black_box(&config)).unwrap())
    });
}

criterion_group!(benches, bench_small_boards);
criterion_main!(benches);
