use std::hint::black_box;
use std::str::FromStr;

use criterion::{Criterion, criterion_group, criterion_main};
use damier::board::{Board, components::Square};
use damier::moves;
use damier::utils::perft::perft;

/// White king on D2 ringed by four red men: the deepest capture tree a
/// small position produces.
const CHAIN_FEN: &str = "8/8/8/2r1r3/8/2r1r3/3W4/8 w";

fn bench_quiet_move_generation(c: &mut Criterion) {
    let board = Board::new();
    let piece = board.occupant(Square::from_str("d3").unwrap()).unwrap();

    c.bench_function("legal_moves_quiet", |b| {
        b.iter(|| black_box(moves::legal_moves(black_box(&piece), &board)));
    });
}

fn bench_capture_chain_generation(c: &mut Criterion) {
    let board = Board::from_fen(CHAIN_FEN).unwrap();
    let piece = board.occupant(Square::from_str("d2").unwrap()).unwrap();

    c.bench_function("legal_moves_capture_chain", |b| {
        b.iter(|| black_box(moves::legal_moves(black_box(&piece), &board)));
    });
}

fn bench_all_legal_moves(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("all_legal_moves_start", |b| {
        b.iter(|| black_box(board.all_legal_moves()));
    });
}

fn bench_perft(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("perft_3", |b| {
        b.iter(|| black_box(perft(&board, 3, false).nodes));
    });
}

criterion_group!(
    benches,
    bench_quiet_move_generation,
    bench_capture_chain_generation,
    bench_all_legal_moves,
    bench_perft
);
criterion_main!(benches);
