use std::time::{Duration, Instant};

use crate::board::Board;

/// Outcome of one perft walk.
#[derive(Debug)]
pub struct PerftResult {
    /// Total nodes counted
    pub nodes: u64,
    /// Time taken
    pub duration: Duration,
    /// Nodes per second
    pub nps: u64,
    /// Move breakdown showing count for each first move
    pub move_counts: Option<Vec<(String, u64)>>,
}

impl PerftResult {
    /// Creates a new PerftResult with the given data
    pub fn new(nodes: u64, duration: Duration, move_counts: Option<Vec<(String, u64)>>) -> Self {
        let nanos = duration.as_nanos();
        let nps = if nanos > 0 {
            nodes * 1_000_000_000 / nanos as u64
        } else {
            0
        };

        Self {
            nodes,
            duration,
            nps,
            move_counts,
        }
    }
}

/// Counts the move sequences of length `depth` playable from `board`.
///
/// There is no unmake here: each generated move is applied to a clone of the
/// board before recursing. Positions where the side to move has no legal
/// move contribute nothing below them.
pub fn perft(board: &Board, depth: u8, divide: bool) -> PerftResult {
    let start_time = Instant::now();

    if depth == 0 {
        return PerftResult::new(1, start_time.elapsed(), None);
    }

    let mut total_nodes = 0;
    let mut move_counts = if divide { Some(Vec::new()) } else { None };

    for (piece, map) in board.all_legal_moves() {
        for destination in map.keys() {
            let mut child = board.clone();
            child
                .try_move(piece.square, *destination)
                .expect("generated moves should be applicable");

            let sub_nodes = if depth == 1 {
                1
            } else {
                perft(&child, depth - 1, false).nodes
            };
            total_nodes += sub_nodes;

            if let Some(ref mut counts) = move_counts {
                counts.push((format!("{}-{}", piece.square, destination), sub_nodes));
            }
        }
    }

    PerftResult::new(total_nodes, start_time.elapsed(), move_counts)
}

/// Performs a Perft test and prints a detailed breakdown
pub fn perft_divide(board: &Board, depth: u8) -> PerftResult {
    println!("Starting perft...");
    let result = perft(board, depth, true);

    if let Some(ref move_counts) = result.move_counts {
        println!("Perft results at depth {depth}");
        println!("----------------------------");

        for (mov, count) in move_counts {
            println!("{mov}: {count}");
        }

        println!("----------------------------");
        println!("Total nodes: {}", result.nodes);
        println!("Time: {} ms", result.duration.as_millis());
        println!("Nodes per second: {}", result.nps);
    }

    result
}

/// Runs a suite of perft tests for depths 1 through max_depth
pub fn run_perft_suite(board: &Board, max_depth: u8) {
    println!("Running Perft suite up to depth {max_depth}");
    println!("----------------------------");

    for depth in 1..=max_depth {
        let start = Instant::now();
        let nodes = perft(board, depth, false).nodes;
        let duration = start.elapsed();

        let nanos = duration.as_nanos();
        let nps = if nanos > 0 {
            nodes * 1_000_000_000 / nanos as u64
        } else {
            0
        };

        println!(
            "Depth {}: {} nodes in {} ms ({} nps)",
            depth,
            nodes,
            duration.as_millis(),
            nps
        );
    }

    println!("----------------------------");
}

#[cfg(test)]
mod perft_tests {
    use super::*;
    use crate::utils::log::init;

    /// Known perft values for the starting position. Each side opens with
    /// seven man steps (the edge man has a single diagonal).
    const STARTING_PERFT: &[(u8, u64)] = &[(0, 1), (1, 7), (2, 49)];

    #[test]
    fn test_perft_starting_position() {
        init();
        let board = Board::new();
        for &(depth, nodes) in STARTING_PERFT {
            assert_eq!(
                perft(&board, depth, false).nodes,
                nodes,
                "perft({depth}) mismatch"
            );
        }
    }

    #[test]
    fn test_perft_divide_sums_to_total() {
        let board = Board::new();
        let result = perft(&board, 2, true);
        let breakdown = result.move_counts.expect("divide requested");

        assert_eq!(breakdown.len(), 7);
        let sum: u64 = breakdown.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, result.nodes);
    }

    #[test]
    fn test_perft_counts_forced_capture_lines() {
        // White's only legal move is the jump, after which red has nothing
        // left to move: one node at depth 1, none at depth 2.
        let board = Board::from_fen("8/8/8/8/8/2r5/1w6/8 w").unwrap();
        assert_eq!(perft(&board, 1, false).nodes, 1);
        assert_eq!(perft(&board, 2, false).nodes, 0);
    }
}
