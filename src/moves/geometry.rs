//! Pure movement geometry: which squares a piece could step to or jump to
//! from a given square, ignoring whose turn it is. Men act on the two
//! forward diagonals only, kings slide along all four diagonal rays.

use crate::board::{
    Board,
    components::{PieceInfo, Rank, Side, Square},
};

use super::Direction;

/// The two forward diagonals for a man of `side`, right first.
const fn man_diagonals(side: Side) -> [(i8, i8); 2] {
    let fwd = side.forward();
    [(fwd, 1), (fwd, -1)]
}

/// Non-capturing destinations reachable from `from`.
///
/// Man: the one-step forward diagonals that are on the board and empty.
/// King: every empty square along each diagonal ray, each ray ending at the
/// board edge or just before the first occupied square.
pub fn step_targets(board: &Board, from: Square, side: Side, rank: Rank) -> Vec<Square> {
    match rank {
        Rank::Man => man_steps(board, from, side),
        Rank::King => king_steps(board, from),
    }
}

/// Capture opportunities from `from`, as `(landing, captured)` pairs.
///
/// Pieces already jumped along the current chain are passed in `captured`;
/// they stay on the board for the whole search, so they still block rays,
/// but they can never be jumped a second time.
pub fn capture_targets(
    board: &Board,
    from: Square,
    side: Side,
    rank: Rank,
    captured: &[PieceInfo],
) -> Vec<(Square, PieceInfo)> {
    match rank {
        Rank::Man => man_captures(board, from, side, captured),
        Rank::King => king_captures(board, from, side, captured),
    }
}

fn man_steps(board: &Board, from: Square, side: Side) -> Vec<Square> {
    let mut targets = Vec::new();
    for (dr, dc) in man_diagonals(side) {
        if let Some(to) = from.offset(dr, dc) {
            if board.occupant(to).is_none() {
                targets.push(to);
            }
        }
    }
    targets
}

fn king_steps(board: &Board, from: Square) -> Vec<Square> {
    let mut targets = Vec::new();
    for (dr, dc) in Direction::DIAG {
        let mut cursor = from;
        while let Some(to) = cursor.offset(dr, dc) {
            if board.occupant(to).is_some() {
                break;
            }
            targets.push(to);
            cursor = to;
        }
    }
    targets
}

fn man_captures(
    board: &Board,
    from: Square,
    side: Side,
    captured: &[PieceInfo],
) -> Vec<(Square, PieceInfo)> {
    let mut jumps = Vec::new();
    for (dr, dc) in man_diagonals(side) {
        let Some(target) = from.offset(dr, dc) else {
            continue;
        };
        let Some(landing) = from.offset(2 * dr, 2 * dc) else {
            continue;
        };
        if board.occupant(landing).is_some() {
            continue;
        }
        if let Some(victim) = board.occupant(target) {
            if victim.side != side && !captured.contains(&victim) {
                jumps.push((landing, victim));
            }
        }
    }
    jumps
}

fn king_captures(
    board: &Board,
    from: Square,
    side: Side,
    captured: &[PieceInfo],
) -> Vec<(Square, PieceInfo)> {
    let mut jumps = Vec::new();
    for (dr, dc) in Direction::DIAG {
        let mut cursor = from;
        while let Some(to) = cursor.offset(dr, dc) {
            let Some(victim) = board.occupant(to) else {
                cursor = to;
                continue;
            };
            // First occupied square on the ray is the only candidate.
            if victim.side != side && !captured.contains(&victim) {
                if let Some(landing) = to.offset(dr, dc) {
                    if board.occupant(landing).is_none() {
                        jumps.push((landing, victim));
                    }
                }
            }
            break;
        }
    }
    jumps
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_man_steps_forward_only() {
        let board = Board::from_fen("8/8/8/8/8/8/8/1w6 w").unwrap();
        let targets = step_targets(&board, sq("b1"), Side::White, Rank::Man);
        assert_eq!(targets, vec![sq("c2"), sq("a2")]);

        // A red man on the same square walks the other way, and B1 is on
        // its back row, so nothing is forward of it.
        let board = Board::from_fen("8/8/8/8/8/8/8/1r6 r").unwrap();
        let targets = step_targets(&board, sq("b1"), Side::Red, Rank::Man);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_man_steps_blocked_by_any_piece() {
        let board = Board::from_fen("8/8/8/8/8/2r5/1w6/8 w").unwrap();
        let targets = step_targets(&board, sq("b2"), Side::White, Rank::Man);
        assert_eq!(targets, vec![sq("a3")]);
    }

    #[test]
    fn test_king_steps_cover_open_rays() {
        let board = Board::from_fen("8/8/8/8/3W4/8/8/8 w").unwrap();
        let targets = step_targets(&board, sq("d4"), Side::White, Rank::King);
        // 13 diagonal squares are visible from D4 on an empty board
        assert_eq!(targets.len(), 13);
        assert!(targets.contains(&sq("h8")));
        assert!(targets.contains(&sq("a1")));
        assert!(targets.contains(&sq("a7")));
        assert!(targets.contains(&sq("g1")));
    }

    #[test]
    fn test_king_ray_stops_before_occupied() {
        let board = Board::from_fen("8/8/8/4w3/3W4/8/8/8 w").unwrap();
        let targets = step_targets(&board, sq("d4"), Side::White, Rank::King);
        // The NE ray is cut off entirely by the friendly man on E5
        assert!(!targets.contains(&sq("e5")));
        assert!(!targets.contains(&sq("f6")));
        assert!(targets.contains(&sq("c5")));
    }

    #[test]
    fn test_man_capture_needs_empty_landing() {
        let board = Board::from_fen("8/8/8/8/3r4/2r5/1w6/8 w").unwrap();
        // B2 -> C3 -> D4 is the jump line; D4 holds a second red man, so the
        // jump over C3 has nowhere to land.
        let jumps = capture_targets(&board, sq("b2"), Side::White, Rank::Man, &[]);
        assert!(jumps.is_empty());

        let board = Board::from_fen("8/8/8/8/8/2r5/1w6/8 w").unwrap();
        let jumps = capture_targets(&board, sq("b2"), Side::White, Rank::Man, &[]);
        assert_eq!(jumps.len(), 1);
        let (landing, victim) = jumps[0];
        assert_eq!(landing, sq("d4"));
        assert_eq!(victim.square, sq("c3"));
    }

    #[test]
    fn test_man_never_captures_backward() {
        let board = Board::from_fen("8/8/8/2r5/1w6/8/8/8 w").unwrap();
        // Red man on C5 is ahead of the white man on B4: jumpable.
        let jumps = capture_targets(&board, sq("b4"), Side::White, Rank::Man, &[]);
        assert_eq!(jumps.len(), 1);

        // Swap the two: the red piece now sits behind the white man.
        let board = Board::from_fen("8/8/8/2w5/1r6/8/8/8 w").unwrap();
        let jumps = capture_targets(&board, sq("c5"), Side::White, Rank::Man, &[]);
        assert!(jumps.is_empty());
    }

    #[test]
    fn test_king_captures_first_blocker_only() {
        // Two red men on the NE ray from A1; only the first is a candidate,
        // and its landing square is occupied by the second, so no jump.
        let board = Board::from_fen("8/8/8/8/8/2r5/1r6/W7 w").unwrap();
        let jumps = capture_targets(&board, sq("a1"), Side::White, Rank::King, &[]);
        assert!(jumps.is_empty());

        // With the second red man moved aside, the distant first blocker is
        // jumped onto the square just beyond it.
        let board = Board::from_fen("8/8/8/8/8/2r5/8/W7 w").unwrap();
        let jumps = capture_targets(&board, sq("a1"), Side::White, Rank::King, &[]);
        assert_eq!(jumps, vec![(sq("d4"), board.occupant(sq("c3")).unwrap())]);
    }

    #[test]
    fn test_king_ray_blocked_by_own_piece() {
        let board = Board::from_fen("8/8/8/8/8/2w5/8/W7 w").unwrap();
        let jumps = capture_targets(&board, sq("a1"), Side::White, Rank::King, &[]);
        assert!(jumps.is_empty());
    }

    #[test]
    fn test_already_captured_piece_blocks_without_being_jumpable() {
        let board = Board::from_fen("8/8/8/8/8/2r5/8/W7 w").unwrap();
        let ghost = board.occupant(sq("c3")).unwrap();
        let jumps = capture_targets(&board, sq("a1"), Side::White, Rank::King, &[ghost]);
        assert!(jumps.is_empty());
    }
}
