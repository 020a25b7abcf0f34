use miette::Context;

use super::{
    Board,
    components::{PieceInfo, Side, Square},
};
use crate::consts::{NUM_COLS, NUM_ROWS};

/// Parses a checkers FEN: eight '/'-separated rows from the top of the board
/// down, `w`/`W`/`r`/`R` for white/red men and kings, digits for runs of
/// empty squares, then the side to move (`w` or `r`).
pub fn parse_fen(fen: &str) -> miette::Result<Board> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    miette::ensure!(
        parts.len() == 2,
        "Expected '<placement> <side to move>' in FEN, got {} segment(s)",
        parts.len()
    );
    let mut board = Board::empty();
    place_pieces(&mut board, parts[0])
        .with_context(|| format!("Placing pieces with given fen string {}", parts[0]))?;
    board.stm = parse_stm(parts[1]).with_context(|| format!("parsed stm input: {}", parts[1]))?;
    Ok(board)
}

pub fn to_fen(board: &Board) -> String {
    let mut fen = String::new();

    for row in (0..NUM_ROWS).rev() {
        let mut empty_count = 0;
        for col in 0..NUM_COLS {
            let square = Square::from_coords(row, col).expect("row and col are in bounds");
            if let Some(piece) = board.occupant(square) {
                if empty_count > 0 {
                    fen.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                fen.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if row > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match board.stm {
        Side::White => 'w',
        Side::Red => 'r',
    });
    fen
}

fn place_pieces(board: &mut Board, placement: &str) -> miette::Result<()> {
    let rows: Vec<&str> = placement.split('/').collect();
    miette::ensure!(
        rows.len() == NUM_ROWS,
        "Expected {NUM_ROWS} rows in placement, got {}",
        rows.len()
    );
    for (i, row_str) in rows.iter().enumerate() {
        let row = NUM_ROWS - 1 - i;
        let mut col = 0usize;
        for c in row_str.chars() {
            if let Some(run) = c.to_digit(10) {
                col += run as usize;
            } else if let Some((side, rank)) = PieceInfo::from_fen_char(c) {
                let square = Square::from_coords(row, col)
                    .ok_or_else(|| miette::miette!("Row {} runs past column {NUM_COLS}", i + 1))?;
                board.place(PieceInfo::new(side, rank, square));
                col += 1;
            } else {
                return Err(miette::miette!(
                    "Unexpected character {c:?} while parsing placement"
                ));
            }
        }
        miette::ensure!(
            col == NUM_COLS,
            "Row {} describes {col} columns, expected {NUM_COLS}",
            i + 1
        );
    }
    Ok(())
}

fn parse_stm(stm: &str) -> miette::Result<Side> {
    match stm {
        "w" => Ok(Side::White),
        "r" => Ok(Side::Red),
        _ => Err(miette::miette!("Invalid stm, expected 'w' or 'r'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_FEN;

    #[test]
    fn test_parse_start_fen() {
        let board = parse_fen(START_FEN).unwrap();
        assert_eq!(board.stm, Side::Red);
        assert_eq!(board.piece_count(Side::White), 12);
        assert_eq!(board.piece_count(Side::Red), 12);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            START_FEN,
            "8/8/8/8/3W4/8/8/8 w",
            "r1r1r1r1/8/8/2w5/8/8/8/1W6 r",
        ] {
            let board = parse_fen(fen).unwrap();
            assert_eq!(to_fen(&board), fen);
        }
    }

    #[test]
    fn test_parse_fen_rejects_malformed_input() {
        // missing stm
        assert!(parse_fen("8/8/8/8/8/8/8/8").is_err());
        // too few rows
        assert!(parse_fen("8/8/8/8 w").is_err());
        // bad piece char
        assert!(parse_fen("x7/8/8/8/8/8/8/8 w").is_err());
        // row too long
        assert!(parse_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(parse_fen("8w/8/8/8/8/8/8/8 w").is_err());
        // row too short
        assert!(parse_fen("7/8/8/8/8/8/8/8 w").is_err());
        // bad stm
        assert!(parse_fen("8/8/8/8/8/8/8/8 b").is_err());
    }
}
