use std::fmt::Display;

use tracing::debug;

use crate::{
    consts::{NUM_COLS, NUM_ROWS, NUM_SIDES, NUM_SQUARES, PIECE_ROWS},
    moves::{self, MoveMap},
};

pub mod components;
pub mod fen;

use components::{PieceInfo, Rank, Side, Square};

/// Record of one applied move, kept for history and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceInfo,
    pub from: Square,
    pub to: Square,
    pub captured: Vec<PieceInfo>,
    pub promoted: bool,
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.captured.is_empty() { '-' } else { 'x' };
        write!(f, "{}{}{}", self.from, sep, self.to)?;
        if self.promoted {
            write!(f, "=K")?;
        }
        Ok(())
    }
}

/// Mailbox board: an 8x8 grid of optional pieces, plus whose turn it is.
///
/// A board handed to move generation is read-only for the duration of the
/// call; all mutation goes through [`Board::try_move`], between generation
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<PieceInfo>; NUM_SQUARES],
    pub stm: Side,
    piece_counts: [usize; NUM_SIDES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            grid: [None; NUM_SQUARES],
            stm: Side::Red,
            piece_counts: [0; NUM_SIDES],
        }
    }

    /// Sets up the starting position: three rows of men per side on the
    /// dark squares, red to move first.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..PIECE_ROWS {
            for col in 0..NUM_COLS {
                let square = Square::from_coords(row, col).expect("row and col are in bounds");
                if square.is_dark() {
                    board.place(PieceInfo::new(Side::White, Rank::Man, square));
                }
            }
        }
        for row in NUM_ROWS - PIECE_ROWS..NUM_ROWS {
            for col in 0..NUM_COLS {
                let square = Square::from_coords(row, col).expect("row and col are in bounds");
                if square.is_dark() {
                    board.place(PieceInfo::new(Side::Red, Rank::Man, square));
                }
            }
        }
        board
    }

    pub fn from_fen(fen: &str) -> miette::Result<Self> {
        fen::parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    #[inline(always)]
    pub const fn occupant(&self, square: Square) -> Option<PieceInfo> {
        self.grid[square.index()]
    }

    /// Puts a piece on its recorded square. The square must be empty.
    pub fn place(&mut self, piece: PieceInfo) {
        debug_assert!(self.grid[piece.square.index()].is_none());
        self.grid[piece.square.index()] = Some(piece);
        self.piece_counts[piece.side.index()] += 1;
    }

    fn remove(&mut self, square: Square) -> Option<PieceInfo> {
        let removed = self.grid[square.index()].take();
        if let Some(piece) = removed {
            self.piece_counts[piece.side.index()] -= 1;
        }
        removed
    }

    #[inline(always)]
    pub const fn piece_count(&self, side: Side) -> usize {
        self.piece_counts[side.index()]
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = PieceInfo> + '_ {
        self.grid
            .iter()
            .flatten()
            .filter(move |piece| piece.side == side)
            .copied()
    }

    /// Legal move map for the piece on `square`; empty when the square is
    /// vacant.
    pub fn legal_moves(&self, square: Square) -> MoveMap {
        match self.occupant(square) {
            Some(piece) => moves::legal_moves(&piece, self),
            None => MoveMap::new(),
        }
    }

    /// Every piece of the side to move that has at least one legal move,
    /// with its move map.
    pub fn all_legal_moves(&self) -> Vec<(PieceInfo, MoveMap)> {
        self.pieces(self.stm)
            .map(|piece| {
                let map = moves::legal_moves(&piece, self);
                (piece, map)
            })
            .filter(|(_, map)| !map.is_empty())
            .collect()
    }

    pub fn has_any_move(&self, side: Side) -> bool {
        self.pieces(side)
            .any(|piece| !moves::legal_moves(&piece, self).is_empty())
    }

    /// Applies the side-to-move's move from `from` to `to`: removes every
    /// captured piece listed for that destination, relocates the piece, and
    /// crowns a man that ends its move on the far row.
    pub fn try_move(&mut self, from: Square, to: Square) -> miette::Result<MoveRecord> {
        let piece = self
            .occupant(from)
            .ok_or_else(|| miette::miette!("No piece on {from}"))?;
        miette::ensure!(
            piece.side == self.stm,
            "It is {}'s turn, {} cannot move",
            self.stm,
            piece
        );

        let map = moves::legal_moves(&piece, self);
        let captured = map
            .get(&to)
            .cloned()
            .ok_or_else(|| miette::miette!("{piece} cannot reach {to}"))?;

        for victim in &captured {
            self.remove(victim.square);
        }
        self.remove(from);

        let promoted = !piece.rank.is_king() && to.row() == piece.side.crowning_row();
        let rank = if promoted { Rank::King } else { piece.rank };
        self.place(PieceInfo::new(piece.side, rank, to));
        self.stm = self.stm.flip();

        let record = MoveRecord {
            piece,
            from,
            to,
            captured,
            promoted,
        };
        debug!("Moved {piece} to {to} ({record})");
        Ok(record)
    }

    /// The game is over once the side to move has no pieces or no legal
    /// moves left; the other side wins.
    pub fn winner(&self) -> Option<Side> {
        if self.piece_count(self.stm) == 0 || !self.has_any_move(self.stm) {
            return Some(self.stm.flip());
        }
        None
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        for row in (0..NUM_ROWS).rev() {
            write!(f, " {} ", row + 1)?;
            for col in 0..NUM_COLS {
                let square = Square::from_coords(row, col).expect("row and col are in bounds");
                match self.occupant(square) {
                    Some(piece) => write!(f, " {}", piece.icon())?,
                    None if square.is_dark() => write!(f, " ·")?,
                    None => write!(f, "  ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    A B C D E F G H")?;
        write!(f, " {} to move", self.stm)
    }
}
