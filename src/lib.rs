pub mod board;
pub mod game;
pub mod moves;
pub mod prelude;
pub mod utils;

pub mod consts {
    use crate::prelude::*;

    pub const NUM_SIDES: usize = Side::SIDES.len();
    pub const NUM_ROWS: usize = 8;
    pub const NUM_COLS: usize = 8;
    pub const NUM_SQUARES: usize = NUM_ROWS * NUM_COLS;
    /// How many rows of men each player has when the game begins
    pub const PIECE_ROWS: usize = 3;

    pub const START_FEN: &str = "r1r1r1r1/1r1r1r1r/r1r1r1r1/8/8/1w1w1w1w/w1w1w1w1/1w1w1w1w r";
}
