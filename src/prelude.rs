pub use crate::board::fen;
pub use crate::board::{
    self, Board, MoveRecord,
    components::{PieceInfo, Rank, Side, Square},
};
pub use crate::consts::*;
pub use crate::game::{self, Game, game_loop, print_moves};
pub use crate::moves::{self, Direction, MoveMap, geometry, legal_moves};
pub use crate::utils::{self, clear_screen, cli::*, log::*, perft::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
