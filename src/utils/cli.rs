use clap::{Parser, Subcommand};

use crate::consts::START_FEN;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("APP_VERSION"), about = env!("CARGO_PKG_DESCRIPTION") )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive game from the given FEN, or the default start position
    Play {
        /// FEN string for starting position
        #[arg(short, long, default_value = START_FEN)]
        fen: Option<String>,
    },

    /// Print the legal move map for the piece on a square
    Moves {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: Option<String>,
        /// Square the piece stands on, e.g. b3
        #[arg(short, long)]
        square: String,
    },

    /// Count move sequences from the given FEN down to a fixed depth
    Perft {
        /// FEN string for starting position
        #[arg(short, long, default_value = START_FEN)]
        fen: Option<String>,
        /// set walk depth
        #[arg(short, long, default_value = "5")]
        depth: u8,
        /// set divide flag
        #[arg(long, default_value = "false")]
        divide: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "game_cmd", no_binary_name = true)]
pub struct GameCommand {
    #[command(subcommand)]
    pub cmd: GameSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GameSubcommand {
    /// Make a move on the board
    #[clap(visible_alias = "m")]
    Move { from: String, to: String },

    /// List the legal destinations for the piece on a square
    #[clap(visible_alias = "l")]
    Moves { square: String },

    /// Print the current board state
    #[clap(visible_alias = "p")]
    Print,

    /// Show the current fen of the board, or set a new one
    #[clap(visible_alias = "f")]
    Fen { set: Option<String> },

    /// Show remaining piece counts
    #[clap(visible_alias = "n")]
    Count,

    /// Save the current game to a TOML file
    #[clap(visible_alias = "s")]
    Save { filename: String },

    /// Load a game previously saved with save
    #[clap(visible_alias = "o")]
    Load { filename: String },

    /// Run a perft test with given depth [default: 5]
    #[clap(visible_alias = "pe")]
    Perft { depth: Option<u8> },

    /// Clear screen
    #[clap(visible_alias = "c")]
    Clear,

    /// Restart game with same fen
    #[clap(visible_alias = "r")]
    Restart,

    /// Quit game
    #[clap(visible_alias = "q")]
    Quit,
}
