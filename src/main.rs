use clap::Parser;
use damier::{board::Board, prelude::*};
use tracing::{Level, span, trace};

fn main() -> miette::Result<()> {
    init();

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();
    match Cli::parse().command {
        Some(cmd) => match cmd {
            Commands::Play { fen } => {
                trace!("Starting game with fen: {:?}", fen);
                game_loop(&fen.unwrap())?;
            }
            Commands::Moves { fen, square } => {
                trace!("Listing moves for {square} with fen: {:?}", fen);
                let board = Board::from_fen(&fen.unwrap())?;
                println!("{board}");
                let square = Square::from_str(&square)?;
                print_moves(&board, square);
            }
            Commands::Perft { fen, depth, divide } => {
                trace!(
                    "Running perft with fen: {:?}, depth: {:?}, divide: {:?}",
                    fen, depth, divide
                );
                let board = Board::from_fen(&fen.unwrap())?;
                println!("{board}");
                if divide {
                    perft_divide(&board, depth);
                } else {
                    run_perft_suite(&board, depth);
                }
            }
        },
        None => {
            trace!("No subcommand given, starting default game");
            game_loop(START_FEN)?;
        }
    }
    Ok(())
}
