use std::fs;
use std::io::{BufRead, Write};
use std::str::FromStr;

use clap::Parser;
use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{
    Board, MoveRecord,
    components::{Side, Square},
};
use crate::utils::clear_screen;
use crate::utils::cli::{GameCommand, GameSubcommand};
use crate::utils::perft::run_perft_suite;

/// A game in progress: the live board, the position it started from and the
/// moves played so far.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    start_fen: String,
    history: Vec<MoveRecord>,
}

/// On-disk form of a saved game. Only the start position and the move list
/// are authoritative; the final fen is stored so a load can be verified.
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    start_fen: String,
    fen: String,
    moves: Vec<String>,
}

impl Game {
    pub fn new(fen: &str) -> miette::Result<Self> {
        Ok(Self {
            board: Board::from_fen(fen)?,
            start_fen: fen.to_string(),
            history: Vec::new(),
        })
    }

    pub fn restart(&mut self) -> miette::Result<()> {
        self.board = Board::from_fen(&self.start_fen)?;
        self.history.clear();
        Ok(())
    }

    pub fn play(&mut self, from: Square, to: Square) -> miette::Result<MoveRecord> {
        let record = self.board.try_move(from, to)?;
        self.history.push(record.clone());
        Ok(record)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn save(&self, filename: &str) -> miette::Result<()> {
        let save = SaveFile {
            start_fen: self.start_fen.clone(),
            fen: self.board.to_fen(),
            moves: self
                .history
                .iter()
                .map(|record| format!("{}-{}", record.from, record.to))
                .collect(),
        };
        let contents = toml::to_string_pretty(&save)
            .into_diagnostic()
            .context("Serializing game state")?;
        fs::write(filename, contents)
            .into_diagnostic()
            .with_context(|| format!("Writing save file {filename}"))?;
        info!("Saved game to {filename}");
        Ok(())
    }

    /// Restores a game by replaying the saved move list from the saved
    /// start position, then checks the result against the recorded fen.
    pub fn load(filename: &str) -> miette::Result<Self> {
        let contents = fs::read_to_string(filename)
            .into_diagnostic()
            .with_context(|| format!("Reading save file {filename}"))?;
        let save: SaveFile = toml::from_str(&contents)
            .into_diagnostic()
            .context("Parsing save file")?;

        let mut game = Game::new(&save.start_fen)?;
        for mv in &save.moves {
            let (from, to) = mv
                .split_once('-')
                .ok_or_else(|| miette::miette!("Malformed move {mv:?} in save file"))?;
            game.play(Square::from_str(from)?, Square::from_str(to)?)
                .with_context(|| format!("Replaying {mv}"))?;
        }
        miette::ensure!(
            game.board.to_fen() == save.fen,
            "Replayed position {} does not match saved fen {}",
            game.board.to_fen(),
            save.fen
        );
        Ok(game)
    }
}

/// Prints one line per legal destination of the piece on `square`.
pub fn print_moves(board: &Board, square: Square) {
    let map = board.legal_moves(square);
    if map.is_empty() {
        println!("No legal moves from {square}");
        return;
    }
    for (destination, chain) in &map {
        if chain.is_empty() {
            println!("  {square} -> {destination}");
        } else {
            let victims: Vec<String> = chain.iter().map(|v| v.square.to_string()).collect();
            println!("  {square} x {destination} capturing {}", victims.join(", "));
        }
    }
}

/// Interactive prompt loop: one command per line, parsed like a shell
/// command line. Runs until quit, EOF or a decided game.
pub fn game_loop(fen: &str) -> miette::Result<()> {
    let mut game = Game::new(fen)?;
    println!("{}", game.board);

    let stdin = std::io::stdin();
    loop {
        print!("{} > ", game.board.stm);
        std::io::stdout().flush().into_diagnostic()?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .into_diagnostic()
            .context("Reading game command")?
            == 0
        {
            break; // EOF
        }
        let words = match shell_words::split(line.trim()) {
            Ok(words) => words,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }
        let command = match GameCommand::try_parse_from(&words) {
            Ok(command) => command.cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            GameSubcommand::Move { from, to } => {
                let (from, to) = match (Square::from_str(&from), Square::from_str(&to)) {
                    (Ok(from), Ok(to)) => (from, to),
                    _ => {
                        println!("Squares are a letter and a digit, like b3");
                        continue;
                    }
                };
                match game.play(from, to) {
                    Ok(record) => {
                        println!("{}", game.board);
                        if !record.captured.is_empty() {
                            println!("Captured {} piece(s)", record.captured.len());
                        }
                        if record.promoted {
                            println!("Crowned on {}", record.to);
                        }
                    }
                    Err(e) => println!("{e}"),
                }
                if let Some(winner) = game.board.winner() {
                    println!("{winner} wins!");
                    break;
                }
            }
            GameSubcommand::Moves { square } => match Square::from_str(&square) {
                Ok(square) => print_moves(&game.board, square),
                Err(e) => println!("{e}"),
            },
            GameSubcommand::Print => println!("{}", game.board),
            GameSubcommand::Fen { set } => match set {
                Some(new_fen) => match Game::new(&new_fen) {
                    Ok(new_game) => {
                        game = new_game;
                        println!("{}", game.board);
                    }
                    Err(e) => println!("{e}"),
                },
                None => println!("{}", game.board.to_fen()),
            },
            GameSubcommand::Count => println!(
                "White: {}, Red: {}",
                game.board.piece_count(Side::White),
                game.board.piece_count(Side::Red)
            ),
            GameSubcommand::Save { filename } => {
                if let Err(e) = game.save(&filename) {
                    println!("{e}");
                }
            }
            GameSubcommand::Load { filename } => match Game::load(&filename) {
                Ok(loaded) => {
                    game = loaded;
                    println!("{}", game.board);
                }
                Err(e) => println!("{e}"),
            },
            GameSubcommand::Perft { depth } => {
                run_perft_suite(&game.board, depth.unwrap_or(5));
            }
            GameSubcommand::Clear => clear_screen()?,
            GameSubcommand::Restart => {
                game.restart()?;
                println!("{}", game.board);
            }
            GameSubcommand::Quit => break,
        }
    }
    Ok(())
}
