//! Console chess front end.
//!
//! Runs a two-player game on stdin/stdout, or replays a scripted game from
//! a file for reproducible scenarios. The rules engine never prints; every
//! line on screen originates here.

mod display;
mod input;

use chess_rules::{Game, GameError, GameState};
use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "chess-repl")]
#[command(about = "Two-player console chess")]
struct Cli {
    /// Replay a scripted game (one move or promotion token per line)
    /// instead of reading stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.script {
        Some(path) => match input::script_lines(&path) {
            Ok(lines) => run(lines.into_iter(), true),
            Err(e) => Err(format!("cannot read {}: {}", path.display(), e).into()),
        },
        None => {
            let stdin = io::stdin();
            let lines = stdin.lock().lines().map_while(Result::ok);
            run(lines, false)
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Drives one game over a stream of input lines. With `echo` set (scripted
/// games) each consumed line is printed before it is applied.
fn run(
    mut lines: impl Iterator<Item = String>,
    echo: bool,
) -> Result<(), Box<dyn Error>> {
    let mut game = Game::new();
    println!("{}", display::render(game.board().pieces()));

    while !game.state().is_terminal() {
        if game.needs_promotion() {
            println!("Pawn to be promoted. Please enter a piece (Q, B, N, R):");
        } else {
            println!("{}", prompt(game.state()));
        }
        let line = match lines.next() {
            Some(line) => line,
            // Input exhausted mid-game: leave the board as it stands.
            None => return Ok(()),
        };
        if echo {
            println!("> {}", line);
        }

        if game.needs_promotion() {
            match input::parse_promotion(&line) {
                Some(kind) => match game.resolve_promotion(kind) {
                    Ok(()) => println!("{}", display::render(game.board().pieces())),
                    Err(GameError::Board(e)) => return Err(e.into()),
                    Err(e) => println!("Rejected: {}.", e),
                },
                None => println!("Invalid piece entered. Please enter Q, B, N or R."),
            }
            continue;
        }

        let command = match input::parse_move(&line) {
            Some(command) => command,
            None => {
                println!("Invalid command. Please enter a move like \"e2 e4\".");
                continue;
            }
        };
        match game.submit_move(command) {
            Ok(()) if game.needs_promotion() => {}
            Ok(()) => println!("{}", display::render(game.board().pieces())),
            // A board error means the engine's invariants broke; stop.
            Err(GameError::Board(e)) => return Err(e.into()),
            Err(e) => println!("Rejected: {}.", e),
        }
    }

    println!("{}", verdict(game.state()));
    Ok(())
}

fn prompt(state: GameState) -> &'static str {
    match state {
        GameState::WhiteToMove => "White to move:",
        GameState::BlackToMove => "Black to move:",
        GameState::WhiteInCheck => "Check. White to move:",
        GameState::BlackInCheck => "Check. Black to move:",
        _ => "",
    }
}

fn verdict(state: GameState) -> &'static str {
    match state {
        GameState::WhiteWinsByCheckmate => "White wins by checkmate.",
        GameState::BlackWinsByCheckmate => "Black wins by checkmate.",
        GameState::Stalemate => "Stalemate. The game ends in a draw.",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_cover_active_states() {
        assert_eq!(prompt(GameState::WhiteToMove), "White to move:");
        assert_eq!(prompt(GameState::BlackInCheck), "Check. Black to move:");
    }

    #[test]
    fn scripted_fools_mate_runs_to_checkmate() {
        let script = ["f2 f3", "e7 e5", "g2 g4", "d8 h4"];
        assert!(run(script.iter().map(|s| s.to_string()), true).is_ok());
    }

    #[test]
    fn scripted_promotion_consumes_token_lines() {
        // A deliberately lopsided game marching the a-pawn to promotion
        // while Black shuffles a knight.
        let script = [
            "a2 a4", "g8 f6", "a4 a5", "f6 g8", "a5 a6", "g8 f6", "a6 b7", "f6 g8",
            "b7 a8", "x", "Q",
        ];
        assert!(run(script.iter().map(|s| s.to_string()), true).is_ok());
    }
}
