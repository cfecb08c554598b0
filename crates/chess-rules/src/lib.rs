//! Standard chess rules engine.
//!
//! This crate maintains board state, generates legal moves per piece kind,
//! enforces check / checkmate / stalemate semantics, and implements the
//! special rules (castling, en passant, promotion):
//! - [`Piece`] - a piece with its kind, color, square, and movement rules
//! - [`Board`] - the piece collection, move execution, and legality queries
//! - [`Game`] / [`GameState`] - turn alternation and game-end detection
//!
//! The board is a plain piece list (at most 32 entries), move generation is
//! direct square and ray projection, and self-check filtering clones the
//! board to probe a hypothetical move. That keeps every query simple and
//! allocation costs bounded; this is not a search engine and does not try
//! to be one.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, GameState};
//!
//! let mut game = Game::new();
//! game.submit_move("e2 e4".parse().unwrap()).unwrap();
//! game.submit_move("e7 e5".parse().unwrap()).unwrap();
//! assert_eq!(game.state(), GameState::WhiteToMove);
//! ```

mod board;
mod game;
mod piece;

pub use board::{Board, BoardError};
pub use game::{Game, GameError, GameState};
pub use piece::Piece;
