//! Core value types for chess.
//!
//! This crate provides the fundamental types used across the chess rules
//! engine:
//! - [`Color`] for the two players
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`PieceType`] for the six piece kinds
//! - [`MoveCommand`] for player move requests, with coordinate-pair parsing

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{MoveCommand, ParseMoveError};
pub use piece::PieceType;
pub use square::{File, Rank, Square};
