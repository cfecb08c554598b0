//! Move command representation.

use crate::Square;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when parsing a move command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected two squares (e.g. \"e2 e4\"), got \"{0}\"")]
    MalformedCommand(String),

    #[error("invalid square \"{0}\"")]
    InvalidSquare(String),
}

/// A move request: source and destination square.
///
/// A `MoveCommand` is a pure value carrying a player's intent; it says
/// nothing about legality. The board decides whether it can be executed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    pub from: Square,
    pub to: Square,
}

impl MoveCommand {
    /// Creates a new move command.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveCommand { from, to }
    }
}

impl FromStr for MoveCommand {
    type Err = ParseMoveError;

    /// Parses a move from coordinate-pair notation: `"e2 e4"` or `"e2e4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(ParseMoveError::MalformedCommand(s.trim().to_string()));
        }
        let from = Square::from_algebraic(&compact[0..2])
            .ok_or_else(|| ParseMoveError::InvalidSquare(compact[0..2].to_string()))?;
        let to = Square::from_algebraic(&compact[2..4])
            .ok_or_else(|| ParseMoveError::InvalidSquare(compact[2..4].to_string()))?;
        Ok(MoveCommand::new(from, to))
    }
}

impl fmt::Debug for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveCommand({}{})", self.from, self.to)
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn parse_spaced() {
        let m: MoveCommand = "e2 e4".parse().unwrap();
        assert_eq!(m.from, Square::new(File::E, Rank::R2));
        assert_eq!(m.to, Square::new(File::E, Rank::R4));
    }

    #[test]
    fn parse_compact() {
        let m: MoveCommand = "g8f6".parse().unwrap();
        assert_eq!(m.from, Square::new(File::G, Rank::R8));
        assert_eq!(m.to, Square::new(File::F, Rank::R6));
    }

    #[test]
    fn parse_trims_whitespace() {
        let m: MoveCommand = "  e2   e4 \n".parse().unwrap();
        assert_eq!(m.to, Square::new(File::E, Rank::R4));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            "e2".parse::<MoveCommand>(),
            Err(ParseMoveError::MalformedCommand(_))
        ));
        assert!(matches!(
            "e2 e4 e5".parse::<MoveCommand>(),
            Err(ParseMoveError::MalformedCommand(_))
        ));
        assert!("".parse::<MoveCommand>().is_err());
    }

    #[test]
    fn parse_rejects_bad_squares() {
        assert_eq!(
            "i2 e4".parse::<MoveCommand>(),
            Err(ParseMoveError::InvalidSquare("i2".to_string()))
        );
        assert_eq!(
            "e2 e9".parse::<MoveCommand>(),
            Err(ParseMoveError::InvalidSquare("e9".to_string()))
        );
    }

    #[test]
    fn display() {
        let m: MoveCommand = "e2 e4".parse().unwrap();
        assert_eq!(format!("{}", m), "e2e4");
        assert_eq!(format!("{:?}", m), "MoveCommand(e2e4)");
    }
}
