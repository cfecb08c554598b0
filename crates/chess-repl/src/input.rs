//! Move and promotion input parsing, plus scripted command sources.

use chess_core::{MoveCommand, PieceType};
use std::fs;
use std::io;
use std::path::Path;

/// Parses a move line; `None` means "no command" and the caller re-prompts.
pub fn parse_move(line: &str) -> Option<MoveCommand> {
    line.parse().ok()
}

/// Parses a promotion token (Q, B, N or R).
pub fn parse_promotion(line: &str) -> Option<PieceType> {
    let mut chars = line.trim().chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    PieceType::from_promotion_char(c)
}

/// Loads a scripted game: one input line per entry (moves and promotion
/// tokens alike), with blank lines and `#` comments skipped.
pub fn script_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    #[test]
    fn moves() {
        let m = parse_move("e2 e4").unwrap();
        assert_eq!(m.from, Square::from_algebraic("e2").unwrap());
        assert_eq!(m.to, Square::from_algebraic("e4").unwrap());
        assert!(parse_move("castle").is_none());
        assert!(parse_move("").is_none());
    }

    #[test]
    fn promotions() {
        assert_eq!(parse_promotion("Q"), Some(PieceType::Queen));
        assert_eq!(parse_promotion(" n "), Some(PieceType::Knight));
        assert_eq!(parse_promotion("R"), Some(PieceType::Rook));
        assert_eq!(parse_promotion("B"), Some(PieceType::Bishop));
        assert_eq!(parse_promotion("K"), None);
        assert_eq!(parse_promotion("QQ"), None);
        assert_eq!(parse_promotion(""), None);
    }
}
