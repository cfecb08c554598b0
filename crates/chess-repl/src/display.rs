//! Console board rendering.
//!
//! The engine only hands over piece snapshots; everything about how the
//! board looks on screen lives here.

use chess_core::{File, Rank, Square};
use chess_rules::Piece;

/// Renders the board as an 8x8 character grid, ranks 8 down to 1, with a
/// file key underneath. Empty dark squares print as `_`, light ones as a
/// space; pieces print their symbol (uppercase White, lowercase Black).
pub fn render(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for rank in Rank::ALL.iter().rev() {
        out.push(rank.to_char());
        out.push(' ');
        for file in File::ALL {
            let square = Square::new(file, *rank);
            let empty = if (file.index() + rank.index()) % 2 == 0 {
                '_'
            } else {
                ' '
            };
            let c = pieces
                .iter()
                .find(|p| p.square() == square)
                .map(|p| p.symbol())
                .unwrap_or(empty);
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("  abcdefgh\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::Board;

    #[test]
    fn initial_position_grid() {
        let board = Board::new();
        let expected = [
            "8 rnbqkbnr",
            "7 pppppppp",
            "6  _ _ _ _",
            "5 _ _ _ _ ",
            "4  _ _ _ _",
            "3 _ _ _ _ ",
            "2 PPPPPPPP",
            "1 RNBQKBNR",
            "  abcdefgh",
            "",
        ]
        .join("\n");
        assert_eq!(render(board.pieces()), expected);
    }

    #[test]
    fn empty_board_checkerboard() {
        let grid = render(&[]);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 9);
        // a1 is a dark square.
        assert_eq!(lines[7], "1 _ _ _ _ ");
        assert_eq!(lines[0], "8  _ _ _ _");
    }
}
