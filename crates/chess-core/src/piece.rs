//! Chess piece kinds.

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// All piece kinds in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single-character symbol for this piece with the given
    /// color: uppercase for White, lowercase for Black.
    pub const fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a promotion token (Q, B, N, or R; case-insensitive).
    ///
    /// Kings and pawns are not valid promotion targets, so 'K' and 'P'
    /// are rejected along with everything else.
    pub const fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(PieceType::Queen),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'R' => Some(PieceType::Rook),
            _ => None,
        }
    }

    /// Returns true if this kind may be the target of a pawn promotion.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Bishop | PieceType::Knight | PieceType::Rook
        )
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}
