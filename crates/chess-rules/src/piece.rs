//! Pieces and their movement rules.
//!
//! A [`Piece`] is a closed tagged value: one struct carrying the kind,
//! color, square, and moved flag, with every rule matched exhaustively per
//! [`PieceType`]. Move generation takes the board as an explicit parameter;
//! pieces never hold a reference back to the board that owns them.

use chess_core::{Color, PieceType, Square};

use crate::Board;

/// One-step king directions, also the queen's ray directions.
const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
];

/// Rook ray directions.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];

/// Bishop ray directions.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Knight jump offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
];

/// Board-state updates requested by a piece as part of executing a move.
///
/// The board applies these after the piece has moved; this replaces a
/// stored piece-to-board back-reference with explicit effect passing, so
/// ownership stays strictly board -> pieces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MoveEffects {
    /// The king of this color moved to this square (king cache update).
    pub king_square: Option<(Color, Square)>,
    /// The king displaced two files: the matching rook must be castled.
    pub castle: Option<Color>,
    /// A pawn double-stepped to this square (new en-passant target).
    pub en_passant: Option<Square>,
    /// A pawn reached its promotion rank on this square.
    pub promotion: Option<Square>,
}

/// A piece on the board: kind, color, current square, and whether it has
/// ever moved.
///
/// The moved flag is monotonic and only consulted for kings (castling),
/// rooks (castling), and pawns (double-step eligibility).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceType,
    color: Color,
    square: Square,
    moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub const fn new(kind: PieceType, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            moved: false,
        }
    }

    /// Returns the piece kind.
    #[inline]
    pub const fn kind(&self) -> PieceType {
        self.kind
    }

    /// Returns the owning color.
    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns the square this piece stands on.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns true if this piece has moved at least once.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns the single-character symbol: uppercase for White, lowercase
    /// for Black.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }

    /// Returns the squares this piece can move to given the current board
    /// occupancy, not accounting for leaving its own king in check.
    ///
    /// For the king this includes castling destinations; for pawns it
    /// includes the forward steps and reachable diagonal captures.
    pub fn valid_moves(&self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceType::King => {
                let mut squares = self.step_search(board, &KING_STEPS);
                for dx in [-1, 1] {
                    if let Some(sq) = board.castle_search(self.square, self.color, dx) {
                        squares.push(sq);
                    }
                }
                squares
            }
            PieceType::Queen => self.ray_search(board, &KING_STEPS),
            PieceType::Rook => self.ray_search(board, &ROOK_DIRECTIONS),
            PieceType::Bishop => self.ray_search(board, &BISHOP_DIRECTIONS),
            PieceType::Knight => self.step_search(board, &KNIGHT_JUMPS),
            PieceType::Pawn => self.pawn_moves(board),
        }
    }

    /// Returns the squares this piece threatens, used for check detection.
    ///
    /// Differs from [`valid_moves`](Self::valid_moves) for the king (no
    /// castling destinations) and for pawns (diagonal capture squares only;
    /// the forward step is not an attack).
    pub fn valid_attacks(&self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceType::King => self.step_search(board, &KING_STEPS),
            PieceType::Queen => self.ray_search(board, &KING_STEPS),
            PieceType::Rook => self.ray_search(board, &ROOK_DIRECTIONS),
            PieceType::Bishop => self.ray_search(board, &BISHOP_DIRECTIONS),
            PieceType::Knight => self.step_search(board, &KNIGHT_JUMPS),
            PieceType::Pawn => self.pawn_attacks(board),
        }
    }

    /// Moves this piece to `to` and returns the board-state updates the
    /// move entails.
    ///
    /// The caller (the board) is responsible for capture resolution before
    /// the move and for applying the returned effects after it.
    pub(crate) fn apply_move(&mut self, to: Square) -> MoveEffects {
        let mut effects = MoveEffects::default();
        match self.kind {
            PieceType::King => {
                let file_shift = to.file().index() as i8 - self.square.file().index() as i8;
                self.square = to;
                self.moved = true;
                effects.king_square = Some((self.color, to));
                if file_shift.abs() == 2 {
                    effects.castle = Some(self.color);
                }
            }
            PieceType::Rook => {
                self.square = to;
                self.moved = true;
            }
            PieceType::Pawn => {
                let rank_shift = to.rank().index() as i8 - self.square.rank().index() as i8;
                self.square = to;
                self.moved = true;
                if rank_shift.abs() == 2 {
                    effects.en_passant = Some(to);
                }
                if to.rank() == self.color.promotion_rank() {
                    effects.promotion = Some(to);
                }
            }
            PieceType::Queen | PieceType::Bishop | PieceType::Knight => {
                self.square = to;
                self.moved = true;
            }
        }
        effects
    }

    /// One-step destinations over a fixed offset table (king, knight).
    fn step_search(&self, board: &Board, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| {
                board.square_search(self.square, self.color, dx, dy, false, false)
            })
            .collect()
    }

    /// Sliding destinations along fixed ray directions (queen, rook, bishop).
    fn ray_search(&self, board: &Board, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut squares = Vec::new();
        for &(dx, dy) in directions {
            squares.extend(board.direction_search(self.square, self.color, dx, dy));
        }
        squares
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Square> {
        let dir = self.color.pawn_direction();
        let mut squares = Vec::new();
        // The double step requires the single step to be open as well.
        if let Some(sq) = board.square_search(self.square, self.color, 0, dir, true, false) {
            squares.push(sq);
            if !self.moved {
                if let Some(sq) =
                    board.square_search(self.square, self.color, 0, 2 * dir, true, false)
                {
                    squares.push(sq);
                }
            }
        }
        squares.extend(self.pawn_attacks(board));
        squares
    }

    fn pawn_attacks(&self, board: &Board) -> Vec<Square> {
        let dir = self.color.pawn_direction();
        [-1, 1]
            .iter()
            .filter_map(|&dx| board.square_search(self.square, self.color, dx, dir, false, true))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn knight_jumps_from_start() {
        let board = Board::new();
        let knight = board.get_piece(Square::new(File::G, Rank::R1)).unwrap();
        let mut moves = knight.valid_moves(&board);
        moves.sort_by_key(|s| (s.file().index(), s.rank().index()));
        assert_eq!(moves, vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn sliders_blocked_at_start() {
        let board = Board::new();
        for s in ["a1", "c1", "d1", "f8"] {
            let piece = board.get_piece(sq(s)).unwrap();
            assert!(piece.valid_moves(&board).is_empty(), "{} should be stuck", s);
        }
    }

    #[test]
    fn pawn_single_and_double_step() {
        let board = Board::new();
        let pawn = board.get_piece(sq("e2")).unwrap();
        let moves = pawn.valid_moves(&board);
        assert_eq!(moves, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn moved_pawn_loses_double_step() {
        let mut board = Board::new();
        board
            .execute_move("e2 e3".parse().unwrap(), true)
            .unwrap();
        let pawn = board.get_piece(sq("e3")).unwrap();
        assert_eq!(pawn.valid_moves(&board), vec![sq("e4")]);
    }

    #[test]
    fn pawn_forward_step_is_not_an_attack() {
        let board = Board::new();
        let pawn = board.get_piece(sq("e2")).unwrap();
        // d3/f3 are empty and no en-passant target exists, so no attacks.
        assert!(pawn.valid_attacks(&board).is_empty());
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        let pieces = vec![
            Piece::new(PieceType::King, Color::White, sq("h1")),
            Piece::new(PieceType::King, Color::Black, sq("h8")),
            Piece::new(PieceType::Rook, Color::White, sq("d4")),
            Piece::new(PieceType::Pawn, Color::White, sq("d6")),
            Piece::new(PieceType::Pawn, Color::Black, sq("f4")),
        ];
        let board = Board::from_pieces(pieces).unwrap();
        let rook = board.get_piece(sq("d4")).unwrap();
        let moves = rook.valid_moves(&board);
        // Up the file: d5 only (own pawn on d6 excluded).
        assert!(moves.contains(&sq("d5")));
        assert!(!moves.contains(&sq("d6")));
        // Across the rank: e4 then the enemy pawn on f4, not beyond.
        assert!(moves.contains(&sq("e4")));
        assert!(moves.contains(&sq("f4")));
        assert!(!moves.contains(&sq("g4")));
    }

    #[test]
    fn king_attacks_exclude_castling() {
        let pieces = vec![
            Piece::new(PieceType::King, Color::White, sq("e1")),
            Piece::new(PieceType::Rook, Color::White, sq("h1")),
            Piece::new(PieceType::King, Color::Black, sq("e8")),
        ];
        let board = Board::from_pieces(pieces).unwrap();
        let king = board.get_piece(sq("e1")).unwrap();
        assert!(king.valid_moves(&board).contains(&sq("g1")));
        assert!(!king.valid_attacks(&board).contains(&sq("g1")));
    }

    #[test]
    fn apply_move_flags_double_step() {
        let mut pawn = Piece::new(PieceType::Pawn, Color::White, sq("e2"));
        let effects = pawn.apply_move(sq("e4"));
        assert_eq!(effects.en_passant, Some(sq("e4")));
        assert_eq!(effects.promotion, None);
        assert!(pawn.has_moved());
    }

    #[test]
    fn apply_move_flags_promotion() {
        let mut pawn = Piece::new(PieceType::Pawn, Color::Black, sq("c2"));
        let effects = pawn.apply_move(sq("c1"));
        assert_eq!(effects.promotion, Some(sq("c1")));
        assert_eq!(effects.en_passant, None);
    }

    #[test]
    fn apply_move_flags_castle() {
        let mut king = Piece::new(PieceType::King, Color::White, sq("e1"));
        let effects = king.apply_move(sq("g1"));
        assert_eq!(effects.castle, Some(Color::White));
        assert_eq!(effects.king_square, Some((Color::White, sq("g1"))));

        let mut king = Piece::new(PieceType::King, Color::White, sq("e1"));
        let effects = king.apply_move(sq("e2"));
        assert_eq!(effects.castle, None);
        assert_eq!(effects.king_square, Some((Color::White, sq("e2"))));
    }
}
