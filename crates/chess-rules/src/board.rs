//! Board state and move execution.
//!
//! The [`Board`] is the single source of truth for piece placement. It owns
//! the piece collection exclusively, caches each king's square, and carries
//! the two single-use pending flags (en-passant target, promotion square)
//! that are cleared or reassigned on every executed move.

use chess_core::{Color, File, MoveCommand, PieceType, Rank, Square};
use thiserror::Error;

use crate::piece::Piece;

/// Errors raised by board operations.
///
/// Apart from the setup variants these indicate broken invariants rather
/// than player mistakes; callers should treat them as fatal instead of
/// retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("move from {0} to itself")]
    NullMove(Square),

    #[error("no pawn is awaiting promotion")]
    NoPendingPromotion,

    #[error("a pawn cannot be promoted to a {0}")]
    InvalidPromotion(PieceType),

    #[error("no castling rook available for {0}")]
    MissingCastlingRook(Color),

    #[error("{0} king is not on a castling square")]
    InvalidCastle(Color),

    #[error("two pieces share square {0}")]
    DuplicateSquare(Square),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    DuplicateKing(Color),
}

/// The back-rank piece kinds, from the a-file to the h-file.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The chess board: piece collection, king-square cache, pending en-passant
/// and promotion state, and the move history.
///
/// Invariants: no two pieces share a square, exactly one king per color, at
/// most one en-passant target at a time, and the king cache always matches
/// the king pieces' actual squares.
#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    /// King squares, indexed by [`Color::index`].
    kings: [Square; 2],
    /// Square of the pawn that just double-stepped, capturable en passant
    /// on the immediately following move only.
    en_passant: Option<Square>,
    /// Square of a pawn awaiting promotion.
    promotion: Option<Square>,
    history: Vec<MoveCommand>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard starting position.
    pub fn new() -> Self {
        let mut pieces = Vec::with_capacity(32);
        for color in [Color::White, Color::Black] {
            for (kind, file) in BACK_RANK.into_iter().zip(File::ALL) {
                pieces.push(Piece::new(kind, color, Square::new(file, color.back_rank())));
            }
            for file in File::ALL {
                pieces.push(Piece::new(
                    PieceType::Pawn,
                    color,
                    Square::new(file, color.pawn_rank()),
                ));
            }
        }
        Board {
            pieces,
            kings: [Square::E1, Square::E8],
            en_passant: None,
            promotion: None,
            history: Vec::new(),
        }
    }

    /// Creates a board from an arbitrary piece set, for scenario setups.
    ///
    /// Validates the structural invariants: unique squares and exactly one
    /// king per color.
    pub fn from_pieces(pieces: Vec<Piece>) -> Result<Self, BoardError> {
        let mut kings = [None; 2];
        for (i, piece) in pieces.iter().enumerate() {
            if pieces[..i].iter().any(|p| p.square() == piece.square()) {
                return Err(BoardError::DuplicateSquare(piece.square()));
            }
            if piece.kind() == PieceType::King {
                let slot = &mut kings[piece.color().index()];
                if slot.is_some() {
                    return Err(BoardError::DuplicateKing(piece.color()));
                }
                *slot = Some(piece.square());
            }
        }
        let white_king = kings[Color::White.index()].ok_or(BoardError::MissingKing(Color::White))?;
        let black_king = kings[Color::Black.index()].ok_or(BoardError::MissingKing(Color::Black))?;
        Ok(Board {
            pieces,
            kings: [white_king, black_king],
            en_passant: None,
            promotion: None,
            history: Vec::new(),
        })
    }

    /// Returns the piece standing on `square`, if any. O(n) over at most
    /// 32 pieces.
    pub fn get_piece(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square() == square)
    }

    /// Returns all live pieces.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns the current en-passant target: the square of the pawn that
    /// just double-stepped.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the square of the pawn awaiting promotion, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.promotion
    }

    /// Returns the log of executed moves.
    pub fn history(&self) -> &[MoveCommand] {
        &self.history
    }

    /// Executes a move: resolves the capture (en passant included), clears
    /// the single-use en-passant target, moves the piece, and applies its
    /// side effects. Appends to the history when `record` is set.
    ///
    /// Legality is the caller's concern; the only rejected commands are
    /// those with no piece on the source square or with equal source and
    /// destination.
    pub fn execute_move(&mut self, command: MoveCommand, record: bool) -> Result<(), BoardError> {
        if command.from == command.to {
            return Err(BoardError::NullMove(command.from));
        }
        let mover = self
            .piece_index(command.from)
            .ok_or(BoardError::EmptySource(command.from))?;
        let mover_is_pawn = self.pieces[mover].kind() == PieceType::Pawn;

        if let Some(victim) = self.piece_index(command.to) {
            self.pieces.swap_remove(victim);
        } else if mover_is_pawn {
            // En passant: the victim stands on the target square, one rank
            // away from the destination the capturing pawn lands on.
            if self.en_passant_capture_square() == Some(command.to) {
                if let Some(target) = self.en_passant {
                    if let Some(victim) = self.piece_index(target) {
                        self.pieces.swap_remove(victim);
                    }
                }
            }
        }
        // Single use: reset whether or not it was consumed.
        self.en_passant = None;

        // Recompute the index; the capture removal may have moved the piece.
        let mover = self
            .piece_index(command.from)
            .ok_or(BoardError::EmptySource(command.from))?;
        let effects = self.pieces[mover].apply_move(command.to);

        if let Some((color, square)) = effects.king_square {
            self.kings[color.index()] = square;
        }
        if let Some(square) = effects.en_passant {
            self.en_passant = Some(square);
        }
        if let Some(square) = effects.promotion {
            self.promotion = Some(square);
        }
        if let Some(color) = effects.castle {
            self.castle_rook(color)?;
        }
        if record {
            self.history.push(command);
        }
        Ok(())
    }

    /// Relocates the rook matching a just-castled king: A->D file on a
    /// queenside castle, H->F on a kingside one. Paired 1:1 with a king
    /// move of two files.
    pub(crate) fn castle_rook(&mut self, color: Color) -> Result<(), BoardError> {
        let rank = color.back_rank();
        let king = self.king_square(color);
        let (rook_from, rook_to) = if king == Square::new(File::C, rank) {
            (File::A, File::D)
        } else if king == Square::new(File::G, rank) {
            (File::H, File::F)
        } else {
            return Err(BoardError::InvalidCastle(color));
        };
        let rook_move = MoveCommand::new(Square::new(rook_from, rank), Square::new(rook_to, rank));
        self.execute_move(rook_move, false)
            .map_err(|_| BoardError::MissingCastlingRook(color))
    }

    /// Replaces the pawn awaiting promotion with a fresh piece of `kind`
    /// and the same color, and clears the pending flag.
    pub fn promote(&mut self, kind: PieceType) -> Result<(), BoardError> {
        if !kind.is_promotion_target() {
            return Err(BoardError::InvalidPromotion(kind));
        }
        let square = self.promotion.ok_or(BoardError::NoPendingPromotion)?;
        let index = self
            .piece_index(square)
            .ok_or(BoardError::EmptySource(square))?;
        let color = self.pieces[index].color();
        self.pieces[index] = Piece::new(kind, color, square);
        self.promotion = None;
        Ok(())
    }

    /// Projects a single step from `src` by `(dx, dy)` and returns the
    /// destination if the step is playable for `color`.
    ///
    /// `passive` requires the destination to be empty (pawn forward steps);
    /// `pawn_capture` requires it to hold an opponent or match the
    /// en-passant capture square (pawn diagonals). Without either flag an
    /// empty or opponent-held square qualifies.
    pub(crate) fn square_search(
        &self,
        src: Square,
        color: Color,
        dx: i8,
        dy: i8,
        passive: bool,
        pawn_capture: bool,
    ) -> Option<Square> {
        if dx == 0 && dy == 0 {
            return None;
        }
        let destination = src.offset(dx, dy)?;
        if let Some(occupant) = self.get_piece(destination) {
            if passive || occupant.color() == color {
                return None;
            }
            return Some(destination);
        }
        if pawn_capture {
            if self.en_passant_capture_square() == Some(destination) {
                return Some(destination);
            }
            return None;
        }
        Some(destination)
    }

    /// Projects a ray from `src` in direction `(dx, dy)`, collecting
    /// squares until the board edge or the first occupied square, which is
    /// included only when it holds an opponent of `color`.
    pub(crate) fn direction_search(
        &self,
        src: Square,
        color: Color,
        dx: i8,
        dy: i8,
    ) -> Vec<Square> {
        let mut squares = Vec::new();
        if dx == 0 && dy == 0 {
            return squares;
        }
        let mut cursor = src.offset(dx, dy);
        while let Some(square) = cursor {
            match self.get_piece(square) {
                Some(occupant) => {
                    if occupant.color() != color {
                        squares.push(square);
                    }
                    break;
                }
                None => {
                    squares.push(square);
                    cursor = square.offset(dx, dy);
                }
            }
        }
        squares
    }

    /// Validates the castling precondition chain for a king on `src`
    /// stepping toward `dx` (-1 queenside, +1 kingside) and returns the
    /// two-file destination, or `None` if any condition fails.
    ///
    /// Conditions: king unmoved; an unmoved same-color rook reached over
    /// empty squares only; king not currently in check; neither the transit
    /// square nor the destination attacked.
    pub(crate) fn castle_search(&self, src: Square, color: Color, dx: i8) -> Option<Square> {
        let king = self.get_piece(src)?;
        if king.has_moved() {
            return None;
        }

        let mut rook_found = false;
        let mut cursor = src.offset(dx, 0);
        while let Some(square) = cursor {
            match self.get_piece(square) {
                Some(piece)
                    if piece.kind() == PieceType::Rook
                        && piece.color() == color
                        && !piece.has_moved() =>
                {
                    rook_found = true;
                    break;
                }
                Some(_) => return None,
                None => cursor = square.offset(dx, 0),
            }
        }
        if !rook_found {
            return None;
        }

        if self.is_in_check(color) {
            return None;
        }
        let transit = src.offset(dx, 0)?;
        if self.is_self_check(MoveCommand::new(src, transit)) {
            return None;
        }
        let destination = src.offset(2 * dx, 0)?;
        if self.is_self_check(MoveCommand::new(src, destination)) {
            return None;
        }
        Some(destination)
    }

    /// Returns true if executing `command` would leave the mover's own king
    /// attacked.
    ///
    /// Simulated on a clone of the whole board, applied without recording.
    /// This is the engine's cost center (O(pieces x movegen) per query) but
    /// is acceptable at 32 pieces.
    pub fn is_self_check(&self, command: MoveCommand) -> bool {
        let color = match self.get_piece(command.from) {
            Some(piece) => piece.color(),
            None => return false,
        };
        let mut probe = self.clone();
        if probe.execute_move(command, false).is_err() {
            return false;
        }
        probe.is_attacked(probe.king_square(color), color.opposite())
    }

    /// Returns true if any piece of color `by` attacks `square`.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces
            .iter()
            .filter(|p| p.color() == by)
            .any(|p| p.valid_attacks(self).contains(&square))
    }

    /// Returns true if `color`'s own king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.opposite())
    }

    /// Returns every move for `color` that survives the self-check filter.
    ///
    /// O(pieces^2 x movegen); fine for one board, not for a search tree.
    pub fn legal_moves(&self, color: Color) -> Vec<MoveCommand> {
        let mut commands = Vec::new();
        for piece in self.pieces.iter().filter(|p| p.color() == color) {
            let mut destinations = piece.valid_moves(self);
            for square in piece.valid_attacks(self) {
                if !destinations.contains(&square) {
                    destinations.push(square);
                }
            }
            for to in destinations {
                let command = MoveCommand::new(piece.square(), to);
                if !self.is_self_check(command) {
                    commands.push(command);
                }
            }
        }
        commands
    }

    /// Returns true if `color` has no legal move left: the checkmate /
    /// stalemate oracle.
    pub fn no_moves(&self, color: Color) -> bool {
        self.legal_moves(color).is_empty()
    }

    /// The square a pawn lands on when capturing the current en-passant
    /// target: one rank behind the target pawn, from its own side's view.
    fn en_passant_capture_square(&self) -> Option<Square> {
        let target = self.en_passant?;
        let victim = self.get_piece(target)?;
        target.offset(0, -victim.color().pawn_direction())
    }

    fn piece_index(&self, square: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.square() == square)
    }
}
