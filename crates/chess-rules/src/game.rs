//! Turn alternation and game-end detection.
//!
//! [`Game`] drives the seven-state machine over a [`Board`]: it validates
//! submitted commands, executes them, gates the turn on pending promotions,
//! and derives check / checkmate / stalemate from the board's oracles after
//! every move.

use chess_core::{Color, MoveCommand, PieceType, Square};
use thiserror::Error;

use crate::{Board, BoardError};

/// The state of a chess game.
///
/// The terminal checkmate states are named for the winner: White wins in
/// [`WhiteWinsByCheckmate`](GameState::WhiteWinsByCheckmate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// White to move.
    WhiteToMove,
    /// Black to move.
    BlackToMove,
    /// White to move, and in check.
    WhiteInCheck,
    /// Black to move, and in check.
    BlackInCheck,
    /// White delivered checkmate. Terminal.
    WhiteWinsByCheckmate,
    /// Black delivered checkmate. Terminal.
    BlackWinsByCheckmate,
    /// The side to move has no legal move but is not in check. Terminal.
    Stalemate,
}

impl GameState {
    /// Returns the side whose turn it is, or `None` in a terminal state.
    pub const fn side_to_move(self) -> Option<Color> {
        match self {
            GameState::WhiteToMove | GameState::WhiteInCheck => Some(Color::White),
            GameState::BlackToMove | GameState::BlackInCheck => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns true if the side to move is in check.
    pub const fn in_check(self) -> bool {
        matches!(self, GameState::WhiteInCheck | GameState::BlackInCheck)
    }

    /// Returns true if the game has ended.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::WhiteWinsByCheckmate
                | GameState::BlackWinsByCheckmate
                | GameState::Stalemate
        )
    }
}

/// Errors for submitted commands.
///
/// All variants except `Board` are player mistakes, recovered by
/// re-prompting with the reason; `Board` wraps a broken engine invariant
/// and should abort the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,

    #[error("a pawn is awaiting promotion; choose Q, B, N or R first")]
    PromotionPending,

    #[error("no pawn is awaiting promotion")]
    NoPromotionPending,

    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("the piece on {0} does not belong to {1}")]
    WrongSide(Square, Color),

    #[error("the piece on {from} cannot reach {to}")]
    IllegalDestination { from: Square, to: Square },

    #[error("that move would leave your own king in check")]
    SelfCheck,

    #[error("cannot promote to a {0}")]
    InvalidPromotion(PieceType),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A game in progress: a board plus the state machine above it.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game from the standard position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            state: GameState::WhiteToMove,
        }
    }

    /// Starts a game from a custom board with `to_move` on turn, entering
    /// the in-check state if that side's king is already attacked.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let state = match (to_move, board.is_in_check(to_move)) {
            (Color::White, false) => GameState::WhiteToMove,
            (Color::White, true) => GameState::WhiteInCheck,
            (Color::Black, false) => GameState::BlackToMove,
            (Color::Black, true) => GameState::BlackInCheck,
        };
        Game { board, state }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns true if a pawn promotion must be resolved before the game
    /// can continue.
    pub fn needs_promotion(&self) -> bool {
        self.board.pending_promotion().is_some()
    }

    /// Validates and executes a move command for the side to move.
    ///
    /// Rejections leave the game unchanged. After a pawn reaches its
    /// promotion rank the state does not advance until
    /// [`resolve_promotion`](Self::resolve_promotion) is called.
    pub fn submit_move(&mut self, command: MoveCommand) -> Result<(), GameError> {
        let mover = match self.state.side_to_move() {
            Some(color) => color,
            None => return Err(GameError::GameOver),
        };
        if self.needs_promotion() {
            return Err(GameError::PromotionPending);
        }
        let piece = self
            .board
            .get_piece(command.from)
            .ok_or(GameError::EmptySource(command.from))?;
        if piece.color() != mover {
            return Err(GameError::WrongSide(command.from, mover));
        }
        if !piece.valid_moves(&self.board).contains(&command.to)
            && !piece.valid_attacks(&self.board).contains(&command.to)
        {
            return Err(GameError::IllegalDestination {
                from: command.from,
                to: command.to,
            });
        }
        if self.board.is_self_check(command) {
            return Err(GameError::SelfCheck);
        }

        self.board.execute_move(command, true)?;
        if !self.needs_promotion() {
            self.advance_state(mover);
        }
        Ok(())
    }

    /// Resolves a pending promotion and advances the turn.
    pub fn resolve_promotion(&mut self, kind: PieceType) -> Result<(), GameError> {
        let mover = match self.state.side_to_move() {
            Some(color) => color,
            None => return Err(GameError::GameOver),
        };
        if !self.needs_promotion() {
            return Err(GameError::NoPromotionPending);
        }
        match self.board.promote(kind) {
            Ok(()) => {
                self.advance_state(mover);
                Ok(())
            }
            Err(BoardError::InvalidPromotion(kind)) => Err(GameError::InvalidPromotion(kind)),
            Err(e) => Err(GameError::Board(e)),
        }
    }

    /// Picks the next state after `mover` completed a move: mate, check,
    /// stalemate, or the opponent's turn.
    fn advance_state(&mut self, mover: Color) {
        let opponent = mover.opposite();
        let in_check = self.board.is_in_check(opponent);
        let no_moves = self.board.no_moves(opponent);
        self.state = match (in_check, no_moves, mover) {
            (true, true, Color::White) => GameState::WhiteWinsByCheckmate,
            (true, true, Color::Black) => GameState::BlackWinsByCheckmate,
            (true, false, Color::White) => GameState::BlackInCheck,
            (true, false, Color::Black) => GameState::WhiteInCheck,
            (false, true, _) => GameState::Stalemate,
            (false, false, Color::White) => GameState::BlackToMove,
            (false, false, Color::Black) => GameState::WhiteToMove,
        };
    }
}
