//! Invariant properties checked over randomly played games.

use chess_core::PieceType;
use chess_rules::Game;
use proptest::prelude::*;
use std::collections::HashSet;

/// Plays up to `picks.len()` plies, choosing each move by index among the
/// legal moves of the side on turn, and checks the board invariants after
/// every ply.
fn random_playout(picks: &[prop::sample::Index]) -> Result<(), TestCaseError> {
    let mut game = Game::new();

    for pick in picks {
        let side = match game.state().side_to_move() {
            Some(color) => color,
            None => break,
        };
        let moves = game.board().legal_moves(side);
        prop_assert!(!moves.is_empty(), "non-terminal state must have moves");
        let command = moves[pick.index(moves.len())];

        // Legality round-trip: everything the oracle offers is accepted.
        prop_assert_eq!(game.submit_move(command), Ok(()));
        if game.needs_promotion() {
            prop_assert_eq!(game.resolve_promotion(PieceType::Queen), Ok(()));
        }

        let board = game.board();

        // No two pieces share a square.
        let mut squares = HashSet::new();
        for piece in board.pieces() {
            prop_assert!(
                squares.insert(piece.square()),
                "two pieces on {}",
                piece.square()
            );
        }

        // Exactly one king per color, matching the cached king squares.
        for color in [chess_core::Color::White, chess_core::Color::Black] {
            let kings: Vec<_> = board
                .pieces()
                .iter()
                .filter(|p| p.kind() == PieceType::King && p.color() == color)
                .collect();
            prop_assert_eq!(kings.len(), 1, "{} must have one king", color);
            prop_assert_eq!(kings[0].square(), board.king_square(color));
        }

        // At most 32 pieces, and no promotion left pending.
        prop_assert!(board.pieces().len() <= 32);
        prop_assert!(board.pending_promotion().is_none());

        // If a terminal state was reached, the oracle agrees.
        if game.state().is_terminal() {
            break;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invariants_hold_over_random_games(
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..60)
    ) {
        random_playout(&picks)?;
    }
}
