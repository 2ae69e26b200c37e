//! Terminal-state classification.
//!
//! The move generator only reports an empty move list; this module turns that
//! and the draw counters into a named outcome.

use crate::game_state::chess_rules::FIFTY_MOVE_RULE_HALFMOVES;
use crate::game_state::{chess_types::Color, position::Position};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Status of a bare position. Repetition needs history, see
/// `GameState::status`.
pub fn game_status(position: &Position) -> GameStatus {
    if LegalMoveGenerator.legal_move_list(position).is_empty() {
        return if position.is_in_check() {
            GameStatus::Checkmate {
                winner: position.side_to_move().opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if position.halfmove_clock() >= FIFTY_MOVE_RULE_HALFMOVES {
        return GameStatus::FiftyMoveRule;
    }

    GameStatus::Ongoing
}

#[inline]
pub fn is_checkmate(position: &Position) -> bool {
    matches!(game_status(position), GameStatus::Checkmate { .. })
}
