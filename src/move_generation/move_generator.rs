//! Move generation interface.
//!
//! Search and perft are written against this trait rather than a concrete
//! generator, so alternative generators (or failing ones in tests) can be
//! dropped in without touching the tree walk.

use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::moves::chess_move::ChessMove;

pub type MoveGenResult<T> = ChessResult<T>;

/// A legal move together with the position it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub position_after: Position,
}

pub trait MoveGenerator: Send + Sync {
    /// Every legal move of `position`, in deterministic generation order.
    ///
    /// An empty list means the side to move is checkmated (if in check) or
    /// stalemated; the caller decides which by inspecting the position.
    fn generate_legal_moves(&self, position: &Position) -> MoveGenResult<Vec<GeneratedMove>>;
}
