//! Host-facing command and query surface.
//!
//! One method per action an assistant host can call. Commands act on the
//! implementor's live game; queries that take a FEN are pure and leave the
//! live game alone.

use crate::errors::ChessResult;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::EvaluationResult;

/// A ranked candidate move as returned by `suggest_moves`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSuggestion {
    pub uci: String,
    pub evaluation: EvaluationResult,
}

pub trait ChessCapabilities {
    /// Legal moves of the live position, UCI text in generation order.
    fn legal_moves(&self) -> Vec<String>;

    /// Play one UCI move on the live game; returns the new FEN.
    fn make_move(&mut self, uci: &str) -> ChessResult<String>;

    /// Play every move or none; returns the new FEN.
    fn make_sequence_of_moves(&mut self, moves: &[&str]) -> ChessResult<String>;

    /// Take back the last move; returns the FEN after undoing.
    fn unmake_move(&mut self) -> ChessResult<String>;

    fn unmake_n_moves(&mut self, count: usize) -> ChessResult<String>;

    /// Back to the session's initial position; returns its FEN.
    fn reset_board(&mut self) -> String;

    fn current_fen(&self) -> String;

    /// Search-backed evaluation of `fen`, White-perspective.
    fn evaluate_position(&self, fen: &str) -> ChessResult<EvaluationResult>;

    /// The `count` best moves of `fen`, best first for the side to move.
    fn suggest_moves(&self, fen: &str, count: usize) -> ChessResult<Vec<MoveSuggestion>>;

    fn is_checkmate(&self, fen: &str) -> ChessResult<bool>;

    /// FEN after playing `uci` from `fen`.
    fn get_continuation(&self, fen: &str, uci: &str) -> ChessResult<String>;

    /// Static evaluation after each move of `moves` played from `fen`.
    fn play_sequence_and_get_evals(
        &self,
        fen: &str,
        moves: &[&str],
    ) -> ChessResult<Vec<EvaluationResult>>;

    /// FEN after each move of `moves` played from `fen`, for diagram display.
    fn positions_along_line(&self, fen: &str, moves: &[&str]) -> ChessResult<Vec<String>>;

    /// Best line from `fen` as found by the search.
    fn principal_variation(&self, fen: &str) -> ChessResult<Vec<ChessMove>>;
}
