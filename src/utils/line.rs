//! Positions and evaluations along a move sequence.
//!
//! Both functions are pure: they walk their own copies and never touch a live
//! `GameState`.

use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{evaluate, EvaluationResult};

/// Position after each move of `moves`, starting position excluded.
///
/// Fails with `IllegalMove` at the first move that is not legal where it is
/// played.
pub fn materialize_line(start: &Position, moves: &[ChessMove]) -> ChessResult<Vec<Position>> {
    let mut line = Vec::with_capacity(moves.len());
    let mut position = start.clone();
    for mv in moves {
        position = position.play(mv)?;
        line.push(position.clone());
    }
    Ok(line)
}

/// Static evaluation after each move of `moves`.
pub fn evaluate_line(start: &Position, moves: &[ChessMove]) -> ChessResult<Vec<EvaluationResult>> {
    Ok(materialize_line(start, moves)?.iter().map(evaluate).collect())
}
