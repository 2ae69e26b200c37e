//! Move ordering for alpha-beta.
//!
//! The cached best move goes first, then promotions and captures (most
//! valuable victim, least valuable attacker), then quiet moves. Sorting is
//! stable, so equal keys keep generation order and search stays deterministic.

use crate::game_state::{chess_types::PieceKind, position::Position};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::MaterialScorer;

const HASH_MOVE_BONUS: i32 = 50_000;
const PROMOTION_BONUS: i32 = 8_000;
const CAPTURE_BONUS: i32 = 5_000;

pub fn move_order_score(position: &Position, mv: &ChessMove, hash_move: Option<&ChessMove>) -> i32 {
    let mut score = 0i32;

    if hash_move.is_some_and(|best| best.same_action(mv)) {
        score += HASH_MOVE_BONUS;
    }
    if let Some(promote) = mv.promotion {
        score += PROMOTION_BONUS + MaterialScorer::piece_value(promote);
    }
    if mv.is_capture() {
        let victim = if mv.is_en_passant() {
            PieceKind::Pawn
        } else {
            enemy_piece_on(position, mv.to).unwrap_or(PieceKind::Pawn)
        };
        let attacker = position
            .piece_at(mv.from)
            .map(|(_, piece)| MaterialScorer::piece_value(piece))
            .unwrap_or(0);
        score += CAPTURE_BONUS + MaterialScorer::piece_value(victim) - attacker / 10;
    }

    score
}

/// Sort `moves` best-first for `position`.
pub fn order_moves(position: &Position, moves: &mut [GeneratedMove], hash_move: Option<&ChessMove>) {
    moves.sort_by_key(|generated| -move_order_score(position, &generated.chess_move, hash_move));
}
