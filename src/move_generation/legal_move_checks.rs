//! Attack queries used for legality filtering and castling checks.
//!
//! Attacks are tested "in reverse": a square is attacked by a knight if a
//! knight of the attacking color sits on one of the knight-jump squares of
//! the target, and likewise for every other piece kind.

use crate::game_state::{chess_types::*, position::Position};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

/// True when `color`'s king stands on a square attacked by the opponent.
///
/// A side without a king is never in check.
#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let attacker = |piece: PieceKind| position.pieces(attacker_color, piece);

    // A pawn of the attacker attacks `square` iff a defender pawn on `square`
    // would attack that pawn's square.
    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let queens = attacker(PieceKind::Queen);
    if bishop_attacks(square, position.occupancy_all) & (attacker(PieceKind::Bishop) | queens) != 0
    {
        return true;
    }
    rook_attacks(square, position.occupancy_all) & (attacker(PieceKind::Rook) | queens) != 0
}
