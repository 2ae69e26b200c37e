//! Successor-position construction.
//!
//! `apply_move` never touches its input: it clones the position, moves the
//! pieces, and updates rights, en-passant target, and clocks on the copy.
//! It does not check legality; callers pass generated moves only.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::*;
use crate::game_state::{chess_types::*, position::Position};
use crate::moves::chess_move::ChessMove;

pub fn apply_move(position: &Position, mv: &ChessMove) -> ChessResult<Position> {
    match position.piece_at(mv.from) {
        Some((color, piece)) if color == position.side_to_move => {
            Ok(apply_move_with_piece(position, mv, piece))
        }
        _ => Err(ChessError::ContractViolation(format!(
            "no {:?} piece on from-square of {mv} in {}",
            position.side_to_move,
            position.to_fen()
        ))),
    }
}

/// Build the successor when the moving piece kind is already known.
pub(crate) fn apply_move_with_piece(
    position: &Position,
    mv: &ChessMove,
    moved_piece: PieceKind,
) -> Position {
    let moving_color = position.side_to_move;
    let enemy_color = moving_color.opposite();

    let captured_piece = position
        .piece_at(mv.to)
        .filter(|(color, _)| *color == enemy_color)
        .map(|(_, piece)| piece);

    let from_mask = 1u64 << mv.from;
    let to_mask = 1u64 << mv.to;
    let mut next = position.clone();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    if mv.is_en_passant() {
        let capture_sq = match moving_color {
            Color::White => mv.to.wrapping_sub(8),
            Color::Black => mv.to.wrapping_add(8),
        };
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
    } else if let Some(captured) = captured_piece {
        next.pieces[enemy_color.index()][captured.index()] &= !to_mask;
    }

    let placed_piece = mv.promotion.unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed_piece.index()] |= to_mask;

    let castle_rook = match mv.to {
        6 => Some((WHITE_KINGSIDE_ROOK, 5)),
        2 => Some((WHITE_QUEENSIDE_ROOK, 3)),
        62 => Some((BLACK_KINGSIDE_ROOK, 61)),
        58 => Some((BLACK_QUEENSIDE_ROOK, 59)),
        _ => None,
    };
    if let (PieceKind::King, true, Some((rook_from, rook_to))) =
        (moved_piece, mv.from.abs_diff(mv.to) == 2, castle_rook)
    {
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks &= !(1u64 << rook_from);
        *rooks |= 1u64 << rook_to;
    }

    update_castling_rights(&mut next.castling_rights, moving_color, mv, moved_piece);

    next.en_passant_square = if moved_piece == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    let is_capture = captured_piece.is_some() || mv.is_en_passant();
    if moved_piece == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    next
}

fn update_castling_rights(
    rights: &mut CastlingRights,
    moving_color: Color,
    mv: &ChessMove,
    moved_piece: PieceKind,
) {
    if moved_piece == PieceKind::King {
        rights.remove(CastlingRights::for_color(moving_color));
    }

    // A rook leaving its corner, or anything landing on a corner (capturing
    // the rook there), kills the matching right.
    for square in [mv.from, mv.to] {
        match square {
            WHITE_QUEENSIDE_ROOK => rights.remove(CastlingRights::WHITE_QUEENSIDE),
            WHITE_KINGSIDE_ROOK => rights.remove(CastlingRights::WHITE_KINGSIDE),
            BLACK_QUEENSIDE_ROOK => rights.remove(CastlingRights::BLACK_QUEENSIDE),
            BLACK_KINGSIDE_ROOK => rights.remove(CastlingRights::BLACK_KINGSIDE),
            _ => {}
        }
    }
}
