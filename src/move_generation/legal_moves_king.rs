//! King steps and castling.
//!
//! Castling requires the matching right, empty squares between king and rook,
//! a king that is not in check, and a king path (transit and landing squares)
//! that no enemy piece attacks. The landing square is re-checked anyway by the
//! general self-check filter.

use crate::game_state::chess_rules::*;
use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::chess_move::{ChessMove, MoveFlags};
use crate::moves::leaper_attacks::king_attacks;

struct CastleRoute {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: u64,
    king_path: [Square; 2],
}

const CASTLE_ROUTES: [CastleRoute; 4] = [
    CastleRoute {
        right: CastlingRights::WHITE_KINGSIDE,
        king_from: WHITE_KING_START,
        king_to: 6,
        rook_from: WHITE_KINGSIDE_ROOK,
        must_be_empty: (1u64 << 5) | (1u64 << 6),
        king_path: [5, 6],
    },
    CastleRoute {
        right: CastlingRights::WHITE_QUEENSIDE,
        king_from: WHITE_KING_START,
        king_to: 2,
        rook_from: WHITE_QUEENSIDE_ROOK,
        must_be_empty: (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
        king_path: [3, 2],
    },
    CastleRoute {
        right: CastlingRights::BLACK_KINGSIDE,
        king_from: BLACK_KING_START,
        king_to: 62,
        rook_from: BLACK_KINGSIDE_ROOK,
        must_be_empty: (1u64 << 61) | (1u64 << 62),
        king_path: [61, 62],
    },
    CastleRoute {
        right: CastlingRights::BLACK_QUEENSIDE,
        king_from: BLACK_KING_START,
        king_to: 58,
        rook_from: BLACK_QUEENSIDE_ROOK,
        must_be_empty: (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
        king_path: [59, 58],
    },
];

pub fn generate_king_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let Some(from) = position.king_square(side) else {
        return;
    };

    let own_occ = position.occupancy_by_color[side.index()];
    push_target_moves(position, from, king_attacks(from) & !own_occ, out);

    generate_castling_moves(position, out, from);
}

fn generate_castling_moves(position: &Position, out: &mut Vec<ChessMove>, king_from: Square) {
    let side = position.side_to_move;
    let enemy = side.opposite();
    let own_rooks = position.pieces(side, PieceKind::Rook);
    let side_rights = CastlingRights::for_color(side);

    let mut candidates = CASTLE_ROUTES.iter().filter(|route| {
        route.king_from == king_from
            && side_rights.contains(route.right)
            && position.castling_rights.contains(route.right)
            && own_rooks & (1u64 << route.rook_from) != 0
            && position.occupancy_all & route.must_be_empty == 0
    });

    let Some(first) = candidates.next() else {
        return;
    };

    // Cannot castle out of check.
    if is_square_attacked(position, king_from, enemy) {
        return;
    }

    for route in std::iter::once(first).chain(candidates) {
        if route
            .king_path
            .iter()
            .any(|&sq| is_square_attacked(position, sq, enemy))
        {
            continue;
        }
        out.push(ChessMove::new(king_from, route.king_to).with_flags(MoveFlags::CASTLE));
    }
}
