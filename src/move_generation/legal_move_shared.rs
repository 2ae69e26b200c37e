use crate::game_state::{chess_types::*, position::Position};
use crate::moves::chess_move::{ChessMove, MoveFlags};

/// Emit one move per set bit of `targets`, flagging captures of enemy pieces.
///
/// `targets` must already exclude squares holding friendly pieces.
#[inline]
pub fn push_target_moves(position: &Position, from: Square, targets: u64, out: &mut Vec<ChessMove>) {
    let enemy_occ = position.occupancy_by_color[position.side_to_move.opposite().index()];

    let mut remaining = targets;
    while remaining != 0 {
        let to = remaining.trailing_zeros() as Square;
        let flags = if enemy_occ & (1u64 << to) != 0 {
            MoveFlags::CAPTURE
        } else {
            MoveFlags::QUIET
        };
        out.push(ChessMove::new(from, to).with_flags(flags));
        remaining &= remaining - 1;
    }
}

/// Iterate the squares of a bitboard from a1 upward.
#[inline]
pub fn squares_of(bitboard: u64) -> impl Iterator<Item = Square> {
    let mut remaining = bitboard;
    std::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let sq = remaining.trailing_zeros() as Square;
        remaining &= remaining - 1;
        Some(sq)
    })
}

#[inline]
pub fn enemy_piece_on(position: &Position, square: Square) -> Option<PieceKind> {
    match position.piece_at(square) {
        Some((color, piece)) if color != position.side_to_move => Some(piece),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{push_target_moves, squares_of};
    use crate::game_state::position::Position;

    #[test]
    fn squares_of_walks_bits_in_ascending_order() {
        let squares: Vec<u8> = squares_of((1u64 << 3) | (1u64 << 40) | 1).collect();
        assert_eq!(squares, vec![0, 3, 40]);
    }

    #[test]
    fn targets_on_enemy_pieces_become_captures() {
        let position =
            Position::from_fen("4k3/8/8/8/3p4/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        // d1 rook: d2, d3, d4 (capture).
        push_target_moves(&position, 3, (1u64 << 11) | (1u64 << 19) | (1u64 << 27), &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().filter(|mv| mv.is_capture()).count(), 1);
        assert!(out[2].is_capture());
    }
}
