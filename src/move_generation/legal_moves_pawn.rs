//! Pseudo-legal pawn moves: single and double pushes, diagonal captures,
//! en-passant, and all four promotion choices on the last rank.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_shared::squares_of;
use crate::moves::chess_move::{ChessMove, MoveFlags};
use crate::moves::leaper_attacks::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let enemy_occ = position.occupancy_by_color[side.opposite().index()];
    let empty = !position.occupancy_all;

    let (forward, start_rank, promotion_rank): (i8, u8, u8) = match side {
        Color::White => (8, 1, 7),
        Color::Black => (-8, 6, 0),
    };

    for from in squares_of(position.pieces(side, PieceKind::Pawn)) {
        // A pawn parked on its last rank (only possible from a hand-written
        // FEN) has nowhere to go.
        if from / 8 == promotion_rank {
            continue;
        }
        let one_step = (from as i8 + forward) as Square;

        if empty & (1u64 << one_step) != 0 {
            push_pawn_move(out, from, one_step, promotion_rank, MoveFlags::QUIET);

            if from / 8 == start_rank {
                let two_step = (one_step as i8 + forward) as Square;
                if empty & (1u64 << two_step) != 0 {
                    out.push(ChessMove::new(from, two_step).with_flags(MoveFlags::DOUBLE_PAWN_PUSH));
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        for to in squares_of(attacks & enemy_occ) {
            push_pawn_move(out, from, to, promotion_rank, MoveFlags::CAPTURE);
        }

        if let Some(ep) = en_passant_target(position) {
            if attacks & (1u64 << ep) != 0 {
                out.push(
                    ChessMove::new(from, ep).with_flags(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT),
                );
            }
        }
    }
}

/// The en-passant target if it really follows a double push: on the rank
/// behind the enemy's fourth rank, with the pushed pawn in front of it.
pub(crate) fn en_passant_target(position: &Position) -> Option<Square> {
    let ep = position.en_passant_square?;
    let pushed = match position.side_to_move {
        Color::White if ep / 8 == 5 => ep - 8,
        Color::Black if ep / 8 == 2 => ep + 8,
        _ => return None,
    };
    let enemy = position.side_to_move.opposite();
    (position.pieces(enemy, PieceKind::Pawn) & (1u64 << pushed) != 0).then_some(ep)
}

/// Whether a pawn of the side to move attacks a valid en-passant target.
pub(crate) fn en_passant_capture_possible(position: &Position) -> bool {
    let side = position.side_to_move;
    en_passant_target(position).is_some_and(|ep| {
        pawn_attacks(side.opposite(), ep) & position.pieces(side, PieceKind::Pawn) != 0
    })
}

fn push_pawn_move(
    out: &mut Vec<ChessMove>,
    from: Square,
    to: Square,
    promotion_rank: u8,
    flags: MoveFlags,
) {
    let base = ChessMove::new(from, to).with_flags(flags);
    if to / 8 == promotion_rank {
        for promo in PROMOTION_KINDS {
            out.push(base.with_promotion(promo));
        }
    } else {
        out.push(base);
    }
}

#[cfg(test)]
mod tests {
    use super::{en_passant_capture_possible, en_passant_target, generate_pawn_moves};
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::position::Position;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, &mut out);
        out.iter().map(|mv| mv.to_uci()).collect()
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves, vec!["e2e3", "e2e4"]);
    }

    #[test]
    fn blocked_pawn_has_no_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_enumerates_all_four_pieces() {
        let position = Position::from_fen("3n4/2P5/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, &mut out);

        // c7c8 x4 and c7xd8 x4.
        assert_eq!(out.len(), 8);
        let capture_promotions: Vec<_> = out.iter().filter(|mv| mv.is_capture()).collect();
        assert_eq!(capture_promotions.len(), 4);
        for piece in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
            assert!(out.iter().any(|mv| mv.to == 58 && mv.promotion == Some(piece)));
        }
    }

    #[test]
    fn en_passant_capture_is_generated_only_with_target() {
        let with_target = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(with_target.contains(&"e5d6".to_owned()));

        let without_target = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        assert!(!without_target.contains(&"e5d6".to_owned()));
    }

    #[test]
    fn en_passant_needs_the_pushed_pawn_behind_the_target() {
        let no_pushed_pawn = pawn_moves("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(no_pushed_pawn, vec!["e5e6"]);
    }

    #[test]
    fn en_passant_target_on_the_wrong_rank_is_ignored() {
        // e3 is a target for Black only; White's ordinary capture stays single.
        let moves = pawn_moves("4k3/8/8/8/8/4p3/3P4/4K3 w - e3 0 1");
        assert_eq!(moves, vec!["d2d3", "d2d4", "d2e3"]);

        let position =
            Position::from_fen("4k3/8/8/8/8/4p3/3P4/4K3 w - e3 0 1").expect("FEN should parse");
        assert_eq!(en_passant_target(&position), None);
        assert!(!en_passant_capture_possible(&position));
    }

    #[test]
    fn en_passant_capture_possible_needs_an_attacking_pawn() {
        let attacked =
            Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert!(en_passant_capture_possible(&attacked));

        let unattacked =
            Position::from_fen("4k3/8/8/3p4/8/8/4P3/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(en_passant_target(&unattacked), Some(43));
        assert!(!en_passant_capture_possible(&unattacked));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(moves, vec!["e7e6", "e7e5"]);
    }
}
