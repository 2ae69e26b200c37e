//! Knight, bishop, rook, and queen moves.
//!
//! These pieces share one shape: look up the attack set, drop squares held by
//! friendly pieces, and emit one move per remaining target.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_shared::{push_target_moves, squares_of};
use crate::moves::chess_move::ChessMove;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_knight_moves(position: &Position, out: &mut Vec<ChessMove>) {
    generate_piece_moves(position, PieceKind::Knight, out, |from, _| knight_attacks(from));
}

pub fn generate_bishop_moves(position: &Position, out: &mut Vec<ChessMove>) {
    generate_piece_moves(position, PieceKind::Bishop, out, bishop_attacks);
}

pub fn generate_rook_moves(position: &Position, out: &mut Vec<ChessMove>) {
    generate_piece_moves(position, PieceKind::Rook, out, rook_attacks);
}

pub fn generate_queen_moves(position: &Position, out: &mut Vec<ChessMove>) {
    generate_piece_moves(position, PieceKind::Queen, out, queen_attacks);
}

fn generate_piece_moves(
    position: &Position,
    piece: PieceKind,
    out: &mut Vec<ChessMove>,
    attacks: impl Fn(Square, u64) -> u64,
) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];

    for from in squares_of(position.pieces(side, piece)) {
        let targets = attacks(from, position.occupancy_all) & !own_occ;
        push_target_moves(position, from, targets, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fen: &str, generate: fn(&Position, &mut Vec<ChessMove>)) -> usize {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate(&position, &mut out);
        out.len()
    }

    #[test]
    fn knights_on_start_position_have_four_moves() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(count(start, generate_knight_moves), 4);
        assert_eq!(count(start, generate_bishop_moves), 0);
        assert_eq!(count(start, generate_rook_moves), 0);
        assert_eq!(count(start, generate_queen_moves), 0);
    }

    #[test]
    fn central_queen_on_open_board() {
        // Queen d4; kings a8/h1 are off its lines except the a1-h8 diagonal
        // which the white king on h1 does not touch.
        assert_eq!(count("k7/8/8/8/3Q4/8/8/7K w - - 0 1", generate_queen_moves), 27);
    }

    #[test]
    fn rook_stops_on_friendly_piece_and_captures_enemy() {
        // Rook a1, own pawn a3, enemy knight c1.
        let position =
            Position::from_fen("4k3/8/8/8/8/P7/8/R1n1K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_moves(&position, &mut out);
        let targets: Vec<String> = out.iter().map(|mv| mv.to_uci()).collect();
        assert_eq!(targets, vec!["a1b1", "a1c1", "a1a2"]);
        assert!(out[1].is_capture());
    }
}
