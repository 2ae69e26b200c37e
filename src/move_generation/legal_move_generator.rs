//! Full legal move generation pipeline.
//!
//! Runs the per-piece pseudo-legal generators, builds each candidate's
//! successor position on a scratch copy, and drops every move that leaves the
//! mover's own king attacked.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_apply::apply_move_with_piece;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::chess_move::ChessMove;

type PieceGenerator = fn(&Position, &mut Vec<ChessMove>);

/// Generation order: pawns first, king (with castling) last.
const PIECE_GENERATORS: [(PieceKind, PieceGenerator); 6] = [
    (PieceKind::Pawn, generate_pawn_moves),
    (PieceKind::Knight, generate_knight_moves),
    (PieceKind::Bishop, generate_bishop_moves),
    (PieceKind::Rook, generate_rook_moves),
    (PieceKind::Queen, generate_queen_moves),
    (PieceKind::King, generate_king_moves),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> MoveGenResult<Vec<GeneratedMove>> {
        Ok(self.legal_moves_with_positions(position))
    }
}

impl LegalMoveGenerator {
    pub fn legal_moves_with_positions(&self, position: &Position) -> Vec<GeneratedMove> {
        let mover = position.side_to_move;
        let mut pseudo = Vec::<ChessMove>::with_capacity(64);
        let mut legal = Vec::<GeneratedMove>::with_capacity(64);

        for (piece, generate) in PIECE_GENERATORS {
            pseudo.clear();
            generate(position, &mut pseudo);

            for mv in &pseudo {
                let next = apply_move_with_piece(position, mv, piece);
                if is_king_in_check(&next, mover) {
                    continue;
                }
                legal.push(GeneratedMove {
                    chess_move: *mv,
                    position_after: next,
                });
            }
        }

        legal
    }

    pub fn legal_move_list(&self, position: &Position) -> Vec<ChessMove> {
        self.legal_moves_with_positions(position)
            .into_iter()
            .map(|generated| generated.chess_move)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LegalMoveGenerator;
    use crate::game_state::position::Position;

    fn legal_count(fen: &str) -> usize {
        let position = Position::from_fen(fen).expect("FEN should parse");
        LegalMoveGenerator.legal_move_list(&position).len()
    }

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(Position::new_game().legal_moves().len(), 20);
    }

    #[test]
    fn fools_mate_has_no_legal_moves_and_is_check() {
        let position = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .expect("FEN should parse");
        assert!(position.legal_moves().is_empty());
        assert!(position.is_in_check());
    }

    #[test]
    fn stalemate_has_no_legal_moves_without_check() {
        let position =
            Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(position.legal_moves().is_empty());
        assert!(!position.is_in_check());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // White knight e2 pinned by the rook on e8.
        assert_eq!(legal_count("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1"), 4);
    }

    #[test]
    fn en_passant_exposing_the_king_is_illegal() {
        // Capturing e5xd6 would open the fifth rank to the rook on h5.
        let position =
            Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").expect("FEN should parse");
        let moves: Vec<String> = position.legal_moves().iter().map(|mv| mv.to_uci()).collect();
        assert!(!moves.contains(&"e5d6".to_owned()));
        assert!(moves.contains(&"e5e6".to_owned()));
    }

    #[test]
    fn generation_order_is_deterministic() {
        let position = Position::new_game();
        let first = position.legal_moves();
        let second = position.legal_moves();
        assert_eq!(first, second);
        assert_eq!(first[0].to_uci(), "a2a3");
    }
}
