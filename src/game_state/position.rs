//! Immutable board state.
//!
//! `Position` stores piece bitboards, occupancy caches, side to move, castling
//! rights, the en-passant target, and the two move clocks. It is never mutated
//! after construction: move application builds a fresh `Position`, which is
//! what lets `GameState` undo by simply popping its history.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::search::zobrist::position_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_position::render_position;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],

    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Position {
    /// Board with no pieces, White to move, move number 1.
    pub(crate) fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn new_game() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut position = Self::empty();
        for (file, piece) in (0u8..).zip(BACK_RANK) {
            position.put_piece(Color::White, piece, file);
            position.put_piece(Color::White, PieceKind::Pawn, 8 + file);
            position.put_piece(Color::Black, PieceKind::Pawn, 48 + file);
            position.put_piece(Color::Black, piece, 56 + file);
        }
        position.castling_rights = CastlingRights::ALL;
        position.recalc_occupancy();
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Bitboard of `color`'s pieces of kind `piece`.
    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        if square > 63 {
            return None;
        }
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        ALL_PIECE_KINDS
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
            .map(|piece| (color, piece))
    }

    /// Square-indexed view of the board.
    pub fn squares(&self) -> [Option<(Color, PieceKind)>; 64] {
        let mut out = [None; 64];
        for (square, slot) in out.iter_mut().enumerate() {
            *slot = self.piece_at(square as Square);
        }
        out
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// True when the side to move has its king attacked.
    pub fn is_in_check(&self) -> bool {
        let Some(king_sq) = self.king_square(self.side_to_move) else {
            return false;
        };
        is_square_attacked(self, king_sq, self.side_to_move.opposite())
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        position_key(self)
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        LegalMoveGenerator.legal_move_list(self)
    }

    /// Legality-checked successor position.
    ///
    /// `mv` is matched against the legal moves by `from`, `to`, and
    /// `promotion`, so a move parsed from UCI text (with no flags) is accepted.
    pub fn play(&self, mv: &ChessMove) -> ChessResult<Position> {
        LegalMoveGenerator
            .generate_legal_moves(self)?
            .into_iter()
            .find(|generated| generated.chess_move.same_action(mv))
            .map(|generated| generated.position_after)
            .ok_or_else(|| ChessError::IllegalMove {
                mv: mv.to_uci(),
                fen: self.to_fen(),
            })
    }

    /// Check the one-king-per-side invariant that every reachable position
    /// satisfies.
    pub fn validate(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.pieces[color.index()][PieceKind::King.index()].count_ones();
            if kings != 1 {
                return Err(ChessError::ContractViolation(format!(
                    "{color:?} has {kings} kings in {}",
                    self.to_fen()
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        self.pieces[color.index()][piece.index()] |= 1u64 << square;
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_position(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::errors::ErrorKind;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::chess_move::ChessMove;

    #[test]
    fn new_game_matches_starting_fen() {
        let start = Position::new_game();
        assert_eq!(start.to_fen(), STARTING_POSITION_FEN);
        assert_eq!(start, Position::from_fen(STARTING_POSITION_FEN).expect("FEN should parse"));
        assert_eq!(start.piece_at(4), Some((Color::White, PieceKind::King)));
        assert_eq!(start.piece_at(59), Some((Color::Black, PieceKind::Queen)));
        assert_eq!(start.piece_at(28), None);
        assert_eq!(start.squares().iter().filter(|s| s.is_some()).count(), 32);
    }

    #[test]
    fn play_returns_new_position_and_leaves_original_untouched() {
        let start = Position::new_game();
        let before = start.clone();
        let mv = ChessMove::from_uci("e2e4").expect("move should parse");

        let next = start.play(&mv).expect("e2e4 is legal");

        assert_eq!(start, before);
        assert_eq!(next.en_passant_square(), Some(20));
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn play_rejects_illegal_move() {
        let start = Position::new_game();
        let mv = ChessMove::from_uci("e2e5").expect("move should parse");
        let err = start.play(&mv).expect_err("e2e5 is illegal");
        assert_eq!(err.kind(), ErrorKind::IllegalMove);
    }

    #[test]
    fn validate_flags_missing_king() {
        let kingless = Position::from_fen("8/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let err = kingless.validate().expect_err("black king missing");
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert!(Position::new_game().validate().is_ok());
    }

    #[test]
    fn check_detection_uses_side_to_move() {
        let checked =
            Position::from_fen("4k3/8/8/8/8/8/8/4KR1r w - - 0 1").expect("FEN should parse");
        assert!(!checked.is_in_check());
        let black_checked =
            Position::from_fen("4k3/8/8/8/8/8/8/4R2K b - - 0 1").expect("FEN should parse");
        assert!(black_checked.is_in_check());
    }
}
