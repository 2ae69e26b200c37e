//! Canonical chess-rule constants.
//!
//! Static literals shared by position setup, move application, and draw
//! detection.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without pawn move or capture after which a draw may be claimed.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Occurrences of the same position that make a threefold repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

pub const WHITE_KING_START: Square = 4;
pub const BLACK_KING_START: Square = 60;

/// Rook corner squares, indexed like the castling flags.
pub const WHITE_KINGSIDE_ROOK: Square = 7;
pub const WHITE_QUEENSIDE_ROOK: Square = 0;
pub const BLACK_KINGSIDE_ROOK: Square = 63;
pub const BLACK_QUEENSIDE_ROOK: Square = 56;
