//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a fixed-seed `StdRng`, so hashes are identical across runs
//! and across threads of the same process.

use std::sync::OnceLock;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_shared::squares_of;
use crate::move_generation::legal_moves_pawn::en_passant_capture_possible;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random::<u64>();
            }
        }
    }

    let side_to_move = rng.random::<u64>();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights.bits() & 0x0F) as usize]
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Xor-ed in when Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full key of `position`. Clocks are not hashed, so positions that differ
/// only in move counters share a key. The en-passant file is hashed only when
/// the side to move can actually capture there.
pub fn position_key(position: &Position) -> u64 {
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for piece in ALL_PIECE_KINDS {
            for sq in squares_of(position.pieces(color, piece)) {
                key ^= piece_square_key(color, piece, sq);
            }
        }
    }

    if position.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(position.castling_rights());

    // Only a capturable target changes what can happen next.
    if en_passant_capture_possible(position) {
        if let Some(ep_square) = position.en_passant_square() {
            key ^= en_passant_file_key(ep_square % 8);
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::position_key;
    use crate::game_state::position::Position;
    use crate::moves::chess_move::ChessMove;

    fn play_all(start: &Position, moves: &[&str]) -> Position {
        moves.iter().fold(start.clone(), |pos, text| {
            let mv = ChessMove::from_uci(text).expect("move should parse");
            pos.play(&mv).expect("move should be legal")
        })
    }

    #[test]
    fn keys_are_stable_for_equal_positions() {
        let a = Position::new_game();
        let b = Position::from_fen(&a.to_fen()).expect("FEN should parse");
        assert_eq!(position_key(&a), position_key(&b));
    }

    #[test]
    fn transposed_move_orders_hash_alike() {
        let start = Position::new_game();
        let one = play_all(&start, &["g1f3", "g8f6", "b1c3"]);
        let two = play_all(&start, &["b1c3", "g8f6", "g1f3"]);
        assert_eq!(one.zobrist_key(), two.zobrist_key());
    }

    #[test]
    fn side_to_move_and_rights_change_the_key() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        let black = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b Q - 0 1").expect("FEN should parse");
        let no_rights =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        assert_ne!(white.zobrist_key(), black.zobrist_key());
        assert_ne!(white.zobrist_key(), no_rights.zobrist_key());
    }

    #[test]
    fn en_passant_file_is_hashed_only_when_capturable() {
        let after_push =
            Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let no_target =
            Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(after_push.zobrist_key(), no_target.zobrist_key());

        let capturable =
            Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let capture_gone =
            Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(capturable.zobrist_key(), capture_gone.zobrist_key());
    }

    #[test]
    fn clocks_are_not_hashed() {
        let early = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let late = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 40 70").expect("FEN should parse");
        assert_eq!(early.zobrist_key(), late.zobrist_key());
    }
}
