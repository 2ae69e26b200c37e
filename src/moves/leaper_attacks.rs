//! Fixed-offset attack tables for knights, kings, and pawns.
//!
//! Every table is built at compile time from a list of `(file, rank)` deltas,
//! so move generation and attack detection only ever index an array.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = build_offset_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_offset_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_offset_table(&WHITE_PAWN_CAPTURE_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_offset_table(&BLACK_PAWN_CAPTURE_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

const fn build_offset_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut i = 0usize;
        while i < offsets.len() {
            let (df, dr) = offsets[i];
            attacks |= bit_if_on_board(file + df, rank + dr);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}
