//! Ray-cast attacks for bishops, rooks, and queens.
//!
//! Each ray walks outward from the origin and includes the first occupied
//! square it meets (a capture target or a friendly blocker the caller masks
//! out), then stops.

use crate::game_state::chess_types::Square;

const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    cast_rays(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    cast_rays(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn cast_rays(square: Square, directions: &[(i32, i32)], occupancy: u64) -> u64 {
    let origin_file = i32::from(square % 8);
    let origin_rank = i32::from(square / 8);
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}
