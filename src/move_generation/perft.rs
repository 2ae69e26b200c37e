//! Perft: count leaf nodes of the legal move tree to a fixed depth.
//!
//! Node counts from well-known positions are the standard correctness check
//! for a move generator; the categorized counters help pin down which rule
//! is wrong when a total does not match.

use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position)? {
        perft_recurse(generator, &mv, depth - 1, &mut total)?;
    }
    Ok(total)
}

/// Node count below each root move, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> MoveGenResult<Vec<(ChessMove, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    generator
        .generate_legal_moves(position)?
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(generator, &mv, depth - 1, &mut counts)?;
            Ok((mv.chess_move, counts.nodes))
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if remaining == 0 {
        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
        let chess_move = &mv.chess_move;
        if chess_move.is_capture() {
            leaf.captures = 1;
        }
        if chess_move.is_en_passant() {
            leaf.en_passant = 1;
        }
        if chess_move.is_castle() {
            leaf.castles = 1;
        }
        if chess_move.is_promotion() {
            leaf.promotions = 1;
        }
        if mv.position_after.is_in_check() {
            leaf.checks = 1;
            if generator.generate_legal_moves(&mv.position_after)?.is_empty() {
                leaf.checkmates = 1;
            }
        }
        counts.merge(leaf);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.position_after)? {
        perft_recurse(generator, &child, remaining - 1, counts)?;
    }
    Ok(())
}
