//! Static evaluation and score encoding.
//!
//! Every score in this crate is in centipawns from White's point of view:
//! positive favors White whoever is to move. Scorers are pure functions of a
//! `Position` and never detect mate themselves; the search does that when it
//! reaches a node with no legal moves and reports it through [`mate_score`].

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_shared::squares_of;

/// Magnitude of a mate delivered on the current move.
pub const MATE_SCORE: i32 = 100_000;

/// Any score this close to `MATE_SCORE` encodes a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Score of a position where `mated` has been checkmated `ply` half-moves
/// below the search root. Shorter mates are further from zero.
#[inline]
pub const fn mate_score(mated: Color, ply: u32) -> i32 {
    let magnitude = MATE_SCORE - ply as i32;
    match mated {
        Color::White => -magnitude,
        Color::Black => magnitude,
    }
}

#[inline]
pub const fn is_mate_score(score: i32) -> bool {
    score >= MATE_THRESHOLD || score <= -MATE_THRESHOLD
}

/// Evaluation as handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluationResult {
    /// White-perspective centipawns, or a mate encoding.
    pub score: i32,
    pub is_mate_score: bool,
    /// Full moves until mate; positive when White mates, negative when Black
    /// mates. `Some(0)` means the position is already checkmate.
    pub mate_in: Option<i32>,
}

impl EvaluationResult {
    pub fn from_score(score: i32) -> Self {
        if !is_mate_score(score) {
            return Self {
                score,
                is_mate_score: false,
                mate_in: None,
            };
        }

        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        Self {
            score,
            is_mate_score: true,
            mate_in: Some(moves * score.signum()),
        }
    }
}

pub trait BoardScorer: Send + Sync {
    /// White-perspective score; never a mate encoding.
    fn score(&self, position: &Position) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    pub fn material_balance_white_minus_black(position: &Position) -> i32 {
        ALL_PIECE_KINDS
            .iter()
            .map(|&piece| {
                let white = position.pieces(Color::White, piece).count_ones() as i32;
                let black = position.pieces(Color::Black, piece).count_ones() as i32;
                (white - black) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        Self::material_balance_white_minus_black(position)
    }
}

/// Material plus piece-square adjustments. This is the default evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

// Tables are written as seen from White's side of the board: the first row is
// rank 8, the last row is rank 1.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

impl PieceSquareScorer {
    #[inline]
    fn table(piece: PieceKind) -> &'static [i32; 64] {
        match piece {
            PieceKind::Pawn => &PAWN_TABLE,
            PieceKind::Knight => &KNIGHT_TABLE,
            PieceKind::Bishop => &BISHOP_TABLE,
            PieceKind::Rook => &ROOK_TABLE,
            PieceKind::Queen => &QUEEN_TABLE,
            PieceKind::King => &KING_TABLE,
        }
    }

    /// Table bonus for `color`'s `piece` on `square`. Black reads the table
    /// mirrored vertically.
    #[inline]
    pub fn square_bonus(color: Color, piece: PieceKind, square: Square) -> i32 {
        let file = (square % 8) as usize;
        let rank = (square / 8) as usize;
        let row = match color {
            Color::White => 7 - rank,
            Color::Black => rank,
        };
        Self::table(piece)[row * 8 + file]
    }

    pub fn positional_white_minus_black(position: &Position) -> i32 {
        let mut score = 0i32;
        for color in [Color::White, Color::Black] {
            for piece in ALL_PIECE_KINDS {
                let bonus: i32 = squares_of(position.pieces(color, piece))
                    .map(|sq| Self::square_bonus(color, piece, sq))
                    .sum();
                score += color.sign() * bonus;
            }
        }
        score
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, position: &Position) -> i32 {
        MaterialScorer::material_balance_white_minus_black(position)
            + Self::positional_white_minus_black(position)
    }
}

/// Static evaluation with the default scorer.
pub fn evaluate(position: &Position) -> EvaluationResult {
    EvaluationResult::from_score(PieceSquareScorer.score(position))
}
