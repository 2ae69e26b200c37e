//! Move value type.
//!
//! A `ChessMove` is only meaningful relative to the position it was generated
//! from. Moves parsed from UCI text carry no flags until they are matched
//! against a generated legal move.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::long_algebraic::{format_uci_move, parse_uci_move};

/// Special-move markers attached by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const QUIET: Self = Self(0);
    pub const CAPTURE: Self = Self(1 << 0);
    pub const EN_PASSANT: Self = Self(1 << 1);
    pub const CASTLE: Self = Self(1 << 2);
    pub const DOUBLE_PAWN_PUSH: Self = Self(1 << 3);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flags: MoveFlags::QUIET,
        }
    }

    #[inline]
    pub fn with_promotion(mut self, piece: PieceKind) -> Self {
        self.promotion = Some(piece);
        self
    }

    #[inline]
    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Same origin, destination, and promotion; flags are ignored.
    #[inline]
    pub fn same_action(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }

    pub fn from_uci(text: &str) -> ChessResult<Self> {
        parse_uci_move(text)
    }

    pub fn to_uci(&self) -> String {
        format_uci_move(self)
    }
}

impl FromStr for ChessMove {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uci_move(s)
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChessMove, MoveFlags};
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn same_action_ignores_flags() {
        let parsed = ChessMove::new(12, 28);
        let generated = ChessMove::new(12, 28).with_flags(MoveFlags::DOUBLE_PAWN_PUSH);
        assert!(parsed.same_action(&generated));
        assert_ne!(parsed, generated);
        assert!(generated.is_double_pawn_push());
        assert!(!generated.is_capture());
    }

    #[test]
    fn promotion_piece_distinguishes_actions() {
        let queen = ChessMove::new(52, 60).with_promotion(PieceKind::Queen);
        let knight = ChessMove::new(52, 60).with_promotion(PieceKind::Knight);
        assert!(!queen.same_action(&knight));
        assert_eq!(queen.to_string(), "e7e8q");
    }

    #[test]
    fn combined_flags_report_each_marker() {
        let mv = ChessMove::new(36, 43).with_flags(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT);
        assert!(mv.is_capture());
        assert!(mv.is_en_passant());
        assert!(!mv.is_castle());
    }
}
