//! Errors used throughout the chess core.
//!
//! `ChessError` is the single error type returned by parsing, game-state
//! mutation, search, and the capability layer. Every mutating operation is
//! atomic with respect to failure: when one of these errors is returned, the
//! `GameState` or `Position` involved is exactly what it was before the call.
//!
//! Usage guidelines:
//! - Parsing, legality, history, and argument errors are recoverable and are
//!   meant to be shown to whoever supplied the input.
//! - `ContractViolation` means a caller bypassed the public API (for example a
//!   board with no king handed to the search). It is reported distinctly so a
//!   host can treat it as a bug rather than as bad user input.

use thiserror::Error;

/// Result type alias for chess core operations.
pub type ChessResult<T> = Result<T, ChessError>;

/// Coarse classification of a [`ChessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed FEN or UCI text.
    Parse,
    /// Well-formed move that is not legal in the current position.
    IllegalMove,
    /// Undo requested with not enough applied moves.
    EmptyHistory,
    /// Search or option parameters out of range.
    InvalidArgument,
    /// Internal invariant broken by a caller bypassing the API.
    ContractViolation,
}

/// Unified error type for the chess core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A FEN string failed validation.
    ///
    /// Payload: the offending text and a human-readable reason.
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// A UCI move string (`e2e4`, `e7e8q`) failed to parse.
    #[error("invalid move notation `{notation}`: {reason}")]
    InvalidMoveNotation { notation: String, reason: String },

    /// The move is well-formed but not among the legal moves of `fen`.
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// More undos were requested than moves have been applied.
    #[error("cannot undo {requested} move(s): only {available} applied")]
    EmptyHistory { requested: usize, available: usize },

    /// Search depth, result count, or configuration value out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A programming-contract violation, e.g. a position without exactly one
    /// king per side reached the search.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl ChessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChessError::InvalidFen { .. } | ChessError::InvalidMoveNotation { .. } => {
                ErrorKind::Parse
            }
            ChessError::IllegalMove { .. } => ErrorKind::IllegalMove,
            ChessError::EmptyHistory { .. } => ErrorKind::EmptyHistory,
            ChessError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ChessError::ContractViolation(_) => ErrorKind::ContractViolation,
        }
    }

    #[inline]
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::ContractViolation
    }
}
