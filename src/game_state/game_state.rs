//! Game history with exact apply/undo.
//!
//! `GameState` owns the positions reached so far (index 0 is the initial
//! position) and the moves between them. Positions are immutable values, so
//! undo is a pop and restores the previous position bit-for-bit.
//!
//! Invariant: `history.len() == moves.len() + 1`.

use log::trace;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::REPETITION_DRAW_COUNT;
use crate::game_state::game_status::{game_status, GameStatus};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    history: Vec<Position>,
    moves: Vec<ChessMove>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new(initial: Position) -> Self {
        Self {
            history: vec![initial],
            moves: Vec::new(),
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::new(Position::new_game())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    /// The position after the last applied move.
    #[inline]
    pub fn current(&self) -> &Position {
        // `history` is never empty.
        &self.history[self.history.len() - 1]
    }

    /// Owned copy of the current position.
    #[inline]
    pub fn snapshot(&self) -> Position {
        self.current().clone()
    }

    #[inline]
    pub fn initial(&self) -> &Position {
        &self.history[0]
    }

    #[inline]
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    #[inline]
    pub fn moves(&self) -> &[ChessMove] {
        &self.moves
    }

    /// Number of moves applied since the initial position.
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        self.current().legal_moves()
    }

    /// Apply `mv` if it is legal in the current position.
    ///
    /// Matching ignores flags, so moves parsed from UCI text are accepted.
    /// Returns the move as generated, flags included.
    pub fn apply(&mut self, mv: &ChessMove) -> ChessResult<ChessMove> {
        let current = self.current();
        let generated = LegalMoveGenerator
            .generate_legal_moves(current)?
            .into_iter()
            .find(|legal| legal.chess_move.same_action(mv))
            .ok_or_else(|| ChessError::IllegalMove {
                mv: mv.to_uci(),
                fen: current.to_fen(),
            })?;

        let applied = generated.chess_move;
        trace!("[GAME] apply {} at ply {}", applied, self.ply_count());
        self.push_generated(generated);
        Ok(applied)
    }

    pub fn apply_uci(&mut self, text: &str) -> ChessResult<ChessMove> {
        let mv = ChessMove::from_uci(text)?;
        self.apply(&mv)
    }

    /// Apply every move or none of them.
    pub fn apply_sequence(&mut self, moves: &[ChessMove]) -> ChessResult<()> {
        let checkpoint = self.history.len();
        for mv in moves {
            if let Err(err) = self.apply(mv) {
                self.truncate(checkpoint);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Parse and apply every move or none of them. A parse failure part way
    /// through also rolls back.
    pub fn apply_uci_sequence<S: AsRef<str>>(&mut self, texts: &[S]) -> ChessResult<()> {
        let checkpoint = self.history.len();
        for text in texts {
            if let Err(err) = self.apply_uci(text.as_ref()) {
                self.truncate(checkpoint);
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn undo(&mut self) -> ChessResult<ChessMove> {
        let Some(mv) = self.moves.pop() else {
            return Err(ChessError::EmptyHistory {
                requested: 1,
                available: 0,
            });
        };
        self.history.pop();
        trace!("[GAME] undo {} back to ply {}", mv, self.ply_count());
        Ok(mv)
    }

    /// Undo `count` moves, or fail without changing anything.
    pub fn undo_n(&mut self, count: usize) -> ChessResult<Vec<ChessMove>> {
        let available = self.ply_count();
        if count > available {
            return Err(ChessError::EmptyHistory {
                requested: count,
                available,
            });
        }

        let mut undone = self.moves.split_off(available - count);
        undone.reverse();
        self.history.truncate(self.moves.len() + 1);
        trace!("[GAME] undo {count} move(s) back to ply {}", self.ply_count());
        Ok(undone)
    }

    /// Drop every applied move, keeping only the initial position.
    pub fn reset(&mut self) {
        self.truncate(1);
    }

    /// Current outcome, including threefold repetition.
    pub fn status(&self) -> GameStatus {
        match game_status(self.current()) {
            GameStatus::Ongoing if self.repetition_count() >= REPETITION_DRAW_COUNT => {
                GameStatus::ThreefoldRepetition
            }
            status => status,
        }
    }

    /// Occurrences of the current position since the last irreversible move.
    pub fn repetition_count(&self) -> usize {
        let current = self.current();
        let key = current.zobrist_key();
        let window = (current.halfmove_clock() as usize).min(self.history.len() - 1);

        self.history[self.history.len() - 1 - window..]
            .iter()
            .filter(|position| position.zobrist_key() == key)
            .count()
    }

    /// Push a move already produced by the legal generator for the current
    /// position. Used by the search to avoid re-validating.
    #[inline]
    pub(crate) fn push_generated(&mut self, generated: GeneratedMove) {
        self.history.push(generated.position_after);
        self.moves.push(generated.chess_move);
    }

    /// Number of stored positions, usable as a checkpoint for `truncate`.
    #[inline]
    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn truncate(&mut self, history_len: usize) {
        let history_len = history_len.max(1);
        self.history.truncate(history_len);
        self.moves.truncate(history_len - 1);
    }
}
