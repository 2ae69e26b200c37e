//! `ChessCapabilities` over an owned game and a search configuration.

use std::time::Duration;

use log::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{game_state::GameState, game_status, position::Position};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::EvaluationResult;
use crate::search::search_config::{SearchConfig, SearchLimits, SearchResult};
use crate::search::search_engine::SearchEngine;
use crate::tools::capabilities::{ChessCapabilities, MoveSuggestion};
use crate::utils::line::{evaluate_line, materialize_line};

/// One user's analysis session: a live game plus search settings.
///
/// Not synchronized; a host sharing a session across threads must guard it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    game: GameState,
    config: SearchConfig,
    engine: SearchEngine,
    /// Per-search time budget; a fresh deadline is derived for each call.
    move_time: Option<Duration>,
}

impl AnalysisSession {
    pub fn new(game: GameState, config: SearchConfig) -> ChessResult<Self> {
        config.validate()?;
        Ok(Self {
            game,
            config,
            engine: SearchEngine::default(),
            move_time: None,
        })
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::new(GameState::from_fen(fen)?, SearchConfig::default())
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Set a named option the way engine front-ends do.
    ///
    /// Names are case-insensitive: `Depth`, `MultiPV`, `Threads`, `Nodes`
    /// (`0` clears the budget), `MoveTimeMs` (`0` clears the budget).
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let value = value.trim();
        if name.eq_ignore_ascii_case("Depth") {
            let depth = parse_option::<u8>(name, value)?;
            if depth < 1 {
                return Err(ChessError::InvalidArgument("Depth must be at least 1".to_owned()));
            }
            self.config.max_depth = depth;
        } else if name.eq_ignore_ascii_case("MultiPV") {
            let count = parse_option::<usize>(name, value)?;
            if count < 1 {
                return Err(ChessError::InvalidArgument("MultiPV must be at least 1".to_owned()));
            }
            self.config.top_n = count;
        } else if name.eq_ignore_ascii_case("Threads") {
            let threads = parse_option::<usize>(name, value)?;
            if threads < 1 {
                return Err(ChessError::InvalidArgument("Threads must be at least 1".to_owned()));
            }
            self.config.threads = threads;
        } else if name.eq_ignore_ascii_case("Nodes") {
            let nodes = parse_option::<u64>(name, value)?;
            self.config.limits.node_budget = (nodes > 0).then_some(nodes);
        } else if name.eq_ignore_ascii_case("MoveTimeMs") {
            let millis = parse_option::<u64>(name, value)?;
            self.move_time = (millis > 0).then(|| Duration::from_millis(millis));
        } else {
            return Err(ChessError::InvalidArgument(format!("unknown option `{name}`")));
        }

        debug!("[SESSION] option {name} = {value}");
        Ok(())
    }

    /// Search the live game's current position.
    pub fn analyze(&mut self) -> ChessResult<SearchResult> {
        let config = self.search_config(self.config.top_n);
        self.engine.search(&mut self.game, &config)
    }

    fn search_config(&self, top_n: usize) -> SearchConfig {
        let mut limits = SearchLimits {
            deadline: None,
            ..self.config.limits
        };
        if let Some(budget) = self.move_time {
            limits = limits.with_time_budget(budget);
        }
        SearchConfig {
            top_n,
            limits,
            ..self.config
        }
    }

    fn search_fen(&self, fen: &str, top_n: usize) -> ChessResult<SearchResult> {
        let mut scratch = GameState::from_fen(fen)?;
        self.engine.search(&mut scratch, &self.search_config(top_n))
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value
        .parse::<T>()
        .map_err(|_| ChessError::InvalidArgument(format!("invalid {name} value `{value}`")))
}

fn parse_moves(moves: &[&str]) -> ChessResult<Vec<ChessMove>> {
    moves.iter().map(|text| ChessMove::from_uci(text)).collect()
}

impl ChessCapabilities for AnalysisSession {
    fn legal_moves(&self) -> Vec<String> {
        self.game.legal_moves().iter().map(ChessMove::to_uci).collect()
    }

    fn make_move(&mut self, uci: &str) -> ChessResult<String> {
        self.game.apply_uci(uci)?;
        Ok(self.current_fen())
    }

    fn make_sequence_of_moves(&mut self, moves: &[&str]) -> ChessResult<String> {
        self.game.apply_uci_sequence(moves)?;
        Ok(self.current_fen())
    }

    fn unmake_move(&mut self) -> ChessResult<String> {
        self.game.undo()?;
        Ok(self.current_fen())
    }

    fn unmake_n_moves(&mut self, count: usize) -> ChessResult<String> {
        self.game.undo_n(count)?;
        Ok(self.current_fen())
    }

    fn reset_board(&mut self) -> String {
        self.game.reset();
        self.current_fen()
    }

    fn current_fen(&self) -> String {
        self.game.current().to_fen()
    }

    fn evaluate_position(&self, fen: &str) -> ChessResult<EvaluationResult> {
        let result = self.search_fen(fen, 1)?;
        match result.best_evaluation() {
            Some(evaluation) => Ok(evaluation),
            None => self
                .engine
                .evaluate_terminal_aware(&Position::from_fen(fen)?),
        }
    }

    fn suggest_moves(&self, fen: &str, count: usize) -> ChessResult<Vec<MoveSuggestion>> {
        if count < 1 {
            return Err(ChessError::InvalidArgument(
                "number of suggestions must be at least 1".to_owned(),
            ));
        }
        let result = self.search_fen(fen, count)?;
        Ok(result
            .ranked_moves
            .into_iter()
            .map(|(mv, evaluation)| MoveSuggestion {
                uci: mv.to_uci(),
                evaluation,
            })
            .collect())
    }

    fn is_checkmate(&self, fen: &str) -> ChessResult<bool> {
        Ok(game_status::is_checkmate(&Position::from_fen(fen)?))
    }

    fn get_continuation(&self, fen: &str, uci: &str) -> ChessResult<String> {
        let position = Position::from_fen(fen)?;
        Ok(position.play(&ChessMove::from_uci(uci)?)?.to_fen())
    }

    fn play_sequence_and_get_evals(
        &self,
        fen: &str,
        moves: &[&str],
    ) -> ChessResult<Vec<EvaluationResult>> {
        evaluate_line(&Position::from_fen(fen)?, &parse_moves(moves)?)
    }

    fn positions_along_line(&self, fen: &str, moves: &[&str]) -> ChessResult<Vec<String>> {
        let line = materialize_line(&Position::from_fen(fen)?, &parse_moves(moves)?)?;
        Ok(line.iter().map(Position::to_fen).collect())
    }

    fn principal_variation(&self, fen: &str) -> ChessResult<Vec<ChessMove>> {
        Ok(self.search_fen(fen, 1)?.principal_variation)
    }
}
