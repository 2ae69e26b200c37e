//! Search parameters and results.

use std::time::{Duration, Instant};

use crate::errors::{ChessError, ChessResult};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::EvaluationResult;

/// Optional stop conditions. With neither set the search always runs to
/// `max_depth`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub node_budget: Option<u64>,
}

impl SearchLimits {
    pub const fn unlimited() -> Self {
        Self {
            deadline: None,
            node_budget: None,
        }
    }

    /// Deadline `budget` from now.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.deadline = Some(Instant::now() + budget);
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.deadline.is_none() && self.node_budget.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Number of root moves to report.
    pub top_n: usize,
    pub limits: SearchLimits,
    /// Worker threads for the root split. `1` searches on the caller's thread.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            top_n: 3,
            limits: SearchLimits::unlimited(),
            threads: 1,
        }
    }
}

impl SearchConfig {
    pub fn new(max_depth: u8, top_n: usize) -> ChessResult<Self> {
        let config = Self {
            max_depth,
            top_n,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.max_depth < 1 {
            return Err(ChessError::InvalidArgument(
                "search depth must be at least 1".to_owned(),
            ));
        }
        if self.top_n < 1 {
            return Err(ChessError::InvalidArgument(
                "number of ranked moves must be at least 1".to_owned(),
            ));
        }
        if self.threads < 1 {
            return Err(ChessError::InvalidArgument(
                "thread count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTermination {
    Completed,
    Deadline,
    NodeBudget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best first for the side to move; ties keep generation order.
    pub ranked_moves: Vec<(ChessMove, EvaluationResult)>,
    pub principal_variation: Vec<ChessMove>,
    /// Deepest fully completed iteration. `0` means the ranking is the static
    /// evaluation after each root move.
    pub reached_depth: u8,
    pub nodes: u64,
    pub termination: SearchTermination,
}

impl SearchResult {
    pub fn empty(termination: SearchTermination) -> Self {
        Self {
            ranked_moves: Vec::new(),
            principal_variation: Vec::new(),
            reached_depth: 0,
            nodes: 0,
            termination,
        }
    }

    #[inline]
    pub fn best_move(&self) -> Option<ChessMove> {
        self.ranked_moves.first().map(|(mv, _)| *mv)
    }

    #[inline]
    pub fn best_evaluation(&self) -> Option<EvaluationResult> {
        self.ranked_moves.first().map(|(_, eval)| *eval)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{SearchConfig, SearchLimits};
    use crate::errors::ErrorKind;

    #[test]
    fn default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.max_depth, config.top_n, config.threads), (4, 3, 1));
        assert!(config.limits.is_unlimited());
    }

    #[test]
    fn zero_depth_or_count_is_rejected() {
        let depth = SearchConfig::new(0, 3).expect_err("depth 0");
        assert_eq!(depth.kind(), ErrorKind::InvalidArgument);
        let count = SearchConfig::new(2, 0).expect_err("top_n 0");
        assert_eq!(count.kind(), ErrorKind::InvalidArgument);
        let threads = SearchConfig::default().with_threads(0).validate();
        assert!(threads.is_err());
    }

    #[test]
    fn limits_builders() {
        let before = Instant::now();
        let limits = SearchLimits::unlimited()
            .with_time_budget(Duration::from_millis(50))
            .with_node_budget(1_000);
        assert_eq!(limits.node_budget, Some(1_000));
        assert!(limits.deadline.is_some_and(|d| d >= before + Duration::from_millis(50)));
        assert!(!limits.is_unlimited());
    }
}
