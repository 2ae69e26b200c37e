//! Shared stop/accounting state and the parallel root split.
//!
//! Workers never share a `GameState`: each one searches its slice of root
//! moves on its own clone, and results are written back per root move so the
//! outcome does not depend on scheduling.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::thread;
use std::time::Instant;

use crate::game_state::game_state::GameState;
use crate::search::search_config::{SearchLimits, SearchTermination};
use crate::search::search_engine::SearchInterrupt;

/// Nodes between two reads of the clock.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

const RUNNING: u8 = 0;
const STOPPED_DEADLINE: u8 = 1;
const STOPPED_NODE_BUDGET: u8 = 2;

/// Cancellation and node accounting for one search call.
#[derive(Debug)]
pub struct SharedSearchState {
    stop_reason: AtomicU8,
    nodes_visited: AtomicU64,
    node_budget: Option<u64>,
    deadline: Option<Instant>,
}

impl SharedSearchState {
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            stop_reason: AtomicU8::new(RUNNING),
            nodes_visited: AtomicU64::new(0),
            node_budget: limits.node_budget,
            deadline: limits.deadline,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    pub fn stop_reason(&self) -> Option<SearchTermination> {
        match self.stop_reason.load(Ordering::Relaxed) {
            STOPPED_DEADLINE => Some(SearchTermination::Deadline),
            STOPPED_NODE_BUDGET => Some(SearchTermination::NodeBudget),
            _ => None,
        }
    }

    /// Count one visited node; `Err` once any limit has tripped, on this
    /// thread or another.
    #[inline]
    pub fn note_node(&self) -> Result<(), SearchTermination> {
        if let Some(reason) = self.stop_reason() {
            return Err(reason);
        }

        let nodes = self.nodes_visited.fetch_add(1, Ordering::Relaxed) + 1;
        if self.node_budget.is_some_and(|budget| nodes > budget) {
            return Err(self.request_stop(STOPPED_NODE_BUDGET));
        }

        if let Some(deadline) = self.deadline {
            if (nodes == 1 || nodes % DEADLINE_CHECK_INTERVAL == 0) && Instant::now() >= deadline {
                return Err(self.request_stop(STOPPED_DEADLINE));
            }
        }

        Ok(())
    }

    /// Record `reason` unless another thread stopped first; returns the
    /// reason that won.
    fn request_stop(&self, reason: u8) -> SearchTermination {
        let _ = self
            .stop_reason
            .compare_exchange(RUNNING, reason, Ordering::Relaxed, Ordering::Relaxed);
        self.stop_reason().unwrap_or(SearchTermination::NodeBudget)
    }
}

/// Run `work` over every entry, dealing entries round-robin to `threads`
/// scoped workers that each own a clone of `game`.
///
/// A failure takes precedence over a tripped limit.
pub(crate) fn split_root_work<T, F>(
    game: &GameState,
    entries: &mut [T],
    threads: usize,
    work: F,
) -> Result<(), SearchInterrupt>
where
    T: Send,
    F: Fn(&mut GameState, &mut T) -> Result<(), SearchInterrupt> + Sync,
{
    let workers = threads.clamp(1, entries.len().max(1));
    let mut buckets: Vec<Vec<&mut T>> = (0..workers).map(|_| Vec::new()).collect();
    for (index, entry) in entries.iter_mut().enumerate() {
        buckets[index % workers].push(entry);
    }

    let work = &work;
    let outcomes: Vec<Result<(), SearchInterrupt>> = thread::scope(|scope| {
        let handles: Vec<_> = buckets
            .into_iter()
            .map(|bucket| {
                let mut local = game.clone();
                scope.spawn(move || -> Result<(), SearchInterrupt> {
                    for entry in bucket {
                        work(&mut local, entry)?;
                    }
                    Ok(())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcome) => outcome,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut limit = None;
    for outcome in outcomes {
        match outcome {
            Ok(()) => {}
            Err(SearchInterrupt::Failed(err)) => return Err(SearchInterrupt::Failed(err)),
            Err(interrupt @ SearchInterrupt::Limit(_)) => {
                limit.get_or_insert(interrupt);
            }
        }
    }
    limit.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{split_root_work, SharedSearchState};
    use crate::errors::ChessError;
    use crate::game_state::game_state::GameState;
    use crate::search::search_config::{SearchLimits, SearchTermination};
    use crate::search::search_engine::SearchInterrupt;

    #[test]
    fn node_budget_trips_after_budget_nodes() {
        let shared = SharedSearchState::new(SearchLimits::unlimited().with_node_budget(3));
        for _ in 0..3 {
            assert!(shared.note_node().is_ok());
        }
        assert_eq!(shared.note_node(), Err(SearchTermination::NodeBudget));
        assert_eq!(shared.note_node(), Err(SearchTermination::NodeBudget));
        assert_eq!(shared.stop_reason(), Some(SearchTermination::NodeBudget));
    }

    #[test]
    fn expired_deadline_trips_on_first_node() {
        let limits = SearchLimits {
            deadline: Some(Instant::now() - Duration::from_millis(1)),
            node_budget: None,
        };
        let shared = SharedSearchState::new(limits);
        assert_eq!(shared.note_node(), Err(SearchTermination::Deadline));
    }

    #[test]
    fn unlimited_never_stops() {
        let shared = SharedSearchState::new(SearchLimits::unlimited());
        for _ in 0..10_000 {
            assert!(shared.note_node().is_ok());
        }
        assert_eq!(shared.nodes(), 10_000);
        assert_eq!(shared.stop_reason(), None);
    }

    #[test]
    fn every_entry_is_visited_once_on_its_own_clone() {
        let game = GameState::new_game();
        let mut entries: Vec<(usize, usize)> = (0..10).map(|i| (i, 0)).collect();
        split_root_work(&game, &mut entries, 3, |local, entry| {
            local.apply_uci("e2e4").map_err(SearchInterrupt::Failed)?;
            entry.1 = entry.0 * 2 + local.ply_count();
            local.undo().map_err(SearchInterrupt::Failed)?;
            Ok(())
        })
        .expect("no failures");

        assert!(entries.iter().all(|(i, v)| *v == i * 2 + 1));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn failure_wins_over_limit() {
        let game = GameState::new_game();
        let mut entries = vec![0u8, 1, 2, 3];
        let outcome = split_root_work(&game, &mut entries, 2, |_, entry| match *entry {
            0 => Err(SearchInterrupt::Limit(SearchTermination::Deadline)),
            1 => Err(SearchInterrupt::Failed(ChessError::ContractViolation("x".to_owned()))),
            _ => Ok(()),
        });
        assert!(matches!(outcome, Err(SearchInterrupt::Failed(_))));
    }
}
