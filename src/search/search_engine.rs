//! Iterative-deepening alpha-beta search.
//!
//! Scores are White-perspective throughout: White nodes maximize and Black
//! nodes minimize. Every root move is searched with a full window, so its
//! score is exact and the ranking of the top moves is meaningful, not just the
//! first entry.
//!
//! The walk drives `GameState` directly (push a generated move, recurse,
//! truncate back). A guard restores the caller's history length on every exit,
//! including errors and panics.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use log::{debug, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::FIFTY_MOVE_RULE_HALFMOVES;
use crate::game_state::{chess_types::Color, game_state::GameState, position::Position};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{
    mate_score, BoardScorer, EvaluationResult, PieceSquareScorer, MATE_SCORE,
};
use crate::search::move_ordering::order_moves;
use crate::search::search_config::{SearchConfig, SearchResult, SearchTermination};
use crate::search::threading::{split_root_work, SharedSearchState};

const INFINITY: i32 = MATE_SCORE + 1;

/// Why a subtree walk stopped early.
#[derive(Debug)]
pub(crate) enum SearchInterrupt {
    Limit(SearchTermination),
    Failed(ChessError),
}

impl From<ChessError> for SearchInterrupt {
    fn from(err: ChessError) -> Self {
        SearchInterrupt::Failed(err)
    }
}

type NodeResult = Result<i32, SearchInterrupt>;

/// Best-move hints by Zobrist key, kept across iterations.
type BestMoveCache = HashMap<u64, ChessMove>;

/// Restores the wrapped game's history length when dropped.
struct HistoryGuard<'a> {
    game: &'a mut GameState,
    checkpoint: usize,
}

impl<'a> HistoryGuard<'a> {
    fn new(game: &'a mut GameState) -> Self {
        let checkpoint = game.history_len();
        Self { game, checkpoint }
    }
}

impl Drop for HistoryGuard<'_> {
    fn drop(&mut self) {
        self.game.truncate(self.checkpoint);
    }
}

impl Deref for HistoryGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game
    }
}

impl DerefMut for HistoryGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game
    }
}

/// One root move and the state its subtree search carries between
/// iterations. Each root move owns its cache so a parallel walk sees exactly
/// what a sequential one would.
struct RootEntry {
    generated: GeneratedMove,
    best_moves: BestMoveCache,
    score: i32,
    continuation: Vec<ChessMove>,
}

#[derive(Debug, Clone)]
struct RankedLine {
    chess_move: ChessMove,
    score: i32,
    continuation: Vec<ChessMove>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine<G = LegalMoveGenerator, S = PieceSquareScorer> {
    generator: G,
    scorer: S,
}

impl<G: MoveGenerator, S: BoardScorer> SearchEngine<G, S> {
    pub fn new(generator: G, scorer: S) -> Self {
        Self { generator, scorer }
    }

    /// Rank the moves of `game`'s current position.
    ///
    /// `game` is walked speculatively and is back to exactly its prior state
    /// when this returns, whatever the outcome.
    pub fn search(&self, game: &mut GameState, config: &SearchConfig) -> ChessResult<SearchResult> {
        config.validate()?;
        game.current().validate()?;

        let mut game = HistoryGuard::new(game);
        let root = game.snapshot();
        let shared = SharedSearchState::new(config.limits);

        let mut entries: Vec<RootEntry> = self
            .generator
            .generate_legal_moves(&root)?
            .into_iter()
            .map(|generated| RootEntry {
                generated,
                best_moves: BestMoveCache::new(),
                score: 0,
                continuation: Vec::new(),
            })
            .collect();

        if entries.is_empty() {
            return Ok(SearchResult::empty(SearchTermination::Completed));
        }

        let mut ranking: Option<Vec<RankedLine>> = None;
        let mut reached_depth = 0u8;
        let mut termination = SearchTermination::Completed;

        for depth in 1..=config.max_depth {
            match self.search_iteration(&mut game, &mut entries, depth, config.threads, &shared) {
                Ok(()) => {
                    let lines = rank_lines(&entries, root.side_to_move());
                    if let Some(best) = lines.first() {
                        debug!(
                            "[SEARCH] depth {} best {} score {} nodes {}",
                            depth,
                            best.chess_move,
                            best.score,
                            shared.nodes()
                        );
                    }
                    ranking = Some(lines);
                    reached_depth = depth;
                }
                Err(SearchInterrupt::Limit(reason)) => {
                    debug!("[SEARCH] stopped in depth {depth}: {reason:?}");
                    termination = reason;
                    break;
                }
                Err(SearchInterrupt::Failed(err)) => return Err(err),
            }
        }

        let ranking = match ranking {
            Some(lines) => lines,
            None => {
                warn!(
                    "[SEARCH] {:?} before depth 1 completed, ranking by static evaluation",
                    termination
                );
                self.static_ranking(&mut entries, root.side_to_move())?
            }
        };

        let principal_variation = ranking
            .first()
            .map(|best| {
                std::iter::once(best.chess_move)
                    .chain(best.continuation.iter().copied())
                    .collect()
            })
            .unwrap_or_default();

        let ranked_moves = ranking
            .iter()
            .take(config.top_n)
            .map(|line| (line.chess_move, EvaluationResult::from_score(line.score)))
            .collect();

        Ok(SearchResult {
            ranked_moves,
            principal_variation,
            reached_depth,
            nodes: shared.nodes(),
            termination,
        })
    }

    /// Static evaluation of `position`, with mate and stalemate resolved.
    /// Used for positions a search cannot descend from.
    pub fn evaluate_terminal_aware(&self, position: &Position) -> ChessResult<EvaluationResult> {
        let score = self.leaf_score(position, 0)?;
        Ok(EvaluationResult::from_score(score))
    }

    fn search_iteration(
        &self,
        game: &mut GameState,
        entries: &mut [RootEntry],
        depth: u8,
        threads: usize,
        shared: &SharedSearchState,
    ) -> Result<(), SearchInterrupt> {
        if threads <= 1 || entries.len() < 2 {
            for entry in entries.iter_mut() {
                self.search_root_move(game, entry, depth, shared)?;
            }
            return Ok(());
        }

        split_root_work(game, entries, threads, |local, entry| {
            self.search_root_move(local, entry, depth, shared)
        })
    }

    fn search_root_move(
        &self,
        game: &mut GameState,
        entry: &mut RootEntry,
        depth: u8,
        shared: &SharedSearchState,
    ) -> Result<(), SearchInterrupt> {
        let checkpoint = game.history_len();
        game.push_generated(entry.generated.clone());

        let mut continuation = Vec::new();
        let result = self.alpha_beta(
            game,
            depth - 1,
            -INFINITY,
            INFINITY,
            1,
            &mut entry.best_moves,
            &mut continuation,
            shared,
        );
        game.truncate(checkpoint);

        entry.score = result?;
        entry.continuation = continuation;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        game: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: u32,
        cache: &mut BestMoveCache,
        pv: &mut Vec<ChessMove>,
        shared: &SharedSearchState,
    ) -> NodeResult {
        pv.clear();
        shared.note_node().map_err(SearchInterrupt::Limit)?;

        let position = game.current();
        let mut moves = self.generator.generate_legal_moves(position)?;
        if moves.is_empty() {
            return Ok(terminal_score(position, ply));
        }
        if position.halfmove_clock() >= FIFTY_MOVE_RULE_HALFMOVES {
            return Ok(0);
        }
        if depth == 0 {
            return Ok(self.scorer.score(position));
        }

        let key = position.zobrist_key();
        let maximizing = position.side_to_move() == Color::White;
        order_moves(position, &mut moves, cache.get(&key));

        let checkpoint = game.history_len();
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;
        let mut child_pv = Vec::new();

        for generated in moves {
            let mv = generated.chess_move;
            game.push_generated(generated);
            let result = self.alpha_beta(
                game,
                depth - 1,
                alpha,
                beta,
                ply + 1,
                cache,
                &mut child_pv,
                shared,
            );
            game.truncate(checkpoint);
            let score = result?;

            let improves = if maximizing { score > best } else { score < best };
            if improves {
                best = score;
                best_move = Some(mv);
                pv.clear();
                pv.push(mv);
                pv.extend_from_slice(&child_pv);
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }

        if let Some(mv) = best_move {
            cache.insert(key, mv);
        }
        Ok(best)
    }

    fn leaf_score(&self, position: &Position, ply: u32) -> ChessResult<i32> {
        if self.generator.generate_legal_moves(position)?.is_empty() {
            return Ok(terminal_score(position, ply));
        }
        Ok(self.scorer.score(position))
    }

    fn static_ranking(&self, entries: &mut [RootEntry], side: Color) -> ChessResult<Vec<RankedLine>> {
        for entry in entries.iter_mut() {
            entry.score = self.leaf_score(&entry.generated.position_after, 1)?;
            entry.continuation.clear();
        }
        Ok(rank_lines(entries, side))
    }
}

/// Score of a node with no legal moves.
#[inline]
fn terminal_score(position: &Position, ply: u32) -> i32 {
    if position.is_in_check() {
        mate_score(position.side_to_move(), ply)
    } else {
        0
    }
}

/// Root lines best-first for `side`; the stable sort keeps generation order
/// among equal scores.
fn rank_lines(entries: &[RootEntry], side: Color) -> Vec<RankedLine> {
    let mut lines: Vec<RankedLine> = entries
        .iter()
        .map(|entry| RankedLine {
            chess_move: entry.generated.chess_move,
            score: entry.score,
            continuation: entry.continuation.clone(),
        })
        .collect();
    lines.sort_by_key(|line| -side.sign() * line.score);
    lines
}

/// Search `game` with the default engine and no limits.
pub fn search(game: &mut GameState, max_depth: u8, top_n: usize) -> ChessResult<SearchResult> {
    let config = SearchConfig::new(max_depth, top_n)?;
    SearchEngine::<LegalMoveGenerator, PieceSquareScorer>::default().search(game, &config)
}
