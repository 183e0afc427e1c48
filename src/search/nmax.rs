//! n-max search.
//!
//! Generalized minimax for any number of players: every node yields a full
//! utility vector, and each interior node keeps the child vector that is
//! best for its player-to-move.
//!
//! The tree is walked depth-first with an explicit stack, applying moves to
//! the live `GameState` and undoing them on the way back up. Nothing is
//! cloned. When a node has more moves than the configured width it is
//! pruned, either to a random sample or to the moves a short lookahead
//! ranks best for the player to move.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{PlayerId, Result, RuleId, SearchRng, SearchRngState, Utility};
use crate::rules::{GameState, Move};

use super::config::NMaxConfig;
use super::evaluator::{Evaluator, RuleUtility};
use super::stats::SearchStats;

/// Result of a search from the root.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Utility at the end of the expected line of play.
    pub utility: Utility,
    /// Root move leading to that line. `None` when the root is a leaf.
    pub best_move: Option<Move>,
}

/// An interior node being expanded.
struct Frame {
    player: PlayerId,
    moves: Vec<Move>,
    next: usize,
    /// Best child so far and the index of the move that produced it.
    best: Option<(Utility, usize)>,
    /// Move applied to reach this node from its parent.
    entered_by: Option<Move>,
    remaining: u32,
}

impl Frame {
    /// Keep `utility` if it strictly beats the current best. Ties keep the
    /// earlier move.
    fn offer(&mut self, utility: Utility, index: usize) {
        let better = match &self.best {
            Some((best, _)) => utility.score(self.player) > best.score(self.player),
            None => true,
        };
        if better {
            self.best = Some((utility, index));
        }
    }
}

enum Expansion {
    Leaf(Utility),
    Interior(Frame),
}

/// n-max search context.
///
/// Owns the configuration, the pruning RNG and the evaluator. Searches take
/// the state mutably and leave it exactly as they found it.
///
/// ```
/// use rule_engine::core::{Bounds, PlayerId};
/// use rule_engine::rules::{GameState, PatternRule, Slide, Tile};
/// use rule_engine::search::{NMaxConfig, NMaxSearch};
///
/// let mut state = GameState::new(2);
/// let a = state
///     .compose()
///     .owned_by(PlayerId::new(0))
///     .with(PatternRule::new(Slide::orthogonal(Bounds::grid(3, 3))))
///     .with(Tile::at([0, 0]))
///     .build()
///     .unwrap();
/// let b = state
///     .compose()
///     .owned_by(PlayerId::new(1))
///     .with(PatternRule::new(Slide::orthogonal(Bounds::grid(3, 3))))
///     .with(Tile::at([2, 2]))
///     .build()
///     .unwrap();
/// let game = state.simple_turn(vec![a, b]).unwrap();
///
/// let mut search = NMaxSearch::new(NMaxConfig::default().with_depth(2));
/// let outcome = search.best_move(&mut state, game).unwrap();
/// assert!(outcome.best_move.is_some());
/// assert_eq!(state.pending_moves(), 0);
/// ```
pub struct NMaxSearch<E: Evaluator = RuleUtility> {
    config: NMaxConfig,
    rng: SearchRng,
    evaluator: E,
    stats: SearchStats,
}

impl NMaxSearch<RuleUtility> {
    /// Create a search that evaluates leaves with the root rule's utility.
    pub fn new(config: NMaxConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        Self {
            config,
            rng,
            evaluator: RuleUtility,
            stats: SearchStats::default(),
        }
    }
}

impl<E: Evaluator> NMaxSearch<E> {
    /// Replace the leaf evaluator.
    pub fn with_evaluator<F: Evaluator>(self, evaluator: F) -> NMaxSearch<F> {
        NMaxSearch {
            config: self.config,
            rng: self.rng,
            evaluator,
            stats: self.stats,
        }
    }

    /// Replace the pruning RNG.
    pub fn with_rng(mut self, rng: SearchRng) -> Self {
        self.rng = rng;
        self
    }

    /// Search configuration.
    pub fn config(&self) -> &NMaxConfig {
        &self.config
    }

    /// Statistics of the last search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pruning RNG state, for checkpointing.
    pub fn rng_state(&self) -> SearchRngState {
        self.rng.state()
    }

    /// Evaluate `root` to the configured depth.
    pub fn search(&mut self, state: &mut GameState, root: RuleId) -> Result<Utility> {
        Ok(self.best_move(state, root)?.utility)
    }

    /// Evaluate `root` and report the root move of the expected line.
    ///
    /// On error every move the search applied is undone before returning.
    pub fn best_move(&mut self, state: &mut GameState, root: RuleId) -> Result<SearchOutcome> {
        let start = Instant::now();
        self.stats.reset();

        let outcome = self.run(state, root, self.config.depth, self.config.width, 0);

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            root = root.0,
            depth = self.config.depth,
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            heuristic_prunes = self.stats.heuristic_prunes,
            random_prunes = self.stats.random_prunes,
            time_us = self.stats.time_us,
            "n-max search finished"
        );
        outcome
    }

    fn run(
        &mut self,
        state: &mut GameState,
        root: RuleId,
        depth: u32,
        width: Option<usize>,
        base_ply: u32,
    ) -> Result<SearchOutcome> {
        let mut stack = match self.expand(state, root, depth, width, base_ply)? {
            Expansion::Leaf(utility) => {
                return Ok(SearchOutcome {
                    utility,
                    best_move: None,
                })
            }
            Expansion::Interior(frame) => vec![frame],
        };

        loop {
            let ply = base_ply + stack.len() as u32;
            let Some(frame) = stack.last_mut() else {
                return Ok(SearchOutcome {
                    utility: Utility::new(),
                    best_move: None,
                });
            };

            if frame.next < frame.moves.len() {
                let index = frame.next;
                frame.next += 1;
                let mv = frame.moves[index].clone();
                let remaining = frame.remaining - 1;

                if let Err(err) = state.execute_move(root, &mv) {
                    Self::unwind(state, root, &stack);
                    return Err(err);
                }
                match self.expand(state, root, remaining, width, ply) {
                    Ok(Expansion::Leaf(utility)) => {
                        if let Err(err) = state.undo_move(root, &mv) {
                            Self::unwind(state, root, &stack);
                            return Err(err);
                        }
                        if let Some(frame) = stack.last_mut() {
                            frame.offer(utility, index);
                        }
                    }
                    Ok(Expansion::Interior(mut child)) => {
                        trace!(ply, moves = child.moves.len(), "expanding node");
                        child.entered_by = Some(mv);
                        stack.push(child);
                    }
                    Err(err) => {
                        if let Err(undo_err) = state.undo_move(root, &mv) {
                            debug!(error = %undo_err, "failed to undo move while unwinding search");
                        }
                        Self::unwind(state, root, &stack);
                        return Err(err);
                    }
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                continue;
            };
            let (utility, best_index) = done.best.unwrap_or_default();
            match done.entered_by {
                Some(mv) => {
                    if let Err(err) = state.undo_move(root, &mv) {
                        Self::unwind(state, root, &stack);
                        return Err(err);
                    }
                    if let Some(parent) = stack.last_mut() {
                        let index = parent.next - 1;
                        parent.offer(utility, index);
                    }
                }
                None => {
                    return Ok(SearchOutcome {
                        utility,
                        best_move: done.moves.into_iter().nth(best_index),
                    })
                }
            }
        }
    }

    /// Undo every move still applied by frames on `stack`, newest first.
    fn unwind(state: &mut GameState, root: RuleId, stack: &[Frame]) {
        for frame in stack.iter().rev() {
            if let Some(mv) = &frame.entered_by {
                if let Err(err) = state.undo_move(root, mv) {
                    debug!(error = %err, "failed to undo move while unwinding search");
                }
            }
        }
    }

    /// Visit a node: evaluate it if it is a leaf, otherwise open a frame
    /// with its (possibly pruned) moves.
    fn expand(
        &mut self,
        state: &mut GameState,
        root: RuleId,
        remaining: u32,
        width: Option<usize>,
        ply: u32,
    ) -> Result<Expansion> {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(ply);

        if remaining > 0 {
            let moves = state.legal_moves(root)?;
            if !moves.is_empty() {
                let player = state.player_to_move(root)?;
                let moves = match width {
                    Some(width) if moves.len() > width => {
                        self.prune(state, root, player, moves, width, ply)?
                    }
                    _ => moves,
                };
                // A node pruned down to nothing is scored like a leaf.
                if !moves.is_empty() {
                    return Ok(Expansion::Interior(Frame {
                        player,
                        moves,
                        next: 0,
                        best: None,
                        entered_by: None,
                        remaining,
                    }));
                }
            }
        }

        self.stats.leaves += 1;
        Ok(Expansion::Leaf(self.evaluator.evaluate(state, root)?))
    }

    /// Cut `moves` down to `width`, keeping enumeration order.
    fn prune(
        &mut self,
        state: &mut GameState,
        root: RuleId,
        player: PlayerId,
        moves: Vec<Move>,
        width: usize,
        ply: u32,
    ) -> Result<Vec<Move>> {
        if self.rng.gen_bool(self.config.temperature) {
            self.stats.random_prunes += 1;
            let keep = self.rng.sample_indices(moves.len(), width);
            trace!(ply, from = moves.len(), to = keep.len(), "random prune");
            return Ok(keep.into_iter().map(|i| moves[i].clone()).collect());
        }

        self.stats.heuristic_prunes += 1;
        let mut ranked = Vec::with_capacity(moves.len());
        for (index, mv) in moves.iter().enumerate() {
            state.execute_move(root, mv)?;
            self.stats.lookahead_searches += 1;
            let lookahead = self.run(state, root, self.config.lookahead_depth, None, ply + 1);
            state.undo_move(root, mv)?;
            ranked.push((index, lookahead?.utility.score(player)));
        }

        // Stable: equal scores keep enumeration order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(width);
        ranked.sort_by_key(|(index, _)| *index);
        trace!(ply, from = moves.len(), to = ranked.len(), "heuristic prune");

        let mut moves: Vec<Option<Move>> = moves.into_iter().map(Some).collect();
        Ok(ranked
            .into_iter()
            .filter_map(|(index, _)| moves[index].take())
            .collect())
    }
}
