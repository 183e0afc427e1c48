//! Leaf evaluation.

use crate::core::{Result, RuleId, Utility};
use crate::rules::GameState;

/// Scores a position at a search leaf.
pub trait Evaluator {
    /// Utility of the current state as seen from `root`.
    fn evaluate(&self, state: &GameState, root: RuleId) -> Result<Utility>;
}

/// Default evaluator: the root rule's own utility.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleUtility;

impl Evaluator for RuleUtility {
    fn evaluate(&self, state: &GameState, root: RuleId) -> Result<Utility> {
        state.utility(root)
    }
}

/// Scores decided games from the player standings and everything else
/// with the root rule's utility.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandingsFirst;

impl Evaluator for StandingsFirst {
    fn evaluate(&self, state: &GameState, root: RuleId) -> Result<Utility> {
        let standings = state.standings();
        if standings.is_decided() {
            return Ok(standings.utility());
        }
        state.utility(root)
    }
}

impl<F> Evaluator for F
where
    F: Fn(&GameState, RuleId) -> Result<Utility>,
{
    fn evaluate(&self, state: &GameState, root: RuleId) -> Result<Utility> {
        self(state, root)
    }
}
