//! The rule contract.
//!
//! Every behavior in a game (a coordinate leaf, a movement pattern, a
//! capture decorator, a turn sequencer) implements `Rule`. Rules live in a
//! `GameState` arena and receive it on every call together with their own
//! `RuleId`, so a decorator reaches its sub-rule through the state rather
//! than through a pointer.
//!
//! ## Implementation Notes
//!
//! - `legal_moves` must not mutate anything.
//! - `execute_move` followed by `undo_move` with the same move must restore
//!   an observationally identical state.
//! - Call other rules through `GameState::execute_move`/`undo_move`, never
//!   directly: the state handles listeners and pairing checks.

use crate::core::{Coord, PlayerId, Result, RuleId, RuleType, Utility};

use super::capability::{Capabilities, Requirement};
use super::moves::Move;
use super::state::GameState;

/// A composable unit of move generation, execution, undo and evaluation.
pub trait Rule: std::fmt::Debug {
    /// Short kind name used in descriptions ("Tile", "Pattern", ...).
    fn kind(&self) -> &'static str;

    /// Enumerate the legal moves in the current state.
    fn legal_moves(&self, state: &GameState, me: RuleId) -> Result<Vec<Move>>;

    /// Apply `mv`.
    fn execute_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()>;

    /// Apply the exact inverse of `mv`.
    fn undo_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()>;

    /// Evaluate the current state.
    ///
    /// Default: the sub-rule's utility, or an empty vector for leaves.
    fn utility(&self, state: &GameState, me: RuleId) -> Result<Utility> {
        match state.sub_rule(me)? {
            Some(sub) => state.utility(sub),
            None => Ok(Utility::new()),
        }
    }

    /// Human-friendly rendering of one of this rule's moves.
    fn move_to_string(&self, _state: &GameState, _me: RuleId, mv: &Move) -> String {
        mv.to_string()
    }

    /// Display form used by `GameState::describe` when the rule is unnamed
    /// and has no sub-rule.
    fn describe(&self, _state: &GameState, _me: RuleId) -> String {
        self.kind().to_string()
    }

    /// Capabilities this rule provides itself.
    fn provides(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Capabilities this rule expects from its sub-chain.
    fn requirements(&self) -> Vec<Requirement> {
        Vec::new()
    }

    /// Owned sibling rules, for aggregates.
    fn members(&self) -> &[RuleId] {
        &[]
    }

    /// The member followed when resolving the bottom rule or the player to move.
    fn active_member(&self) -> Option<RuleId> {
        None
    }

    /// The player acting in the current state, when it depends on rule state.
    fn acting_player(&self) -> Option<PlayerId> {
        None
    }

    /// The coordinate held by this rule, for coordinate leaves.
    fn coords(&self) -> Option<&Coord> {
        None
    }

    /// Rule types scanned for captures and attackers.
    fn radar(&self) -> Option<&[RuleType]> {
        None
    }

    /// Answer "does this rule attack `target`?", for rules with the
    /// `AttackQuery` capability.
    fn attacks(&self, _state: &GameState, _me: RuleId, _target: RuleId) -> Option<Result<bool>> {
        None
    }
}

/// Identifier returned when a listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Observer notified after every execute and undo on a rule.
///
/// Closures `FnMut(RuleId, &Move, bool)` implement this trait.
pub trait ChangeListener {
    /// Called with the rule, the move and whether it was an undo.
    fn on_change(&mut self, rule: RuleId, mv: &Move, undo: bool);
}

impl<F> ChangeListener for F
where
    F: FnMut(RuleId, &Move, bool),
{
    fn on_change(&mut self, rule: RuleId, mv: &Move, undo: bool) {
        self(rule, mv, undo)
    }
}
