//! Aggregate rules: `RuleSum` and `SimpleTurn`.
//!
//! Both own their members through `Rule::members` and tag member moves with
//! `Move::Delegate` so execute and undo can route them back.

use crate::core::{max_by_key, EngineError, Result, RuleId, Utility};

use super::moves::Move;
use super::rule::Rule;
use super::state::GameState;

fn delegated<'m>(me: RuleId, mv: &'m Move) -> Result<(RuleId, &'m Move)> {
    match mv {
        Move::Delegate { rule, inner } => Ok((*rule, &**inner)),
        other => Err(EngineError::malformed(me, format!("expected a delegated move, got {}", other))),
    }
}

/// Sibling rules active at the same time, e.g. all pieces of one player.
///
/// Moves are the union of the active members' moves. Utility is the member
/// utility that maximizes the sum's player.
#[derive(Clone, Debug, Default)]
pub struct RuleSum {
    members: Vec<RuleId>,
}

impl RuleSum {
    /// Aggregate `members`.
    #[must_use]
    pub fn new(members: Vec<RuleId>) -> Self {
        Self { members }
    }

    fn active_members<'s>(&'s self, state: &'s GameState) -> impl Iterator<Item = Result<RuleId>> + 's {
        self.members.iter().filter_map(move |member| match state.is_active(*member) {
            Ok(true) => Some(Ok(*member)),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        })
    }

    fn check_member(&self, me: RuleId, rule: RuleId) -> Result<()> {
        if self.members.contains(&rule) {
            Ok(())
        } else {
            Err(EngineError::malformed(me, format!("{} is not a member", rule)))
        }
    }
}

impl Rule for RuleSum {
    fn kind(&self) -> &'static str {
        "Sum"
    }

    fn legal_moves(&self, state: &GameState, _me: RuleId) -> Result<Vec<Move>> {
        let mut legal = Vec::new();
        for member in self.active_members(state) {
            let member = member?;
            legal.extend(
                state
                    .legal_moves(member)?
                    .into_iter()
                    .map(|mv| Move::delegate(member, mv)),
            );
        }
        Ok(legal)
    }

    fn execute_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let (rule, inner) = delegated(me, mv)?;
        self.check_member(me, rule)?;
        state.execute_move(rule, inner)
    }

    fn undo_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let (rule, inner) = delegated(me, mv)?;
        self.check_member(me, rule)?;
        state.undo_move(rule, inner)
    }

    /// Best member utility for the sum's player. Without a player the member
    /// utilities are merged.
    fn utility(&self, state: &GameState, me: RuleId) -> Result<Utility> {
        let mut utilities = Vec::with_capacity(self.members.len());
        for member in self.active_members(state) {
            utilities.push(state.utility(member?)?);
        }
        Ok(match state.player(me)? {
            Some(player) => max_by_key(player, utilities).unwrap_or_default(),
            None => utilities.iter().fold(Utility::new(), |mut acc, u| {
                acc.merge(u);
                acc
            }),
        })
    }

    fn move_to_string(&self, state: &GameState, _me: RuleId, mv: &Move) -> String {
        match mv {
            Move::Delegate { rule, inner } => state
                .move_to_string(*rule, inner)
                .unwrap_or_else(|_| inner.to_string()),
            other => other.to_string(),
        }
    }

    fn describe(&self, state: &GameState, _me: RuleId) -> String {
        let names: Vec<String> = self.members.iter().map(|m| state.describe(*m)).collect();
        format!("Sum[{}]", names.join(", "))
    }

    fn members(&self) -> &[RuleId] {
        &self.members
    }

    fn active_member(&self) -> Option<RuleId> {
        self.members.last().copied()
    }
}

/// Turn sequencer: one member acts at a time, in order, wrapping around.
///
/// Executing a move advances the turn before the member applies it; undo
/// lets the member revert first and then steps the turn back. `Move::Pass`
/// only advances the turn.
#[derive(Clone, Debug)]
pub struct SimpleTurn {
    sequence: Vec<RuleId>,
    index: usize,
}

impl SimpleTurn {
    /// Sequence `sequence`, starting with its first member.
    pub fn new(sequence: Vec<RuleId>) -> Result<Self> {
        if sequence.is_empty() {
            return Err(EngineError::EmptySequence);
        }
        Ok(Self { sequence, index: 0 })
    }

    /// Start at `index` (taken modulo the sequence length).
    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        self.index = index % self.sequence.len();
        self
    }

    /// Current turn index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The member whose turn it is.
    pub fn active(&self) -> RuleId {
        self.sequence[self.index]
    }

    fn previous(&self) -> usize {
        (self.index as isize - 1).rem_euclid(self.sequence.len() as isize) as usize
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.sequence.len();
    }

    fn retreat(&mut self) {
        self.index = self.previous();
    }
}

impl Rule for SimpleTurn {
    fn kind(&self) -> &'static str {
        "Turn"
    }

    fn legal_moves(&self, state: &GameState, _me: RuleId) -> Result<Vec<Move>> {
        let active = self.active();
        Ok(state
            .legal_moves(active)?
            .into_iter()
            .map(|mv| Move::delegate(active, mv))
            .collect())
    }

    fn execute_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        if *mv == Move::Pass {
            self.advance();
            return Ok(());
        }
        let (rule, inner) = delegated(me, mv)?;
        if rule != self.active() {
            return Err(EngineError::PairingViolation(format!(
                "{} moved out of turn, {} is to move",
                rule,
                self.active()
            )));
        }
        self.advance();
        if let Err(err) = state.execute_move(rule, inner) {
            self.retreat();
            return Err(err);
        }
        Ok(())
    }

    fn undo_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        if *mv == Move::Pass {
            self.retreat();
            return Ok(());
        }
        let (rule, inner) = delegated(me, mv)?;
        let previous = self.sequence[self.previous()];
        if rule != previous {
            return Err(EngineError::PairingViolation(format!(
                "undo of {} but {} moved last",
                rule, previous
            )));
        }
        state.undo_move(rule, inner)?;
        self.retreat();
        Ok(())
    }

    /// Union of every member's utility.
    fn utility(&self, state: &GameState, _me: RuleId) -> Result<Utility> {
        let mut utility = Utility::new();
        for member in &self.sequence {
            utility.merge(&state.utility(*member)?);
        }
        Ok(utility)
    }

    fn move_to_string(&self, state: &GameState, _me: RuleId, mv: &Move) -> String {
        match mv {
            Move::Delegate { rule, inner } => state
                .move_to_string(*rule, inner)
                .unwrap_or_else(|_| inner.to_string()),
            other => other.to_string(),
        }
    }

    fn describe(&self, state: &GameState, _me: RuleId) -> String {
        format!("turn: {}", state.describe(self.active()))
    }

    fn members(&self) -> &[RuleId] {
        &self.sequence
    }

    fn active_member(&self) -> Option<RuleId> {
        Some(self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bounds, Coord, PlayerId, PlayerStatus};
    use crate::rules::{PatternRule, Slide, Tile};

    fn tile(state: &mut GameState, player: u8, at: [i32; 2]) -> RuleId {
        state
            .compose()
            .owned_by(PlayerId::new(player))
            .with(Tile::at(at))
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_sequence() {
        assert!(matches!(SimpleTurn::new(Vec::new()), Err(EngineError::EmptySequence)));
    }

    #[test]
    fn test_starting_at_wraps() {
        let ids = vec![RuleId::new(0), RuleId::new(1), RuleId::new(2)];
        let turn = SimpleTurn::new(ids).unwrap().starting_at(4);
        assert_eq!(turn.index(), 1);
        assert_eq!(turn.active(), RuleId::new(1));
    }

    #[test]
    fn test_sum_tags_member_moves() {
        let mut state = GameState::new(2);
        let rook = state
            .compose()
            .owned_by(PlayerId::new(0))
            .with(PatternRule::new(Slide::orthogonal(Bounds::grid(2, 2))))
            .with(Tile::at([0, 0]))
            .build()
            .unwrap();
        let sum = state.rule_sum(PlayerId::new(0), vec![rook]).unwrap();

        let moves = state.legal_moves(sum).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves
            .iter()
            .all(|mv| matches!(mv, Move::Delegate { rule, .. } if *rule == rook)));

        state.execute_move(sum, &moves[0]).unwrap();
        assert_ne!(state.coords(rook).unwrap(), Some(Coord::from([0, 0])));
        state.undo_move(sum, &moves[0]).unwrap();
        assert_eq!(state.coords(rook).unwrap(), Some(Coord::from([0, 0])));
    }

    #[test]
    fn test_sum_rejects_foreign_member() {
        let mut state = GameState::new(2);
        let a = tile(&mut state, 0, [0, 0]);
        let b = tile(&mut state, 0, [1, 0]);
        let sum = state.rule_sum(PlayerId::new(0), vec![a]).unwrap();

        let foreign = Move::delegate(b, Move::step([2, 0], [1, 0]));
        assert!(matches!(
            state.execute_move(sum, &foreign),
            Err(EngineError::MalformedMove { .. })
        ));
        assert!(matches!(
            state.execute_move(sum, &Move::Pass),
            Err(EngineError::MalformedMove { .. })
        ));
    }

    #[test]
    fn test_turn_utility_is_union() {
        let mut state = GameState::new(2);
        let a = tile(&mut state, 0, [0, 0]);
        let b = tile(&mut state, 1, [1, 1]);
        let turn = state.simple_turn(vec![a, b]).unwrap();
        state.set_status(PlayerId::new(1), PlayerStatus::Lose);

        let utility = state.utility(turn).unwrap();
        assert_eq!(utility.get(PlayerId::new(0)), Some(0.5));
        assert_eq!(utility.get(PlayerId::new(1)), Some(0.0));
    }

    #[test]
    fn test_turn_rejects_out_of_turn_moves() {
        let mut state = GameState::new(2);
        let a = tile(&mut state, 0, [0, 0]);
        let b = tile(&mut state, 1, [1, 1]);
        let turn = state.simple_turn(vec![a, b]).unwrap();

        let wrong = Move::delegate(b, Move::step([2, 2], [1, 1]));
        assert!(matches!(
            state.execute_move(turn, &wrong),
            Err(EngineError::PairingViolation(_))
        ));
        assert_eq!(state.bottom_rule(turn).unwrap(), a);
        assert_eq!(state.player_to_move(turn).unwrap(), PlayerId::new(0));

        let right = Move::delegate(a, Move::step([0, 1], [0, 0]));
        state.execute_move(turn, &right).unwrap();
        assert_eq!(state.bottom_rule(turn).unwrap(), b);
        assert_eq!(state.player_to_move(turn).unwrap(), PlayerId::new(1));
        state.undo_move(turn, &right).unwrap();
        assert_eq!(state.bottom_rule(turn).unwrap(), a);
    }
}
