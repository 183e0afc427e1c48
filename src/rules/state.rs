//! Game state: the rule arena, the active-rule registry and the dispatcher.
//!
//! `GameState` owns every rule node. Nodes reference each other by
//! `RuleId`: decorators through a single `sub_rule` link, aggregates
//! through `Rule::members`. Ownership is strict and acyclic; the builder
//! refuses to give a rule a second parent.
//!
//! ## Registry
//!
//! Top-level pieces are *registered*. Capturing a piece deactivates it
//! without destroying it, and undo reactivates the very same node, so
//! `RuleId`s stay valid for the lifetime of the state.
//!
//! ## Dispatch
//!
//! `execute_move` and `undo_move` take the rule object out of its slot for
//! the duration of the call, so the rule can mutate the rest of the arena
//! (deactivate captured pieces, forward to its sub-rule). Re-entering a
//! rule that is mid-dispatch fails with `RuleBusy`.
//!
//! Top-level execute calls are journaled. A top-level undo must match the
//! most recent unmatched execute, otherwise it fails with
//! `PairingViolation` and leaves the state untouched.

use tracing::trace;

use crate::core::{
    Coord, EngineError, PlayerId, PlayerStatus, Result, RuleId, RuleType, Standings,
    Utility,
};

use super::builder::RuleBuilder;
use super::capability::{Capabilities, Capability, Requirement};
use super::combinators::{RuleSum, SimpleTurn};
use super::moves::Move;
use super::rule::{ChangeListener, ListenerId, Rule};

/// One slot in the arena.
pub(crate) struct RuleNode {
    /// `None` while the rule is being dispatched.
    pub(crate) rule: Option<Box<dyn Rule>>,
    pub(crate) name: Option<String>,
    pub(crate) player: Option<PlayerId>,
    pub(crate) rule_type: Option<RuleType>,
    pub(crate) parent: Option<RuleId>,
    pub(crate) sub_rule: Option<RuleId>,
    /// Capabilities filled in with defaults at composition time.
    pub(crate) synthesized: Capabilities,
    pub(crate) registered: bool,
    pub(crate) active: bool,
    pub(crate) listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
}

impl std::fmt::Debug for RuleNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleNode")
            .field("rule", &self.rule)
            .field("name", &self.name)
            .field("player", &self.player)
            .field("rule_type", &self.rule_type)
            .field("parent", &self.parent)
            .field("sub_rule", &self.sub_rule)
            .field("registered", &self.registered)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Arena of rule nodes plus the active-rule registry.
///
/// ## Usage
///
/// ```
/// use rule_engine::core::{Bounds, Coord, PlayerId};
/// use rule_engine::rules::{GameState, PatternRule, Slide, Tile};
///
/// let mut state = GameState::new(2);
/// let rook = state
///     .compose()
///     .named("Rook")
///     .owned_by(PlayerId::new(0))
///     .with(PatternRule::new(Slide::orthogonal(Bounds::grid(8, 8))))
///     .with(Tile::at([0, 0]))
///     .build()
///     .unwrap();
///
/// let moves = state.legal_moves(rook).unwrap();
/// assert_eq!(moves.len(), 14);
///
/// state.execute_move(rook, &moves[0]).unwrap();
/// state.undo_move(rook, &moves[0]).unwrap();
/// assert_eq!(state.coords(rook).unwrap(), Some(Coord::from([0, 0])));
/// ```
#[derive(Debug)]
pub struct GameState {
    nodes: Vec<RuleNode>,
    /// Registered top rules in registration order.
    top: Vec<RuleId>,
    statuses: Standings,
    journal: Vec<(RuleId, Move)>,
    dispatch_depth: usize,
    next_listener: u32,
}

impl GameState {
    /// Create an empty state for `player_count` players, all at `PlayOn`.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            top: Vec::new(),
            statuses: Standings::new(player_count),
            journal: Vec::new(),
            dispatch_depth: 0,
            next_listener: 0,
        }
    }

    /// Number of players in the game.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.statuses.player_count()
    }

    /// A player's status. Unknown players read as `PlayOn`.
    #[must_use]
    pub fn status(&self, player: PlayerId) -> PlayerStatus {
        self.statuses.get(player)
    }

    /// Every player's status.
    #[must_use]
    pub fn standings(&self) -> &Standings {
        &self.statuses
    }

    /// Set a player's status, returning the previous one so callers can undo.
    pub fn set_status(&mut self, player: PlayerId, status: PlayerStatus) -> PlayerStatus {
        self.statuses.set(player, status)
    }

    /// Number of rule nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Composition ===

    /// Start composing a rule chain, outermost rule first.
    pub fn compose(&mut self) -> RuleBuilder<'_> {
        RuleBuilder::new(self)
    }

    /// Aggregate `members` into a `RuleSum` scored for `player`.
    pub fn rule_sum(&mut self, player: PlayerId, members: Vec<RuleId>) -> Result<RuleId> {
        self.compose()
            .owned_by(player)
            .with(RuleSum::new(members))
            .build_detached()
    }

    /// Sequence `sequence` into a `SimpleTurn` starting at index 0.
    pub fn simple_turn(&mut self, sequence: Vec<RuleId>) -> Result<RuleId> {
        let turn = SimpleTurn::new(sequence)?;
        self.compose().with(turn).build_detached()
    }

    pub(crate) fn insert_node(&mut self, rule: Box<dyn Rule>) -> RuleId {
        let id = RuleId::new(self.nodes.len() as u32);
        self.nodes.push(RuleNode {
            rule: Some(rule),
            name: None,
            player: None,
            rule_type: None,
            parent: None,
            sub_rule: None,
            synthesized: Capabilities::NONE,
            registered: false,
            active: false,
            listeners: Vec::new(),
        });
        id
    }

    pub(crate) fn node(&self, id: RuleId) -> Result<&RuleNode> {
        self.nodes.get(id.index()).ok_or(EngineError::UnknownRule(id))
    }

    pub(crate) fn node_mut(&mut self, id: RuleId) -> Result<&mut RuleNode> {
        self.nodes.get_mut(id.index()).ok_or(EngineError::UnknownRule(id))
    }

    fn rule(&self, id: RuleId) -> Result<&dyn Rule> {
        self.node(id)?.rule.as_deref().ok_or(EngineError::RuleBusy(id))
    }

    // === Accessors ===

    /// Display name given at composition time.
    pub fn name(&self, id: RuleId) -> Result<Option<&str>> {
        Ok(self.node(id)?.name.as_deref())
    }

    /// Owning player.
    pub fn player(&self, id: RuleId) -> Result<Option<PlayerId>> {
        Ok(self.node(id)?.player)
    }

    /// Type tag.
    pub fn rule_type(&self, id: RuleId) -> Result<Option<RuleType>> {
        Ok(self.node(id)?.rule_type)
    }

    /// The rule that owns `id`.
    pub fn parent(&self, id: RuleId) -> Result<Option<RuleId>> {
        Ok(self.node(id)?.parent)
    }

    /// The single rule wrapped by `id`.
    pub fn sub_rule(&self, id: RuleId) -> Result<Option<RuleId>> {
        Ok(self.node(id)?.sub_rule)
    }

    /// Like `sub_rule`, but a missing sub-rule is an error.
    pub fn require_sub(&self, id: RuleId) -> Result<RuleId> {
        self.sub_rule(id)?.ok_or(EngineError::MissingSubRule(id))
    }

    /// The aggregate member `id` currently follows, if it is an aggregate.
    pub fn active_member(&self, id: RuleId) -> Result<Option<RuleId>> {
        Ok(self.rule(id)?.active_member())
    }

    /// Capabilities `id` expects from its sub-chain.
    pub fn requirements(&self, id: RuleId) -> Result<Vec<Requirement>> {
        Ok(self.rule(id)?.requirements())
    }

    /// Terminal leaf reached by following sub-rule links (and the active
    /// member of aggregates).
    pub fn bottom_rule(&self, id: RuleId) -> Result<RuleId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            if let Some(sub) = node.sub_rule {
                current = sub;
                continue;
            }
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(current))?;
            match rule.active_member() {
                Some(member) => current = member,
                None => return Ok(current),
            }
        }
    }

    /// Every rule owned by `id`, pre-order, `id` first.
    pub fn piece(&self, id: RuleId) -> Result<Vec<RuleId>> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let node = self.node(current)?;
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(current))?;
            stack.extend(rule.members().iter().rev().copied());
            if let Some(sub) = node.sub_rule {
                stack.push(sub);
            }
        }
        Ok(out)
    }

    /// Union of what the sub-link chain starting at `id` provides.
    pub fn chain_capabilities(&self, id: RuleId) -> Result<Capabilities> {
        let mut caps = Capabilities::NONE;
        let mut current = Some(id);
        while let Some(rule_id) = current {
            let node = self.node(rule_id)?;
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(rule_id))?;
            caps = caps.union(rule.provides()).union(node.synthesized);
            current = node.sub_rule;
        }
        Ok(caps)
    }

    /// Coordinate of the bottom rule of `id`.
    ///
    /// Returns `None` for chains without coordinates; a synthesized
    /// coordinate capability reads as the empty coordinate.
    pub fn coords(&self, id: RuleId) -> Result<Option<Coord>> {
        let bottom = self.bottom_rule(id)?;
        if let Some(coords) = self.rule(bottom)?.coords() {
            return Ok(Some(coords.clone()));
        }
        if self.chain_capabilities(id)?.contains(Capability::Coordinates) {
            return Ok(Some(Coord::empty()));
        }
        Ok(None)
    }

    /// Player whose value is maximized at `id`: the first rule on the way
    /// to the bottom that reports one.
    pub fn player_to_move(&self, id: RuleId) -> Result<PlayerId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(current))?;
            if let Some(player) = rule.acting_player().or(node.player) {
                return Ok(player);
            }
            match node.sub_rule.or_else(|| rule.active_member()) {
                Some(next) => current = next,
                None => return Err(EngineError::NoPlayerToMove(id)),
            }
        }
    }

    /// Human-readable name: `Name(coords)` for named rules, otherwise the
    /// chain of kinds, e.g. `Capture(Pattern(Tile(4, 4)))`.
    #[must_use]
    pub fn describe(&self, id: RuleId) -> String {
        let mut prefix = String::new();
        let mut depth = 0;
        let mut current = id;
        let body = loop {
            let Some(node) = self.nodes.get(current.index()) else {
                break current.to_string();
            };
            if let Some(name) = &node.name {
                break match self.coords(current) {
                    Ok(Some(coords)) if coords.dims() > 0 => format!("{}{}", name, coords),
                    _ => name.clone(),
                };
            }
            let Some(rule) = node.rule.as_deref() else {
                break current.to_string();
            };
            match node.sub_rule {
                Some(sub) => {
                    prefix.push_str(rule.kind());
                    prefix.push('(');
                    depth += 1;
                    current = sub;
                }
                None => break rule.describe(self, current),
            }
        };
        prefix + &body + &")".repeat(depth)
    }

    // === Registry ===

    /// Register `id` as an active top rule, or reactivate it.
    ///
    /// Newly registered rules that cannot answer attack queries get the
    /// default "never attacks". Reactivating an active rule is an error.
    pub fn add_rules(&mut self, id: RuleId) -> Result<()> {
        let caps = self.chain_capabilities(id)?;
        let node = self.node_mut(id)?;
        if node.registered {
            if node.active {
                return Err(EngineError::AlreadyActive(id));
            }
            node.active = true;
            trace!(rule = id.0, "reactivated rule");
            return Ok(());
        }

        node.registered = true;
        node.active = true;
        if !caps.contains(Capability::AttackQuery) {
            node.synthesized = node.synthesized.with(Capability::AttackQuery);
        }
        self.top.push(id);
        trace!(rule = id.0, "registered rule");
        Ok(())
    }

    /// Deactivate a registered top rule without destroying it.
    pub fn remove_rules(&mut self, id: RuleId) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.registered || !node.active {
            return Err(EngineError::NotActive(id));
        }
        node.active = false;
        trace!(rule = id.0, "deactivated rule");
        Ok(())
    }

    /// Check if `id` takes part in play.
    ///
    /// Unregistered rules are structural and always active.
    pub fn is_active(&self, id: RuleId) -> Result<bool> {
        let node = self.node(id)?;
        Ok(!node.registered || node.active)
    }

    /// Check if `id` was registered as a top rule.
    pub fn is_registered(&self, id: RuleId) -> Result<bool> {
        Ok(self.node(id)?.registered)
    }

    /// Active top rules matching any of `filters` (all of them when empty),
    /// in registration order.
    #[must_use]
    pub fn top_rules(&self, filters: &[RuleType]) -> Vec<RuleId> {
        self.top
            .iter()
            .copied()
            .filter(|id| {
                self.nodes.get(id.index()).map_or(false, |node| {
                    node.active
                        && (filters.is_empty()
                            || node.rule_type.map_or(false, |t| filters.contains(&t)))
                })
            })
            .collect()
    }

    /// First active top rule whose bottom coordinate is `coords`.
    pub fn occupant(&self, coords: &Coord) -> Result<Option<RuleId>> {
        for id in self.top_rules(&[]) {
            if self.coords(id)?.as_ref() == Some(coords) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// The registered piece that `id` belongs to (or the topmost owner when
    /// none of its ancestors is registered).
    pub fn piece_root(&self, id: RuleId) -> Result<RuleId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            if node.registered {
                return Ok(current);
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
    }

    // === Rule contract ===

    /// Legal moves of `id` in the current state.
    pub fn legal_moves(&self, id: RuleId) -> Result<Vec<Move>> {
        self.rule(id)?.legal_moves(self, id)
    }

    /// Destinations of the legal moves of `id`.
    pub fn destinations(&self, id: RuleId) -> Result<Vec<Coord>> {
        Ok(self
            .legal_moves(id)?
            .iter()
            .filter_map(|mv| mv.destination().cloned())
            .collect())
    }

    /// Utility of `id` in the current state.
    pub fn utility(&self, id: RuleId) -> Result<Utility> {
        self.rule(id)?.utility(self, id)
    }

    /// Render one of `id`'s moves.
    pub fn move_to_string(&self, id: RuleId, mv: &Move) -> Result<String> {
        Ok(self.rule(id)?.move_to_string(self, id, mv))
    }

    /// Apply `mv` to `id` and notify its listeners.
    pub fn execute_move(&mut self, id: RuleId, mv: &Move) -> Result<()> {
        self.dispatch(id, mv, false)
    }

    /// Apply the inverse of `mv` to `id` and notify its listeners.
    ///
    /// Precondition: `mv` is the most recent move executed on `id` that has
    /// not been undone yet.
    pub fn undo_move(&mut self, id: RuleId, mv: &Move) -> Result<()> {
        self.dispatch(id, mv, true)
    }

    fn dispatch(&mut self, id: RuleId, mv: &Move, undo: bool) -> Result<()> {
        let top_level = self.dispatch_depth == 0;
        if top_level && undo {
            match self.journal.last() {
                Some((rule, last)) if *rule == id && last == mv => {}
                Some((rule, last)) => {
                    return Err(EngineError::PairingViolation(format!(
                        "expected undo of {} on {}, got {} on {}",
                        last, rule, mv, id
                    )))
                }
                None => {
                    return Err(EngineError::PairingViolation(format!(
                        "nothing to undo for {} on {}",
                        mv, id
                    )))
                }
            }
        }

        let mut rule = self
            .node_mut(id)?
            .rule
            .take()
            .ok_or(EngineError::RuleBusy(id))?;
        self.dispatch_depth += 1;
        let result = if undo {
            rule.undo_move(self, id, mv)
        } else {
            rule.execute_move(self, id, mv)
        };
        self.dispatch_depth -= 1;
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.rule = Some(rule);
        }
        result?;

        if top_level {
            if undo {
                self.journal.pop();
            } else {
                self.journal.push((id, mv.clone()));
            }
        }
        self.notify(id, mv, undo);
        Ok(())
    }

    /// Number of top-level executes not yet undone.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.journal.len()
    }

    // === Capture queries ===

    /// Check if `attacker` attacks `target`.
    ///
    /// Resolved by the first rule in `attacker`'s chain with the attack
    /// query capability; synthesized defaults answer `false`.
    pub fn does_attack_piece(&self, attacker: RuleId, target: RuleId) -> Result<bool> {
        let mut current = Some(attacker);
        while let Some(id) = current {
            let node = self.node(id)?;
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(id))?;
            if let Some(answer) = rule.attacks(self, id, target) {
                return answer;
            }
            if node.synthesized.contains(Capability::AttackQuery) {
                return Ok(false);
            }
            current = node.sub_rule;
        }
        Err(EngineError::MissingCapability {
            rule: self.describe(attacker),
            capability: Capability::AttackQuery,
        })
    }

    /// Check if any active rule on the radar of `id`'s capture rule attacks
    /// `id`'s piece.
    pub fn is_attacked(&self, id: RuleId) -> Result<bool> {
        let target = self.piece_root(id)?;
        let radar = self.radar(id)?;
        for attacker in self.top_rules(&radar) {
            if attacker != target && self.does_attack_piece(attacker, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Radar of the first rule in `id`'s chain that has one.
    pub fn radar(&self, id: RuleId) -> Result<Vec<RuleType>> {
        let mut current = Some(id);
        while let Some(rule_id) = current {
            let node = self.node(rule_id)?;
            let rule = node.rule.as_deref().ok_or(EngineError::RuleBusy(rule_id))?;
            if let Some(radar) = rule.radar() {
                return Ok(radar.to_vec());
            }
            current = node.sub_rule;
        }
        Err(EngineError::MissingCapability {
            rule: self.describe(id),
            capability: Capability::AttackQuery,
        })
    }

    // === Listeners ===

    /// Register a change listener on `id`.
    pub fn add_listener(
        &mut self,
        id: RuleId,
        listener: impl ChangeListener + 'static,
    ) -> Result<ListenerId> {
        let listener_id = ListenerId(self.next_listener);
        self.node_mut(id)?
            .listeners
            .push((listener_id, Box::new(listener)));
        self.next_listener += 1;
        Ok(listener_id)
    }

    /// Remove a listener. Returns `false` if it was not registered on `id`.
    pub fn remove_listener(&mut self, id: RuleId, listener: ListenerId) -> Result<bool> {
        let listeners = &mut self.node_mut(id)?.listeners;
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != listener);
        Ok(listeners.len() != before)
    }

    fn notify(&mut self, id: RuleId, mv: &Move, undo: bool) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            for (_, listener) in node.listeners.iter_mut() {
                listener.on_change(id, mv, undo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bounds;
    use crate::rules::{CaptureRule, PatternRule, Slide, Tile};
    use std::cell::RefCell;
    use std::rc::Rc;

    const WHITE: RuleType = RuleType::new(0);
    const BLACK: RuleType = RuleType::new(1);

    fn rook(state: &mut GameState, player: u8, at: [i32; 2]) -> RuleId {
        let (own, other) = if player == 0 { (WHITE, BLACK) } else { (BLACK, WHITE) };
        state
            .compose()
            .named("R")
            .owned_by(PlayerId::new(player))
            .typed(own)
            .with(CaptureRule::capturing([other]))
            .with(PatternRule::new(Slide::orthogonal(Bounds::grid(8, 8))))
            .with(Tile::at(at))
            .build()
            .unwrap()
    }

    #[test]
    fn test_registry_activate_deactivate() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [0, 0]);
        let b = rook(&mut state, 1, [7, 7]);

        assert_eq!(state.top_rules(&[]), vec![a, b]);
        assert_eq!(state.top_rules(&[BLACK]), vec![b]);

        state.remove_rules(b).unwrap();
        assert_eq!(state.top_rules(&[]), vec![a]);
        assert_eq!(state.remove_rules(b), Err(EngineError::NotActive(b)));

        state.add_rules(b).unwrap();
        assert_eq!(state.top_rules(&[]), vec![a, b]);
        assert_eq!(state.add_rules(b), Err(EngineError::AlreadyActive(b)));
    }

    #[test]
    fn test_structure_walks() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [3, 3]);

        let piece = state.piece(a).unwrap();
        assert_eq!(piece.len(), 3);
        assert_eq!(piece[0], a);
        assert_eq!(state.bottom_rule(a).unwrap(), piece[2]);
        assert_eq!(state.parent(piece[2]).unwrap(), Some(piece[1]));
        assert_eq!(state.piece_root(piece[2]).unwrap(), a);
        assert_eq!(state.player_to_move(a).unwrap(), PlayerId::new(0));
    }

    #[test]
    fn test_describe() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [3, 3]);
        assert_eq!(state.describe(a), "R(3, 3)");

        let inner = state.sub_rule(a).unwrap().unwrap();
        assert_eq!(state.describe(inner), "Pattern(Tile(3, 3))");
        assert_eq!(state.describe(RuleId::new(99)), "Rule(99)");
    }

    #[test]
    fn test_occupant() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [3, 3]);
        assert_eq!(state.occupant(&Coord::from([3, 3])).unwrap(), Some(a));
        assert_eq!(state.occupant(&Coord::from([3, 4])).unwrap(), None);

        state.remove_rules(a).unwrap();
        assert_eq!(state.occupant(&Coord::from([3, 3])).unwrap(), None);
    }

    #[test]
    fn test_journal_rejects_mismatched_undo() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [0, 0]);
        let moves = state.legal_moves(a).unwrap();

        assert!(matches!(
            state.undo_move(a, &moves[0]),
            Err(EngineError::PairingViolation(_))
        ));

        state.execute_move(a, &moves[0]).unwrap();
        assert_eq!(state.pending_moves(), 1);
        assert!(matches!(
            state.undo_move(a, &moves[1]),
            Err(EngineError::PairingViolation(_))
        ));

        state.undo_move(a, &moves[0]).unwrap();
        assert_eq!(state.pending_moves(), 0);
    }

    #[test]
    fn test_listeners_fire_and_detach() {
        let mut state = GameState::new(2);
        let a = rook(&mut state, 0, [0, 0]);
        let seen: Rc<RefCell<Vec<(RuleId, bool)>>> = Rc::default();

        let sink = Rc::clone(&seen);
        let listener = state
            .add_listener(a, move |rule: RuleId, _: &Move, undo: bool| {
                sink.borrow_mut().push((rule, undo))
            })
            .unwrap();

        let mv = state.legal_moves(a).unwrap().remove(0);
        state.execute_move(a, &mv).unwrap();
        state.undo_move(a, &mv).unwrap();
        assert_eq!(*seen.borrow(), vec![(a, false), (a, true)]);

        assert!(state.remove_listener(a, listener).unwrap());
        assert!(!state.remove_listener(a, listener).unwrap());
        state.execute_move(a, &mv).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_statuses() {
        let mut state = GameState::new(3);
        assert_eq!(state.status(PlayerId::new(2)), PlayerStatus::PlayOn);

        let previous = state.set_status(PlayerId::new(2), PlayerStatus::Win);
        assert_eq!(previous, PlayerStatus::PlayOn);
        assert_eq!(state.status(PlayerId::new(2)), PlayerStatus::Win);
        assert_eq!(state.status(PlayerId::new(9)), PlayerStatus::PlayOn);
    }
}
