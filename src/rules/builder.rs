//! Rule chain composition.
//!
//! A piece is a chain of decorators listed outermost first and ending in a
//! leaf, e.g. capture over pattern over tile. The builder checks each
//! rule's requirements against the chain below it, inserts the nodes into
//! the arena and links them.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::{EngineError, PlayerId, Result, RuleId, RuleType};

use super::capability::Capabilities;
use super::rule::Rule;
use super::state::GameState;

/// Builder for a rule chain. Created by `GameState::compose`.
#[must_use]
pub struct RuleBuilder<'a> {
    state: &'a mut GameState,
    name: Option<String>,
    player: Option<PlayerId>,
    rule_type: Option<RuleType>,
    rules: Vec<Box<dyn Rule>>,
}

impl<'a> RuleBuilder<'a> {
    pub(crate) fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            name: None,
            player: None,
            rule_type: None,
            rules: Vec::new(),
        }
    }

    /// Display name of the top rule.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Owning player, given to every rule in the chain.
    pub fn owned_by(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Type tag of the top rule, matched by capture radars.
    pub fn typed(mut self, rule_type: RuleType) -> Self {
        self.rule_type = Some(rule_type);
        self
    }

    /// Append the next rule down the chain.
    pub fn with(self, rule: impl Rule + 'static) -> Self {
        self.with_boxed(Box::new(rule))
    }

    /// Append an already boxed rule.
    pub fn with_boxed(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Assemble the chain and register its top rule as an active piece.
    pub fn build(self) -> Result<RuleId> {
        let (state, top) = self.assemble()?;
        state.add_rules(top)?;
        Ok(top)
    }

    /// Assemble the chain without registering it.
    ///
    /// Used for structural rules such as aggregates and sequencers.
    pub fn build_detached(self) -> Result<RuleId> {
        let (_, top) = self.assemble()?;
        Ok(top)
    }

    fn assemble(self) -> Result<(&'a mut GameState, RuleId)> {
        let RuleBuilder {
            state,
            name,
            player,
            rule_type,
            rules,
        } = self;

        if rules.is_empty() {
            return Err(EngineError::EmptyPiece);
        }

        let mut seen = FxHashSet::default();
        for member in rules.iter().flat_map(|rule| rule.members().iter().copied()) {
            let node = state.node(member)?;
            if node.parent.is_some() || !seen.insert(member) {
                return Err(EngineError::AlreadyOwned(member));
            }
        }

        // Walk inner to outer, tracking what the chain below each rule provides.
        let mut synthesized = vec![Capabilities::NONE; rules.len()];
        let mut below = Capabilities::NONE;
        for i in (0..rules.len()).rev() {
            for requirement in rules[i].requirements() {
                if below.contains(requirement.capability) {
                    continue;
                }
                if !requirement.has_default {
                    return Err(EngineError::MissingCapability {
                        rule: name.clone().unwrap_or_else(|| rules[i].kind().to_string()),
                        capability: requirement.capability,
                    });
                }
                let target = if i + 1 < rules.len() { i + 1 } else { i };
                synthesized[target] = synthesized[target].with(requirement.capability);
                below = below.with(requirement.capability);
            }
            below = below.union(rules[i].provides()).union(synthesized[i]);
        }

        let depth = rules.len();
        let mut sub: Option<RuleId> = None;
        for (i, rule) in rules.into_iter().enumerate().rev() {
            let members: Vec<RuleId> = rule.members().to_vec();
            let id = state.insert_node(rule);
            {
                let node = state.node_mut(id)?;
                node.player = player;
                node.sub_rule = sub;
                node.synthesized = synthesized[i];
                if i == 0 {
                    node.name = name.clone();
                    node.rule_type = rule_type;
                }
            }
            if let Some(child) = sub {
                state.node_mut(child)?.parent = Some(id);
            }
            for member in members {
                state.node_mut(member)?.parent = Some(id);
            }
            sub = Some(id);
        }

        let top = sub.ok_or(EngineError::EmptyPiece)?;
        debug!(
            rule = top.0,
            name = name.as_deref().unwrap_or(""),
            depth,
            "composed rule chain"
        );
        Ok((state, top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bounds, Coord};
    use crate::core::Utility;
    use crate::rules::{Capability, CaptureRule, Move, PatternRule, Requirement, RuleSum, Slide, Tile};

    /// Wants coordinates below it but can live without them.
    #[derive(Debug)]
    struct Positioned;

    /// Leaf with no capabilities.
    #[derive(Debug)]
    struct Bare;

    impl Rule for Positioned {
        fn kind(&self) -> &'static str {
            "Positioned"
        }

        fn legal_moves(&self, _state: &GameState, _me: RuleId) -> Result<Vec<Move>> {
            Ok(Vec::new())
        }

        fn execute_move(&mut self, _state: &mut GameState, _me: RuleId, _mv: &Move) -> Result<()> {
            Ok(())
        }

        fn undo_move(&mut self, _state: &mut GameState, _me: RuleId, _mv: &Move) -> Result<()> {
            Ok(())
        }

        fn utility(&self, _state: &GameState, _me: RuleId) -> Result<Utility> {
            Ok(Utility::new())
        }

        fn requirements(&self) -> Vec<Requirement> {
            vec![Requirement::with_default(Capability::Coordinates)]
        }
    }

    impl Rule for Bare {
        fn kind(&self) -> &'static str {
            "Bare"
        }

        fn legal_moves(&self, _state: &GameState, _me: RuleId) -> Result<Vec<Move>> {
            Ok(Vec::new())
        }

        fn execute_move(&mut self, _state: &mut GameState, _me: RuleId, _mv: &Move) -> Result<()> {
            Ok(())
        }

        fn undo_move(&mut self, _state: &mut GameState, _me: RuleId, _mv: &Move) -> Result<()> {
            Ok(())
        }

        fn utility(&self, _state: &GameState, _me: RuleId) -> Result<Utility> {
            Ok(Utility::new())
        }
    }

    #[test]
    fn test_build_links_chain() {
        let mut state = GameState::new(2);
        let top = state
            .compose()
            .named("Rook")
            .owned_by(PlayerId::new(1))
            .with(PatternRule::new(Slide::orthogonal(Bounds::grid(4, 4))))
            .with(Tile::at([1, 1]))
            .build()
            .unwrap();

        let tile = state.require_sub(top).unwrap();
        assert_eq!(state.parent(tile).unwrap(), Some(top));
        assert_eq!(state.player(tile).unwrap(), Some(PlayerId::new(1)));
        assert_eq!(state.name(top).unwrap(), Some("Rook"));
        assert_eq!(state.name(tile).unwrap(), None);
        assert!(state.is_registered(top).unwrap());
        assert!(!state.is_registered(tile).unwrap());
        assert_eq!(state.coords(top).unwrap(), Some(Coord::from([1, 1])));
    }

    #[test]
    fn test_empty_piece() {
        let mut state = GameState::new(2);
        assert_eq!(state.compose().build(), Err(EngineError::EmptyPiece));
    }

    #[test]
    fn test_pattern_without_coordinates_fails() {
        let mut state = GameState::new(2);
        let err = state
            .compose()
            .with(PatternRule::new(Slide::orthogonal(Bounds::grid(4, 4))))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingCapability {
                rule: "Pattern".into(),
                capability: Capability::Coordinates,
            }
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_capture_without_coordinates_fails() {
        let mut state = GameState::new(2);
        let err = state
            .compose()
            .named("Ghost")
            .with(CaptureRule::capturing([RuleType::new(0)]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingCapability { ref rule, capability: Capability::Coordinates } if rule == "Ghost"
        ));
    }

    #[test]
    fn test_member_cannot_have_two_owners() {
        let mut state = GameState::new(2);
        let piece = state.compose().with(Tile::at([0, 0])).build().unwrap();
        state.rule_sum(PlayerId::new(0), vec![piece]).unwrap();

        assert_eq!(
            state.rule_sum(PlayerId::new(0), vec![piece]),
            Err(EngineError::AlreadyOwned(piece))
        );
    }

    #[test]
    fn test_member_listed_twice() {
        let mut state = GameState::new(2);
        let piece = state.compose().with(Tile::at([0, 0])).build().unwrap();
        let err = state
            .compose()
            .with(RuleSum::new(vec![piece, piece]))
            .build_detached()
            .unwrap_err();
        assert_eq!(err, EngineError::AlreadyOwned(piece));
    }

    #[test]
    fn test_unregistered_piece_is_synthesized_attack_free() {
        let mut state = GameState::new(2);
        let tile = state
            .compose()
            .with(Tile::at([0, 0]))
            .build_detached()
            .unwrap();
        assert!(!state
            .chain_capabilities(tile)
            .unwrap()
            .contains(Capability::AttackQuery));

        state.add_rules(tile).unwrap();
        assert!(state
            .chain_capabilities(tile)
            .unwrap()
            .contains(Capability::AttackQuery));
    }

    #[test]
    fn test_default_requirement_is_synthesized_below() {
        let mut state = GameState::new(2);
        let top = state.compose().with(Positioned).with(Bare).build().unwrap();

        let sub = state.require_sub(top).unwrap();
        assert!(state.chain_capabilities(sub).unwrap().contains(Capability::Coordinates));
        assert_eq!(state.coords(top).unwrap(), Some(Coord::empty()));
        assert!(state.is_registered(top).unwrap());
    }

    #[test]
    fn test_default_requirement_without_sub_lands_on_rule() {
        let mut state = GameState::new(2);
        let top = state.compose().with(Positioned).build().unwrap();

        assert!(state.chain_capabilities(top).unwrap().contains(Capability::Coordinates));
        assert_eq!(state.coords(top).unwrap(), Some(Coord::empty()));
    }
}
