//! Shared fixtures for integration tests.
#![allow(dead_code)]

use rule_engine::core::{EngineError, PlayerId, Result, RuleId, Utility};
use rule_engine::rules::{GameState, Move, Rule};

/// One node of a hand-written game tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub player: PlayerId,
    pub children: Vec<usize>,
    pub utility: Utility,
    /// Enumerating moves here fails.
    pub poisoned: bool,
}

/// A custom rule that plays an explicit game tree.
///
/// Moves are `Move::Choice(i)`, selecting the i-th child of the current
/// node. The rule tracks the path from the root, so undo pops it.
#[derive(Clone, Debug)]
pub struct ScriptedTree {
    nodes: Vec<TreeNode>,
    path: Vec<usize>,
}

impl ScriptedTree {
    /// A tree with only a root for `player`.
    pub fn with_root(player: PlayerId, utility: Utility) -> Self {
        Self {
            nodes: vec![TreeNode {
                player,
                children: Vec::new(),
                utility,
                poisoned: false,
            }],
            path: vec![0],
        }
    }

    /// Add a child under `parent` and return its index.
    pub fn child(&mut self, parent: usize, player: PlayerId, utility: Utility) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TreeNode {
            player,
            children: Vec::new(),
            utility,
            poisoned: false,
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Add a leaf under `parent`.
    pub fn leaf(&mut self, parent: usize, utility: Utility) -> usize {
        let player = self.nodes[parent].player;
        self.child(parent, player, utility)
    }

    /// Make move enumeration fail at `node`.
    pub fn poison(&mut self, node: usize) {
        self.nodes[node].poisoned = true;
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    fn current(&self) -> usize {
        *self.path.last().unwrap_or(&0)
    }
}

impl Rule for ScriptedTree {
    fn kind(&self) -> &'static str {
        "Script"
    }

    fn legal_moves(&self, _state: &GameState, me: RuleId) -> Result<Vec<Move>> {
        let node = &self.nodes[self.current()];
        if node.poisoned {
            return Err(EngineError::malformed(me, "poisoned node"));
        }
        Ok((0..node.children.len() as u32).map(Move::Choice).collect())
    }

    fn execute_move(&mut self, _state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let Move::Choice(i) = mv else {
            return Err(EngineError::malformed(me, "expected a choice"));
        };
        let child = self.nodes[self.current()]
            .children
            .get(*i as usize)
            .copied()
            .ok_or_else(|| EngineError::malformed(me, "no such child"))?;
        self.path.push(child);
        Ok(())
    }

    fn undo_move(&mut self, _state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        if self.path.len() < 2 || !matches!(mv, Move::Choice(_)) {
            return Err(EngineError::malformed(me, "nothing to undo"));
        }
        self.path.pop();
        Ok(())
    }

    fn utility(&self, _state: &GameState, _me: RuleId) -> Result<Utility> {
        Ok(self.nodes[self.current()].utility.clone())
    }

    fn acting_player(&self) -> Option<PlayerId> {
        Some(self.nodes[self.current()].player)
    }
}

/// Plain recursive n-max over a scripted tree, full width.
pub fn reference_nmax(tree: &ScriptedTree, node: usize, depth: u32) -> Utility {
    let current = &tree.nodes()[node];
    if depth == 0 || current.children.is_empty() {
        return current.utility.clone();
    }
    let mut best: Option<Utility> = None;
    for child in &current.children {
        let utility = reference_nmax(tree, *child, depth - 1);
        let better = match &best {
            Some(b) => utility.score(current.player) > b.score(current.player),
            None => true,
        };
        if better {
            best = Some(utility);
        }
    }
    best.unwrap_or_default()
}

/// Install `tree` as a detached root rule.
pub fn install(state: &mut GameState, tree: ScriptedTree) -> RuleId {
    state.compose().with(tree).build_detached().unwrap()
}

pub fn u2(a: f64, b: f64) -> Utility {
    Utility::new().with(PlayerId::new(0), a).with(PlayerId::new(1), b)
}

pub fn u3(a: f64, b: f64, c: f64) -> Utility {
    u2(a, b).with(PlayerId::new(2), c)
}
