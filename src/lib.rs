//! # rule-engine
//!
//! A composable rule engine for turn-based multi-player games, with an
//! n-max search over the resulting game tree.
//!
//! ## Design Principles
//!
//! 1. **Composition**: A piece is a chain of small rules (capture over
//!    pattern over tile). Games are aggregates of pieces and players.
//!    Every rule exposes the same four operations.
//!
//! 2. **N-Player First**: Utilities are per-player vectors and the search
//!    maximizes for whoever is to move. Nothing assumes 2 players.
//!
//! 3. **Reversible In-Place Mutation**: Execute and undo mutate the rule
//!    tree directly. Search never clones the game.
//!
//! ## Architecture
//!
//! - **Arena**: `GameState` owns every rule node, addressed by `RuleId`.
//!   Decorators reach their sub-rule through the state.
//!
//! - **Capabilities**: Rules declare what they provide and require; chains
//!   are checked when they are composed, not when they are played.
//!
//! ## Modules
//!
//! - `core`: Ids, players, statuses, coordinates, utilities, RNG, errors
//! - `rules`: The `Rule` contract, the arena and the stock rules
//! - `search`: n-max search with width-limited pruning

pub mod core;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Bounds, Coord, EngineError, PlayerId, PlayerStatus, Result, RuleId, RuleType,
    SearchRng, SearchRngState, Standings, Utility,
};

pub use crate::rules::{
    Capability, CaptureMode, CaptureRule, ChangeListener, GameState, Leap, ListenerId, Move,
    MovePattern, PatternRule, Rule, RuleBuilder, RuleSum, SimpleTurn, Slide, Tile,
};

pub use crate::search::{
    Evaluator, NMaxConfig, NMaxSearch, RuleUtility, SearchOutcome, SearchStats, StandingsFirst,
};
