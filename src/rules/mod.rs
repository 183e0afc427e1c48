//! Composable rules.
//!
//! A game is a tree of `Rule`s stored in a `GameState` arena:
//! - `Tile`: coordinate leaf at the bottom of every piece
//! - `PatternRule`: breadth-first movement over a `MovePattern`
//! - `CaptureRule`: attaches captured pieces to moves
//! - `RuleSum` / `SimpleTurn`: aggregate pieces and players
//!
//! The search engine only ever calls the root rule's contract (enumerate,
//! execute, undo, evaluate) through `GameState`.

pub mod builder;
pub mod capability;
pub mod capture;
pub mod combinators;
pub mod moves;
pub mod pattern;
pub mod rule;
pub mod state;
pub mod tile;

pub use builder::RuleBuilder;
pub use capability::{Capabilities, Capability, Requirement};
pub use capture::{CaptureMode, CaptureRule};
pub use combinators::{RuleSum, SimpleTurn};
pub use moves::{CaptureList, Move};
pub use pattern::{Leap, MovePattern, PatternRule, Slide};
pub use rule::{ChangeListener, ListenerId, Rule};
pub use state::GameState;
pub use tile::Tile;
