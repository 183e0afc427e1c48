//! Core engine types: ids, players, statuses, coordinates, utilities, RNG, errors.
//!
//! These are the game-agnostic value types every rule and the search engine
//! share. None of them know about rule trees.

pub mod coord;
pub mod error;
pub mod id;
pub mod player;
pub mod rng;
pub mod status;
pub mod utility;

pub use coord::{Bounds, Coord};
pub use error::{EngineError, Result};
pub use id::{RuleId, RuleType};
pub use player::PlayerId;
pub use rng::{SearchRng, SearchRngState};
pub use status::{PlayerStatus, Standings};
pub use utility::{max_by_key, Utility};
