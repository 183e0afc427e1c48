//! n-max game-tree search.
//!
//! ## Overview
//!
//! n-max generalizes minimax to any number of players. Each node evaluates
//! to a full per-player `Utility`; an interior node keeps the child that is
//! best for its player-to-move. Key features:
//!
//! - **In-place**: moves are executed and undone on the live `GameState`
//! - **Width-limited**: nodes with too many moves are pruned, randomly or by
//!   a short lookahead, controlled by `temperature`
//! - **Deterministic**: pruning draws from a seeded `SearchRng`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rule_engine::search::{NMaxConfig, NMaxSearch};
//!
//! let config = NMaxConfig::default().with_depth(3).with_width(4);
//! let mut search = NMaxSearch::new(config);
//! let outcome = search.best_move(&mut state, game)?;
//! println!("{:?} -> {}", outcome.best_move, outcome.utility);
//! ```

pub mod config;
pub mod evaluator;
pub mod nmax;
pub mod stats;

pub use config::NMaxConfig;
pub use evaluator::{Evaluator, RuleUtility, StandingsFirst};
pub use nmax::{NMaxSearch, SearchOutcome};
pub use stats::SearchStats;
