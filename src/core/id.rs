//! Rule identification.
//!
//! Every rule node in a `GameState` arena has a unique `RuleId`. Rules may
//! also carry a `RuleType` tag, which is what capture radars and
//! `top_rules` filters match on.
//!
//! ```
//! use rule_engine::core::{RuleId, RuleType};
//!
//! const ROOK: RuleType = RuleType::new(3);
//! assert_eq!(ROOK.raw(), 3);
//! assert_eq!(RuleId(12).index(), 12);
//! ```

use serde::{Deserialize, Serialize};

/// Index of a rule node in its game state's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub u32);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule({})", self.0)
    }
}

/// Rule type tag. Games define what types exist.
///
/// The engine doesn't interpret type tags; they are opaque identifiers
/// used for filtering the active-rule registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleType(pub u16);

impl RuleType {
    /// Create a new rule type.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw type value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}
