//! Capability registry for rule composition.
//!
//! A rule declares which capabilities it provides itself and which it needs
//! from the chain below it. The builder checks requirements when a chain is
//! assembled: a missing capability with a declared default is synthesized
//! on the sub-rule, a missing capability without one fails the build.

use serde::{Deserialize, Serialize};

/// Behavior a rule can offer to the rules wrapping it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Holds a coordinate (the chain bottoms out in a coordinate leaf).
    Coordinates,
    /// Answers `does_attack_piece` queries.
    AttackQuery,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Coordinates => 1,
            Capability::AttackQuery => 1 << 1,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Coordinates => f.write_str("coordinates"),
            Capability::AttackQuery => f.write_str("attack query"),
        }
    }
}

/// Small set of capabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// The empty set.
    pub const NONE: Capabilities = Capabilities(0);

    /// A set holding one capability.
    #[must_use]
    pub const fn of(capability: Capability) -> Self {
        Self(capability.bit())
    }

    /// This set plus `capability`.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Capabilities) -> Self {
        Self(self.0 | other.0)
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Check if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A capability a rule expects from its sub-chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    /// The capability needed.
    pub capability: Capability,
    /// Whether a default implementation may stand in when it is missing.
    pub has_default: bool,
}

impl Requirement {
    /// A requirement that must be met by the sub-chain.
    #[must_use]
    pub const fn required(capability: Capability) -> Self {
        Self {
            capability,
            has_default: false,
        }
    }

    /// A requirement the builder may satisfy with a default.
    ///
    /// Defaults: `Coordinates` resolves to the empty coordinate,
    /// `AttackQuery` never attacks.
    #[must_use]
    pub const fn with_default(capability: Capability) -> Self {
        Self {
            capability,
            has_default: true,
        }
    }
}
