//! Engine error taxonomy.
//!
//! Composition errors surface when a rule chain is assembled. Everything
//! else signals a caller precondition violation (bad pairing, foreign
//! moves); the engine reports these instead of silently corrupting state,
//! but does not try to repair the tree afterwards.

use thiserror::Error;

use crate::rules::Capability;

use super::id::RuleId;

/// Errors raised by rule composition, dispatch and search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Unknown rule: {0}")]
    UnknownRule(RuleId),

    #[error("{0} is already being dispatched (cyclic composition)")]
    RuleBusy(RuleId),

    #[error("{0} has no sub-rule")]
    MissingSubRule(RuleId),

    #[error("{rule} requires capability {capability} from its sub-rule")]
    MissingCapability { rule: String, capability: Capability },

    #[error("{0} is already owned by another rule")]
    AlreadyOwned(RuleId),

    #[error("A piece needs at least one rule")]
    EmptyPiece,

    #[error("A turn sequence needs at least one sub-rule")]
    EmptySequence,

    #[error("No player to move below {0}")]
    NoPlayerToMove(RuleId),

    #[error("Malformed move for {rule}: {reason}")]
    MalformedMove { rule: RuleId, reason: String },

    #[error("Undo does not match the last executed move: {0}")]
    PairingViolation(String),

    #[error("{0} is not active")]
    NotActive(RuleId),

    #[error("{0} is already active")]
    AlreadyActive(RuleId),
}

impl EngineError {
    /// Shorthand for a `MalformedMove` error.
    pub fn malformed(rule: RuleId, reason: impl Into<String>) -> Self {
        EngineError::MalformedMove {
            rule,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
