//! Move values.
//!
//! A move carries exactly enough information to be applied and then
//! inverted. Moves are transient: produced by enumeration, consumed by
//! execute/undo, never stored in the tree.
//!
//! Decorators wrap the moves of their sub-rule: a capture rule wraps a step
//! in `Move::Capture`, aggregates tag the originating member with
//! `Move::Delegate`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, RuleId};

/// Captured rules attached to one move. Usually zero or one.
pub type CaptureList = SmallVec<[RuleId; 2]>;

/// A reversible move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Positional change applied by a coordinate leaf.
    Step { to: Coord, from: Coord },

    /// A sub-move plus the top rules it removes from play.
    Capture { inner: Box<Move>, captured: CaptureList },

    /// A sub-move tagged with the member rule that produced it.
    Delegate { rule: RuleId, inner: Box<Move> },

    /// Advance the turn without moving anything.
    Pass,

    /// Opaque choice index for custom rules.
    Choice(u32),
}

impl Move {
    /// Create a step from `from` to `to`.
    pub fn step(to: impl Into<Coord>, from: impl Into<Coord>) -> Self {
        Move::Step {
            to: to.into(),
            from: from.into(),
        }
    }

    /// Tag `inner` with its originating rule.
    #[must_use]
    pub fn delegate(rule: RuleId, inner: Move) -> Self {
        Move::Delegate {
            rule,
            inner: Box::new(inner),
        }
    }

    /// The innermost move with all wrappers stripped.
    #[must_use]
    pub fn base(&self) -> &Move {
        let mut current = self;
        loop {
            match current {
                Move::Capture { inner, .. } | Move::Delegate { inner, .. } => current = inner,
                other => return other,
            }
        }
    }

    /// Where the moving piece lands, if this is a positional move.
    #[must_use]
    pub fn destination(&self) -> Option<&Coord> {
        match self.base() {
            Move::Step { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Where the moving piece starts, if this is a positional move.
    #[must_use]
    pub fn origin(&self) -> Option<&Coord> {
        match self.base() {
            Move::Step { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Every rule captured by this move, outermost capture first.
    #[must_use]
    pub fn captured(&self) -> CaptureList {
        let mut all = CaptureList::new();
        let mut current = self;
        loop {
            match current {
                Move::Capture { inner, captured } => {
                    all.extend(captured.iter().copied());
                    current = inner;
                }
                Move::Delegate { inner, .. } => current = inner,
                _ => return all,
            }
        }
    }

    /// Check if this move captures `piece`.
    #[must_use]
    pub fn captures(&self, piece: RuleId) -> bool {
        self.captured().contains(&piece)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Step { to, .. } => write!(f, "{}", to),
            Move::Capture { .. } => {
                write!(f, "{}", self.base())?;
                let captured = self.captured();
                if !captured.is_empty() {
                    f.write_str("X")?;
                    for (i, rule) in captured.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", rule)?;
                    }
                }
                Ok(())
            }
            Move::Delegate { inner, .. } => write!(f, "{}", inner),
            Move::Pass => f.write_str("PASS"),
            Move::Choice(index) => write!(f, "#{}", index),
        }
    }
}
