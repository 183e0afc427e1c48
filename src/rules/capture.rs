//! Capture decorator.
//!
//! In capturing mode every positional move of the sub-rule is wrapped in a
//! `Move::Capture` listing the active top rules on the radar that sit on
//! the destination. Detection reads pre-move occupancy. Execution
//! deactivates the captured pieces before the mover's own position
//! changes; undo restores the position first and then reactivates the same
//! pieces in reverse order.

use tracing::trace;

use crate::core::{Result, RuleId, RuleType};

use super::capability::{Capabilities, Capability, Requirement};
use super::moves::{CaptureList, Move};
use super::rule::Rule;
use super::state::GameState;

/// Whether a capture rule takes pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureMode {
    /// Pieces on the destination are captured.
    Capturing,
    /// Moves pass through unchanged and never attack anything.
    NonCapturing,
}

/// Decorator attaching captured pieces to moves.
#[derive(Clone, Debug)]
pub struct CaptureRule {
    mode: CaptureMode,
    radar: Vec<RuleType>,
}

impl CaptureRule {
    /// Capture pieces of the given types.
    pub fn capturing(radar: impl IntoIterator<Item = RuleType>) -> Self {
        Self {
            mode: CaptureMode::Capturing,
            radar: radar.into_iter().collect(),
        }
    }

    /// Never capture. `radar` still names the attackers `is_attacked` scans.
    pub fn non_capturing(radar: impl IntoIterator<Item = RuleType>) -> Self {
        Self {
            mode: CaptureMode::NonCapturing,
            radar: radar.into_iter().collect(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    fn restore(state: &mut GameState, captured: &[RuleId]) -> Result<()> {
        for piece in captured.iter().rev() {
            state.add_rules(*piece)?;
            trace!(piece = piece.0, "restored captured piece");
        }
        Ok(())
    }

    fn remove(state: &mut GameState, captured: &[RuleId]) -> Result<()> {
        for (i, piece) in captured.iter().enumerate() {
            if let Err(err) = state.remove_rules(*piece) {
                Self::restore(state, &captured[..i])?;
                return Err(err);
            }
            trace!(piece = piece.0, "captured piece");
        }
        Ok(())
    }
}

impl Rule for CaptureRule {
    fn kind(&self) -> &'static str {
        "Capture"
    }

    fn legal_moves(&self, state: &GameState, me: RuleId) -> Result<Vec<Move>> {
        let sub = state.require_sub(me)?;
        let moves = state.legal_moves(sub)?;
        if self.mode == CaptureMode::NonCapturing {
            return Ok(moves);
        }

        let mover = state.piece_root(me)?;
        let targets = state.top_rules(&self.radar);
        let mut wrapped = Vec::with_capacity(moves.len());
        for mv in moves {
            let Some(destination) = mv.destination().cloned() else {
                wrapped.push(mv);
                continue;
            };
            let already = mv.captured();
            let mut captured = CaptureList::new();
            for target in &targets {
                if *target == mover || already.contains(target) {
                    continue;
                }
                if state.coords(*target)?.as_ref() == Some(&destination) {
                    captured.push(*target);
                }
            }
            wrapped.push(Move::Capture {
                inner: Box::new(mv),
                captured,
            });
        }
        Ok(wrapped)
    }

    fn execute_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let sub = state.require_sub(me)?;
        match (self.mode, mv) {
            (CaptureMode::Capturing, Move::Capture { inner, captured }) => {
                Self::remove(state, captured)?;
                if let Err(err) = state.execute_move(sub, inner) {
                    Self::restore(state, captured)?;
                    return Err(err);
                }
                Ok(())
            }
            _ => state.execute_move(sub, mv),
        }
    }

    fn undo_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let sub = state.require_sub(me)?;
        match (self.mode, mv) {
            (CaptureMode::Capturing, Move::Capture { inner, captured }) => {
                state.undo_move(sub, inner)?;
                Self::restore(state, captured)
            }
            _ => state.undo_move(sub, mv),
        }
    }

    /// Renders `<destination>X<captured>` with every capture in the chain
    /// listed once after a single `X`.
    fn move_to_string(&self, state: &GameState, me: RuleId, mv: &Move) -> String {
        if !matches!((self.mode, mv), (CaptureMode::Capturing, Move::Capture { .. })) {
            return match state.sub_rule(me) {
                Ok(Some(sub)) => state.move_to_string(sub, mv).unwrap_or_else(|_| mv.to_string()),
                _ => mv.to_string(),
            };
        }
        let base = mv.base();
        let mut out = match state.bottom_rule(me) {
            Ok(leaf) => state.move_to_string(leaf, base).unwrap_or_else(|_| base.to_string()),
            Err(_) => base.to_string(),
        };
        let captured = mv.captured();
        if !captured.is_empty() {
            let names: Vec<String> = captured.iter().map(|piece| state.describe(*piece)).collect();
            out.push('X');
            out.push_str(&names.join(", "));
        }
        out
    }

    fn provides(&self) -> Capabilities {
        Capabilities::of(Capability::AttackQuery)
    }

    fn requirements(&self) -> Vec<Requirement> {
        vec![Requirement::required(Capability::Coordinates)]
    }

    fn radar(&self) -> Option<&[RuleType]> {
        Some(&self.radar)
    }

    fn attacks(&self, state: &GameState, me: RuleId, target: RuleId) -> Option<Result<bool>> {
        if self.mode == CaptureMode::NonCapturing {
            return Some(Ok(false));
        }
        Some(
            self.legal_moves(state, me)
                .map(|moves| moves.iter().any(|mv| mv.captures(target))),
        )
    }
}
