//! Pattern movement.
//!
//! A `PatternRule` expands destinations breadth-first from the piece's
//! current coordinate. The shape of the movement comes from a `MovePattern`:
//! a set of independent step functions (one per ray for sliders) and two
//! predicates deciding where expansion stops and which coordinates are not
//! landing spots.
//!
//! Each coordinate is expanded at most once per step function, so expansion
//! terminates whenever the reachable set is finite. Stock patterns keep it
//! finite with `Bounds`.

use rustc_hash::FxHashSet;

use crate::core::{Bounds, Coord, EngineError, Result, RuleId};

use super::capability::{Capability, Requirement};
use super::moves::Move;
use super::rule::Rule;
use super::state::GameState;

/// Movement shape used by `PatternRule`.
///
/// `me` is the pattern rule itself, so policies can look up its owner or
/// the rest of the board through `state`.
pub trait MovePattern: std::fmt::Debug {
    /// Number of independent step functions.
    fn step_count(&self) -> usize;

    /// One-hop neighbors of `from` under step function `index`.
    fn step(&self, state: &GameState, me: RuleId, index: usize, from: &Coord) -> Vec<Coord>;

    /// Check if expansion must not continue past `coord`.
    fn stops_on(&self, state: &GameState, me: RuleId, coord: &Coord) -> Result<bool>;

    /// Check if `coord` is not a landing spot (expansion may still pass it).
    fn skips(&self, state: &GameState, me: RuleId, coord: &Coord) -> Result<bool>;
}

/// Decorator adding pattern destinations to the sub-rule's moves.
#[derive(Debug, Clone)]
pub struct PatternRule<P> {
    pattern: P,
}

impl<P: MovePattern> PatternRule<P> {
    /// Wrap a movement shape.
    pub fn new(pattern: P) -> Self {
        Self { pattern }
    }

    /// The movement shape.
    pub fn pattern(&self) -> &P {
        &self.pattern
    }
}

impl<P: MovePattern> Rule for PatternRule<P> {
    fn kind(&self) -> &'static str {
        "Pattern"
    }

    fn legal_moves(&self, state: &GameState, me: RuleId) -> Result<Vec<Move>> {
        let sub = state.require_sub(me)?;
        let origin = state.coords(sub)?.ok_or_else(|| EngineError::MissingCapability {
            rule: state.describe(me),
            capability: Capability::Coordinates,
        })?;

        let mut legal = state.legal_moves(sub)?;
        // The origin is never a destination.
        let mut known: FxHashSet<Coord> = legal.iter().filter_map(|mv| mv.destination().cloned()).collect();
        known.insert(origin.clone());

        for index in 0..self.pattern.step_count() {
            let mut checked: FxHashSet<Coord> = FxHashSet::default();
            let mut edge = self.pattern.step(state, me, index, &origin);
            while !edge.is_empty() {
                let mut next = Vec::new();
                for coord in edge {
                    if !known.contains(&coord) && !self.pattern.skips(state, me, &coord)? {
                        known.insert(coord.clone());
                        legal.push(Move::step(coord.clone(), origin.clone()));
                    }
                    if checked.contains(&coord) {
                        continue;
                    }
                    if !self.pattern.stops_on(state, me, &coord)? {
                        next.extend(self.pattern.step(state, me, index, &coord));
                    }
                    checked.insert(coord);
                }
                edge = next;
            }
        }
        Ok(legal)
    }

    fn execute_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let sub = state.require_sub(me)?;
        state.execute_move(sub, mv)
    }

    fn undo_move(&mut self, state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let sub = state.require_sub(me)?;
        state.undo_move(sub, mv)
    }

    fn requirements(&self) -> Vec<Requirement> {
        vec![Requirement::required(Capability::Coordinates)]
    }
}

/// Check if `coord` holds a piece owned by the same player as `me`.
fn occupied_by_friend(state: &GameState, me: RuleId, coord: &Coord) -> Result<bool> {
    let Some(occupant) = state.occupant(coord)? else {
        return Ok(false);
    };
    let own = state.player(me)?;
    Ok(own.is_some() && state.player(occupant)? == own)
}

/// Sliding movement: one ray per direction, blocked by any occupied coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    directions: Vec<Vec<i32>>,
    bounds: Bounds,
    skip_friendly: bool,
}

impl Slide {
    /// Slide along each of `directions` inside `bounds`.
    pub fn new(directions: Vec<Vec<i32>>, bounds: Bounds) -> Self {
        Self {
            directions,
            bounds,
            skip_friendly: false,
        }
    }

    /// Rook-style movement.
    pub fn orthogonal(bounds: Bounds) -> Self {
        Self::new(vec![vec![1, 0], vec![-1, 0], vec![0, 1], vec![0, -1]], bounds)
    }

    /// Bishop-style movement.
    pub fn diagonal(bounds: Bounds) -> Self {
        Self::new(vec![vec![1, 1], vec![1, -1], vec![-1, 1], vec![-1, -1]], bounds)
    }

    /// Do not land on squares held by the mover's own pieces.
    #[must_use]
    pub fn skipping_friendly(mut self) -> Self {
        self.skip_friendly = true;
        self
    }
}

impl MovePattern for Slide {
    fn step_count(&self) -> usize {
        self.directions.len()
    }

    fn step(&self, _state: &GameState, _me: RuleId, index: usize, from: &Coord) -> Vec<Coord> {
        let Some(direction) = self.directions.get(index) else {
            return Vec::new();
        };
        let next = from.offset(direction);
        if self.bounds.contains(&next) {
            vec![next]
        } else {
            Vec::new()
        }
    }

    fn stops_on(&self, state: &GameState, _me: RuleId, coord: &Coord) -> Result<bool> {
        Ok(state.occupant(coord)?.is_some())
    }

    fn skips(&self, state: &GameState, me: RuleId, coord: &Coord) -> Result<bool> {
        if !self.skip_friendly {
            return Ok(false);
        }
        occupied_by_friend(state, me, coord)
    }
}

/// Fixed-offset movement that ignores intermediate occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leap {
    offsets: Vec<Vec<i32>>,
    bounds: Bounds,
    skip_friendly: bool,
}

impl Leap {
    /// Jump by any of `offsets` inside `bounds`.
    pub fn new(offsets: Vec<Vec<i32>>, bounds: Bounds) -> Self {
        Self {
            offsets,
            bounds,
            skip_friendly: false,
        }
    }

    /// Knight jumps.
    pub fn knight(bounds: Bounds) -> Self {
        let offsets = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)]
            .into_iter()
            .map(|(x, y)| vec![x, y])
            .collect();
        Self::new(offsets, bounds)
    }

    /// One step in any of the eight directions.
    pub fn king(bounds: Bounds) -> Self {
        let offsets = (-1..=1)
            .flat_map(|x| (-1..=1).map(move |y| vec![x, y]))
            .filter(|d| d.iter().any(|v| *v != 0))
            .collect();
        Self::new(offsets, bounds)
    }

    /// Do not land on squares held by the mover's own pieces.
    #[must_use]
    pub fn skipping_friendly(mut self) -> Self {
        self.skip_friendly = true;
        self
    }
}

impl MovePattern for Leap {
    fn step_count(&self) -> usize {
        1
    }

    fn step(&self, _state: &GameState, _me: RuleId, _index: usize, from: &Coord) -> Vec<Coord> {
        self.offsets
            .iter()
            .map(|offset| from.offset(offset))
            .filter(|coord| self.bounds.contains(coord))
            .collect()
    }

    fn stops_on(&self, _state: &GameState, _me: RuleId, _coord: &Coord) -> Result<bool> {
        Ok(true)
    }

    fn skips(&self, state: &GameState, me: RuleId, coord: &Coord) -> Result<bool> {
        if !self.skip_friendly {
            return Ok(false);
        }
        occupied_by_friend(state, me, coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::rules::Tile;

    fn piece(state: &mut GameState, pattern: impl MovePattern + 'static, at: [i32; 2], player: u8) -> RuleId {
        state
            .compose()
            .owned_by(PlayerId::new(player))
            .with(PatternRule::new(pattern))
            .with(Tile::at(at))
            .build()
            .unwrap()
    }

    #[test]
    fn test_slide_open_board() {
        let mut state = GameState::new(2);
        let rook = piece(&mut state, Slide::orthogonal(Bounds::grid(8, 8)), [4, 4], 0);

        let destinations: FxHashSet<Coord> = state.destinations(rook).unwrap().into_iter().collect();
        assert_eq!(destinations.len(), 14);
        assert!(!destinations.contains(&Coord::from([4, 4])));
        assert!(destinations.contains(&Coord::from([0, 4])));
        assert!(destinations.contains(&Coord::from([4, 7])));
        assert!(!destinations.contains(&Coord::from([5, 5])));
    }

    #[test]
    fn test_slide_stops_on_blocker() {
        let mut state = GameState::new(2);
        let rook = piece(&mut state, Slide::orthogonal(Bounds::grid(8, 8)), [0, 0], 0);
        piece(&mut state, Slide::orthogonal(Bounds::grid(8, 8)), [3, 0], 1);

        let destinations = state.destinations(rook).unwrap();
        // Three squares up to and including the blocker, seven up the file.
        assert_eq!(destinations.len(), 10);
        assert!(destinations.contains(&Coord::from([3, 0])));
        assert!(!destinations.contains(&Coord::from([4, 0])));
    }

    #[test]
    fn test_skipping_friendly() {
        let mut state = GameState::new(2);
        let rook = piece(
            &mut state,
            Slide::orthogonal(Bounds::grid(8, 8)).skipping_friendly(),
            [0, 0],
            0,
        );
        piece(&mut state, Slide::orthogonal(Bounds::grid(8, 8)), [3, 0], 0);

        let destinations = state.destinations(rook).unwrap();
        assert_eq!(destinations.len(), 9);
        assert!(!destinations.contains(&Coord::from([3, 0])));
    }

    #[test]
    fn test_leap_ignores_blockers() {
        let mut state = GameState::new(2);
        let knight = piece(&mut state, Leap::knight(Bounds::grid(8, 8)), [0, 0], 0);
        piece(&mut state, Leap::king(Bounds::grid(8, 8)), [1, 0], 1);
        piece(&mut state, Leap::king(Bounds::grid(8, 8)), [0, 1], 1);

        let mut destinations = state.destinations(knight).unwrap();
        destinations.sort();
        assert_eq!(destinations, vec![Coord::from([1, 2]), Coord::from([2, 1])]);
    }

    #[test]
    fn test_king_in_corner() {
        let mut state = GameState::new(2);
        let king = piece(&mut state, Leap::king(Bounds::grid(8, 8)), [0, 0], 0);
        assert_eq!(state.legal_moves(king).unwrap().len(), 3);
    }

    #[test]
    fn test_moves_start_at_origin() {
        let mut state = GameState::new(2);
        let rook = piece(&mut state, Slide::diagonal(Bounds::grid(3, 3)), [1, 1], 0);
        for mv in state.legal_moves(rook).unwrap() {
            assert_eq!(mv.origin(), Some(&Coord::from([1, 1])));
        }
    }
}
