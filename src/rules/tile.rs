//! Coordinate leaf.

use crate::core::{Coord, EngineError, Result, RuleId, Utility};

use super::capability::{Capabilities, Capability};
use super::moves::Move;
use super::rule::Rule;
use super::state::GameState;

/// Innermost rule of a piece: holds its coordinate.
///
/// A tile has no moves of its own. It applies `Move::Step` by moving to the
/// destination and undoes it by moving back to the origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    coords: Coord,
}

impl Tile {
    /// A tile at `coords`.
    pub fn at(coords: impl Into<Coord>) -> Self {
        Self {
            coords: coords.into(),
        }
    }
}

impl Rule for Tile {
    fn kind(&self) -> &'static str {
        "Tile"
    }

    fn legal_moves(&self, _state: &GameState, _me: RuleId) -> Result<Vec<Move>> {
        Ok(Vec::new())
    }

    fn execute_move(&mut self, _state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let Move::Step { to, from } = mv else {
            return Err(EngineError::malformed(me, format!("tile cannot apply {}", mv)));
        };
        if *from != self.coords {
            return Err(EngineError::PairingViolation(format!(
                "{} is at {}, move starts at {}",
                me, self.coords, from
            )));
        }
        self.coords = to.clone();
        Ok(())
    }

    fn undo_move(&mut self, _state: &mut GameState, me: RuleId, mv: &Move) -> Result<()> {
        let Move::Step { to, from } = mv else {
            return Err(EngineError::malformed(me, format!("tile cannot undo {}", mv)));
        };
        if *to != self.coords {
            return Err(EngineError::PairingViolation(format!(
                "{} is at {}, move ended at {}",
                me, self.coords, to
            )));
        }
        self.coords = from.clone();
        Ok(())
    }

    /// The owner's status value, or nothing for unowned tiles.
    fn utility(&self, state: &GameState, me: RuleId) -> Result<Utility> {
        Ok(match state.player(me)? {
            Some(owner) => {
                Utility::new().with(owner, state.status(owner).value(state.player_count()))
            }
            None => Utility::new(),
        })
    }

    fn describe(&self, _state: &GameState, _me: RuleId) -> String {
        format!("Tile{}", self.coords)
    }

    fn provides(&self) -> Capabilities {
        Capabilities::of(Capability::Coordinates)
    }

    fn coords(&self) -> Option<&Coord> {
        Some(&self.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, PlayerStatus};

    #[test]
    fn test_step_and_back() {
        let mut state = GameState::new(2);
        let tile = state.compose().with(Tile::at([4, 4])).build().unwrap();
        let mv = Move::step([5, 4], [4, 4]);

        state.execute_move(tile, &mv).unwrap();
        assert_eq!(state.coords(tile).unwrap(), Some(Coord::from([5, 4])));

        state.undo_move(tile, &mv).unwrap();
        assert_eq!(state.coords(tile).unwrap(), Some(Coord::from([4, 4])));
        assert!(state.legal_moves(tile).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_foreign_moves() {
        let mut state = GameState::new(2);
        let tile = state.compose().with(Tile::at([0, 0])).build().unwrap();

        assert!(matches!(
            state.execute_move(tile, &Move::step([1, 1], [2, 2])),
            Err(EngineError::PairingViolation(_))
        ));
        assert!(matches!(
            state.execute_move(tile, &Move::Pass),
            Err(EngineError::MalformedMove { .. })
        ));
        assert_eq!(state.pending_moves(), 0);
    }

    #[test]
    fn test_utility_reads_owner_status() {
        let mut state = GameState::new(2);
        let owner = PlayerId::new(1);
        let tile = state
            .compose()
            .owned_by(owner)
            .with(Tile::at([0, 0]))
            .build()
            .unwrap();

        let before = state.utility(tile).unwrap();
        assert_eq!(before.get(owner), Some(PlayerStatus::PlayOn.value(2)));

        state.set_status(owner, PlayerStatus::Win);
        assert_eq!(state.utility(tile).unwrap().get(owner), Some(1.0));
        assert_eq!(state.describe(tile), "Tile(0, 0)");
    }
}
