//! Player status values.
//!
//! A status is both a terminal outcome and an orderable score: every
//! status maps to a scalar given the number of players in the game.
//! `Standings` holds one status per seat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::utility::Utility;

/// Where a player stands in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// The player has won.
    Win,
    /// The player has lost.
    Lose,
    /// The game ended without a winner.
    Draw,
    /// The game continues.
    #[default]
    PlayOn,
}

impl PlayerStatus {
    /// Scalar value of this status in a game with `player_count` players.
    ///
    /// Win is 1, Lose is 0, Draw and PlayOn share the pot evenly.
    ///
    /// ```
    /// use rule_engine::core::PlayerStatus;
    ///
    /// assert_eq!(PlayerStatus::Win.value(3), 1.0);
    /// assert_eq!(PlayerStatus::Draw.value(4), 0.25);
    /// ```
    #[must_use]
    pub fn value(self, player_count: usize) -> f64 {
        match self {
            PlayerStatus::Win => 1.0,
            PlayerStatus::Lose => 0.0,
            PlayerStatus::Draw | PlayerStatus::PlayOn => 1.0 / player_count.max(1) as f64,
        }
    }

    /// Check if the status ends the game for this player.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, PlayerStatus::PlayOn)
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerStatus::Win => "Win",
            PlayerStatus::Lose => "Lose",
            PlayerStatus::Draw => "Draw",
            PlayerStatus::PlayOn => "PlayOn",
        };
        f.write_str(name)
    }
}

/// Per-seat statuses for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings(SmallVec<[PlayerStatus; 4]>);

impl Standings {
    /// Every seat at `PlayOn`.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self(SmallVec::from_elem(PlayerStatus::PlayOn, player_count))
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.0.len()
    }

    /// Unknown seats read as `PlayOn`.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> PlayerStatus {
        self.0.get(player.index()).copied().unwrap_or_default()
    }

    /// Replace a seat's status and return the old one. Unknown seats are
    /// left alone.
    pub fn set(&mut self, player: PlayerId, status: PlayerStatus) -> PlayerStatus {
        match self.0.get_mut(player.index()) {
            Some(slot) => std::mem::replace(slot, status),
            None => PlayerStatus::PlayOn,
        }
    }

    /// True once any seat has a terminal status.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.0.iter().any(|status| status.is_terminal())
    }

    /// Score every seat.
    #[must_use]
    pub fn utility(&self) -> Utility {
        let count = self.player_count();
        PlayerId::all(count)
            .zip(self.0.iter())
            .map(|(player, status)| (player, status.value(count)))
            .collect()
    }
}
