//! Per-player utility vectors.
//!
//! A `Utility` maps players to scalars in `[0, 1]`. Vectors are never
//! totally ordered: they are compared by looking up a single player's key,
//! the player to maximize at a search node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Mapping from player to how favorable a position is for them.
///
/// Keys are kept sorted so iteration and display are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Utility {
    values: BTreeMap<PlayerId, f64>,
}

impl Utility {
    /// Create an empty utility vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vector that assigns `value` to each of `player_count` players.
    #[must_use]
    pub fn uniform(player_count: usize, value: f64) -> Self {
        PlayerId::all(player_count).map(|p| (p, value)).collect()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, player: PlayerId, value: f64) -> Self {
        self.set(player, value);
        self
    }

    /// Set a player's value.
    pub fn set(&mut self, player: PlayerId, value: f64) {
        self.values.insert(player, value);
    }

    /// Get a player's value, if present.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<f64> {
        self.values.get(&player).copied()
    }

    /// Value used when this vector competes for `player`.
    ///
    /// A vector without an entry for `player` scores 0.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> f64 {
        self.get(player).unwrap_or(0.0)
    }

    /// Overwrite entries with those from `other` (key-wise union).
    pub fn merge(&mut self, other: &Utility) {
        for (player, value) in other.iter() {
            self.values.insert(player, value);
        }
    }

    /// Iterate over (player, value) pairs in player order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    /// Number of players with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no player has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(PlayerId, f64)> for Utility {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Utility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (player, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:.3}", player, value)?;
        }
        f.write_str("}")
    }
}

/// Pick the vector that maximizes `player`'s value.
///
/// Ties keep the first vector encountered. Returns `None` for an empty input.
///
/// ```
/// use rule_engine::core::{max_by_key, PlayerId, Utility};
///
/// let a = PlayerId::new(0);
/// let b = PlayerId::new(1);
/// let options = vec![
///     Utility::new().with(a, 0.2).with(b, 0.8),
///     Utility::new().with(a, 0.9).with(b, 0.1),
/// ];
/// let best = max_by_key(a, options).unwrap();
/// assert_eq!(best.get(a), Some(0.9));
/// ```
pub fn max_by_key(player: PlayerId, utilities: impl IntoIterator<Item = Utility>) -> Option<Utility> {
    let mut best: Option<Utility> = None;
    for utility in utilities {
        match &best {
            Some(current) if utility.score(player) <= current.score(player) => {}
            _ => best = Some(utility),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_merge_overwrites() {
        let mut a = Utility::new().with(p(0), 0.1).with(p(1), 0.2);
        let b = Utility::new().with(p(1), 0.7).with(p(2), 0.3);
        a.merge(&b);

        assert_eq!(a.get(p(0)), Some(0.1));
        assert_eq!(a.get(p(1)), Some(0.7));
        assert_eq!(a.get(p(2)), Some(0.3));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_max_by_key_first_on_tie() {
        let first = Utility::new().with(p(0), 0.5).with(p(1), 0.1);
        let second = Utility::new().with(p(0), 0.5).with(p(1), 0.9);

        let best = max_by_key(p(0), vec![first.clone(), second]).unwrap();
        assert_eq!(best, first);
    }

    #[test]
    fn test_max_by_key_missing_key_scores_zero() {
        let missing = Utility::new().with(p(1), 1.0);
        let present = Utility::new().with(p(0), 0.01);

        let best = max_by_key(p(0), vec![missing, present.clone()]).unwrap();
        assert_eq!(best, present);
    }

    #[test]
    fn test_max_by_key_empty() {
        assert!(max_by_key(p(0), Vec::new()).is_none());
    }

    #[test]
    fn test_uniform_and_display() {
        let u = Utility::uniform(2, 0.5);
        assert_eq!(u.to_string(), "{p0: 0.500, p1: 0.500}");
    }
}
