//! Coordinates and axis-aligned bounds.
//!
//! A `Coord` is an immutable tuple of integers. Equality and hashing are
//! structural, so coordinates work directly as keys for occupancy lookups
//! and destination sets. The engine never interprets the axes; games pick
//! the dimensionality.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity covers boards up to three dimensions without allocating.
type CoordValues = SmallVec<[i32; 3]>;

/// Immutable positional tuple.
///
/// ```
/// use rule_engine::core::Coord;
///
/// let a = Coord::from([4, 4]);
/// let b = a.offset(&[1, -2]);
/// assert_eq!(b, Coord::from([5, 2]));
/// assert_eq!(b.to_string(), "(5, 2)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord(CoordValues);

impl Coord {
    /// Create a coordinate from its components.
    #[must_use]
    pub fn new(values: &[i32]) -> Self {
        Self(values.iter().copied().collect())
    }

    /// The zero-dimensional coordinate.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of axes.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    /// Component along `axis`, if present.
    #[must_use]
    pub fn get(&self, axis: usize) -> Option<i32> {
        self.0.get(axis).copied()
    }

    /// All components.
    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.0
    }

    /// Translate by `delta`. Missing delta components are treated as 0.
    #[must_use]
    pub fn offset(&self, delta: &[i32]) -> Self {
        Self(
            self.0
                .iter()
                .enumerate()
                .map(|(axis, v)| v + delta.get(axis).copied().unwrap_or(0))
                .collect(),
        )
    }
}

impl<const N: usize> From<[i32; N]> for Coord {
    fn from(values: [i32; N]) -> Self {
        Self::new(&values)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str(")")
    }
}

/// Inclusive axis-aligned box.
///
/// Stock movement patterns use this to keep step functions finite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lowest coordinate (inclusive).
    pub min: Coord,
    /// Highest coordinate (inclusive).
    pub max: Coord,
}

impl Bounds {
    /// Create bounds from two corners.
    pub fn new(min: impl Into<Coord>, max: impl Into<Coord>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// A `width` x `height` grid starting at `(0, 0)`.
    #[must_use]
    pub fn grid(width: i32, height: i32) -> Self {
        Self::new([0, 0], [width - 1, height - 1])
    }

    /// Check if `coord` lies inside the box on every axis.
    #[must_use]
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.dims() == self.min.dims()
            && coord
                .values()
                .iter()
                .zip(self.min.values().iter().zip(self.max.values()))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}
