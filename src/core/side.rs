//! The two sides and per-side data storage.
//!
//! ## Side
//!
//! Bagchal is asymmetric: four tigers against twenty goats. Goats always
//! move first.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`, used wherever the engine or
//! its drivers track something per side (policies, win counts).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::Cell;

/// One of the two sides in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The goats: place during the placement phase, then step.
    Goat,
    /// The tigers: step or capture in every phase.
    Tiger,
}

impl Side {
    /// Both sides, in turn order.
    pub const ALL: [Side; 2] = [Side::Goat, Side::Tiger];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Goat => Side::Tiger,
            Side::Tiger => Side::Goat,
        }
    }

    /// The cell value this side's pieces occupy.
    #[must_use]
    pub const fn piece(self) -> Cell {
        match self {
            Side::Goat => Cell::Goat,
            Side::Tiger => Cell::Tiger,
        }
    }

    /// Index for fixed two-slot storage (goat = 0, tiger = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Goat => 0,
            Side::Tiger => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Goat => write!(f, "Goat"),
            Side::Tiger => write!(f, "Tiger"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use bagchal::core::{Side, SideMap};
///
/// let mut wins: SideMap<u32> = SideMap::default();
/// wins[Side::Tiger] += 1;
///
/// assert_eq!(wins[Side::Goat], 0);
/// assert_eq!(wins[Side::Tiger], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from explicit goat and tiger values.
    pub fn from_values(goat: T, tiger: T) -> Self {
        Self { data: [goat, tiger] }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Goat.opponent(), Side::Tiger);
        assert_eq!(Side::Tiger.opponent(), Side::Goat);
        assert_eq!(Side::Goat.piece(), Cell::Goat);
        assert_eq!(Side::Tiger.piece(), Cell::Tiger);
        assert_eq!(format!("{}", Side::Tiger), "Tiger");
    }

    #[test]
    fn test_side_map_from_values() {
        let map = SideMap::from_values("goat", "tiger");
        assert_eq!(map[Side::Goat], "goat");
        assert_eq!(map[Side::Tiger], "tiger");
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::default();
        map[Side::Goat] = 3;
        *map.get_mut(Side::Tiger) += 2;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Goat, &3), (Side::Tiger, &2)]);
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Goat).unwrap();
        let deserialized: Side = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Side::Goat);
    }
}
