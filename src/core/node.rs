//! Board node identification.
//!
//! The board has 25 intersections numbered row-major:
//!
//! ```text
//!  0  1  2  3  4
//!  5  6  7  8  9
//! 10 11 12 13 14
//! 15 16 17 18 19
//! 20 21 22 23 24
//! ```
//!
//! `row = index / 5`, `col = index % 5`.
//!
//! ## Usage
//!
//! ```
//! use bagchal::core::NodeId;
//!
//! let centre = NodeId::from_coords(2, 2).unwrap();
//! assert_eq!(centre.index(), 12);
//!
//! // Indices outside the board are rejected at the boundary.
//! assert!(NodeId::new(25).is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Rejection;

/// Number of nodes along one side of the board.
pub const BOARD_SIZE: usize = 5;

/// Total number of nodes on the board.
pub const NODE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A validated board node index in `0..25`.
///
/// Raw `usize` indices from callers (UI clicks, agent actions) are converted
/// with [`NodeId::new`], which rejects anything off the board. Deserialization
/// goes through the same check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NodeId(u8);

impl NodeId {
    /// Create a node ID from a raw index, or `None` if it is off the board.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < NODE_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Create a node ID from grid coordinates.
    ///
    /// Signed so that reflected coordinates can be checked without
    /// underflow at the caller.
    #[must_use]
    pub const fn from_coords(row: i32, col: i32) -> Option<Self> {
        if row >= 0 && col >= 0 && (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self((row as usize * BOARD_SIZE + col as usize) as u8))
        } else {
            None
        }
    }

    /// Get the raw index (0..25).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row of this node (0 is the top edge).
    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    /// Column of this node (0 is the left edge).
    #[must_use]
    pub const fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// Whether diagonal lines pass through this node.
    ///
    /// On the Bagchal board these are exactly the nodes with even
    /// `row + col`: the two long diagonals and the central diamond.
    #[must_use]
    pub const fn on_diagonal_line(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// Reflect this node through `mid` in grid coordinates.
    ///
    /// Returns `None` when the reflected position falls off the board.
    /// This is pure arithmetic; it says nothing about whether the three
    /// nodes are actually connected.
    #[must_use]
    pub const fn reflect_through(self, mid: NodeId) -> Option<NodeId> {
        let row = 2 * mid.row() as i32 - self.row() as i32;
        let col = 2 * mid.col() as i32 - self.col() as i32;
        Self::from_coords(row, col)
    }

    /// Iterate over every node in index order.
    pub fn all() -> impl Iterator<Item = NodeId> {
        (0..NODE_COUNT as u8).map(NodeId)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for NodeId {
    type Error = Rejection;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        NodeId::new(usize::from(index)).ok_or(Rejection::OutOfBounds {
            index: usize::from(index),
        })
    }
}

impl From<NodeId> for u8 {
    fn from(node: NodeId) -> u8 {
        node.0
    }
}

impl From<NodeId> for usize {
    fn from(node: NodeId) -> usize {
        node.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_bounds() {
        assert_eq!(NodeId::new(0).map(NodeId::index), Some(0));
        assert_eq!(NodeId::new(24).map(NodeId::index), Some(24));
        assert!(NodeId::new(25).is_none());
        assert!(NodeId::new(usize::MAX).is_none());
    }

    #[test]
    fn test_node_coords() {
        let node = NodeId::new(13).unwrap();
        assert_eq!(node.row(), 2);
        assert_eq!(node.col(), 3);
        assert_eq!(NodeId::from_coords(2, 3), Some(node));

        assert!(NodeId::from_coords(-1, 0).is_none());
        assert!(NodeId::from_coords(0, 5).is_none());
    }

    #[test]
    fn test_diagonal_lines() {
        // Corners, centre and diamond tips carry diagonals.
        for idx in [0, 2, 4, 6, 8, 12, 16, 18, 20, 22, 24] {
            assert!(NodeId::new(idx).unwrap().on_diagonal_line(), "node {idx}");
        }
        for idx in [1, 3, 5, 7, 11, 13, 17, 23] {
            assert!(!NodeId::new(idx).unwrap().on_diagonal_line(), "node {idx}");
        }
    }

    #[test]
    fn test_reflect_through() {
        let n = |i| NodeId::new(i).unwrap();

        assert_eq!(n(0).reflect_through(n(1)), Some(n(2)));
        assert_eq!(n(0).reflect_through(n(6)), Some(n(12)));
        assert_eq!(n(12).reflect_through(n(7)), Some(n(2)));

        // Off the board
        assert_eq!(n(1).reflect_through(n(0)), None);
        assert_eq!(n(6).reflect_through(n(0)), None);
    }

    #[test]
    fn test_all_nodes() {
        let nodes: Vec<_> = NodeId::all().collect();
        assert_eq!(nodes.len(), NODE_COUNT);
        assert_eq!(nodes[0].index(), 0);
        assert_eq!(nodes[24].index(), 24);
    }

    #[test]
    fn test_node_serialization() {
        let node = NodeId::new(17).unwrap();
        let json = serde_json::to_string(&node).unwrap();
        let deserialized: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(node, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_off_board() {
        assert_eq!(serde_json::from_str::<NodeId>("24").unwrap().index(), 24);
        assert!(serde_json::from_str::<NodeId>("25").is_err());
        assert!(serde_json::from_str::<NodeId>("200").is_err());

        let bytes = bincode::serialize(&200u8).unwrap();
        assert!(bincode::deserialize::<NodeId>(&bytes).is_err());
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(NodeId::try_from(7u8), Ok(NodeId::new(7).unwrap()));
        assert_eq!(NodeId::try_from(25u8), Err(Rejection::OutOfBounds { index: 25 }));
        assert_eq!(u8::from(NodeId::new(19).unwrap()), 19);
    }
}
