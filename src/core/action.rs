//! Move representation.
//!
//! A move is one of three kinds, shared by both sides:
//! - `Place`: a goat enters the board (placement phase only)
//! - `Step`: a piece slides along one board line to an empty neighbour
//! - `Capture`: a tiger jumps over an adjacent goat to the empty node beyond
//!
//! Moves are produced by the move generator after validation; holding a
//! `Move` means the cells it names were checked against the topology.

use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::side::Side;

/// A validated move.
///
/// ## Example
///
/// ```
/// use bagchal::core::{Move, NodeId};
///
/// let n = |i| NodeId::new(i).unwrap();
/// let jump = Move::Capture { from: n(0), over: n(1), to: n(2) };
///
/// assert_eq!(jump.source(), Some(n(0)));
/// assert_eq!(jump.destination(), n(2));
/// assert!(jump.is_capture());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put a new goat on an empty node.
    Place { to: NodeId },
    /// Slide a piece to an adjacent empty node.
    Step { from: NodeId, to: NodeId },
    /// Tiger jumps over the goat on `over` and lands on `to`.
    Capture { from: NodeId, over: NodeId, to: NodeId },
}

impl Move {
    /// The node the piece leaves, if any (placements have none).
    #[must_use]
    pub const fn source(&self) -> Option<NodeId> {
        match *self {
            Move::Place { .. } => None,
            Move::Step { from, .. } | Move::Capture { from, .. } => Some(from),
        }
    }

    /// The node the piece ends on.
    #[must_use]
    pub const fn destination(&self) -> NodeId {
        match *self {
            Move::Place { to } | Move::Step { to, .. } | Move::Capture { to, .. } => to,
        }
    }

    /// The goat removed by this move, if it is a capture.
    #[must_use]
    pub const fn captured(&self) -> Option<NodeId> {
        match *self {
            Move::Capture { over, .. } => Some(over),
            _ => None,
        }
    }

    /// Check if this move captures a goat.
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    /// Check if this move places a new goat.
    #[must_use]
    pub const fn is_placement(&self) -> bool {
        matches!(self, Move::Place { .. })
    }

    /// The `(source, destination)` pair a caller submits for this move.
    ///
    /// Placements have no source; by convention they are submitted with the
    /// destination in both slots.
    #[must_use]
    pub const fn endpoints(&self) -> (NodeId, NodeId) {
        let to = self.destination();
        match self.source() {
            Some(from) => (from, to),
            None => (to, to),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place { to } => write!(f, "place {to}"),
            Move::Step { from, to } => write!(f, "{from}-{to}"),
            Move::Capture { from, over, to } => write!(f, "{from}x{over}-{to}"),
        }
    }
}

/// One legal destination from a node, for highlighting and action masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    /// Where the piece would land.
    pub destination: NodeId,
    /// Whether landing there captures a goat.
    pub is_capture: bool,
}

/// An accepted move with the context it was played in.
///
/// Kept in the state's in-memory history for replay and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that moved.
    pub side: Side,

    /// The move played.
    pub mv: Move,

    /// Ply number of this move (0 for the first move of the game).
    pub ply: u32,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(side: Side, mv: Move, ply: u32) -> Self {
        Self { side, mv, ply }
    }
}
