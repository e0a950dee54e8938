//! Adjacency topology of the Bagchal board.
//!
//! The board is not a uniform grid. Every node connects to its orthogonal
//! neighbours, but diagonal lines are drawn only through the nodes with even
//! `row + col` (the two long diagonals and the central diamond). Move and
//! capture legality is always checked against this graph, never against
//! coordinate arithmetic alone.
//!
//! Neighbour sets are 25-bit masks. The standard graph is a `static` built
//! at compile time and handed out by reference or through one shared `Arc`.
//!
//! ```
//! use bagchal::core::{NodeId, Topology};
//!
//! let topo = Topology::standard();
//! let n = |i| NodeId::new(i).unwrap();
//!
//! assert!(topo.is_neighbor(n(0), n(6)));  // corner sits on a long diagonal
//! assert!(!topo.is_neighbor(n(1), n(5))); // no diagonal through node 1
//! assert_eq!(topo.degree(n(12)), 8);
//! ```

use std::sync::{Arc, OnceLock};

use super::node::{NodeId, BOARD_SIZE, NODE_COUNT};
use crate::error::TopologyError;

/// The standard board graph, computed at compile time.
static STANDARD: Topology = Topology {
    adjacency: standard_adjacency(),
};

static SHARED: OnceLock<Arc<Topology>> = OnceLock::new();

const fn standard_adjacency() -> [u32; NODE_COUNT] {
    let mut adjacency = [0u32; NODE_COUNT];
    let mut idx = 0;
    while idx < NODE_COUNT {
        let row = (idx / BOARD_SIZE) as i32;
        let col = (idx % BOARD_SIZE) as i32;
        let diagonal = (row + col) % 2 == 0;

        let mut dr = -1;
        while dr <= 1 {
            let mut dc = -1;
            while dc <= 1 {
                let orthogonal = (dr == 0) != (dc == 0);
                let is_diag = dr != 0 && dc != 0;
                if orthogonal || (is_diag && diagonal) {
                    let r = row + dr;
                    let c = col + dc;
                    if r >= 0 && c >= 0 && r < BOARD_SIZE as i32 && c < BOARD_SIZE as i32 {
                        adjacency[idx] |= 1 << (r as usize * BOARD_SIZE + c as usize);
                    }
                }
                dc += 1;
            }
            dr += 1;
        }
        idx += 1;
    }
    adjacency
}

/// Immutable, symmetric adjacency graph over the 25 board nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    adjacency: [u32; NODE_COUNT],
}

impl Topology {
    /// The canonical Bagchal graph (56 edges).
    #[must_use]
    pub fn standard() -> &'static Topology {
        &STANDARD
    }

    /// A process-wide shared handle to the canonical graph.
    ///
    /// Every call returns a clone of the same `Arc`, so engines created
    /// with it share one allocation.
    #[must_use]
    pub fn shared() -> Arc<Topology> {
        SHARED.get_or_init(|| Arc::new(STANDARD.clone())).clone()
    }

    /// Build a custom graph from undirected edges.
    ///
    /// Both directions are recorded, so the result is symmetric by
    /// construction. Duplicate edges are harmless.
    pub fn from_edges(
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Topology, TopologyError> {
        let mut adjacency = [0u32; NODE_COUNT];

        for (a, b) in edges {
            let na = NodeId::new(a).ok_or(TopologyError::NodeOutOfRange(a))?;
            let nb = NodeId::new(b).ok_or(TopologyError::NodeOutOfRange(b))?;
            if na == nb {
                return Err(TopologyError::SelfLoop(a));
            }
            adjacency[na.index()] |= 1 << nb.index();
            adjacency[nb.index()] |= 1 << na.index();
        }

        Ok(Topology { adjacency })
    }

    /// Neighbours of `node`, in ascending index order.
    pub fn neighbors(&self, node: NodeId) -> Neighbors {
        Neighbors {
            mask: self.adjacency[node.index()],
        }
    }

    /// Check whether `a` and `b` are joined by a board line.
    #[must_use]
    pub fn is_neighbor(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a.index()] & (1 << b.index()) != 0
    }

    /// Number of neighbours of `node`.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].count_ones() as usize
    }

    /// Every undirected edge once, as `(low, high)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        NodeId::all().flat_map(move |a| {
            self.neighbors(a)
                .filter(move |b| a < *b)
                .map(move |b| (a, b))
        })
    }

    /// Total number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let total: u32 = self.adjacency.iter().map(|m| m.count_ones()).sum();
        total as usize / 2
    }
}

/// Iterator over a node's neighbours, lowest index first.
#[derive(Clone, Debug)]
pub struct Neighbors {
    mask: u32,
}

impl Iterator for Neighbors {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.mask == 0 {
            return None;
        }
        let idx = self.mask.trailing_zeros() as usize;
        self.mask &= self.mask - 1;
        NodeId::new(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.mask.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Neighbors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId::new(i).unwrap()
    }

    fn neighbor_indices(topo: &Topology, node: usize) -> Vec<usize> {
        topo.neighbors(n(node)).map(NodeId::index).collect()
    }

    #[test]
    fn test_standard_edge_count() {
        // 40 orthogonal + 8 on the long diagonals + 8 on the diamond
        assert_eq!(Topology::standard().edge_count(), 56);
        assert_eq!(Topology::standard().edges().count(), 56);
    }

    #[test]
    fn test_standard_neighbors() {
        let topo = Topology::standard();

        assert_eq!(neighbor_indices(topo, 0), vec![1, 5, 6]);
        assert_eq!(neighbor_indices(topo, 1), vec![0, 2, 6]);
        assert_eq!(neighbor_indices(topo, 2), vec![1, 3, 6, 7, 8]);
        assert_eq!(neighbor_indices(topo, 7), vec![2, 6, 8, 12]);
        assert_eq!(
            neighbor_indices(topo, 12),
            vec![6, 7, 8, 11, 13, 16, 17, 18]
        );
        assert_eq!(neighbor_indices(topo, 24), vec![18, 19, 23]);
    }

    #[test]
    fn test_standard_is_symmetric() {
        let topo = Topology::standard();
        for a in NodeId::all() {
            for b in topo.neighbors(a) {
                assert!(topo.is_neighbor(b, a), "{a} -> {b} not mirrored");
            }
            assert!(!topo.is_neighbor(a, a));
        }
    }

    #[test]
    fn test_degrees() {
        let topo = Topology::standard();
        assert_eq!(topo.degree(n(0)), 3);
        assert_eq!(topo.degree(n(6)), 8);
        assert_eq!(topo.degree(n(11)), 4);
        assert_eq!(topo.degree(n(10)), 5);
    }

    #[test]
    fn test_shared_is_single_allocation() {
        let a = Topology::shared();
        let b = Topology::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *Topology::standard());
    }

    #[test]
    fn test_from_edges_round_trip() {
        let topo = Topology::from_edges(
            Topology::standard()
                .edges()
                .map(|(a, b)| (a.index(), b.index())),
        )
        .unwrap();
        assert_eq!(&topo, Topology::standard());
    }

    #[test]
    fn test_from_edges_symmetric() {
        let topo = Topology::from_edges([(0, 1), (1, 2), (2, 1)]).unwrap();
        assert!(topo.is_neighbor(n(1), n(0)));
        assert!(topo.is_neighbor(n(2), n(1)));
        assert_eq!(topo.edge_count(), 2);
        assert_eq!(topo.degree(n(24)), 0);
    }

    #[test]
    fn test_from_edges_errors() {
        assert_eq!(
            Topology::from_edges([(0, 25)]),
            Err(TopologyError::NodeOutOfRange(25))
        );
        assert_eq!(
            Topology::from_edges([(3, 3)]),
            Err(TopologyError::SelfLoop(3))
        );
    }
}
