//! Board storage: 25 cells, no rules.
//!
//! `Board` is a pure data container. Legality lives in
//! [`MoveGenerator`](crate::rules::MoveGenerator); the board only stores
//! and queries cell values, and applies a move that has already been
//! authorised.

use serde::{Deserialize, Serialize};

use super::action::Move;
use super::node::{NodeId, BOARD_SIZE, NODE_COUNT};

/// Starting nodes of the four tigers (the corners).
pub const TIGER_START: [usize; 4] = [0, 4, 20, 24];

/// Number of tigers on the board, always.
pub const TIGER_COUNT: usize = TIGER_START.len();

/// Contents of one board node.
///
/// The discriminants are the observation codes handed to agents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Goat = 1,
    Tiger = 2,
}

impl Cell {
    /// Observation code: 0 = empty, 1 = goat, 2 = tiger.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode an observation code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Goat),
            2 => Some(Cell::Tiger),
            _ => None,
        }
    }

    /// Single-character symbol used by the text rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Goat => 'G',
            Cell::Tiger => 'T',
        }
    }
}

/// The 25-node board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; NODE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with nothing on it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NODE_COUNT],
        }
    }

    /// The starting position: tigers on the four corners.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for idx in TIGER_START {
            board.cells[idx] = Cell::Tiger;
        }
        board
    }

    /// Get the contents of a node.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Cell {
        self.cells[node.index()]
    }

    /// Overwrite the contents of a node.
    pub fn set(&mut self, node: NodeId, value: Cell) {
        self.cells[node.index()] = value;
    }

    /// Check whether a node is empty.
    #[must_use]
    pub fn is_empty(&self, node: NodeId) -> bool {
        self.get(node) == Cell::Empty
    }

    /// Count the nodes holding `kind`.
    #[must_use]
    pub fn count_pieces(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Nodes holding `kind`, in index order.
    pub fn nodes_with(&self, kind: Cell) -> impl Iterator<Item = NodeId> + '_ {
        NodeId::all().filter(move |&n| self.get(n) == kind)
    }

    /// Flat observation: one code per node.
    #[must_use]
    pub fn observe(&self) -> [u8; NODE_COUNT] {
        self.cells.map(Cell::code)
    }

    /// Build a board from 25 observation codes.
    ///
    /// Returns `None` if any code is not 0, 1 or 2.
    #[must_use]
    pub fn from_codes(codes: &[u8; NODE_COUNT]) -> Option<Self> {
        let mut board = Self::empty();
        for (cell, &code) in board.cells.iter_mut().zip(codes.iter()) {
            *cell = Cell::from_code(code)?;
        }
        Some(board)
    }

    /// Apply an authorised move for the piece `piece`.
    ///
    /// One routine for every move kind and side: the source (if any) and the
    /// captured node (if any) are emptied, the destination receives `piece`.
    pub(crate) fn apply(&mut self, mv: &Move, piece: Cell) {
        if let Some(from) = mv.source() {
            self.set(from, Cell::Empty);
        }
        if let Some(over) = mv.captured() {
            self.set(over, Cell::Empty);
        }
        self.set(mv.destination(), piece);
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
