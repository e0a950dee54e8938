//! Core types: nodes, topology, board, moves, configuration, state, RNG.
//!
//! Everything here is rule-free data. Legality and turn sequencing live in
//! [`crate::rules`].

pub mod node;
pub mod side;
pub mod topology;
pub mod board;
pub mod action;
pub mod config;
pub mod state;
pub mod rng;

pub use node::{NodeId, BOARD_SIZE, NODE_COUNT};
pub use side::{Side, SideMap};
pub use topology::{Neighbors, Topology};
pub use board::{Board, Cell, TIGER_COUNT, TIGER_START};
pub use action::{LegalMove, Move, MoveRecord};
pub use config::{RulesConfig, DEFAULT_CAPTURES_TO_WIN, DEFAULT_GOAT_COUNT};
pub use state::{GameState, Phase};
pub use rng::GameRng;
