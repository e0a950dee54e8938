//! Error types.
//!
//! `Rejection` is the only error a caller sees during play: every illegal
//! `apply` comes back as `Outcome::Rejected(reason)` and leaves the game
//! untouched. The remaining types cover construction (configuration,
//! custom topologies, imported positions, snapshots).

use serde::{Deserialize, Serialize};

use crate::core::{NodeId, Phase, Side};
use crate::rules::GameResult;

/// Why a proposed move was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    #[error("node index {index} is outside the board")]
    OutOfBounds { index: usize },

    #[error("node {node} does not hold a {side} piece")]
    WrongOwner { node: NodeId, side: Side },

    #[error("node {to} is not a legal destination")]
    IllegalDestination { to: NodeId },

    #[error("no board line carries a jump from {from} to {to}")]
    CaptureGeometryInvalid { from: NodeId, to: NodeId },

    #[error("the game is already over")]
    EngineTerminal,
}

/// Invalid rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("goat count {count} must be between 1 and {max}")]
    GoatCount { count: u8, max: usize },

    #[error("captures to win {captures} must be between 1 and the goat count {goats}")]
    CapturesToWin { captures: u8, goats: u8 },
}

/// Invalid custom topology.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("edge endpoint {0} is outside the board")]
    NodeOutOfRange(usize),

    #[error("node {0} cannot neighbour itself")]
    SelfLoop(usize),
}

/// A position that violates the game's invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("invalid rules: {0}")]
    Config(#[from] ConfigError),

    #[error("expected 4 tigers on the board, found {found}")]
    TigerCount { found: usize },

    #[error("{to_place} goats left to place exceeds the goat count {goat_count}")]
    GoatsToPlace { to_place: u8, goat_count: u8 },

    #[error("{captured} captured goats exceeds the limit of {limit}")]
    CapturesExceeded { captured: u8, limit: u8 },

    #[error("expected {expected} goats on the board, found {found}")]
    GoatCount { expected: usize, found: usize },

    #[error("phase {phase} does not match {to_place} goats left to place")]
    PhaseMismatch { phase: Phase, to_place: u8 },
}

/// Failure to encode or decode a state snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot holds an invalid position: {0}")]
    InvalidState(#[from] StateError),

    #[error("terminal tag {terminal:?} does not match {captured} captured goats")]
    TerminalMismatch {
        captured: u8,
        terminal: Option<GameResult>,
    },
}
