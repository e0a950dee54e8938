//! # bagchal
//!
//! Rule engine for Bagchal (Tigers and Goats), built for self-play training
//! and interactive front-ends.
//!
//! ## Design Principles
//!
//! 1. **One authority**: [`TurnEngine`] is the only thing that changes a
//!    game. Illegal moves come back as [`Outcome::Rejected`] and leave the
//!    state untouched.
//!
//! 2. **One move path**: goats and tigers share one `Move` type, one
//!    validation function and one board mutation routine.
//!
//! 3. **Topology as data**: board lines are a static adjacency table, and
//!    captures are checked against it rather than against grid arithmetic.
//!
//! ## Architecture
//!
//! - **Persistent history**: the move history is an `im` vector, so cloning
//!   a state is O(1).
//!
//! - **Deterministic self-play**: policies draw from a seeded ChaCha8 stream;
//!   a game replays exactly from its seed.
//!
//! ## Modules
//!
//! - `core`: nodes, topology, board, moves, configuration, state, RNG
//! - `rules`: move validation and generation, the turn engine
//! - `session`: click-driven play for front-ends
//! - `nn`: state encoders, the action space, policy network traits
//! - `self_play`: move policies, the self-play loop, trajectories
//! - `error`: rejection and construction errors
//!
//! ## Example
//!
//! ```
//! use bagchal::{Outcome, TurnEngine};
//!
//! let mut engine = TurnEngine::new();
//! assert!(matches!(engine.apply(12, 12), Outcome::Accepted { .. }));
//! assert_eq!(engine.observe()[12], 1);
//! ```

pub mod core;
pub mod error;
pub mod rules;
pub mod session;
pub mod nn;
pub mod self_play;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, GameRng, GameState, LegalMove, Move, NodeId, Phase, RulesConfig, Side, SideMap,
    Topology,
};

pub use crate::error::{ConfigError, Rejection, SnapshotError, StateError, TopologyError};

pub use crate::rules::{GameResult, MoveGenerator, Outcome, TurnEngine};

pub use crate::session::{ClickResult, Session};

pub use crate::nn::{EncodedState, FlatEncoder, PlaneEncoder, PolicyNetwork, StateEncoder};

pub use crate::self_play::{
    MatchStats, MovePolicy, SelfPlayConfig, SelfPlayWorker, Stop, Trajectory,
};
