//! Game rules: move validation, move generation and turn sequencing.
//!
//! [`MoveGenerator`] is a read-only view over a topology that decides what
//! is legal. [`TurnEngine`] owns the state and is the only thing that
//! changes it.

pub mod engine;
pub mod movegen;

pub use engine::{GameResult, Outcome, TurnEngine};
pub use movegen::{LegalMoves, MoveGenerator};
