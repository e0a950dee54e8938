//! Network-facing encodings for training and inference.
//!
//! ## Overview
//!
//! - **Encoding**: `StateEncoder` with `FlatEncoder` and `PlaneEncoder`
//! - **Actions**: the 625-entry `(source, destination)` action space and
//!   legal-action masks
//! - **Traits**: `PolicyNetwork`, with `UniformPolicy` as a baseline
//!
//! ## Usage
//!
//! ```
//! use bagchal::nn::{legal_action_mask, PlaneEncoder, StateEncoder};
//! use bagchal::rules::TurnEngine;
//!
//! let engine = TurnEngine::new();
//! let encoded = PlaneEncoder.encode(engine.state());
//! assert_eq!(encoded.shape, vec![6, 5, 5]);
//!
//! let mask = legal_action_mask(&engine);
//! assert_eq!(mask.len(), PlaneEncoder.action_space_size());
//! ```

pub mod actions;
pub mod encoder;
pub mod traits;

pub use actions::{action_index, decode_action, legal_action_mask, ACTION_SPACE_SIZE};
pub use encoder::{FlatEncoder, PlaneEncoder, StateEncoder};
pub use traits::{EncodedState, PolicyNetwork, UniformPolicy};
