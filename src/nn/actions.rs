//! The 625-entry action space.
//!
//! Every `(source, destination)` pair is one action:
//! `index = source * 25 + destination`. Placements have no source and are
//! encoded with `source == destination`, matching how callers submit them
//! to [`TurnEngine::apply`](crate::rules::TurnEngine::apply).
//!
//! ```
//! use bagchal::core::{Move, NodeId};
//! use bagchal::nn::{action_index, decode_action};
//!
//! let n = |i| NodeId::new(i).unwrap();
//! let idx = action_index(Move::Step { from: n(0), to: n(5) });
//! assert_eq!(idx, 5);
//! assert_eq!(decode_action(idx), Some((0, 5)));
//! assert_eq!(action_index(Move::Place { to: n(12) }), 12 * 25 + 12);
//! ```

use crate::core::{Move, NODE_COUNT};
use crate::rules::TurnEngine;

/// Number of distinct actions.
pub const ACTION_SPACE_SIZE: usize = NODE_COUNT * NODE_COUNT;

/// Action index of a move.
#[must_use]
pub fn action_index(mv: Move) -> usize {
    let (from, to) = mv.endpoints();
    from.index() * NODE_COUNT + to.index()
}

/// `(source, destination)` of an action index, or `None` if out of range.
#[must_use]
pub fn decode_action(index: usize) -> Option<(usize, usize)> {
    (index < ACTION_SPACE_SIZE).then(|| (index / NODE_COUNT, index % NODE_COUNT))
}

/// Mask over the action space: `true` for each legal action.
///
/// All `false` once the game is over.
#[must_use]
pub fn legal_action_mask(engine: &TurnEngine) -> Vec<bool> {
    let mut mask = vec![false; ACTION_SPACE_SIZE];
    for mv in engine.all_legal_moves() {
        mask[action_index(mv)] = true;
    }
    mask
}
