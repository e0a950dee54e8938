//! State encoding for network input.
//!
//! Two encoders are provided:
//!
//! - [`FlatEncoder`]: the 25 observation codes as floats, shape `[25]`.
//! - [`PlaneEncoder`]: six 5x5 planes, shape `[6, 5, 5]`:
//!   empty, goat, tiger, goat-to-move, placement progress, capture progress.
//!
//! Both share the 625-entry action space described in [`crate::nn::actions`].

use crate::core::{Cell, GameState, NodeId, Side, BOARD_SIZE, NODE_COUNT};
use crate::nn::actions::ACTION_SPACE_SIZE;
use crate::nn::traits::EncodedState;

/// Encodes game state into tensors for network input.
pub trait StateEncoder: Send + Sync {
    /// Encode the game state.
    ///
    /// Bagchal has no hidden information, so there is no perspective
    /// argument; the side to move is part of the encoding where needed.
    fn encode(&self, state: &GameState) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Size of the policy output vector.
    fn action_space_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

impl<E: StateEncoder + ?Sized> StateEncoder for Box<E> {
    fn encode(&self, state: &GameState) -> EncodedState {
        (**self).encode(state)
    }

    fn output_shape(&self) -> Vec<usize> {
        (**self).output_shape()
    }

    fn action_space_size(&self) -> usize {
        (**self).action_space_size()
    }
}

/// Raw cell codes (0 = empty, 1 = goat, 2 = tiger) as floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatEncoder;

impl StateEncoder for FlatEncoder {
    fn encode(&self, state: &GameState) -> EncodedState {
        let tensor = state.observe().iter().map(|&c| f32::from(c)).collect();
        EncodedState::new(tensor, vec![NODE_COUNT])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![NODE_COUNT]
    }
}

/// Planar encoding.
///
/// Planes 0-2 are one-hot cell contents. Plane 3 is all ones when the goats
/// are to move. Planes 4 and 5 are constant planes holding
/// `placed / goat_count` and `captured / captures_to_win`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneEncoder;

impl PlaneEncoder {
    /// Number of planes.
    pub const PLANES: usize = 6;

    fn plane_offset(plane: usize, node: NodeId) -> usize {
        plane * NODE_COUNT + node.index()
    }
}

impl StateEncoder for PlaneEncoder {
    fn encode(&self, state: &GameState) -> EncodedState {
        let mut tensor = vec![0.0f32; Self::PLANES * NODE_COUNT];
        let config = state.config();

        let goat_to_move = if state.active_side() == Side::Goat { 1.0 } else { 0.0 };
        let placed =
            f32::from(config.goat_count - state.goats_to_place()) / f32::from(config.goat_count);
        let captured = f32::from(state.goats_captured()) / f32::from(config.captures_to_win);

        for node in NodeId::all() {
            let plane = match state.board().get(node) {
                Cell::Empty => 0,
                Cell::Goat => 1,
                Cell::Tiger => 2,
            };
            tensor[Self::plane_offset(plane, node)] = 1.0;
            tensor[Self::plane_offset(3, node)] = goat_to_move;
            tensor[Self::plane_offset(4, node)] = placed;
            tensor[Self::plane_offset(5, node)] = captured;
        }

        EncodedState::new(tensor, self.output_shape())
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![Self::PLANES, BOARD_SIZE, BOARD_SIZE]
    }
}
