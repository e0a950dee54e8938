//! Network traits for move selection.
//!
//! These define the seam between the engine and a learned model, which
//! typically lives in Python behind the `python` feature.

use serde::{Deserialize, Serialize};

/// Encoded game state as a flat tensor for network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor (e.g. `[channels, height, width]` or `[features]`).
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }
}

/// Policy network: scores over the action space.
///
/// The output length should equal the encoder's `action_space_size`.
/// Scores need not be normalised; callers mask illegal actions before
/// choosing.
pub trait PolicyNetwork: Send + Sync {
    /// Predict action scores for the given state.
    fn predict(&self, encoded: &EncodedState) -> Vec<f32>;

    /// Batch prediction for multiple states.
    fn predict_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// Uniform policy (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct UniformPolicy {
    action_space_size: usize,
}

impl UniformPolicy {
    /// Create a uniform policy over `action_space_size` actions.
    pub fn new(action_space_size: usize) -> Self {
        Self { action_space_size }
    }
}

impl PolicyNetwork for UniformPolicy {
    fn predict(&self, _encoded: &EncodedState) -> Vec<f32> {
        if self.action_space_size == 0 {
            return vec![];
        }
        let prob = 1.0 / self.action_space_size as f32;
        vec![prob; self.action_space_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_state_new() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        assert_eq!(state.len(), 4);
        assert_eq!(state.shape, vec![2, 2]);
        assert_eq!(state.tensor[3], 4.0);
        assert!(!state.is_empty());
        assert!(EncodedState::new(vec![], vec![0]).is_empty());
    }

    #[test]
    fn test_uniform_policy() {
        let policy = UniformPolicy::new(4);
        let probs = policy.predict(&EncodedState::new(vec![0.0; 25], vec![25]));

        assert_eq!(probs.len(), 4);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 0.001);
        assert!(UniformPolicy::default()
            .predict(&EncodedState::new(vec![0.0; 25], vec![25]))
            .is_empty());
    }

    #[test]
    fn test_policy_network_batch() {
        let policy = UniformPolicy::new(625);
        let states = vec![EncodedState::new(vec![0.0; 25], vec![25]); 3];

        let batch = policy.predict_batch(&states);
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|p| p.len() == 625));
    }

    #[test]
    fn test_serialization() {
        let state = EncodedState::new(vec![1.0, 2.0, 0.0], vec![3]);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: EncodedState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
