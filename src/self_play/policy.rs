//! Move-selection policies for self-play.
//!
//! A policy looks at an engine and picks one of its legal moves. Policies
//! never mutate the engine; the worker applies the move they return.

use crate::core::{GameRng, Move};
use crate::nn::{action_index, PolicyNetwork, StateEncoder};
use crate::rules::TurnEngine;

// =============================================================================
// Policy trait
// =============================================================================

/// Chooses a move for the side to move.
pub trait MovePolicy: Send + Sync {
    /// Pick a legal move, or `None` if there is none.
    fn select(&self, engine: &TurnEngine, rng: &mut GameRng) -> Option<Move>;
}

impl<P: MovePolicy + ?Sized> MovePolicy for Box<P> {
    fn select(&self, engine: &TurnEngine, rng: &mut GameRng) -> Option<Move> {
        (**self).select(engine, rng)
    }
}

// =============================================================================
// Baselines
// =============================================================================

/// Uniform over legal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn select(&self, engine: &TurnEngine, rng: &mut GameRng) -> Option<Move> {
        let moves = engine.all_legal_moves();
        rng.choose(&moves).copied()
    }
}

/// Takes a capture whenever one exists, otherwise plays randomly.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyCapturePolicy;

impl MovePolicy for GreedyCapturePolicy {
    fn select(&self, engine: &TurnEngine, rng: &mut GameRng) -> Option<Move> {
        let moves = engine.all_legal_moves();
        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        if captures.is_empty() {
            rng.choose(&moves).copied()
        } else {
            rng.choose(&captures).copied()
        }
    }
}

// =============================================================================
// Network policy
// =============================================================================

/// Picks moves from a policy network's scores, masked to legal moves.
///
/// With temperature 0 the highest-scoring legal move is taken (lowest
/// action index on ties). Otherwise moves are sampled with weight
/// `score^(1/temperature)`, computed in log space relative to the best
/// legal score so low temperatures neither underflow nor overflow.
/// Negative and NaN scores count as zero; if every legal move scores zero
/// the choice is uniform.
#[derive(Clone, Debug)]
pub struct NetworkPolicy<N, E> {
    network: N,
    encoder: E,
    temperature: f32,
}

impl<N: PolicyNetwork, E: StateEncoder> NetworkPolicy<N, E> {
    /// Greedy policy over `network`'s output for `encoder`'s encoding.
    pub fn new(network: N, encoder: E) -> Self {
        Self {
            network,
            encoder,
            temperature: 0.0,
        }
    }

    /// Set the sampling temperature (0 = greedy).
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.max(0.0);
        self
    }

    #[must_use]
    pub fn network(&self) -> &N {
        &self.network
    }

    fn score(scores: &[f32], mv: Move) -> f32 {
        match scores.get(action_index(mv)) {
            Some(&s) if s > 0.0 => s.min(f32::MAX),
            _ => 0.0,
        }
    }
}

impl<N: PolicyNetwork, E: StateEncoder> MovePolicy for NetworkPolicy<N, E> {
    fn select(&self, engine: &TurnEngine, rng: &mut GameRng) -> Option<Move> {
        let moves = engine.all_legal_moves();
        if moves.is_empty() {
            return None;
        }

        let scores = self.network.predict(&self.encoder.encode(engine.state()));

        if self.temperature == 0.0 {
            let mut best = moves[0];
            let mut best_score = Self::score(&scores, best);
            for &mv in &moves[1..] {
                let s = Self::score(&scores, mv);
                if s > best_score || (s == best_score && action_index(mv) < action_index(best)) {
                    best = mv;
                    best_score = s;
                }
            }
            return Some(best);
        }

        let logs: Vec<f32> = moves.iter().map(|&mv| Self::score(&scores, mv).ln()).collect();
        let max_log = logs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max_log == f32::NEG_INFINITY {
            return rng.choose(&moves).copied();
        }

        let weights: Vec<f32> = logs
            .iter()
            .map(|&l| ((l - max_log) / self.temperature).exp())
            .collect();

        match rng.choose_weighted(&weights) {
            Some(i) => Some(moves[i]),
            None => rng.choose(&moves).copied(),
        }
    }
}
