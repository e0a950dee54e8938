//! Self-play loop.
//!
//! `SelfPlayWorker` plays complete games between two [`MovePolicy`]s and
//! records them as [`Trajectory`]s. Each game seeds a [`GameRng`] from its
//! seed and forks one stream per side, so a game can be replayed exactly
//! from its trajectory's `seed` and one side's draws never shift the
//! other's.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::policy::MovePolicy;
use super::trajectory::{MatchStats, Step, Stop, Trajectory};
use crate::core::{GameRng, SideMap};
use crate::nn::{action_index, FlatEncoder, StateEncoder};
use crate::rules::{Outcome, TurnEngine};

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Maximum plies per game before it is cut off.
    pub max_plies: u32,

    /// Seed offset (combined with the game index for unique seeds).
    pub seed_offset: u64,

    /// Store the encoded state before each move.
    pub record_observations: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 500,
            seed_offset: 0,
            record_observations: false,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum plies per game.
    #[must_use]
    pub fn with_max_plies(mut self, max: u32) -> Self {
        self.max_plies = max;
        self
    }

    /// Set seed offset.
    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Enable or disable observation recording.
    #[must_use]
    pub fn with_observations(mut self, record: bool) -> Self {
        self.record_observations = record;
        self
    }
}

/// Plays games between a goat policy and a tiger policy.
pub struct SelfPlayWorker {
    /// Template engine; each game starts from its reset state.
    engine: TurnEngine,
    policies: SideMap<Box<dyn MovePolicy>>,
    encoder: Box<dyn StateEncoder>,
    config: SelfPlayConfig,
}

impl SelfPlayWorker {
    /// Create a worker. Observations, if recorded, use [`FlatEncoder`].
    pub fn new(
        engine: TurnEngine,
        goat: Box<dyn MovePolicy>,
        tiger: Box<dyn MovePolicy>,
        config: SelfPlayConfig,
    ) -> Self {
        Self {
            engine,
            policies: SideMap::from_values(goat, tiger),
            encoder: Box::new(FlatEncoder),
            config,
        }
    }

    /// Use a different encoder for recorded observations.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Box<dyn StateEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    pub fn encoder(&self) -> &dyn StateEncoder {
        self.encoder.as_ref()
    }

    /// Play one game from a fresh start.
    pub fn play_game(&self, seed: u64) -> Trajectory {
        let mut engine = self.engine.clone();
        engine.reset();
        let mut root = GameRng::new(seed);
        let mut rngs = SideMap::from_values(root.fork(), root.fork());
        let mut steps = Vec::new();

        let stop = loop {
            let state = engine.state();
            if state.is_terminal() {
                break Stop::Terminal;
            }
            if state.ply() >= self.config.max_plies {
                break Stop::PlyLimit;
            }

            let side = state.active_side();
            let ply = state.ply();
            let Some(mv) = self.policies[side].select(&engine, &mut rngs[side]) else {
                break Stop::Stalled;
            };

            let observation = self
                .config
                .record_observations
                .then(|| self.encoder.encode(engine.state()));

            match engine.apply_move(mv) {
                Outcome::Accepted {
                    applied,
                    capture_occurred,
                    ..
                } => steps.push(Step {
                    observation,
                    action: applied,
                    action_index: action_index(applied),
                    side,
                    ply,
                    capture: capture_occurred,
                }),
                Outcome::Rejected { reason } => {
                    // Only a policy choosing an illegal move ends up here.
                    warn!(%side, %mv, %reason, "policy chose a rejected move");
                    break Stop::Stalled;
                }
            }
        };

        let state = engine.state();
        debug!(
            seed,
            plies = steps.len(),
            ?stop,
            result = ?state.terminal(),
            "self-play game finished"
        );

        Trajectory {
            steps,
            result: state.terminal(),
            stop,
            seed,
            captures: state.goats_captured(),
        }
    }

    /// Play `count` games with seeds `seed_offset..seed_offset + count`.
    pub fn play_games(&self, count: usize) -> Vec<Trajectory> {
        let trajectories: Vec<_> = (0..count)
            .map(|i| self.play_game(self.config.seed_offset.wrapping_add(i as u64)))
            .collect();

        info!(stats = %MatchStats::from_trajectories(&trajectories), "self-play batch finished");
        trajectories
    }
}

impl std::fmt::Debug for SelfPlayWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfPlayWorker")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
