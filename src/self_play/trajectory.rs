//! Game records produced by self-play.
//!
//! A trajectory is the sequence of accepted moves of one game plus how the
//! game stopped. Rewards are left to the consumer; the trajectory only
//! records what happened.

use serde::{Deserialize, Serialize};

use crate::core::{Move, Side, SideMap};
use crate::nn::EncodedState;
use crate::rules::GameResult;

/// Why a self-play game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stop {
    /// The game reached a terminal state.
    Terminal,
    /// The side to move had no legal move (goats completely blocked).
    Stalled,
    /// The ply limit was reached first.
    PlyLimit,
}

/// One accepted move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Encoded state before the move, if observations were recorded.
    pub observation: Option<EncodedState>,

    /// The move played.
    pub action: Move,

    /// The move's index in the 625-entry action space.
    pub action_index: usize,

    /// Side that moved.
    pub side: Side,

    /// Ply of this move (0-indexed).
    pub ply: u32,

    /// Whether the move captured a goat.
    pub capture: bool,
}

/// A complete self-play game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub steps: Vec<Step>,

    /// Terminal result; `None` when the game stalled or hit the ply limit.
    pub result: Option<GameResult>,

    pub stop: Stop,

    /// Seed the game was played from.
    pub seed: u64,

    /// Goats captured by the end.
    pub captures: u8,
}

impl Trajectory {
    /// Number of moves played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The winning side, if the game finished.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.result.map(GameResult::winner)
    }

    /// Steps played by `side`.
    pub fn side_steps(&self, side: Side) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.side == side)
    }
}

/// Aggregate results over many games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub games: usize,
    pub wins: SideMap<usize>,
    pub stalled: usize,
    pub ply_limit: usize,
    pub total_plies: usize,
}

impl MatchStats {
    /// Tally a batch of trajectories.
    #[must_use]
    pub fn from_trajectories(trajectories: &[Trajectory]) -> Self {
        let mut stats = Self::default();
        for trajectory in trajectories {
            stats.record(trajectory);
        }
        stats
    }

    /// Add one game.
    pub fn record(&mut self, trajectory: &Trajectory) {
        self.games += 1;
        self.total_plies += trajectory.len();
        match trajectory.stop {
            Stop::Terminal => {
                if let Some(side) = trajectory.winner() {
                    self.wins[side] += 1;
                }
            }
            Stop::Stalled => self.stalled += 1,
            Stop::PlyLimit => self.ply_limit += 1,
        }
    }

    /// Mean game length in plies (0 with no games).
    #[must_use]
    pub fn mean_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_plies as f64 / self.games as f64
    }

    /// Fraction of games won by `side`.
    #[must_use]
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins[side] as f64 / self.games as f64
    }
}

impl std::fmt::Display for MatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: goats {} / tigers {}, stalled {}, ply limit {}, mean length {:.1}",
            self.games,
            self.wins[Side::Goat],
            self.wins[Side::Tiger],
            self.stalled,
            self.ply_limit,
            self.mean_length()
        )
    }
}
