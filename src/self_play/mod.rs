//! Self-play: policies, the game loop and game records.
//!
//! ## Overview
//!
//! - **MovePolicy**: picks a legal move (`RandomPolicy`,
//!   `GreedyCapturePolicy`, `NetworkPolicy`)
//! - **SelfPlayWorker**: plays seeded games between two policies
//! - **Trajectory**: the moves of one game and how it stopped
//! - **MatchStats**: win/stall/length tallies over many games
//!
//! ## Usage
//!
//! ```
//! use bagchal::rules::TurnEngine;
//! use bagchal::self_play::{
//!     GreedyCapturePolicy, MatchStats, RandomPolicy, SelfPlayConfig, SelfPlayWorker,
//! };
//!
//! let worker = SelfPlayWorker::new(
//!     TurnEngine::new(),
//!     Box::new(RandomPolicy),
//!     Box::new(GreedyCapturePolicy),
//!     SelfPlayConfig::new().with_max_plies(200),
//! );
//!
//! let games = worker.play_games(4);
//! let stats = MatchStats::from_trajectories(&games);
//! assert_eq!(stats.games, 4);
//! ```

pub mod policy;
pub mod trajectory;
pub mod worker;

pub use policy::{GreedyCapturePolicy, MovePolicy, NetworkPolicy, RandomPolicy};
pub use trajectory::{MatchStats, Step, Stop, Trajectory};
pub use worker::{SelfPlayConfig, SelfPlayWorker};
