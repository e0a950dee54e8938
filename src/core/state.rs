//! Game state: board, phase, side to move and counters.
//!
//! ## Invariants
//!
//! - Exactly four tigers on the board.
//! - `goats_on_board = (goat_count - goats_to_place) - goats_captured`.
//! - `goats_captured <= captures_to_win`.
//! - `phase` is `Placement` while goats remain to be placed, `Movement`
//!   afterwards, and never reverts.
//!
//! State is mutated only by [`TurnEngine`](crate::rules::TurnEngine); this
//! module exposes read access, validated construction of arbitrary positions
//! and binary snapshots.
//!
//! The move history uses an `im` persistent vector, so cloning a state
//! (for `Outcome::Accepted` or for search) is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Move, MoveRecord};
use super::board::{Board, Cell, TIGER_COUNT};
use super::config::RulesConfig;
use super::node::NODE_COUNT;
use super::side::Side;
use crate::error::{SnapshotError, StateError};
use crate::rules::GameResult;

/// Game phase, as seen by the goat side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Goats enter the board; they may not step yet.
    Placement,
    /// All goats are placed; both sides step (tigers also capture).
    Movement,
}

impl Phase {
    /// The phase a position with `goats_to_place` goats in hand must be in.
    #[must_use]
    pub const fn for_goats_to_place(goats_to_place: u8) -> Self {
        if goats_to_place > 0 {
            Phase::Placement
        } else {
            Phase::Movement
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Placement => write!(f, "Placement"),
            Phase::Movement => write!(f, "Movement"),
        }
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: RulesConfig,
    board: Board,
    phase: Phase,
    active_side: Side,
    goats_to_place: u8,
    goats_captured: u8,
    terminal: Option<GameResult>,
    ply: u32,
    history: Vector<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial(RulesConfig::default())
    }
}

impl GameState {
    /// The starting position for `config`.
    ///
    /// Tigers on the corners, goat to move, every goat still in hand.
    /// `config` is assumed valid; use [`RulesConfig::validate`] first when
    /// it comes from outside.
    #[must_use]
    pub fn initial(config: RulesConfig) -> Self {
        Self {
            config,
            board: Board::initial(),
            phase: Phase::Placement,
            active_side: Side::Goat,
            goats_to_place: config.goat_count,
            goats_captured: 0,
            terminal: None,
            ply: 0,
            history: Vector::new(),
        }
    }

    /// Build an arbitrary position.
    ///
    /// The phase is derived from `goats_to_place`. The terminal tag is left
    /// unset; [`TurnEngine::from_state`](crate::rules::TurnEngine::from_state)
    /// recomputes it against a topology.
    pub fn from_parts(
        config: RulesConfig,
        board: Board,
        active_side: Side,
        goats_to_place: u8,
        goats_captured: u8,
    ) -> Result<Self, StateError> {
        let state = Self {
            config,
            board,
            phase: Phase::for_goats_to_place(goats_to_place),
            active_side,
            goats_to_place,
            goats_captured,
            terminal: None,
            ply: 0,
            history: Vector::new(),
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// Check the structural invariants of this position.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        self.config.validate()?;

        let tigers = self.board.count_pieces(Cell::Tiger);
        if tigers != TIGER_COUNT {
            return Err(StateError::TigerCount { found: tigers });
        }

        if self.goats_to_place > self.config.goat_count {
            return Err(StateError::GoatsToPlace {
                to_place: self.goats_to_place,
                goat_count: self.config.goat_count,
            });
        }

        if self.phase != Phase::for_goats_to_place(self.goats_to_place) {
            return Err(StateError::PhaseMismatch {
                phase: self.phase,
                to_place: self.goats_to_place,
            });
        }

        let placed = self.config.goat_count - self.goats_to_place;
        let limit = self.config.captures_to_win.min(placed);
        if self.goats_captured > limit {
            return Err(StateError::CapturesExceeded {
                captured: self.goats_captured,
                limit,
            });
        }

        let expected = usize::from(placed - self.goats_captured);
        let found = self.board.count_pieces(Cell::Goat);
        if expected != found {
            return Err(StateError::GoatCount { expected, found });
        }

        Ok(())
    }

    // === Accessors ===

    /// Rule parameters of this game.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side to move.
    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Goats still in hand.
    #[must_use]
    pub fn goats_to_place(&self) -> u8 {
        self.goats_to_place
    }

    /// Goats taken by the tigers so far.
    #[must_use]
    pub fn goats_captured(&self) -> u8 {
        self.goats_captured
    }

    /// Goats currently on the board.
    #[must_use]
    pub fn goats_on_board(&self) -> u8 {
        (self.config.goat_count - self.goats_to_place) - self.goats_captured
    }

    /// Terminal outcome, if the game is over.
    #[must_use]
    pub fn terminal(&self) -> Option<GameResult> {
        self.terminal
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Number of accepted moves so far.
    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Flat observation: 0 = empty, 1 = goat, 2 = tiger.
    #[must_use]
    pub fn observe(&self) -> [u8; NODE_COUNT] {
        self.board.observe()
    }

    // === Mutation (engine only) ===

    /// Apply an authorised move for the side to move and update counters.
    ///
    /// Returns `true` if the move captured a goat. Does not flip the side
    /// or set the terminal tag; the engine owns those transitions.
    pub(crate) fn apply_move(&mut self, mv: Move) -> bool {
        let side = self.active_side;
        self.board.apply(&mv, side.piece());

        if mv.is_placement() {
            self.goats_to_place -= 1;
            if self.goats_to_place == 0 {
                self.phase = Phase::Movement;
            }
        }

        let captured = mv.is_capture();
        if captured {
            self.goats_captured += 1;
        }

        self.history.push_back(MoveRecord::new(side, mv, self.ply));
        self.ply += 1;
        captured
    }

    pub(crate) fn switch_side(&mut self) {
        self.active_side = self.active_side.opponent();
    }

    pub(crate) fn set_terminal(&mut self, result: GameResult) {
        self.terminal = Some(result);
    }

    pub(crate) fn clear_terminal(&mut self) {
        self.terminal = None;
    }

    // === Snapshots ===

    /// Encode this state with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`to_bytes`](Self::to_bytes).
    ///
    /// The decoded position is re-checked, so a corrupted or hand-edited
    /// snapshot cannot smuggle an impossible position into an engine.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GameState = bincode::deserialize(bytes)?;
        state.check_invariants()?;

        let at_limit = state.goats_captured == state.config.captures_to_win;
        let tigers_won = state.terminal == Some(GameResult::TigersWin);
        if at_limit != tigers_won {
            return Err(SnapshotError::TerminalMismatch {
                captured: state.goats_captured,
                terminal: state.terminal,
            });
        }

        Ok(state)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(
            f,
            "Goats left to place: {}, Goats captured: {}",
            self.goats_to_place, self.goats_captured
        )?;
        match self.terminal {
            Some(result) => writeln!(f, "{result}"),
            None => writeln!(f, "{} to move ({})", self.active_side, self.phase),
        }
    }
}
