//! Turn engine: the single authority over game state.
//!
//! `TurnEngine` owns one [`GameState`] and a shared [`Topology`]. Every
//! change to the state goes through [`TurnEngine::apply`], which:
//!
//! 1. refuses to act on a finished game,
//! 2. validates the move with [`MoveGenerator`],
//! 3. applies it and updates the counters,
//! 4. hands the turn to the other side,
//! 5. checks both terminal conditions.
//!
//! A rejected move leaves the state exactly as it was.
//!
//! ## Terminal conditions
//!
//! - **TigersWin**: the capture counter reaches `captures_to_win`. Checked
//!   after every accepted move.
//! - **GoatsWin**: the tigers are to move and have no legal move. Checked
//!   once per accepted move, after the side switch.
//!
//! A goat side with no legal move is not a terminal condition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::movegen::{LegalMoves, MoveGenerator};
use crate::core::{GameState, Move, RulesConfig, Side, Topology, NODE_COUNT};
use crate::error::{ConfigError, Rejection};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The tigers captured enough goats.
    TigersWin,
    /// The tigers were left without a legal move.
    GoatsWin,
}

impl GameResult {
    /// The winning side.
    #[must_use]
    pub const fn winner(self) -> Side {
        match self {
            GameResult::TigersWin => Side::Tiger,
            GameResult::GoatsWin => Side::Goat,
        }
    }

    /// Check if `side` won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        self.winner() == side
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::TigersWin => write!(f, "Tigers win"),
            GameResult::GoatsWin => write!(f, "Goats win"),
        }
    }
}

/// Result of [`TurnEngine::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The move was applied.
    Accepted {
        /// State after the move (side already switched).
        state: GameState,
        /// The move as validated.
        applied: Move,
        /// Whether a goat was removed.
        capture_occurred: bool,
        /// Set if this move ended the game.
        terminal: Option<GameResult>,
    },
    /// The move was refused; nothing changed.
    Rejected {
        /// Why.
        reason: Rejection,
    },
}

impl Outcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Rejected { reason } => Some(*reason),
            Outcome::Accepted { .. } => None,
        }
    }

    /// The applied move, if accepted.
    #[must_use]
    pub fn applied(&self) -> Option<Move> {
        match self {
            Outcome::Accepted { applied, .. } => Some(*applied),
            Outcome::Rejected { .. } => None,
        }
    }

    /// The state after an accepted move.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        match self {
            Outcome::Accepted { state, .. } => Some(state),
            Outcome::Rejected { .. } => None,
        }
    }

    /// Whether an accepted move captured a goat.
    #[must_use]
    pub fn capture_occurred(&self) -> bool {
        matches!(self, Outcome::Accepted { capture_occurred: true, .. })
    }

    /// The result if this move ended the game.
    #[must_use]
    pub fn terminal(&self) -> Option<GameResult> {
        match self {
            Outcome::Accepted { terminal, .. } => *terminal,
            Outcome::Rejected { .. } => None,
        }
    }
}

/// Owns a game and applies moves to it.
///
/// ## Example
///
/// ```
/// use bagchal::rules::{GameResult, Outcome, TurnEngine};
///
/// let mut engine = TurnEngine::new();
///
/// // Goats place first; the source index is ignored, so pass it twice.
/// assert!(engine.apply(1, 1).is_accepted());
///
/// // Tiger on 0 jumps the goat on 1.
/// match engine.apply(0, 2) {
///     Outcome::Accepted { capture_occurred, terminal, .. } => {
///         assert!(capture_occurred);
///         assert_eq!(terminal, None);
///     }
///     Outcome::Rejected { reason } => panic!("rejected: {reason}"),
/// }
/// assert_eq!(engine.state().goats_captured(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine {
    topology: Arc<Topology>,
    state: GameState,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnEngine {
    /// A new standard game on the standard board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topology: Topology::shared(),
            state: GameState::default(),
        }
    }

    /// A new game with custom rule parameters.
    pub fn with_config(config: RulesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            topology: Topology::shared(),
            state: GameState::initial(config),
        })
    }

    /// Replace the topology.
    ///
    /// Intended for tests and board variants. The terminal tag is
    /// recomputed, since the tigers' mobility depends on the topology.
    #[must_use]
    pub fn with_topology(mut self, topology: Arc<Topology>) -> Self {
        self.topology = topology;
        self.refresh_terminal();
        self
    }

    /// Adopt an existing position.
    ///
    /// The terminal tag is recomputed from the counters and the board, so a
    /// position built with [`GameState::from_parts`] starts out correctly
    /// tagged.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        let mut engine = Self {
            topology: Topology::shared(),
            state,
        };
        engine.refresh_terminal();
        engine
    }

    /// Start a fresh game with the same rules and topology and return its
    /// opening position.
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::initial(*self.state.config());
        debug!("game reset");
        &self.state
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The board topology.
    #[must_use]
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// A move generator over this engine's topology.
    #[must_use]
    pub fn generator(&self) -> MoveGenerator<'_> {
        MoveGenerator::new(&self.topology)
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Flat observation: 0 = empty, 1 = goat, 2 = tiger.
    #[must_use]
    pub fn observe(&self) -> [u8; NODE_COUNT] {
        self.state.observe()
    }

    /// Legal destinations from `node` for the side to move.
    ///
    /// Empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self, node: usize) -> LegalMoves {
        if self.is_terminal() {
            return LegalMoves::new();
        }
        self.generator().legal_moves(&self.state, node)
    }

    /// Every legal move for the side to move. Empty once the game is over.
    #[must_use]
    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.generator().all_moves(&self.state)
    }

    // === Turn ===

    /// Validate and apply a move given as raw node indices.
    ///
    /// During goat placement `source` is ignored.
    pub fn apply(&mut self, source: usize, destination: usize) -> Outcome {
        match self.check(source, destination) {
            Ok(mv) => self.commit(mv),
            Err(reason) => {
                trace!(source, destination, %reason, "move rejected");
                Outcome::Rejected { reason }
            }
        }
    }

    /// Apply a [`Move`] (for example one produced by
    /// [`all_legal_moves`](Self::all_legal_moves)).
    ///
    /// The move is re-validated against the current position and must be
    /// exactly the move the position allows between its endpoints. A stale
    /// or hand-built move that no longer matches (a step offered during
    /// placement, a capture whose goat has gone) is rejected with
    /// [`Rejection::IllegalDestination`].
    pub fn apply_move(&mut self, mv: Move) -> Outcome {
        let (from, to) = mv.endpoints();
        let checked = self.check(from.index(), to.index()).and_then(|valid| {
            if valid == mv {
                Ok(valid)
            } else {
                Err(Rejection::IllegalDestination { to })
            }
        });

        match checked {
            Ok(mv) => self.commit(mv),
            Err(reason) => {
                trace!(%mv, %reason, "move rejected");
                Outcome::Rejected { reason }
            }
        }
    }

    fn check(&self, source: usize, destination: usize) -> Result<Move, Rejection> {
        if self.state.is_terminal() {
            return Err(Rejection::EngineTerminal);
        }
        self.generator().validate(&self.state, source, destination)
    }

    fn commit(&mut self, mv: Move) -> Outcome {
        let side = self.state.active_side();
        let capture_occurred = self.state.apply_move(mv);

        let mut terminal = None;
        if self.state.goats_captured() >= self.state.config().captures_to_win {
            terminal = Some(GameResult::TigersWin);
        }

        self.state.switch_side();

        if terminal.is_none() && self.state.active_side() == Side::Tiger && self.tigers_trapped() {
            terminal = Some(GameResult::GoatsWin);
        }

        debug!(%side, %mv, capture_occurred, ply = self.state.ply(), "move applied");

        if let Some(result) = terminal {
            self.state.set_terminal(result);
            info!(
                %result,
                captured = self.state.goats_captured(),
                ply = self.state.ply(),
                "game over"
            );
        }

        Outcome::Accepted {
            state: self.state.clone(),
            applied: mv,
            capture_occurred,
            terminal,
        }
    }

    fn tigers_trapped(&self) -> bool {
        let state = &self.state;
        !self
            .generator()
            .has_any_move(state.board(), Side::Tiger, state.phase())
    }

    /// Recompute the terminal tag from scratch.
    fn refresh_terminal(&mut self) {
        let state = &self.state;
        let result = if state.goats_captured() >= state.config().captures_to_win {
            Some(GameResult::TigersWin)
        } else if state.active_side() == Side::Tiger && self.tigers_trapped() {
            Some(GameResult::GoatsWin)
        } else {
            None
        };
        self.state.clear_terminal();
        if let Some(result) = result {
            self.state.set_terminal(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Cell, NodeId, Phase};

    fn n(i: usize) -> NodeId {
        NodeId::new(i).unwrap()
    }

    #[test]
    fn test_game_result_winner() {
        assert_eq!(GameResult::TigersWin.winner(), Side::Tiger);
        assert!(GameResult::GoatsWin.is_winner(Side::Goat));
        assert!(!GameResult::GoatsWin.is_winner(Side::Tiger));
        assert_eq!(GameResult::TigersWin.to_string(), "Tigers win");
    }

    #[test]
    fn test_placement_switches_side() {
        let mut engine = TurnEngine::new();
        let outcome = engine.apply(12, 12);

        assert!(outcome.is_accepted());
        assert_eq!(outcome.applied(), Some(Move::Place { to: n(12) }));
        assert_eq!(engine.state().active_side(), Side::Tiger);
        assert_eq!(engine.state().goats_to_place(), 19);
        assert_eq!(outcome.state(), Some(engine.state()));
    }

    #[test]
    fn test_rejection_leaves_state_unchanged() {
        let mut engine = TurnEngine::new();
        let before = engine.state().clone();

        let outcome = engine.apply(0, 0);
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::IllegalDestination { to: n(0) })
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_capture_updates_counter() {
        let mut engine = TurnEngine::new();
        engine.apply(1, 1);
        let outcome = engine.apply(0, 2);

        assert!(outcome.capture_occurred());
        assert_eq!(engine.state().goats_captured(), 1);
        assert_eq!(engine.state().board().get(n(1)), Cell::Empty);
        assert_eq!(engine.state().board().get(n(2)), Cell::Tiger);
        assert_eq!(engine.state().active_side(), Side::Goat);
    }

    #[test]
    fn test_one_capture_game_ends() {
        let config = RulesConfig::new().with_captures_to_win(1);
        let mut engine = TurnEngine::with_config(config).unwrap();
        engine.apply(1, 1);

        let outcome = engine.apply(0, 2);
        assert_eq!(outcome.terminal(), Some(GameResult::TigersWin));
        assert!(engine.is_terminal());
        assert!(engine.legal_moves(2).is_empty());
        assert!(engine.all_legal_moves().is_empty());

        assert_eq!(
            engine.apply(5, 5).rejection(),
            Some(Rejection::EngineTerminal)
        );
    }

    #[test]
    fn test_with_config_validates() {
        let config = RulesConfig::new().with_captures_to_win(0);
        assert!(TurnEngine::with_config(config).is_err());
    }

    #[test]
    fn test_from_state_detects_trapped_tigers() {
        // Every tiger is boxed in: neighbours are goats and every landing
        // node is occupied.
        let mut board = Board::initial();
        for g in [1, 2, 3, 5, 6, 8, 9, 10, 12, 14, 15, 16, 18, 19, 21, 22, 23] {
            board.set(n(g), Cell::Goat);
        }
        let trapped =
            GameState::from_parts(RulesConfig::default(), board, Side::Tiger, 3, 0).unwrap();
        let engine = TurnEngine::from_state(trapped);
        assert_eq!(engine.state().terminal(), Some(GameResult::GoatsWin));

        // Same board with the goats to move is still live.
        let waiting =
            GameState::from_parts(RulesConfig::default(), board, Side::Goat, 3, 0).unwrap();
        assert!(!TurnEngine::from_state(waiting).is_terminal());
    }

    #[test]
    fn test_blocked_goats_are_not_terminal() {
        // Lone goat in corner 0, walled in by three tigers.
        let config = RulesConfig::new().with_goat_count(1).with_captures_to_win(1);
        let mut board = Board::empty();
        board.set(n(0), Cell::Goat);
        for t in [1, 5, 6, 24] {
            board.set(n(t), Cell::Tiger);
        }
        let state = GameState::from_parts(config, board, Side::Goat, 0, 0).unwrap();
        let engine = TurnEngine::from_state(state);

        assert!(!engine
            .generator()
            .has_any_move(engine.state().board(), Side::Goat, Phase::Movement));
        assert!(!engine.is_terminal());
        assert!(engine.all_legal_moves().is_empty());
    }

    #[test]
    fn test_apply_move_rejects_mismatched_move() {
        let mut engine = TurnEngine::new();
        let before = engine.state().clone();

        // Goat to move in placement: the endpoints would allow a placement
        // on 5, but a step is not that move.
        let step = Move::Step { from: n(0), to: n(5) };
        assert_eq!(
            engine.apply_move(step).rejection(),
            Some(Rejection::IllegalDestination { to: n(5) })
        );
        assert_eq!(engine.state(), &before);

        let moves = engine.all_legal_moves();
        assert!(!moves.is_empty());
        assert!(engine.apply_move(moves[0]).is_accepted());
    }

    #[test]
    fn test_apply_move_rejects_stale_capture() {
        let mut engine = TurnEngine::new();
        engine.apply(1, 1);
        let capture = Move::Capture { from: n(0), over: n(1), to: n(2) };
        assert!(engine.all_legal_moves().contains(&capture));

        // A capture claiming the wrong jumped node is not the legal one.
        let forged = Move::Capture { from: n(0), over: n(6), to: n(2) };
        assert_eq!(
            engine.apply_move(forged).rejection(),
            Some(Rejection::IllegalDestination { to: n(2) })
        );
        assert_eq!(engine.state().goats_captured(), 0);

        assert!(engine.apply_move(capture).capture_occurred());
    }

    #[test]
    fn test_reset() {
        let config = RulesConfig::new().with_goat_count(8).with_captures_to_win(2);
        let mut engine = TurnEngine::with_config(config).unwrap();
        engine.apply(7, 7);
        let fresh = engine.reset().clone();

        assert_eq!(&fresh, engine.state());
        assert_eq!(engine.state().goats_to_place(), 8);
        assert_eq!(engine.state().phase(), Phase::Placement);
        assert_eq!(engine.state().ply(), 0);
    }
}
