//! Click-driven play session for interactive front-ends.
//!
//! A front-end (a window, a terminal, a web page) turns pointer input into
//! node indices and calls [`Session::click`]. The session keeps the piece
//! selection between clicks and only ever changes the game through its
//! [`TurnEngine`].
//!
//! ## Interaction model
//!
//! - Goat placement: clicking an empty node places a goat there.
//! - Otherwise: clicking one of your own pieces selects it and shows its
//!   targets; clicking a shown target plays the move; any other click
//!   drops the selection.
//! - Once the game is over every click is ignored until [`Session::new_game`].

use tracing::debug;

use crate::core::{Cell, GameState, NodeId, Phase, Side};
use crate::rules::{LegalMoves, Outcome, TurnEngine};

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// Nothing happened (game over, off the board, or not actionable).
    Ignored,
    /// A piece was selected; these are its legal targets.
    Selected { node: NodeId, targets: LegalMoves },
    /// The current selection was dropped.
    Deselected,
    /// A move was submitted to the engine.
    Played(Outcome),
}

/// One interactive game.
#[derive(Clone, Debug, Default)]
pub struct Session {
    engine: TurnEngine,
    selected: Option<NodeId>,
}

impl Session {
    /// Start a session with a standard game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session around an existing engine.
    #[must_use]
    pub fn with_engine(engine: TurnEngine) -> Self {
        Self {
            engine,
            selected: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// The currently selected piece, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Handle a click on node index `node`.
    pub fn click(&mut self, node: usize) -> ClickResult {
        if self.engine.is_terminal() {
            return ClickResult::Ignored;
        }
        let Some(node) = NodeId::new(node) else {
            return ClickResult::Ignored;
        };

        let state = self.engine.state();
        let side = state.active_side();

        if side == Side::Goat && state.phase() == Phase::Placement {
            if !state.board().is_empty(node) {
                return ClickResult::Ignored;
            }
            return self.play(node, node);
        }

        if let Some(from) = self.selected {
            let is_target = self
                .engine
                .legal_moves(from.index())
                .iter()
                .any(|m| m.destination == node);
            if is_target {
                return self.play(from, node);
            }
        }

        if state.board().get(node) == side.piece() {
            let targets = self.engine.legal_moves(node.index());
            self.selected = Some(node);
            debug!(%node, targets = targets.len(), "piece selected");
            return ClickResult::Selected { node, targets };
        }

        match self.selected.take() {
            Some(_) => ClickResult::Deselected,
            None => ClickResult::Ignored,
        }
    }

    fn play(&mut self, from: NodeId, to: NodeId) -> ClickResult {
        self.selected = None;
        ClickResult::Played(self.engine.apply(from.index(), to.index()))
    }

    /// Nodes to highlight: every empty node during goat placement,
    /// otherwise the selected piece's targets.
    #[must_use]
    pub fn highlights(&self) -> Vec<NodeId> {
        let state = self.engine.state();
        if state.is_terminal() {
            return Vec::new();
        }
        if state.active_side() == Side::Goat && state.phase() == Phase::Placement {
            return state.board().nodes_with(Cell::Empty).collect();
        }
        match self.selected {
            Some(node) => self
                .engine
                .legal_moves(node.index())
                .iter()
                .map(|m| m.destination)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Reset the game and clear the selection.
    pub fn new_game(&mut self) {
        self.engine.reset();
        self.selected = None;
    }

    /// One-line status for display.
    #[must_use]
    pub fn status_line(&self) -> String {
        let state = self.engine.state();
        match state.terminal() {
            Some(result) => format!("{result}!"),
            None => format!(
                "{}'s turn, Goats left: {}, Goats captured: {}",
                state.active_side(),
                state.goats_to_place(),
                state.goats_captured()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, LegalMove, Move, RulesConfig};

    fn n(i: usize) -> NodeId {
        NodeId::new(i).unwrap()
    }

    #[test]
    fn test_placement_click() {
        let mut session = Session::new();
        assert_eq!(session.highlights().len(), 21);

        let result = session.click(12);
        let ClickResult::Played(outcome) = result else {
            panic!("expected a placement, got {result:?}");
        };
        assert_eq!(outcome.applied(), Some(Move::Place { to: n(12) }));
        assert_eq!(session.state().active_side(), Side::Tiger);
    }

    #[test]
    fn test_placement_on_occupied_ignored() {
        let mut session = Session::new();
        assert_eq!(session.click(0), ClickResult::Ignored);
        assert_eq!(session.click(25), ClickResult::Ignored);
        assert_eq!(session.state().ply(), 0);
    }

    #[test]
    fn test_select_then_move() {
        let mut session = Session::new();
        session.click(12);

        let result = session.click(0);
        assert_eq!(
            result,
            ClickResult::Selected {
                node: n(0),
                targets: [1, 5, 6]
                    .into_iter()
                    .map(|d| LegalMove { destination: n(d), is_capture: false })
                    .collect(),
            }
        );
        assert_eq!(session.highlights(), vec![n(1), n(5), n(6)]);

        let result = session.click(5);
        assert!(matches!(result, ClickResult::Played(ref o) if o.is_accepted()));
        assert_eq!(session.selected(), None);
        assert_eq!(session.state().board().get(n(5)), Cell::Tiger);
    }

    #[test]
    fn test_reselect_and_deselect() {
        let mut session = Session::new();
        session.click(12);
        session.click(0);

        // Another own piece switches the selection.
        assert!(matches!(session.click(4), ClickResult::Selected { node, .. } if node == n(4)));
        // A non-target empty node clears it.
        assert_eq!(session.click(17), ClickResult::Deselected);
        assert_eq!(session.click(17), ClickResult::Ignored);
        assert_eq!(session.state().active_side(), Side::Tiger);
    }

    #[test]
    fn test_game_over_ignores_clicks() {
        let config = RulesConfig::new().with_captures_to_win(1);
        let mut session = Session::with_engine(TurnEngine::with_config(config).unwrap());
        session.click(1);
        session.click(0);
        session.click(2);

        assert!(session.engine().is_terminal());
        assert_eq!(session.status_line(), "Tigers win!");
        assert_eq!(session.click(7), ClickResult::Ignored);
        assert!(session.highlights().is_empty());

        session.new_game();
        assert_eq!(
            session.status_line(),
            "Goat's turn, Goats left: 20, Goats captured: 0"
        );
    }

    #[test]
    fn test_status_line() {
        let mut board = Board::initial();
        board.set(n(12), Cell::Goat);
        let state =
            GameState::from_parts(RulesConfig::default(), board, Side::Tiger, 19, 0).unwrap();
        let session = Session::with_engine(TurnEngine::from_state(state));
        assert_eq!(
            session.status_line(),
            "Tiger's turn, Goats left: 19, Goats captured: 0"
        );
    }
}
