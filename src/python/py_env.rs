//! Gym-style environment binding.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Phase, RulesConfig, Side};
use crate::nn::legal_action_mask;
use crate::rules::{Outcome, TurnEngine};

/// One Bagchal game, driven by raw node indices.
///
/// `step` never raises on an illegal move; it reports the rejection reason
/// and leaves the game unchanged.
#[pyclass(name = "BagchalEnv")]
pub struct PyBagchalEnv {
    engine: TurnEngine,
}

#[pymethods]
impl PyBagchalEnv {
    #[new]
    #[pyo3(signature = (goat_count = 20, captures_to_win = 5))]
    fn new(goat_count: u8, captures_to_win: u8) -> PyResult<Self> {
        let config = RulesConfig::new()
            .with_goat_count(goat_count)
            .with_captures_to_win(captures_to_win);
        let engine =
            TurnEngine::with_config(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Start a new game and return the observation.
    fn reset<'py>(&mut self, py: Python<'py>) -> Bound<'py, PyArray1<u8>> {
        self.engine.reset();
        self.observe(py)
    }

    /// Submit a move.
    ///
    /// Returns `(observation, accepted, capture, terminal, reason)` where
    /// `terminal` is `"TigersWin"`, `"GoatsWin"` or `None` and `reason` is
    /// the rejection message for a refused move.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        source: usize,
        destination: usize,
    ) -> (
        Bound<'py, PyArray1<u8>>,
        bool,
        bool,
        Option<String>,
        Option<String>,
    ) {
        let outcome = self.engine.apply(source, destination);
        let (accepted, capture, reason) = match &outcome {
            Outcome::Accepted {
                capture_occurred, ..
            } => (true, *capture_occurred, None),
            Outcome::Rejected { reason } => (false, false, Some(reason.to_string())),
        };
        let terminal = self.engine.state().terminal().map(|r| format!("{r:?}"));
        (self.observe(py), accepted, capture, terminal, reason)
    }

    /// Legal `(destination, is_capture)` pairs from `node`.
    fn legal_moves(&self, node: usize) -> Vec<(usize, bool)> {
        self.engine
            .legal_moves(node)
            .iter()
            .map(|m| (m.destination.index(), m.is_capture))
            .collect()
    }

    /// Boolean mask over the 625 `source * 25 + destination` actions.
    fn legal_action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, legal_action_mask(&self.engine))
    }

    /// Cell codes: 0 = empty, 1 = goat, 2 = tiger.
    fn observe<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<u8>> {
        PyArray1::from_slice_bound(py, &self.engine.observe())
    }

    #[getter]
    fn phase(&self) -> &'static str {
        match self.engine.state().phase() {
            Phase::Placement => "placement",
            Phase::Movement => "movement",
        }
    }

    #[getter]
    fn goat_turn(&self) -> bool {
        self.engine.state().active_side() == Side::Goat
    }

    #[getter]
    fn goats_to_place(&self) -> u8 {
        self.engine.state().goats_to_place()
    }

    #[getter]
    fn goats_captured(&self) -> u8 {
        self.engine.state().goats_captured()
    }

    #[getter]
    fn done(&self) -> bool {
        self.engine.is_terminal()
    }

    /// Text rendering of the board and counters.
    fn render(&self) -> String {
        self.engine.state().to_string()
    }

    fn __repr__(&self) -> String {
        let state = self.engine.state();
        format!(
            "BagchalEnv(side={}, phase={}, to_place={}, captured={})",
            state.active_side(),
            state.phase(),
            state.goats_to_place(),
            state.goats_captured()
        )
    }
}
