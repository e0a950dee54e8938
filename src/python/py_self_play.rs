//! Self-play bindings for Python.

use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::RulesConfig;
use crate::nn::{FlatEncoder, PlaneEncoder, StateEncoder};
use crate::rules::TurnEngine;
use crate::self_play::{
    GreedyCapturePolicy, MovePolicy, NetworkPolicy, RandomPolicy, SelfPlayConfig, SelfPlayWorker,
    Trajectory,
};

use super::py_nn::PyPolicyNetwork;

fn make_encoder(name: &str) -> PyResult<Box<dyn StateEncoder>> {
    match name {
        "flat" => Ok(Box::new(FlatEncoder)),
        "planes" => Ok(Box::new(PlaneEncoder)),
        other => Err(PyValueError::new_err(format!(
            "unknown encoder '{other}' (expected 'flat' or 'planes')"
        ))),
    }
}

/// Build a policy from `"random"`, `"greedy"` or a `PolicyNetwork`.
fn make_policy(
    py: Python<'_>,
    choice: &Bound<'_, PyAny>,
    encoder: &str,
    temperature: f32,
) -> PyResult<Box<dyn MovePolicy>> {
    if let Ok(network) = choice.downcast::<PyPolicyNetwork>() {
        let network = network.borrow().clone_ref(py);
        let policy =
            NetworkPolicy::new(network, make_encoder(encoder)?).with_temperature(temperature);
        return Ok(Box::new(policy));
    }
    match choice.extract::<String>()?.as_str() {
        "random" => Ok(Box::new(RandomPolicy)),
        "greedy" => Ok(Box::new(GreedyCapturePolicy)),
        other => Err(PyValueError::new_err(format!(
            "unknown policy '{other}' (expected 'random', 'greedy' or a PolicyNetwork)"
        ))),
    }
}

/// Python wrapper for a finished game.
#[pyclass(name = "Trajectory")]
#[derive(Clone, Debug)]
pub struct PyTrajectory(pub Trajectory);

#[pymethods]
impl PyTrajectory {
    fn __len__(&self) -> usize {
        self.0.len()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    #[getter]
    fn captures(&self) -> u8 {
        self.0.captures
    }

    /// `"TigersWin"`, `"GoatsWin"` or `None`.
    #[getter]
    fn result(&self) -> Option<String> {
        self.0.result.map(|r| format!("{r:?}"))
    }

    /// `"Terminal"`, `"Stalled"` or `"PlyLimit"`.
    #[getter]
    fn stop(&self) -> String {
        format!("{:?}", self.0.stop)
    }

    /// `(source, destination)` of every move; placements repeat the node.
    #[getter]
    fn moves(&self) -> Vec<(usize, usize)> {
        self.0
            .steps
            .iter()
            .map(|s| {
                let (from, to) = s.action.endpoints();
                (from.index(), to.index())
            })
            .collect()
    }

    /// Action indices as a numpy array.
    fn actions_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        let actions = self.0.steps.iter().map(|s| s.action_index as i64).collect();
        PyArray1::from_vec_bound(py, actions)
    }

    /// Recorded observations stacked as `[plies, features]`.
    ///
    /// Fails if the game was played without recording observations.
    fn observations_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let rows = self
            .0
            .steps
            .iter()
            .map(|s| s.observation.as_ref().map(|o| o.tensor.clone()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| PyValueError::new_err("observations were not recorded"))?;
        PyArray2::from_vec2_bound(py, &rows).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Trajectory(len={}, stop={:?}, result={:?})",
            self.0.len(),
            self.0.stop,
            self.0.result
        )
    }
}

/// Python wrapper for SelfPlayWorker.
#[pyclass(name = "SelfPlayWorker")]
pub struct PySelfPlayWorker {
    worker: SelfPlayWorker,
}

#[pymethods]
impl PySelfPlayWorker {
    #[new]
    #[allow(clippy::too_many_arguments)]
    #[pyo3(signature = (
        goat = None,
        tiger = None,
        max_plies = 500,
        seed_offset = 0,
        record_observations = false,
        encoder = "flat",
        temperature = 0.0,
        captures_to_win = 5
    ))]
    fn new(
        py: Python<'_>,
        goat: Option<&Bound<'_, PyAny>>,
        tiger: Option<&Bound<'_, PyAny>>,
        max_plies: u32,
        seed_offset: u64,
        record_observations: bool,
        encoder: &str,
        temperature: f32,
        captures_to_win: u8,
    ) -> PyResult<Self> {
        let policy = |choice: Option<&Bound<'_, PyAny>>| -> PyResult<Box<dyn MovePolicy>> {
            match choice {
                Some(choice) => make_policy(py, choice, encoder, temperature),
                None => Ok(Box::new(RandomPolicy)),
            }
        };

        let rules = RulesConfig::new().with_captures_to_win(captures_to_win);
        let engine =
            TurnEngine::with_config(rules).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let config = SelfPlayConfig::new()
            .with_max_plies(max_plies)
            .with_seed_offset(seed_offset)
            .with_observations(record_observations);

        let worker = SelfPlayWorker::new(engine, policy(goat)?, policy(tiger)?, config)
            .with_encoder(make_encoder(encoder)?);
        Ok(Self { worker })
    }

    fn play_game(&self, seed: u64) -> PyTrajectory {
        PyTrajectory(self.worker.play_game(seed))
    }

    fn play_games(&self, count: usize) -> Vec<PyTrajectory> {
        self.worker
            .play_games(count)
            .into_iter()
            .map(PyTrajectory)
            .collect()
    }
}
