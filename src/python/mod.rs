//! Python bindings.
//!
//! # Quick Start
//!
//! ```python
//! import bagchal
//!
//! env = bagchal.BagchalEnv()
//! obs = env.reset()
//! obs, accepted, capture, terminal, reason = env.step(12, 12)
//!
//! worker = bagchal.SelfPlayWorker(goat="random", tiger="greedy", record_observations=True)
//! games = worker.play_games(16)
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_nn;
mod py_self_play;

pub use py_env::*;
pub use py_nn::*;
pub use py_self_play::*;

/// Bagchal rule engine, environment and self-play.
#[pymodule]
fn bagchal(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBagchalEnv>()?;

    m.add_class::<PyEncodedState>()?;
    m.add_class::<PyPolicyNetwork>()?;

    m.add_class::<PyTrajectory>()?;
    m.add_class::<PySelfPlayWorker>()?;

    Ok(())
}
