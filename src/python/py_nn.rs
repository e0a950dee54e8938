//! Network bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use tracing::warn;

use crate::nn::{EncodedState, PolicyNetwork, ACTION_SPACE_SIZE};

/// Python wrapper for EncodedState.
#[pyclass(name = "EncodedState")]
#[derive(Clone, Debug)]
pub struct PyEncodedState(pub EncodedState);

#[pymethods]
impl PyEncodedState {
    #[getter]
    fn tensor(&self) -> Vec<f32> {
        self.0.tensor.clone()
    }

    #[getter]
    fn shape(&self) -> Vec<usize> {
        self.0.shape.clone()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Flat numpy view of the tensor.
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.0.tensor)
    }

    fn __repr__(&self) -> String {
        format!("EncodedState(shape={:?})", self.0.shape)
    }
}

/// Python-implemented policy network.
///
/// Wraps a callable taking an `EncodedState` and returning 625 floats.
#[pyclass(name = "PolicyNetwork")]
pub struct PyPolicyNetwork {
    callback: PyObject,
}

#[pymethods]
impl PyPolicyNetwork {
    #[new]
    fn new(callback: PyObject) -> Self {
        Self { callback }
    }

    /// Call the network on an encoded state.
    fn predict(&self, py: Python<'_>, encoded: &PyEncodedState) -> PyResult<Vec<f32>> {
        self.callback.call1(py, (encoded.clone(),))?.extract(py)
    }
}

impl PyPolicyNetwork {
    /// A second handle on the same callable.
    pub(crate) fn clone_ref(&self, py: Python<'_>) -> Self {
        Self {
            callback: self.callback.clone_ref(py),
        }
    }
}

impl PolicyNetwork for PyPolicyNetwork {
    fn predict(&self, encoded: &EncodedState) -> Vec<f32> {
        Python::with_gil(|py| {
            let result = self
                .callback
                .call1(py, (PyEncodedState(encoded.clone()),))
                .and_then(|out| out.extract::<Vec<f32>>(py));
            match result {
                Ok(scores) => scores,
                Err(e) => {
                    // Uniform scores keep the game going with a legal move.
                    warn!(error = %e, "policy network callback failed");
                    vec![1.0 / ACTION_SPACE_SIZE as f32; ACTION_SPACE_SIZE]
                }
            }
        })
    }
}
