//! cpue_spatial — spatial zero-inflated CPUE likelihood with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the spatial catch-per-unit-effort objective to Python via the
//! `_cpue_spatial` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`spatial` and `optimization`) as the
//!   public crate surface.
//! - Define the `SpatialCPUE` `#[pyclass]` and the `#[pymodule]` initializer
//!   when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue and error mapping.
//! - Inputs crossing the boundary are validated by [`spatial::CPUEData::new`]
//!   and [`spatial::CPUEParams::from_theta`] before any evaluation.
//!
//! Conventions
//! -----------
//! - The objective is a negative log-likelihood to be minimized by an
//!   external optimizer; θ is laid out as
//!   `[intercept, theta, beta_lat, beta_lon, logsigma, logsigma_space, a, u₁..uₙ]`.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code uses [`spatial::negative_log_likelihood`] or
//!   [`spatial::CPUEModel`] directly, optionally through
//!   [`optimization::loglik_optimizer::ArgMinAdapter`] for argmin solvers.
//! - Python code imports `_cpue_spatial.SpatialCPUE` and hands `nll` /
//!   `gradient` to `scipy.optimize.minimize`.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_cpue_pipeline.rs`.

pub mod optimization;
pub mod spatial;

#[cfg(feature = "python-bindings")]
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    spatial::{
        core::{data::CPUEData, validation::N_FIXED},
        models::cpue::CPUEModel,
    },
    utils::{extract_cpue_data, extract_options, extract_params},
};

/// SpatialCPUE — Python-facing wrapper for the spatial CPUE objective.
///
/// Purpose
/// -------
/// Hold validated survey data and a configured [`CPUEModel`] so Python
/// optimizers can evaluate the objective and its gradient repeatedly without
/// re-converting the inputs.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SpatialCPUE(y, lat, lon, dd, likelihood=1, gradient="analytic")`:
/// - `y`, `lat`, `lon`: 1-D array-likes of length `n`.
/// - `dd`: `n × n` array-like of pairwise distances.
/// - `likelihood`: `1`/`2` or `"inverse_gaussian"`/`"lognormal"`.
/// - `gradient`: `"analytic"` or `"finite_difference"`.
///
/// Notes
/// -----
/// - `gradient="finite_difference"` makes `gradient(theta)` fall back to
///   central differences of the objective.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "cpue_spatial", frozen)]
pub struct SpatialCPUE {
    model: CPUEModel,
    data: CPUEData,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SpatialCPUE {
    #[new]
    #[pyo3(
        signature = (y, lat, lon, dd, likelihood = None, gradient = None),
        text_signature = "(y, lat, lon, dd, /, likelihood=1, gradient='analytic')"
    )]
    pub fn new<'py>(
        py: Python<'py>, y: &Bound<'py, PyAny>, lat: &Bound<'py, PyAny>,
        lon: &Bound<'py, PyAny>, dd: &Bound<'py, PyAny>, likelihood: Option<&Bound<'py, PyAny>>,
        gradient: Option<&str>,
    ) -> PyResult<Self> {
        let options = extract_options(likelihood, gradient)?;
        let data = extract_cpue_data(py, y, lat, lon, dd)?;
        Ok(SpatialCPUE { model: CPUEModel::new(options), data })
    }

    /// Negative log-likelihood at θ.
    #[pyo3(text_signature = "(self, theta, /)")]
    pub fn nll<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        let params = extract_params(py, theta, self.data.n())?;
        Ok(self.model.nll(&params, &self.data)?)
    }

    /// Gradient of the negative log-likelihood at θ, same layout as θ.
    #[pyo3(text_signature = "(self, theta, /)")]
    pub fn gradient<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, numpy::PyArray1<f64>>> {
        use crate::optimization::loglik_optimizer::ArgMinAdapter;
        use argmin::core::Gradient;

        let theta = extract_params(py, theta, self.data.n())?.to_theta();
        let adapter = ArgMinAdapter::new(&self.model, &self.data);
        let grad = adapter
            .gradient(&theta)
            .map_err(crate::optimization::errors::OptError::from)?;
        Ok(grad.into_pyarray(py))
    }

    /// Objective plus diagnostics at θ as a dict.
    ///
    /// Keys: `nll`, `spatial_penalty`, `zero_mass`, `positive_mass`, `kernel`,
    /// `zero_prob`, `sigma`, `sigma_space`, `pred`, `cov`, `u`.
    #[pyo3(text_signature = "(self, theta, /)")]
    pub fn report<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let params = extract_params(py, theta, self.data.n())?;
        let report = self.model.evaluate(&params, &self.data)?;
        let out = PyDict::new(py);
        out.set_item("nll", report.nll)?;
        out.set_item("spatial_penalty", report.components.spatial_penalty)?;
        out.set_item("zero_mass", report.components.zero_mass)?;
        out.set_item("positive_mass", report.components.positive_mass)?;
        out.set_item("kernel", report.components.kernel)?;
        out.set_item("zero_prob", report.zero_prob)?;
        out.set_item("sigma", report.sigma)?;
        out.set_item("sigma_space", report.sigma_space)?;
        out.set_item("pred", report.pred.into_pyarray(py))?;
        out.set_item("cov", report.cov.into_pyarray(py))?;
        out.set_item("u", report.u.into_pyarray(py))?;
        Ok(out)
    }

    /// Length of θ, `7 + n`.
    #[getter]
    pub fn n_params(&self) -> usize {
        N_FIXED + self.data.n()
    }

    /// Number of observations.
    #[getter]
    pub fn n_obs(&self) -> usize {
        self.data.n()
    }

    /// Kernel name, `"inverse_gaussian"` or `"lognormal"`.
    #[getter]
    pub fn likelihood(&self) -> &'static str {
        self.model.likelihood().name()
    }
}

/// _cpue_spatial — PyO3 module initializer for the Python extension.
///
/// Registers [`SpatialCPUE`]. Invoked by Python on import; never called
/// directly.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _cpue_spatial<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<SpatialCPUE>()?;
    Ok(())
}
