//! Python-side input extraction for the PyO3 bindings.
//!
//! Converts array-likes (numpy arrays, pandas objects exposing `to_numpy`,
//! plain sequences) into owned `ndarray` buffers and parses the model
//! configuration arguments. Validation of the values themselves is left to
//! [`CPUEData::new`] and [`CPUEParams::from_theta`].
use ndarray::{Array1, Array2};
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

use crate::spatial::core::{
    data::CPUEData,
    options::{CPUEOptions, GradientMode, LikelihoodKind},
    params::CPUEParams,
};

/// Borrow or copy a 1-D float64 array-like.
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D float64 array-like into an owned `Array1`.
pub fn extract_owned_vector<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_owned())
}

/// Copy a 2-D float64 array-like (numpy array, DataFrame, nested sequence)
/// into an owned `Array2`.
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, DataFrame, or nested sequence of float64",
        )
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("matrix rows must all have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| PyValueError::new_err(format!("invalid matrix shape: {e}")))
}

/// Build a validated [`CPUEData`] from four Python array-likes.
pub fn extract_cpue_data<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, lat: &Bound<'py, PyAny>, lon: &Bound<'py, PyAny>,
    dd: &Bound<'py, PyAny>,
) -> PyResult<CPUEData> {
    let y = extract_owned_vector(py, y)?;
    let lat = extract_owned_vector(py, lat)?;
    let lon = extract_owned_vector(py, lon)?;
    let dd = extract_f64_matrix(dd)?;
    Ok(CPUEData::new(y, lat, lon, dd)?)
}

/// Map θ from Python onto [`CPUEParams`] for `n` observations.
pub fn extract_params<'py>(
    py: Python<'py>, theta: &Bound<'py, PyAny>, n: usize,
) -> PyResult<CPUEParams> {
    let theta = extract_owned_vector(py, theta)?;
    Ok(CPUEParams::from_theta(theta.view(), n)?)
}

/// Parse the kernel selector: an integer flag (1, 2) or a name.
pub fn extract_likelihood(raw: &Bound<'_, PyAny>) -> PyResult<LikelihoodKind> {
    if let Ok(flag) = raw.extract::<i64>() {
        return Ok(LikelihoodKind::from_flag(flag)?);
    }
    let name: String = raw
        .extract()
        .map_err(|_| PyTypeError::new_err("likelihood must be an int flag or a string"))?;
    Ok(name.parse::<LikelihoodKind>()?)
}

/// Assemble [`CPUEOptions`] from the constructor arguments.
pub fn extract_options(
    likelihood: Option<&Bound<'_, PyAny>>, gradient: Option<&str>,
) -> PyResult<CPUEOptions> {
    let likelihood = match likelihood {
        Some(raw) => extract_likelihood(raw)?,
        None => LikelihoodKind::InverseGaussian,
    };
    let gradient = match gradient {
        Some(name) => name.parse::<GradientMode>()?,
        None => GradientMode::Analytic,
    };
    Ok(CPUEOptions::new(likelihood, gradient))
}
