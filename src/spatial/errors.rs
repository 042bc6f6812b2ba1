//! Errors for the spatial CPUE model (data validation, configuration,
//! kernel-domain checks, and covariance factorization failures).
//!
//! This module defines a model error type, [`CPUEError`], and a parameter
//! error type, [`ParamError`], used across the Rust core and the optional
//! Python-facing API. Both implement `Display`/`Error` and convert to `PyErr`
//! when the `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Observations must be **finite and non-negative**; exact zero marks a
//!   "no catch" record.
//! - A covariance that fails Cholesky factorization is a *recoverable*
//!   failure of that single evaluation: optimizers should retreat from the
//!   offending parameter region rather than abort.
//! - An invalid likelihood flag is a configuration error and is never
//!   turned into a placeholder objective value.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};
use statrs::distribution::NormalError;

/// Crate-wide result alias for spatial CPUE operations that may produce
/// [`CPUEError`].
pub type CPUEResult<T> = Result<T, CPUEError>;

/// Result alias for parameter-vector construction/validation paths that may
/// produce [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the spatial CPUE model.
///
/// Covers input/data validation, configuration checks, kernel domain
/// violations, and numerical failures in the covariance factorization.
#[derive(Debug, Clone, PartialEq)]
pub enum CPUEError {
    // ---- Input/data validation ----
    /// No observations were supplied.
    EmptyData,

    /// A parallel input vector has the wrong length.
    LengthMismatch { field: &'static str, expected: usize, actual: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { field: &'static str, index: usize, value: f64 },

    /// A catch observation is negative.
    NegativeObservation { index: usize, value: f64 },

    /// Distance matrix does not have shape `n × n`.
    DistanceShape { expected: usize, rows: usize, cols: usize },

    /// A distance entry is NaN/±inf.
    NonFiniteDistance { row: usize, col: usize, value: f64 },

    /// A distance entry is negative.
    NegativeDistance { row: usize, col: usize, value: f64 },

    /// `dd[row][col]` and `dd[col][row]` disagree beyond tolerance.
    AsymmetricDistance { row: usize, col: usize, upper: f64, lower: f64 },

    /// A diagonal distance entry is not zero.
    NonZeroDiagonal { index: usize, value: f64 },

    // ---- Configuration ----
    /// Likelihood selector flag outside {1, 2}.
    InvalidLikelihoodFlag { flag: i64 },

    /// Unknown likelihood name.
    InvalidLikelihoodName { name: String, reason: &'static str },

    /// Unknown gradient mode name.
    InvalidGradientMode { name: String, reason: &'static str },

    // ---- Kernel domain ----
    /// A positive-value kernel received a non-positive or non-finite outcome.
    NonPositiveKernelInput { value: f64 },

    /// A kernel parameter is outside its domain.
    InvalidKernelParam { name: &'static str, value: f64, reason: &'static str },

    // ---- Numerical failures ----
    /// The covariance built from `dd` and decay `a` is not positive-definite.
    CovarianceNotPositiveDefinite { decay: f64 },

    /// The covariance contains a non-finite entry.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    /// Latent vector length does not match covariance dimension.
    LatentDimMismatch { expected: usize, actual: usize },

    /// The aggregated objective is NaN/±inf.
    NonFiniteObjective { value: f64 },

    // ---- Parameter errors (forwarded) ----
    /// Wrapper for [`ParamError`] raised while mapping θ.
    Param(ParamError),
}

impl std::error::Error for CPUEError {}

impl std::fmt::Display for CPUEError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            CPUEError::EmptyData => write!(f, "Input data contain no observations."),
            CPUEError::LengthMismatch { field, expected, actual } => {
                write!(f, "Length of '{field}' must be {expected}; got {actual}.")
            }
            CPUEError::NonFiniteData { field, index, value } => {
                write!(f, "Entry {index} of '{field}' is non-finite: {value}")
            }
            CPUEError::NegativeObservation { index, value } => {
                write!(f, "Observation at index {index} is negative: {value}")
            }
            CPUEError::DistanceShape { expected, rows, cols } => {
                write!(f, "Distance matrix must be {expected}x{expected}; got {rows}x{cols}.")
            }
            CPUEError::NonFiniteDistance { row, col, value } => {
                write!(f, "Distance at ({row}, {col}) is non-finite: {value}")
            }
            CPUEError::NegativeDistance { row, col, value } => {
                write!(f, "Distance at ({row}, {col}) is negative: {value}")
            }
            CPUEError::AsymmetricDistance { row, col, upper, lower } => {
                write!(
                    f,
                    "Distance matrix is not symmetric at ({row}, {col}): {lower} vs {upper}"
                )
            }
            CPUEError::NonZeroDiagonal { index, value } => {
                write!(f, "Distance diagonal at index {index} must be 0; got {value}")
            }
            // ---- Configuration ----
            CPUEError::InvalidLikelihoodFlag { flag } => {
                write!(
                    f,
                    "Invalid likelihood specified: flag {flag} (expected 1 = inverse Gaussian, 2 = log-normal)"
                )
            }
            CPUEError::InvalidLikelihoodName { name, reason } => {
                write!(f, "Invalid likelihood '{name}': {reason}")
            }
            CPUEError::InvalidGradientMode { name, reason } => {
                write!(f, "Invalid gradient mode '{name}': {reason}")
            }
            // ---- Kernel domain ----
            CPUEError::NonPositiveKernelInput { value } => {
                write!(f, "Positive-value kernel input must be finite and > 0; got: {value}")
            }
            CPUEError::InvalidKernelParam { name, value, reason } => {
                write!(f, "Kernel parameter '{name}' is invalid ({value}): {reason}")
            }
            // ---- Numerical failures ----
            CPUEError::CovarianceNotPositiveDefinite { decay } => {
                write!(f, "Spatial covariance is not positive-definite at decay a = {decay}")
            }
            CPUEError::NonFiniteCovariance { row, col, value } => {
                write!(f, "Spatial covariance entry ({row}, {col}) is non-finite: {value}")
            }
            CPUEError::LatentDimMismatch { expected, actual } => {
                write!(f, "Latent vector length mismatch: expected {expected}, got {actual}")
            }
            CPUEError::NonFiniteObjective { value } => {
                write!(f, "Negative log-likelihood is non-finite: {value}")
            }
            CPUEError::Param(err) => write!(f, "{err}"),
        }
    }
}

impl From<ParamError> for CPUEError {
    fn from(err: ParamError) -> CPUEError {
        CPUEError::Param(err)
    }
}

impl From<NormalError> for CPUEError {
    fn from(err: NormalError) -> CPUEError {
        match err {
            NormalError::MeanInvalid => CPUEError::InvalidKernelParam {
                name: "meanlog",
                value: f64::NAN,
                reason: "Log-normal location must be finite.",
            },
            NormalError::StandardDeviationInvalid => CPUEError::InvalidKernelParam {
                name: "sdlog",
                value: f64::NAN,
                reason: "Log-normal scale must be finite and > 0.",
            },
            #[allow(unreachable_patterns)]
            _ => CPUEError::InvalidKernelParam {
                name: "lognormal",
                value: f64::NAN,
                reason: "Log-normal parameters rejected by statrs.",
            },
        }
    }
}

/// Convert a [`CPUEError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl From<CPUEError> for PyErr {
    fn from(err: CPUEError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Errors specific to the optimizer-space parameter vector θ.
///
/// θ is laid out as `(intercept, theta, beta_lat, beta_lon, logsigma,
/// logsigma_space, a, u[0..n))`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Theta length does not equal `7 + n`.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` output for configuration and numerical variants.
    // - Conversions from `ParamError` and `statrs::NormalError`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The invalid-flag message must name the offending flag so a caller can
    // tell it apart from a numeric failure.
    //
    // Given
    // -----
    // - `CPUEError::InvalidLikelihoodFlag { flag: 3 }`.
    //
    // Expect
    // ------
    // - The rendered message contains "flag 3".
    fn invalid_flag_display_names_the_flag() {
        let msg = CPUEError::InvalidLikelihoodFlag { flag: 3 }.to_string();
        assert!(msg.contains("flag 3"), "unexpected message: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // `ParamError` values are wrapped, not flattened, when converted.
    //
    // Given
    // -----
    // - A `ParamError::ThetaLengthMismatch`.
    //
    // Expect
    // ------
    // - `CPUEError::from` yields `CPUEError::Param` holding the same value
    //   and the same display text.
    fn param_error_is_wrapped_into_cpue_error() {
        let p = ParamError::ThetaLengthMismatch { expected: 10, actual: 9 };
        let e = CPUEError::from(p.clone());
        assert_eq!(e, CPUEError::Param(p.clone()));
        assert_eq!(e.to_string(), p.to_string());
    }

    #[test]
    // Purpose
    // -------
    // statrs constructor failures map onto the kernel-parameter variant.
    //
    // Given
    // -----
    // - `NormalError::StandardDeviationInvalid`.
    //
    // Expect
    // ------
    // - `CPUEError::InvalidKernelParam { name: "sdlog", .. }`.
    fn normal_error_maps_to_kernel_param_error() {
        match CPUEError::from(NormalError::StandardDeviationInvalid) {
            CPUEError::InvalidKernelParam { name, .. } => assert_eq!(name, "sdlog"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
