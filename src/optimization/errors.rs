//! Optimizer-facing error surface.
//!
//! [`OptError`] is what an external optimizer sees when it drives a
//! [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! through the argmin adapter. Model errors are carried through unchanged
//! in [`OptError::Model`]; argmin's own errors become either
//! [`OptError::NotImplemented`] or the catch-all [`OptError::BackendError`].
use argmin::core::{ArgminError, Error};

use crate::spatial::errors::{CPUEError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// The model has no analytic gradient; the adapter differentiates the
    /// cost numerically.
    GradientNotImplemented,

    /// Gradient length differs from θ.
    GradientDimMismatch { expected: usize, found: usize },

    /// First non-finite gradient entry.
    InvalidGradient { index: usize, value: f64 },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Parameter vector ----
    /// θ length does not equal `7 + n`.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Model ----
    /// The spatial covariance could not be factorized at this decay. The
    /// evaluation failed, the optimizer may retreat and retry.
    CovarianceNotPositiveDefinite { decay: f64 },

    /// Any other spatial-model failure.
    Model(CPUEError),

    // ---- argmin ----
    /// `ArgminError::NotImplemented` raised by a solver or closure.
    NotImplemented { text: String },
    /// Any other error that reached us through `argmin::core::Error`.
    BackendError { text: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value } => {
                write!(f, "Non-finite gradient entry at index {index}: {value}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Parameter vector ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Model ----
            OptError::CovarianceNotPositiveDefinite { decay } => {
                write!(f, "Spatial covariance is not positive-definite at decay a = {decay}")
            }
            OptError::Model(err) => write!(f, "{err}"),

            // ---- argmin ----
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::BackendError { text } => write!(f, "Optimizer backend error: {text}"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own cost/gradient closures travel through
        // argmin as `OptError`; recover them first.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(ArgminError::NotImplemented { text }) => OptError::NotImplemented { text },
            Ok(other) => OptError::BackendError { text: other.to_string() },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<CPUEError> for OptError {
    fn from(err: CPUEError) -> Self {
        match err {
            CPUEError::CovarianceNotPositiveDefinite { decay } => {
                OptError::CovarianceNotPositiveDefinite { decay }
            }
            CPUEError::NonFiniteObjective { value } => OptError::NonFiniteCost { value },
            CPUEError::Param(p) => p.into(),
            other => OptError::Model(other),
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for pyo3::PyErr {
    fn from(err: OptError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the conversions into `OptError`: from model errors,
    // from parameter errors, and the round trip through `argmin::core::Error`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A covariance failure keeps its own variant so optimizers can tell a
    // recoverable bad region apart from other model errors.
    //
    // Given
    // -----
    // - `CPUEError::CovarianceNotPositiveDefinite { decay: -1.0 }`.
    // - `CPUEError::InvalidLikelihoodFlag { flag: 7 }`.
    //
    // Expect
    // ------
    // - The first maps to `OptError::CovarianceNotPositiveDefinite`.
    // - The second is wrapped in `OptError::Model`.
    fn model_errors_map_to_distinct_variants() {
        assert_eq!(
            OptError::from(CPUEError::CovarianceNotPositiveDefinite { decay: -1.0 }),
            OptError::CovarianceNotPositiveDefinite { decay: -1.0 }
        );
        let flag = CPUEError::InvalidLikelihoodFlag { flag: 7 };
        assert_eq!(OptError::from(flag.clone()), OptError::Model(flag));
    }

    #[test]
    fn wrapped_param_errors_are_flattened() {
        let err =
            CPUEError::Param(ParamError::InvalidThetaInput { index: 3, value: f64::INFINITY });
        assert_eq!(
            OptError::from(err),
            OptError::InvalidThetaInput { index: 3, value: f64::INFINITY }
        );
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` that crossed the argmin boundary comes back unchanged.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from` recovers the original value.
    fn opt_error_survives_argmin_round_trip() {
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let boxed: Error = original.clone().into();
        assert_eq!(OptError::from(boxed), original);
    }

    #[test]
    // Purpose
    // -------
    // Foreign errors keep their message but collapse to two variants.
    //
    // Given
    // -----
    // - `ArgminError::NotImplemented`, `ArgminError::PotentialBug`, and a
    //   plain `std::fmt::Error` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `NotImplemented` keeps its variant and text.
    // - The other two become `BackendError` carrying their display text.
    fn foreign_errors_collapse_to_backend_error() {
        let boxed: Error = ArgminError::NotImplemented { text: "fd".to_string() }.into();
        assert_eq!(OptError::from(boxed), OptError::NotImplemented { text: "fd".to_string() });

        let bug = ArgminError::PotentialBug { text: "line search".to_string() };
        let expected = bug.to_string();
        let boxed: Error = bug.into();
        assert_eq!(OptError::from(boxed), OptError::BackendError { text: expected });

        let boxed: Error = std::fmt::Error.into();
        assert!(matches!(OptError::from(boxed), OptError::BackendError { .. }));
    }
}
