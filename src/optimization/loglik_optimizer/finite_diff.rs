//! loglik_optimizer::finite_diff — finite-difference gradient helpers.
//!
//! Purpose
//! -------
//! Provide forward- and central-difference gradient approximations around a
//! parameter vector, with error capture and validation, so the adapter and
//! gradient checks can request numerical derivatives without depending
//! directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward differences, `dim + 1` evaluations.
//! - [`run_central_diff`]: central differences, `2·dim` evaluations, used as
//!   the default fallback and as the reference for analytic gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective during differencing is routed into
//!   the shared `closure_err` cell and treated as a hard failure.
//! - Gradients returned from this module satisfy [`validate_grad`].
//!
//! Conventions
//! -----------
//! - Differences are taken with respect to the unconstrained vector `Theta`.
//! - Domain errors are surfaced as [`OptError`](crate::optimization::errors::OptError)
//!   via `OptResult<T>`; argmin's [`Error`] is confined to the closure
//!   boundary.
//!
//! Testing notes
//! -------------
//! - Unit tests cover both paths on a quadratic, closure-error propagation,
//!   and rejection of non-finite gradients.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{validation::validate_grad, Grad, Theta},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Point at which the gradient is approximated; its length defines the
///   expected gradient dimension.
/// - `func`: `&G`
///   Scalar objective. It is assumed to route evaluation errors into
///   `closure_err` and return `NaN` in that case.
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Shared error slot; cleared on entry and inspected after differencing.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   - `Ok(grad)` when no error was captured and the gradient validates.
///   - `Err(e)` otherwise.
///
/// Errors
/// ------
/// - The captured argmin error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use cpue_spatial::optimization::loglik_optimizer::Theta;
/// # use cpue_spatial::optimization::loglik_optimizer::finite_diff::run_fd_diff;
/// let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
/// let f = |x: &Theta| x.dot(x);
/// let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), theta.len());
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    finish(fd_grad, theta.len(), closure_err)
}

/// run_central_diff — central-difference gradient with error capture and
/// validation.
///
/// Same contract as [`run_fd_diff`], with truncation error `O(h²)` instead
/// of `O(h)` at twice the number of evaluations.
pub fn run_central_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.central_diff(func);
    finish(fd_grad, theta.len(), closure_err)
}

// ---- Helper methods ----

fn finish(fd_grad: Grad, dim: usize, closure_err: &RefCell<Option<Error>>) -> OptResult<Grad> {
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
