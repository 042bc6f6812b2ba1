//! Checks on what crosses the optimizer boundary.
//!
//! Every gradient handed to a solver, analytic or numerical, goes through
//! [`validate_grad`]; every log-likelihood value goes through
//! [`validate_value`]. A NaN reaching the solver would otherwise surface
//! much later as a stalled line search.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::Grad,
};

/// Gradient length must equal `dim` and every entry must be finite.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`], checked first.
/// - [`OptError::InvalidGradient`] at the first NaN/±inf entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::InvalidGradient { index, value: grad[index] }),
        None => Ok(()),
    }
}

/// A log-likelihood value must be finite; its sign is unrestricted.
///
/// # Errors
/// [`OptError::NonFiniteCost`] for NaN/±inf.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OptError::NonFiniteCost { value })
    }
}
