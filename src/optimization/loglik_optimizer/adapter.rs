//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. Analytic gradients (if
//! provided by the model) are negated accordingly. If a gradient is not
//! provided, we finite-difference the **cost** closure, so no sign flip is
//! needed in that branch.
use std::cell::RefCell;

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        finite_diff::{run_central_diff, run_fd_diff},
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::{validate_grad, validate_value},
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use tracing::debug;

/// Bridges a `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the model provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// Propagates any `OptError` from the model's `value`, and returns
    /// `NonFiniteCost` if the value is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        validate_value(output)?;
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the model implements `grad(θ, data)`, we validate it and return
    ///   `-grad` (because the cost is `-ℓ`).
    /// - Otherwise, we finite-difference the **cost**: central differences
    ///   first, then forward differences if any central evaluation failed or
    ///   the result did not validate. Near a covariance breakdown the forward
    ///   stencil sometimes stays on the valid side where the central one
    ///   does not.
    ///
    /// # Errors
    /// - Propagates model errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates the first error raised by a cost evaluation during FD.
    /// - Returns validation errors for wrong dimension or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                match run_central_diff(theta, &cost_func, &closure_err) {
                    Ok(g) => Ok(g),
                    Err(central_err) => {
                        debug!(
                            error = %central_err,
                            "central differences failed, retrying with forward differences"
                        );
                        Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Run the model's [`LogLikelihood::check`] on a starting point.
    ///
    /// argmin never calls this itself; a driver should call it once on θ₀
    /// before the first `cost`/`gradient` so layout errors surface up
    /// front instead of as a failed first iteration.
    ///
    /// # Errors
    /// Whatever the model's `check` reports.
    pub fn check(&self, theta: &Theta) -> OptResult<()> {
        self.f.check(theta, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the sign conventions of the adapter and the
    // finite-difference fallback, on a toy Gaussian log-likelihood
    // ℓ(θ) = −½ Σ (θ_i − m_i)².
    // -------------------------------------------------------------------------

    struct Toy {
        analytic: bool,
    }

    impl LogLikelihood for Toy {
        type Data = Theta;

        fn value(&self, theta: &Theta, data: &Theta) -> OptResult<Cost> {
            Ok(-0.5 * (theta - data).mapv(|d| d * d).sum())
        }

        fn check(&self, _theta: &Theta, _data: &Theta) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, data: &Theta) -> OptResult<Grad> {
            if self.analytic {
                Ok(data - theta)
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Cost and gradient carry the minimization sign, whichever gradient
    // source is used.
    //
    // Given
    // -----
    // - m = (1, −2), θ = (0, 0).
    //
    // Expect
    // ------
    // - cost = ½ Σ m² = 2.5.
    // - gradient of the cost = θ − m = (−1, 2) for both the analytic and the
    //   finite-difference path.
    fn adapter_flips_signs_for_minimization() {
        let m = array![1.0, -2.0];
        let theta = array![0.0, 0.0];
        for analytic in [true, false] {
            let toy = Toy { analytic };
            let adapter = ArgMinAdapter::new(&toy, &m);
            assert_abs_diff_eq!(adapter.cost(&theta).unwrap(), 2.5, epsilon = 1e-12);
            let g = adapter.gradient(&theta).unwrap();
            assert_abs_diff_eq!(g[0], -1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(g[1], 2.0, epsilon = 1e-6);
        }
    }

    // ℓ(θ) = −Σ θ_i², defined only on θ ≥ 0.
    struct HalfSpace;

    impl LogLikelihood for HalfSpace {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            if let Some(index) = theta.iter().position(|&v| v < 0.0) {
                return Err(OptError::InvalidThetaInput { index, value: theta[index] });
            }
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // On the edge of the domain the central stencil fails and the forward
    // stencil still yields a gradient.
    //
    // Given
    // -----
    // - ℓ(θ) = −Σ θ_i² on θ ≥ 0, evaluated at θ = (0, 1).
    //
    // Expect
    // ------
    // - Central differences alone report the domain error.
    // - The adapter returns the forward-difference gradient of the cost,
    //   ≈ (0, 2).
    fn gradient_falls_back_to_forward_differences_at_the_boundary() {
        let model = HalfSpace;
        let adapter = ArgMinAdapter::new(&model, &());
        let theta = array![0.0, 1.0];

        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost = |t: &Theta| match adapter.cost(t) {
            Ok(c) => c,
            Err(e) => {
                let _ = closure_err.borrow_mut().get_or_insert(e);
                f64::NAN
            }
        };
        assert!(matches!(
            run_central_diff(&theta, &cost, &closure_err),
            Err(OptError::InvalidThetaInput { index: 0, .. })
        ));

        let g = adapter.gradient(&theta).unwrap();
        assert_abs_diff_eq!(g[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(g[1], 2.0, epsilon = 1e-6);
        assert_eq!(adapter.check(&theta), Ok(()));
    }
}
