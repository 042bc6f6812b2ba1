//! Public trait surface for log-likelihood evaluation.
//!
//! - [`LogLikelihood`]: trait a model implements so an external optimizer
//!   can drive it through [`ArgMinAdapter`](super::adapter::ArgMinAdapter).
//!
//! Convention: a model exposes a log-likelihood `ℓ(θ)`; optimizers minimize
//! the cost `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be
//! the gradient of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Cost, Grad, Theta},
};

/// User-implemented log-likelihood interface.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs or model
///     failures. A failure at one θ must not poison later evaluations.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs before an optimizer starts. The
///   adapter's `cost`/`gradient` do not call it; drivers call it once on
///   θ₀ through [`ArgMinAdapter::check`](super::adapter::ArgMinAdapter::check).
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, the adapter falls back to finite differences.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}
