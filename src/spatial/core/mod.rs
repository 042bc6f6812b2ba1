//! core — building blocks of the spatial zero-inflated CPUE likelihood.
//!
//! Purpose
//! -------
//! Collect the pieces one likelihood evaluation is assembled from: kernel
//! densities, the exponential covariance, the multivariate-normal penalty on
//! the latent field, the linear predictor, and the validated data and
//! parameter containers. The model in `spatial::models` composes these; the
//! Python bindings only ever go through the model.
//!
//! Key behaviors
//! -------------
//! - [`densities`]: inverse-Gaussian and log-normal kernels on log or natural
//!   scale, plus kernel dispatch and derivatives on the predictor scale.
//! - [`covariance`]: `cov[i][j] = exp(−a·dd[i][j])` and `∂cov/∂a`.
//! - [`mvn`]: Cholesky-backed `−ln N(u; 0, cov)` ([`SpatialFactor`]).
//! - [`predictor`]: `intercept + β_lat·lat + β_lon·lon + σ_space·u`.
//! - [`data`] / [`params`]: validated inputs and the θ layout.
//! - [`options`]: kernel selector and gradient mode.
//! - [`report`]: objective breakdown and diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ has length `7 + n` with layout
//!   `(intercept, theta, beta_lat, beta_lon, logsigma, logsigma_space, a, u)`.
//! - Data passed around as [`CPUEData`] already satisfies its invariants;
//!   lower-level helpers (covariance, predictor) do not re-validate.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Exact `0.0` in `y` marks a zero catch.
//! - Only [`mvn`] logs (a `warn` event on factorization failure); everything
//!   else here is pure computation.

pub mod covariance;
pub mod data;
pub mod densities;
pub mod mvn;
pub mod options;
pub mod params;
pub mod predictor;
pub mod report;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::covariance::{build_covariance, covariance_decay_derivative};
pub use self::data::CPUEData;
pub use self::densities::{
    invgauss_density, log_density_invgauss, log_density_lognormal, lognormal_density,
    DensityScale,
};
pub use self::mvn::{mvn_neg_log_density, SpatialFactor};
pub use self::options::{CPUEOptions, GradientMode, LikelihoodKind};
pub use self::params::CPUEParams;
pub use self::predictor::linear_predictor;
pub use self::report::{CPUEReport, NllComponents};
pub use self::validation::N_FIXED;

pub mod prelude {
    pub use super::data::CPUEData;
    pub use super::densities::DensityScale;
    pub use super::options::{CPUEOptions, GradientMode, LikelihoodKind};
    pub use super::params::CPUEParams;
    pub use super::report::{CPUEReport, NllComponents};
}
