//! spatial — zero-inflated CPUE likelihood with a latent spatial field.
//!
//! Purpose
//! -------
//! Provide the negative log-likelihood of catch-per-unit-effort data observed
//! at geographic locations, combining a zero-inflated positive-continuous
//! observation model with Gaussian latent effects whose correlation decays
//! exponentially with distance. The objective and its gradient are meant to
//! be evaluated repeatedly by an external optimizer.
//!
//! Key behaviors
//! -------------
//! - [`core`]: kernels, covariance, MVN penalty, predictor, data/params.
//! - [`models`]: [`CPUEModel`] (objective, diagnostics, analytic gradient,
//!   optimizer interface) and the flag-driven entry point
//!   [`negative_log_likelihood`].
//! - [`errors`]: [`CPUEError`] / [`ParamError`] and their result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - Evaluation is stateless: a [`CPUEModel`] holds only its options, so the
//!   same instance can be shared across threads.
//! - The zero/positive split is exact equality with `0.0`; no smoothing.
//!
//! Conventions
//! -----------
//! - Objective values are negative log-likelihoods (to be minimized). The
//!   optimizer-facing `LogLikelihood` impl reports `−NLL`.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    CPUEData, CPUEOptions, CPUEParams, CPUEReport, DensityScale, GradientMode, LikelihoodKind,
    NllComponents,
};
pub use self::errors::{CPUEError, CPUEResult, ParamError, ParamResult};
pub use self::models::{negative_log_likelihood, CPUEModel};

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{CPUEError, CPUEResult, ParamError, ParamResult};
    pub use super::models::{negative_log_likelihood, CPUEModel};
}
