//! optimization — optimizer interface, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide the layer an external optimizer talks to: a log-likelihood trait
//! with an argmin adapter, numerically stable scalar transforms shared with
//! the model, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: [`LogLikelihood`](loglik_optimizer::LogLikelihood),
//!   the argmin adapter, finite-difference fallbacks and validation.
//! - `numerical_stability`: stable softplus / logistic for the
//!   zero-inflation terms.
//! - `errors`: [`OptError`](errors::OptError) / `OptResult<T>`, with
//!   conversions from model and argmin errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ`; invalid
//!   states are reported as `OptError`, not panics.
//! - A model failure at one θ (e.g., an indefinite covariance) is an error
//!   of that evaluation only.
//!
//! Conventions
//! -----------
//! - Optimizers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`.
//! - This module never logs and performs no I/O.
//!
//! Downstream usage
//! ----------------
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use cpue_spatial::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
