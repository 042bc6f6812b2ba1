//! loglik_optimizer — argmin-compatible log-likelihood interface.
//!
//! Purpose
//! -------
//! Provide the seam between a model's log-likelihood and an external
//! gradient-based optimizer. Models implement a single trait,
//! [`LogLikelihood`]; [`adapter::ArgMinAdapter`] turns any implementation
//! into an argmin `CostFunction` + `Gradient` that any argmin solver, or a
//! hand-written loop, can drive.
//!
//! Key behaviors
//! -------------
//! - Convert log-likelihoods `ℓ(θ)` into cost functions `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`].
//! - Fall back to finite differences ([`finite_diff`]) when a model reports
//!   [`OptError::GradientNotImplemented`](crate::optimization::errors::OptError).
//! - Centralize gradient and value validation ([`validation`]) so optimizers
//!   never see NaN/inf silently.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] treat invalid
//!   inputs as recoverable `OptError` values, not panics.
//! - Vectors use the canonical aliases [`Theta`] and [`Grad`].
//!
//! Conventions
//! -----------
//! - Gradients exposed by [`LogLikelihood::grad`] are for the log-likelihood
//!   (`∇ℓ(θ)`); the adapter flips the sign for the cost.
//! - No optimizer loop is shipped here; the outer solver belongs to the
//!   caller.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign conventions in [`adapter`], the FD helpers in
//!   [`finite_diff`], and the checks in [`validation`].
//! - The spatial CPUE model tests drive the adapter end to end.

pub mod adapter;
pub mod finite_diff;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::ArgMinAdapter;
pub use self::traits::LogLikelihood;
pub use self::types::{Cost, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use cpue_spatial::optimization::loglik_optimizer::prelude::*;
//
// to import the optimizer interface in a single line.

pub mod prelude {
    pub use super::adapter::ArgMinAdapter;
    pub use super::traits::LogLikelihood;
    pub use super::types::{Cost, Grad, Theta};
}
