//! loglik_optimizer::types — shared numeric aliases.
//!
//! Purpose
//! -------
//! Centralize the numeric types used at the optimizer boundary so model code
//! and the argmin adapter agree on one representation for parameters,
//! gradients, and scalar objectives.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray` containers over `f64`.
//! - `Cost` is the scalar handed to argmin, i.e. the negative
//!   log-likelihood; higher layers handle the sign flip from `ℓ(θ)`.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors of length `7 + n` for the spatial
//!   CPUE model.
use ndarray::Array1;

/// Parameter vector `θ` for log-likelihood optimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer interface.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)` for optimization.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value.
///
/// Log-likelihood implementations return `ℓ(θ)` with this type; the adapter
/// hands `c(θ) = -ℓ(θ)` to argmin.
pub type Cost = f64;
