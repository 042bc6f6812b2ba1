//! numerical_stability — numerically robust scalar transformations.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used when mapping
//! unconstrained optimizer coordinates into model quantities. This module
//! centralizes the transform logic so the spatial model and the optimizer
//! layer can assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide `safe_softplus` for strictly positive outputs and for the
//!   zero-inflation mass terms `−ln p` / `−ln(1 − p)`.
//! - Provide `safe_logistic` for mapping an unconstrained logit into a
//!   probability in `(0, 1)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public transforms assume finite `f64` inputs; domain validation is
//!   enforced in the spatial model and optimizer layers, not here.
//!
//! Conventions
//! -----------
//! - This module never logs, performs I/O, or touches global state; it is
//!   pure numerical helpers suitable for use inside tight inner loops.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas
//!   on safe grids, tail behavior, and the softplus identities for the
//!   zero-inflation log masses.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{safe_logistic, safe_softplus};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_softplus};
}
