//! Spatial CPUE model: objective, diagnostics report, analytic gradient.
pub mod cpue;
pub mod gradient;

pub use self::cpue::{negative_log_likelihood, CPUEModel};
