//! Positive-value kernel densities for the zero-inflated CPUE model.
//!
//! This module provides the two continuous kernels used for strictly
//! positive catch magnitudes:
//!
//! - **Log-normal**: the normal log-density of `ln x` with location
//!   `meanlog` and scale `sdlog`, minus the Jacobian term `ln x`.
//! - **Inverse Gaussian**: closed form
//!   `½ ln λ − ½ ln(2π x³) − λ (x − μ)² / (2 μ² x)` with mean `μ` and
//!   shape `λ`.
//!
//! [`neg_log_kernel`] and [`neg_log_kernel_derivatives`] evaluate the
//! selected kernel on the linear-predictor scale used by the model.
//!
//! ## Numerics
//! - `ln(2π x³)` is evaluated as `ln(2π) + 3 ln x` so tiny `x` does not
//!   underflow before the log is taken.
//! - The inverse-Gaussian quadratic term is evaluated as
//!   `λ (x/μ − 1)² / (2x)`, which stays finite when `μ²` would overflow.
//! - Both kernels are defined only for `x > 0`; a non-positive or
//!   non-finite `x` is an error rather than `-∞`, because reaching a kernel
//!   with such a value signals a broken zero/positive dispatch upstream.
//! - The natural-scale densities are `exp` of the log-densities.
use crate::spatial::{
    core::{
        options::LikelihoodKind,
        validation::{validate_kernel_input, validate_positive_param},
    },
    errors::{CPUEError, CPUEResult},
};
use statrs::distribution::{Continuous, Normal};

/// `ln(2π)`.
pub const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Output scale for the density evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityScale {
    /// Return `ln f(x)`.
    Log,
    /// Return `f(x)`.
    Natural,
}

impl DensityScale {
    #[inline]
    fn apply(self, log_value: f64) -> f64 {
        match self {
            DensityScale::Log => log_value,
            DensityScale::Natural => log_value.exp(),
        }
    }
}

/// Log-density of a log-normal distribution at `x`.
///
/// Computed as `ln φ(ln x; meanlog, sdlog) − ln x` using
/// `statrs::distribution::Normal::ln_pdf` for the normal part.
///
/// # Errors
/// - [`CPUEError::NonPositiveKernelInput`] if `x` is not finite and > 0.
/// - [`CPUEError::InvalidKernelParam`] if `meanlog` is not finite or
///   `sdlog` is not finite and > 0.
pub fn log_density_lognormal(x: f64, meanlog: f64, sdlog: f64) -> CPUEResult<f64> {
    let x = validate_kernel_input(x)?;
    if !meanlog.is_finite() {
        return Err(CPUEError::InvalidKernelParam {
            name: "meanlog",
            value: meanlog,
            reason: "Parameter must be finite.",
        });
    }
    let sdlog = validate_positive_param("sdlog", sdlog)?;
    let ln_x = x.ln();
    Ok(Normal::new(meanlog, sdlog)?.ln_pdf(ln_x) - ln_x)
}

/// Log-density of an inverse-Gaussian distribution at `x`.
///
/// # Errors
/// - [`CPUEError::NonPositiveKernelInput`] if `x` is not finite and > 0.
/// - [`CPUEError::InvalidKernelParam`] if `mean` or `shape` is not finite
///   and > 0.
pub fn log_density_invgauss(x: f64, mean: f64, shape: f64) -> CPUEResult<f64> {
    let x = validate_kernel_input(x)?;
    let mean = validate_positive_param("mean", mean)?;
    let shape = validate_positive_param("shape", shape)?;
    let r = x / mean - 1.0;
    let kernel = shape * r * r / (2.0 * x);
    Ok(0.5 * shape.ln() - 0.5 * (LN_2PI + 3.0 * x.ln()) - kernel)
}

/// Log-normal density at `x` on the requested [`DensityScale`].
pub fn lognormal_density(x: f64, meanlog: f64, sdlog: f64, scale: DensityScale) -> CPUEResult<f64> {
    Ok(scale.apply(log_density_lognormal(x, meanlog, sdlog)?))
}

/// Inverse-Gaussian density at `x` on the requested [`DensityScale`].
pub fn invgauss_density(x: f64, mean: f64, shape: f64, scale: DensityScale) -> CPUEResult<f64> {
    Ok(scale.apply(log_density_invgauss(x, mean, shape)?))
}

// ---- Kernel dispatch on the linear-predictor scale ----

/// Partial derivatives of one negative kernel log-density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelDerivatives {
    /// `∂k/∂pred`.
    pub d_pred: f64,
    /// `∂k/∂logsigma`.
    pub d_logsigma: f64,
}

/// Negative kernel log-density `k = −ln f(y | pred, sigma)` for a positive
/// observation.
///
/// - Inverse Gaussian: mean `exp(pred)`, shape `sigma`.
/// - Log-normal: meanlog `pred`, sdlog `sigma`.
///
/// # Errors
/// Domain errors from the underlying kernel, including an inverse-Gaussian
/// mean that overflows to `+∞`.
pub fn neg_log_kernel(kind: LikelihoodKind, y: f64, pred: f64, sigma: f64) -> CPUEResult<f64> {
    let log_f = match kind {
        LikelihoodKind::InverseGaussian => log_density_invgauss(y, pred.exp(), sigma)?,
        LikelihoodKind::LogNormal => log_density_lognormal(y, pred, sigma)?,
    };
    Ok(-log_f)
}

/// Derivatives of [`neg_log_kernel`] with respect to `pred` and
/// `logsigma = ln sigma`.
///
/// Inverse Gaussian (`μ = e^pred`, `λ = sigma`):
/// - `∂k/∂pred = λ (μ − y) / μ² = λ (1/μ)(1 − y/μ)`
/// - `∂k/∂logsigma = −½ + λ (y/μ − 1)² / (2y)`
///
/// Log-normal (`z = ln y − pred`):
/// - `∂k/∂pred = −z / σ²`
/// - `∂k/∂logsigma = 1 − z² / σ²`
///
/// # Errors
/// Same domain checks as [`neg_log_kernel`].
pub fn neg_log_kernel_derivatives(
    kind: LikelihoodKind, y: f64, pred: f64, sigma: f64,
) -> CPUEResult<KernelDerivatives> {
    let y = validate_kernel_input(y)?;
    let sigma = validate_positive_param("sigma", sigma)?;
    match kind {
        LikelihoodKind::InverseGaussian => {
            let mu = validate_positive_param("mean", pred.exp())?;
            let r = y / mu - 1.0;
            Ok(KernelDerivatives {
                d_pred: sigma * mu.recip() * (1.0 - y / mu),
                d_logsigma: -0.5 + sigma * r * r / (2.0 * y),
            })
        }
        LikelihoodKind::LogNormal => {
            let z = y.ln() - pred;
            let s2 = sigma * sigma;
            Ok(KernelDerivatives { d_pred: -z / s2, d_logsigma: 1.0 - z * z / s2 })
        }
    }
}
