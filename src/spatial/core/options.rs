//! CPUE options — likelihood kernel and gradient configuration.
//!
//! Purpose
//! -------
//! Collect the two configuration knobs of the spatial CPUE model in one
//! place: which positive-catch kernel to use, and whether the optimizer
//! interface should serve the analytic gradient or fall back to finite
//! differences.
//!
//! Key behaviors
//! -------------
//! - [`LikelihoodKind`] maps the integer selector used by callers
//!   (`1` = inverse Gaussian, `2` = log-normal) and case-insensitive names
//!   onto an enum. Anything else is a configuration error.
//! - [`GradientMode`] parses `"analytic"` / `"finite_difference"`.
//! - [`CPUEOptions`] bundles both with a documented default.
//!
//! Conventions
//! -----------
//! - Parsing never panics; unknown flags and names return [`CPUEError`].
use crate::spatial::errors::{CPUEError, CPUEResult};
use std::str::FromStr;

/// Positive-catch kernel selector.
///
/// Variants:
/// - `InverseGaussian` (flag `1`): mean `exp(pred)`, shape `sigma`.
/// - `LogNormal` (flag `2`): meanlog `pred`, sdlog `sigma`.
///
/// Parsing:
/// `FromStr` accepts case-insensitive `"invgauss"` / `"inverse_gaussian"`
/// and `"lognormal"` / `"lognorm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikelihoodKind {
    InverseGaussian,
    LogNormal,
}

impl LikelihoodKind {
    /// Map the integer likelihood flag onto a kernel.
    ///
    /// # Errors
    /// [`CPUEError::InvalidLikelihoodFlag`] for any flag other than 1 or 2.
    pub fn from_flag(flag: i64) -> CPUEResult<Self> {
        match flag {
            1 => Ok(LikelihoodKind::InverseGaussian),
            2 => Ok(LikelihoodKind::LogNormal),
            _ => Err(CPUEError::InvalidLikelihoodFlag { flag }),
        }
    }

    /// Integer flag of this kernel.
    pub fn flag(self) -> i64 {
        match self {
            LikelihoodKind::InverseGaussian => 1,
            LikelihoodKind::LogNormal => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LikelihoodKind::InverseGaussian => "inverse_gaussian",
            LikelihoodKind::LogNormal => "lognormal",
        }
    }
}

impl FromStr for LikelihoodKind {
    type Err = CPUEError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invgauss" | "inverse_gaussian" => Ok(LikelihoodKind::InverseGaussian),
            "lognormal" | "lognorm" => Ok(LikelihoodKind::LogNormal),
            _ => Err(CPUEError::InvalidLikelihoodName {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'invgauss', 'inverse_gaussian', \
                         'lognormal' or 'lognorm'.",
            }),
        }
    }
}

/// Gradient source served through the optimizer interface.
///
/// - `Analytic`: closed-form ∂NLL/∂θ.
/// - `FiniteDifference`: the model reports no gradient and the adapter
///   differentiates the cost numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientMode {
    Analytic,
    FiniteDifference,
}

impl FromStr for GradientMode {
    type Err = CPUEError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analytic" => Ok(GradientMode::Analytic),
            "finite_difference" | "fd" => Ok(GradientMode::FiniteDifference),
            _ => Err(CPUEError::InvalidGradientMode {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'analytic', 'finite_difference' or 'fd'.",
            }),
        }
    }
}

/// Model configuration.
///
/// Default: inverse-Gaussian kernel with the analytic gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CPUEOptions {
    pub likelihood: LikelihoodKind,
    pub gradient: GradientMode,
}

impl CPUEOptions {
    pub fn new(likelihood: LikelihoodKind, gradient: GradientMode) -> Self {
        CPUEOptions { likelihood, gradient }
    }

    /// Options for an integer likelihood flag with the analytic gradient.
    ///
    /// # Errors
    /// [`CPUEError::InvalidLikelihoodFlag`] for flags outside {1, 2}.
    pub fn from_flag(flag: i64) -> CPUEResult<Self> {
        Ok(CPUEOptions::new(LikelihoodKind::from_flag(flag)?, GradientMode::Analytic))
    }
}

impl Default for CPUEOptions {
    fn default() -> Self {
        CPUEOptions::new(LikelihoodKind::InverseGaussian, GradientMode::Analytic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover flag and name parsing, including the rejection of
    // every flag outside {1, 2}, and the documented default.
    // -------------------------------------------------------------------------

    #[test]
    fn flags_map_to_kernels_and_back() {
        for kind in [LikelihoodKind::InverseGaussian, LikelihoodKind::LogNormal] {
            assert_eq!(LikelihoodKind::from_flag(kind.flag()), Ok(kind));
        }
    }

    #[test]
    // Purpose
    // -------
    // An unrecognized flag is an error, never a silent fallback.
    //
    // Given
    // -----
    // - Flags 0, 3, −1 and i64::MAX.
    //
    // Expect
    // ------
    // - `InvalidLikelihoodFlag` carrying the flag for each.
    fn unknown_flags_are_rejected() {
        for flag in [0, 3, -1, i64::MAX] {
            assert_eq!(
                LikelihoodKind::from_flag(flag),
                Err(CPUEError::InvalidLikelihoodFlag { flag })
            );
            assert!(CPUEOptions::from_flag(flag).is_err());
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("InvGauss".parse::<LikelihoodKind>(), Ok(LikelihoodKind::InverseGaussian));
        assert_eq!("LOGNORM".parse::<LikelihoodKind>(), Ok(LikelihoodKind::LogNormal));
        assert_eq!("Analytic".parse::<GradientMode>(), Ok(GradientMode::Analytic));
        assert_eq!("FD".parse::<GradientMode>(), Ok(GradientMode::FiniteDifference));
        assert!(matches!(
            "gamma".parse::<LikelihoodKind>(),
            Err(CPUEError::InvalidLikelihoodName { .. })
        ));
        assert!(matches!(
            "newton".parse::<GradientMode>(),
            Err(CPUEError::InvalidGradientMode { .. })
        ));
    }

    #[test]
    fn default_is_inverse_gaussian_with_analytic_gradient() {
        let opts = CPUEOptions::default();
        assert_eq!(opts.likelihood, LikelihoodKind::InverseGaussian);
        assert_eq!(opts.gradient, GradientMode::Analytic);
    }
}
