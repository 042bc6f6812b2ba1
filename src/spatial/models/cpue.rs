//! Spatial zero-inflated CPUE model: objective, diagnostics, and the
//! optimizer interface.
//!
//! This module wires the core building blocks into one evaluation:
//!
//! 1. build `cov` from `dd` and the decay `a`, factorize it, and evaluate the
//!    MVN penalty on `u`;
//! 2. assemble `pred = intercept + β_lat·lat + β_lon·lon + σ_space·u`;
//! 3. add `softplus(−θ)` for every zero catch, and `softplus(θ)` plus the
//!    negative kernel log-density for every positive catch.
//!
//! `softplus(−θ) = −ln(zero_prob)` and `softplus(θ) = −ln(1 − zero_prob)`
//! for `zero_prob = logistic(θ)`, so the zero-inflation terms stay finite for
//! any finite logit.
//!
//! [`CPUEModel`] is stateless apart from its options; every call allocates
//! its own covariance and predictor, so one model can serve concurrent
//! evaluations.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, Grad, LogLikelihood, Theta},
        numerical_stability::transformations::safe_softplus,
    },
    spatial::{
        core::{
            covariance::build_covariance,
            data::CPUEData,
            densities::neg_log_kernel,
            mvn::SpatialFactor,
            options::{CPUEOptions, GradientMode, LikelihoodKind},
            params::CPUEParams,
            predictor::linear_predictor,
            report::{CPUEReport, NllComponents},
            validation::validate_theta,
        },
        errors::{CPUEError, CPUEResult},
    },
};
use tracing::debug;

/// Spatial zero-inflated CPUE likelihood.
///
/// # Notes
/// - Holds only configuration; data and parameters are passed per call.
/// - Implements [`LogLikelihood`] with `ℓ(θ) = −NLL(θ)`, so it plugs into the
///   argmin adapter directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CPUEModel {
    pub options: CPUEOptions,
}

impl CPUEModel {
    pub fn new(options: CPUEOptions) -> Self {
        CPUEModel { options }
    }

    /// Model for an integer likelihood flag (1 = inverse Gaussian,
    /// 2 = log-normal) with the analytic gradient.
    ///
    /// # Errors
    /// [`CPUEError::InvalidLikelihoodFlag`] for any other flag.
    pub fn from_flag(flag: i64) -> CPUEResult<Self> {
        Ok(CPUEModel::new(CPUEOptions::from_flag(flag)?))
    }

    pub fn likelihood(&self) -> LikelihoodKind {
        self.options.likelihood
    }

    /// Evaluate the negative log-likelihood and its diagnostics.
    ///
    /// ## Steps
    /// 1. Check that `params.u` has one entry per location.
    /// 2. Build and factorize the spatial covariance; evaluate the penalty.
    /// 3. Assemble the linear predictor.
    /// 4. Accumulate zero-mass, positive-mass and kernel terms.
    ///
    /// ## Errors
    /// - [`CPUEError::LatentDimMismatch`] if `params.n() != data.n()`.
    /// - [`CPUEError::CovarianceNotPositiveDefinite`] /
    ///   [`CPUEError::NonFiniteCovariance`] from the factorization.
    /// - Kernel domain errors (e.g., an inverse-Gaussian mean overflowing).
    /// - [`CPUEError::NonFiniteObjective`] if the total is NaN/±inf.
    pub fn evaluate(&self, params: &CPUEParams, data: &CPUEData) -> CPUEResult<CPUEReport> {
        let n = data.n();
        if params.n() != n {
            return Err(CPUEError::LatentDimMismatch { expected: n, actual: params.n() });
        }
        let sigma = params.sigma();
        let sigma_space = params.sigma_space();

        let cov = build_covariance(data.dd().view(), params.a);
        let factor = SpatialFactor::new(&cov, params.a)?;
        let spatial_penalty = factor.neg_log_density(params.u.view())?;

        let pred = linear_predictor(
            data.lat().view(),
            data.lon().view(),
            params.u.view(),
            params.intercept,
            params.beta_lat,
            params.beta_lon,
            sigma_space,
        );

        let neg_log_zero = safe_softplus(-params.theta);
        let neg_log_positive = safe_softplus(params.theta);
        let mut components = NllComponents { spatial_penalty, ..NllComponents::default() };
        for (&y, &p) in data.y().iter().zip(pred.iter()) {
            if y == 0.0 {
                components.zero_mass += neg_log_zero;
            } else {
                components.positive_mass += neg_log_positive;
                components.kernel += neg_log_kernel(self.options.likelihood, y, p, sigma)?;
            }
        }

        let nll = components.total();
        if !nll.is_finite() {
            return Err(CPUEError::NonFiniteObjective { value: nll });
        }
        debug!(
            n,
            nll,
            likelihood = self.options.likelihood.name(),
            "evaluated spatial CPUE negative log-likelihood"
        );

        Ok(CPUEReport {
            nll,
            components,
            zero_prob: params.zero_prob(),
            sigma,
            sigma_space,
            pred,
            cov,
            u: params.u.clone(),
        })
    }

    /// Negative log-likelihood only.
    ///
    /// # Errors
    /// Same as [`evaluate`](Self::evaluate).
    pub fn nll(&self, params: &CPUEParams, data: &CPUEData) -> CPUEResult<f64> {
        Ok(self.evaluate(params, data)?.nll)
    }
}

/// Evaluate the objective for an integer likelihood flag.
///
/// This is the flag-driven entry point: `flag = 1` selects the inverse
/// Gaussian kernel and `flag = 2` the log-normal kernel. Any other flag is a
/// configuration error rather than a placeholder objective.
///
/// # Errors
/// - [`CPUEError::InvalidLikelihoodFlag`] for flags outside {1, 2}.
/// - Everything [`CPUEModel::evaluate`] can return.
///
/// # Examples
/// ```rust
/// # use ndarray::array;
/// # use cpue_spatial::spatial::{negative_log_likelihood, CPUEData, CPUEParams};
/// let data = CPUEData::new(
///     array![0.0, 1.2, 0.4],
///     array![0.0, 0.5, 1.0],
///     array![0.0, 0.3, 0.1],
///     array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]],
/// )
/// .unwrap();
/// let theta = array![0.1, -0.5, 0.2, -0.1, 0.0, -1.0, 0.5, 0.1, -0.2, 0.3];
/// let params = CPUEParams::from_theta(theta.view(), data.n()).unwrap();
///
/// let report = negative_log_likelihood(2, &data, &params).unwrap();
/// assert!(report.nll.is_finite());
/// assert!(negative_log_likelihood(3, &data, &params).is_err());
/// ```
pub fn negative_log_likelihood(
    flag: i64, data: &CPUEData, params: &CPUEParams,
) -> CPUEResult<CPUEReport> {
    CPUEModel::from_flag(flag)?.evaluate(params, data)
}

impl LogLikelihood for CPUEModel {
    type Data = CPUEData;

    /// Log-likelihood `ℓ(θ) = −NLL(θ)` at the optimizer vector `θ`.
    ///
    /// # Errors
    /// - Parameter-layout errors from [`CPUEParams::from_theta`].
    /// - Model errors from [`CPUEModel::evaluate`], converted to `OptError`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let params = CPUEParams::from_theta(theta.view(), data.n())?;
        Ok(-self.nll(&params, data)?)
    }

    /// Validate θ: length `7 + n` and finite entries.
    ///
    /// Not run by `value`/`grad` (those re-map θ and fail the same way);
    /// callers run it once on the starting point, usually via
    /// [`ArgMinAdapter::check`](crate::optimization::loglik_optimizer::ArgMinAdapter::check).
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), data.n())?;
        Ok(())
    }

    /// Analytic gradient `∇ℓ(θ) = −∇NLL(θ)`.
    ///
    /// Under [`GradientMode::FiniteDifference`] this reports
    /// `GradientNotImplemented` so the adapter differentiates numerically.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        match self.options.gradient {
            GradientMode::FiniteDifference => Err(OptError::GradientNotImplemented),
            GradientMode::Analytic => {
                let params = CPUEParams::from_theta(theta.view(), data.n())?;
                Ok(-self.gradient(&params, data)?)
            }
        }
    }
}
