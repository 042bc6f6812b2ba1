//! Model parameters for the spatial CPUE likelihood and their optimizer-space
//! mapping.
//!
//! The optimizer sees one flat vector
//!
//! ```text
//! θ = [ intercept | theta | beta_lat | beta_lon | logsigma | logsigma_space | a | u(0..n) ]
//! ```
//!
//! of length `7 + n`. Every coordinate is unconstrained: `zero_prob`,
//! `sigma` and `sigma_space` are recovered through the logistic and
//! exponential maps, and the decay `a` is passed through untouched. Keeping
//! `a` unconstrained means a caller can drive it negative; the covariance
//! factorization then reports the failure for that evaluation.
use crate::{
    optimization::numerical_stability::transformations::safe_logistic,
    spatial::{
        core::validation::{validate_theta, N_FIXED},
        errors::ParamResult,
    },
};
use ndarray::{s, Array1, ArrayView1};

/// Position of `intercept` in θ.
pub const IDX_INTERCEPT: usize = 0;
/// Position of the zero-inflation logit `theta` in θ.
pub const IDX_THETA: usize = 1;
/// Position of `beta_lat` in θ.
pub const IDX_BETA_LAT: usize = 2;
/// Position of `beta_lon` in θ.
pub const IDX_BETA_LON: usize = 3;
/// Position of `logsigma` in θ.
pub const IDX_LOGSIGMA: usize = 4;
/// Position of `logsigma_space` in θ.
pub const IDX_LOGSIGMA_SPACE: usize = 5;
/// Position of the decay `a` in θ.
pub const IDX_DECAY: usize = 6;

/// Parameters of one likelihood evaluation.
///
/// Fields are stored on the optimizer scale; the derived quantities are
/// available through [`zero_prob`](Self::zero_prob), [`sigma`](Self::sigma)
/// and [`sigma_space`](Self::sigma_space).
#[derive(Debug, Clone, PartialEq)]
pub struct CPUEParams {
    pub intercept: f64,
    /// Logit of the zero-catch probability.
    pub theta: f64,
    pub beta_lat: f64,
    pub beta_lon: f64,
    /// `ln sigma`; kernel dispersion on the log scale.
    pub logsigma: f64,
    /// `ln sigma_space`; scale of the latent field in the predictor.
    pub logsigma_space: f64,
    /// Exponential covariance decay.
    pub a: f64,
    /// Latent spatial effects, one per location.
    pub u: Array1<f64>,
}

impl CPUEParams {
    /// Build parameters from an optimizer vector θ for `n` locations.
    ///
    /// ### Requirements
    /// - `theta.len() == 7 + n`
    /// - every entry finite
    ///
    /// ### Errors
    /// `ParamError::ThetaLengthMismatch` or `ParamError::InvalidThetaInput`.
    pub fn from_theta(theta: ArrayView1<f64>, n: usize) -> ParamResult<Self> {
        validate_theta(theta, n)?;
        Ok(CPUEParams {
            intercept: theta[IDX_INTERCEPT],
            theta: theta[IDX_THETA],
            beta_lat: theta[IDX_BETA_LAT],
            beta_lon: theta[IDX_BETA_LON],
            logsigma: theta[IDX_LOGSIGMA],
            logsigma_space: theta[IDX_LOGSIGMA_SPACE],
            a: theta[IDX_DECAY],
            u: theta.slice(s![N_FIXED..]).to_owned(),
        })
    }

    /// Flatten back to the optimizer layout; inverse of [`from_theta`](Self::from_theta).
    pub fn to_theta(&self) -> Array1<f64> {
        let mut out = Array1::<f64>::zeros(N_FIXED + self.u.len());
        out[IDX_INTERCEPT] = self.intercept;
        out[IDX_THETA] = self.theta;
        out[IDX_BETA_LAT] = self.beta_lat;
        out[IDX_BETA_LON] = self.beta_lon;
        out[IDX_LOGSIGMA] = self.logsigma;
        out[IDX_LOGSIGMA_SPACE] = self.logsigma_space;
        out[IDX_DECAY] = self.a;
        out.slice_mut(s![N_FIXED..]).assign(&self.u);
        out
    }

    /// Number of latent effects (equals the number of locations).
    pub fn n(&self) -> usize {
        self.u.len()
    }

    /// `zero_prob = 1 / (1 + exp(−theta))`, in (0, 1).
    pub fn zero_prob(&self) -> f64 {
        safe_logistic(self.theta)
    }

    /// `sigma = exp(logsigma)`.
    pub fn sigma(&self) -> f64 {
        self.logsigma.exp()
    }

    /// `sigma_space = exp(logsigma_space)`.
    pub fn sigma_space(&self) -> f64 {
        self.logsigma_space.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::errors::ParamError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The named fields land in the documented θ slots.
    //
    // Given
    // -----
    // - θ = (0, 1, 2, 3, 4, 5, 6, 7, 8) for n = 2.
    //
    // Expect
    // ------
    // - Each field picks up its index; `u = (7, 8)`; `to_theta` restores θ.
    fn from_theta_follows_layout_and_round_trips() {
        let theta = Array1::from_iter((0..9).map(|k| k as f64));
        let p = CPUEParams::from_theta(theta.view(), 2).unwrap();
        assert_eq!(p.intercept, 0.0);
        assert_eq!(p.theta, 1.0);
        assert_eq!(p.beta_lat, 2.0);
        assert_eq!(p.beta_lon, 3.0);
        assert_eq!(p.logsigma, 4.0);
        assert_eq!(p.logsigma_space, 5.0);
        assert_eq!(p.a, 6.0);
        assert_eq!(p.u, array![7.0, 8.0]);
        assert_eq!(p.to_theta(), theta);
    }

    #[test]
    fn derived_quantities_stay_in_their_domains() {
        for &t in &[-30.0, -1.0, 0.0, 2.0, 30.0] {
            let mut theta = Array1::<f64>::zeros(N_FIXED + 1);
            theta[IDX_THETA] = t;
            theta[IDX_LOGSIGMA] = t / 10.0;
            theta[IDX_LOGSIGMA_SPACE] = -t / 10.0;
            let p = CPUEParams::from_theta(theta.view(), 1).unwrap();
            let zp = p.zero_prob();
            assert!(zp > 0.0 && zp < 1.0, "zero_prob out of range: {zp}");
            assert!(p.sigma() > 0.0);
            assert!(p.sigma_space() > 0.0);
        }
        let p = CPUEParams::from_theta(Array1::<f64>::zeros(N_FIXED).view(), 0).unwrap();
        assert_relative_eq!(p.zero_prob(), 0.5);
        assert_relative_eq!(p.sigma(), 1.0);
    }

    #[test]
    fn from_theta_rejects_wrong_length() {
        let theta = Array1::<f64>::zeros(N_FIXED + 2);
        assert_eq!(
            CPUEParams::from_theta(theta.view(), 3).unwrap_err(),
            ParamError::ThetaLengthMismatch { expected: 10, actual: 9 }
        );
    }
}
