//! Analytic gradient of the spatial CPUE negative log-likelihood.
//!
//! With `r_i = ∂k_i/∂pred_i` for positive catches (0 for zero catches),
//! `α = cov⁻¹u` and `D = ∂cov/∂a`:
//!
//! - `∂/∂intercept = Σ r_i`, `∂/∂beta_lat = Σ r_i·lat_i`,
//!   `∂/∂beta_lon = Σ r_i·lon_i`
//! - `∂/∂theta = Σ_{y=0} −(1 − zero_prob) + Σ_{y>0} zero_prob`
//! - `∂/∂logsigma = Σ_{y>0} ∂k_i/∂logsigma`
//! - `∂/∂logsigma_space = σ_space · Σ r_i·u_i`
//! - `∂/∂a = ½ tr(cov⁻¹ D) − ½ αᵀDα`
//! - `∂/∂u = α + σ_space · r`
//!
//! The layout of the returned vector matches θ.
use crate::{
    optimization::numerical_stability::transformations::safe_logistic,
    spatial::{
        core::{
            covariance::{build_covariance, covariance_decay_derivative},
            data::CPUEData,
            densities::neg_log_kernel_derivatives,
            mvn::SpatialFactor,
            params::{
                CPUEParams, IDX_BETA_LAT, IDX_BETA_LON, IDX_DECAY, IDX_INTERCEPT, IDX_LOGSIGMA,
                IDX_LOGSIGMA_SPACE, IDX_THETA,
            },
            predictor::linear_predictor,
            validation::N_FIXED,
        },
        errors::{CPUEError, CPUEResult},
        models::cpue::CPUEModel,
    },
};
use ndarray::{s, Array1};

impl CPUEModel {
    /// Gradient `∂NLL/∂θ` over the full optimizer vector.
    ///
    /// # Errors
    /// Same failure modes as [`CPUEModel::evaluate`]: dimension mismatch,
    /// covariance factorization failure, kernel domain errors.
    pub fn gradient(&self, params: &CPUEParams, data: &CPUEData) -> CPUEResult<Array1<f64>> {
        let n = data.n();
        if params.n() != n {
            return Err(CPUEError::LatentDimMismatch { expected: n, actual: params.n() });
        }
        let sigma = params.sigma();
        let sigma_space = params.sigma_space();
        let zero_prob = params.zero_prob();
        let one_minus_zero_prob = safe_logistic(-params.theta);

        let dd = data.dd().view();
        let cov = build_covariance(dd, params.a);
        let factor = SpatialFactor::new(&cov, params.a)?;
        let alpha = factor.solve(params.u.view())?;

        let pred = linear_predictor(
            data.lat().view(),
            data.lon().view(),
            params.u.view(),
            params.intercept,
            params.beta_lat,
            params.beta_lon,
            sigma_space,
        );

        let mut grad = Array1::<f64>::zeros(N_FIXED + n);
        let mut r = Array1::<f64>::zeros(n);
        for (i, &y) in data.y().iter().enumerate() {
            if y == 0.0 {
                grad[IDX_THETA] -= one_minus_zero_prob;
            } else {
                grad[IDX_THETA] += zero_prob;
                let d = neg_log_kernel_derivatives(self.options.likelihood, y, pred[i], sigma)?;
                r[i] = d.d_pred;
                grad[IDX_LOGSIGMA] += d.d_logsigma;
            }
        }

        grad[IDX_INTERCEPT] = r.sum();
        grad[IDX_BETA_LAT] = r.dot(data.lat());
        grad[IDX_BETA_LON] = r.dot(data.lon());
        grad[IDX_LOGSIGMA_SPACE] = sigma_space * r.dot(&params.u);

        // tr(cov⁻¹ D) = Σ_ij (cov⁻¹)_ij D_ij since D is symmetric.
        let d_cov = covariance_decay_derivative(dd, params.a);
        let trace = (&factor.inverse() * &d_cov).sum();
        let quad = alpha.dot(&d_cov.dot(&alpha));
        grad[IDX_DECAY] = 0.5 * trace - 0.5 * quad;

        grad.slice_mut(s![N_FIXED..]).assign(&(&alpha + &(&r * sigma_space)));
        Ok(grad)
    }
}
