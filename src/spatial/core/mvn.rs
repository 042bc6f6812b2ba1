//! Zero-mean multivariate-normal penalty on the latent spatial field.
//!
//! Purpose
//! -------
//! Evaluate `−ln N(u; 0, cov)` through a dense Cholesky factorization and
//! expose the pieces of that factorization the analytic gradient needs
//! (`cov⁻¹ u` and `cov⁻¹`).
//!
//! Key behaviors
//! -------------
//! - [`SpatialFactor::new`] copies an `ndarray` covariance into a
//!   `nalgebra::DMatrix` and factorizes it once per evaluation.
//! - The penalty is `½ uᵀcov⁻¹u + ½ ln|cov| + ½ n ln(2π)`, with
//!   `ln|cov| = 2 Σ ln L_ii`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input covariance is symmetric; only its lower triangle is copied.
//! - A failed factorization is a recoverable error of one evaluation. It is
//!   logged at `warn` level with the decay that produced it and surfaced as
//!   [`CPUEError::CovarianceNotPositiveDefinite`].
//!
//! Performance
//! -----------
//! - Factorization is O(n³) and dominates a likelihood evaluation.
//! - [`SpatialFactor::inverse`] is another O(n³) step and is only called by
//!   the gradient path.
use crate::spatial::{
    core::densities::LN_2PI,
    errors::{CPUEError, CPUEResult},
};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{Array1, Array2, ArrayView1};
use tracing::warn;

/// Cholesky factor of the spatial covariance for one evaluation.
#[derive(Debug, Clone)]
pub struct SpatialFactor {
    chol: Cholesky<f64, Dyn>,
    n: usize,
}

impl SpatialFactor {
    /// Factorize `cov`, built with decay `decay`.
    ///
    /// Parameters
    /// ----------
    /// - `cov`: `&Array2<f64>`
    ///   Symmetric `n × n` covariance.
    /// - `decay`: `f64`
    ///   Decay used to build `cov`; carried into the error and log event.
    ///
    /// Errors
    /// ------
    /// - [`CPUEError::NonFiniteCovariance`] for the first NaN/±inf entry in
    ///   the lower triangle.
    /// - [`CPUEError::CovarianceNotPositiveDefinite`] when the factorization
    ///   fails or yields a non-finite log-determinant.
    pub fn new(cov: &Array2<f64>, decay: f64) -> CPUEResult<Self> {
        let n = cov.nrows();
        for i in 0..n {
            for j in 0..=i {
                let value = cov[[i, j]];
                if !value.is_finite() {
                    return Err(CPUEError::NonFiniteCovariance { row: i, col: j, value });
                }
            }
        }

        let mut cov_nalg = DMatrix::<f64>::zeros(n, n);
        fill_dmatrix(cov, &mut cov_nalg);

        let chol = match Cholesky::new(cov_nalg) {
            Some(chol) => chol,
            None => {
                warn!(decay, n, "spatial covariance is not positive-definite");
                return Err(CPUEError::CovarianceNotPositiveDefinite { decay });
            }
        };
        let factor = SpatialFactor { chol, n };
        if !factor.log_det().is_finite() {
            warn!(decay, n, "spatial covariance log-determinant is non-finite");
            return Err(CPUEError::CovarianceNotPositiveDefinite { decay });
        }
        Ok(factor)
    }

    /// Dimension of the factorized matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// `ln|cov| = 2 Σ ln L_ii`.
    pub fn log_det(&self) -> f64 {
        2.0 * self.chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
    }

    /// Solve `cov · α = u` for `α`.
    ///
    /// # Errors
    /// [`CPUEError::LatentDimMismatch`] if `u.len() != n`.
    pub fn solve(&self, u: ArrayView1<f64>) -> CPUEResult<Array1<f64>> {
        if u.len() != self.n {
            return Err(CPUEError::LatentDimMismatch { expected: self.n, actual: u.len() });
        }
        let rhs = DVector::from_iterator(self.n, u.iter().copied());
        let alpha = self.chol.solve(&rhs);
        Ok(alpha.iter().copied().collect())
    }

    /// Dense `cov⁻¹` as an `ndarray` matrix.
    pub fn inverse(&self) -> Array2<f64> {
        let inv = self.chol.inverse();
        Array2::from_shape_fn((self.n, self.n), |(i, j)| inv[(i, j)])
    }

    /// Negative log-density of `N(0, cov)` at `u`.
    ///
    /// # Errors
    /// [`CPUEError::LatentDimMismatch`] if `u.len() != n`.
    pub fn neg_log_density(&self, u: ArrayView1<f64>) -> CPUEResult<f64> {
        let alpha = self.solve(u)?;
        Ok(self.quadratic_penalty(u, alpha.view()))
    }

    /// Penalty from an already solved `α = cov⁻¹u`.
    pub(crate) fn quadratic_penalty(&self, u: ArrayView1<f64>, alpha: ArrayView1<f64>) -> f64 {
        0.5 * u.dot(&alpha) + 0.5 * self.log_det() + 0.5 * self.n as f64 * LN_2PI
    }
}

/// Factorize `cov` and return `−ln N(u; 0, cov)` in one call.
///
/// # Errors
/// See [`SpatialFactor::new`] and [`SpatialFactor::neg_log_density`].
pub fn mvn_neg_log_density(cov: &Array2<f64>, u: ArrayView1<f64>, decay: f64) -> CPUEResult<f64> {
    SpatialFactor::new(cov, decay)?.neg_log_density(u)
}

// ---- Helper methods ----

/// Copy the lower triangle of a symmetric `ndarray` matrix into a
/// preallocated `DMatrix`, mirroring it column by column.
fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    let n = src.ncols();
    for j in 0..n {
        dst[(j, j)] = src[[j, j]];
        for i in (j + 1)..n {
            let v = src[[i, j]];
            dst[(i, j)] = v;
            dst[(j, i)] = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::core::covariance::build_covariance;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The penalty against hand-computed MVN log-densities (n = 2, n = 3).
    // - Solve and inverse consistency.
    // - Factorization failures (a = 0 all-ones, negative decay, NaN entry).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reproduce the three-site reference case with a zero latent vector.
    //
    // Given
    // -----
    // - dd = [[0,1,2],[1,0,1],[2,1,0]], a = 0.5, u = 0.
    // - The determinant of the correlation matrix by cofactor expansion:
    //   with r = e^{−0.5}, s = e^{−1}, |C| = 1 + 2 r² s − 2 r² − s².
    //
    // Expect
    // ------
    // - Penalty equals ½ ln|C| + (3/2) ln(2π).
    fn three_site_penalty_matches_reference_determinant() {
        let dd = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        let cov = build_covariance(dd.view(), 0.5);
        let r = (-0.5f64).exp();
        let s = (-1.0f64).exp();
        let det = 1.0 + 2.0 * r * r * s - 2.0 * r * r - s * s;
        let expected = 0.5 * det.ln() + 1.5 * LN_2PI;

        let u = Array1::<f64>::zeros(3);
        let got = mvn_neg_log_density(&cov, u.view(), 0.5).unwrap();
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the quadratic form with a non-zero latent vector.
    //
    // Given
    // -----
    // - C = [[1, ρ], [ρ, 1]] with ρ = 0.3 and u = (0.5, −1.2).
    //
    // Expect
    // ------
    // - uᵀC⁻¹u = (u₀² − 2ρu₀u₁ + u₁²)/(1 − ρ²), |C| = 1 − ρ².
    fn bivariate_penalty_matches_closed_form() {
        let rho: f64 = 0.3;
        let cov = array![[1.0, rho], [rho, 1.0]];
        let u = array![0.5, -1.2];
        let quad = (u[0] * u[0] - 2.0 * rho * u[0] * u[1] + u[1] * u[1]) / (1.0 - rho * rho);
        let expected = 0.5 * quad + 0.5 * (1.0 - rho * rho).ln() + LN_2PI;
        let got = mvn_neg_log_density(&cov, u.view(), 1.0).unwrap();
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    fn solve_and_inverse_agree() {
        let dd = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        let cov = build_covariance(dd.view(), 0.9);
        let factor = SpatialFactor::new(&cov, 0.9).unwrap();
        let u = array![0.2, -0.4, 1.1];
        let alpha = factor.solve(u.view()).unwrap();
        let via_inverse = factor.inverse().dot(&u);
        for (x, y) in alpha.iter().zip(via_inverse.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
        let back = cov.dot(&alpha);
        for (x, y) in back.iter().zip(u.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Singular and indefinite matrices surface as recoverable errors.
    //
    // Given
    // -----
    // - a = 0 (all-ones, rank one) for two distinct sites.
    // - a = −3 (off-diagonal correlations above one).
    //
    // Expect
    // ------
    // - `CovarianceNotPositiveDefinite` carrying the decay in both cases.
    fn singular_and_indefinite_covariances_are_reported() {
        let dd = array![[0.0, 1.0], [1.0, 0.0]];
        for &a in &[0.0, -3.0] {
            let cov = build_covariance(dd.view(), a);
            assert_eq!(
                SpatialFactor::new(&cov, a).unwrap_err(),
                CPUEError::CovarianceNotPositiveDefinite { decay: a }
            );
        }
    }

    #[test]
    fn non_finite_entry_and_wrong_latent_length_are_reported() {
        let cov = array![[1.0, 0.0], [f64::NAN, 1.0]];
        assert!(matches!(
            SpatialFactor::new(&cov, 1.0),
            Err(CPUEError::NonFiniteCovariance { row: 1, col: 0, .. })
        ));

        let factor = SpatialFactor::new(&Array2::<f64>::eye(2), 1.0).unwrap();
        let u = array![1.0, 2.0, 3.0];
        assert_eq!(
            factor.neg_log_density(u.view()).unwrap_err(),
            CPUEError::LatentDimMismatch { expected: 2, actual: 3 }
        );
    }
}
