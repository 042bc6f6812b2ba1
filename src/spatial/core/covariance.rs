//! Exponential spatial covariance built from a pairwise distance matrix.
//!
//! Purpose
//! -------
//! Build the correlation matrix of the latent spatial field,
//! `cov[i][j] = exp(−a · dd[i][j])` with a unit diagonal, and its derivative
//! with respect to the decay `a` for the analytic gradient.
//!
//! Conventions
//! -----------
//! - Only the strict lower triangle of `dd` is read; each value is written
//!   to both `(i, j)` and `(j, i)`. The diagonal of `dd` is never read.
//! - No validation happens here. `CPUEData::new` is where distance matrices
//!   are checked; callers bypassing it own the consequences.
//! - `a` is not constrained. A negative decay produces correlations above
//!   one and typically an indefinite matrix, which the MVN penalty reports.
use ndarray::{Array2, ArrayView2};

/// Build the `n × n` exponential correlation matrix for decay `a`.
///
/// Parameters
/// ----------
/// - `dd`: `ArrayView2<f64>`
///   Square distance matrix; only its strict lower triangle is used.
/// - `a`: `f64`
///   Decay rate.
///
/// Returns
/// -------
/// `Array2<f64>`
///   Symmetric matrix with `1.0` on the diagonal and `exp(−a · dd[i][j])`
///   elsewhere.
pub fn build_covariance(dd: ArrayView2<f64>, a: f64) -> Array2<f64> {
    let n = dd.nrows();
    let mut cov = Array2::<f64>::eye(n);
    for i in 1..n {
        for j in 0..i {
            let c = (-a * dd[[i, j]]).exp();
            cov[[i, j]] = c;
            cov[[j, i]] = c;
        }
    }
    cov
}

/// Elementwise derivative `∂cov/∂a = −dd[i][j] · exp(−a · dd[i][j])`.
///
/// The diagonal is zero because the unit diagonal of `cov` does not depend
/// on `a`. Like [`build_covariance`], only the strict lower triangle of `dd`
/// is read.
pub fn covariance_decay_derivative(dd: ArrayView2<f64>, a: f64) -> Array2<f64> {
    let n = dd.nrows();
    let mut d_cov = Array2::<f64>::zeros((n, n));
    for i in 1..n {
        for j in 0..i {
            let d = dd[[i, j]];
            let v = -d * (-a * d).exp();
            d_cov[[i, j]] = v;
            d_cov[[j, i]] = v;
        }
    }
    d_cov
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Structural properties (symmetry, unit diagonal, entry formula).
    // - Limits a = 0 and large a.
    // - Lower-triangle-only reads.
    // - The decay derivative against a central difference.
    // -------------------------------------------------------------------------

    fn three_site_distances() -> Array2<f64> {
        array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]]
    }

    #[test]
    // Purpose
    // -------
    // Check the entry formula and structure on a small example.
    //
    // Given
    // -----
    // - Three sites on a line with unit spacing and a = 0.5.
    //
    // Expect
    // ------
    // - Unit diagonal, symmetric, off-diagonals exp(−0.5) and exp(−1).
    fn covariance_matches_exponential_formula() {
        let cov = build_covariance(three_site_distances().view(), 0.5);
        for i in 0..3 {
            assert_eq!(cov[[i, i]], 1.0);
            for j in 0..3 {
                assert_eq!(cov[[i, j]], cov[[j, i]]);
            }
        }
        assert_relative_eq!(cov[[1, 0]], (-0.5f64).exp(), max_relative = 1e-15);
        assert_relative_eq!(cov[[2, 1]], (-0.5f64).exp(), max_relative = 1e-15);
        assert_relative_eq!(cov[[2, 0]], (-1.0f64).exp(), max_relative = 1e-15);
    }

    #[test]
    fn zero_decay_gives_all_ones() {
        let cov = build_covariance(three_site_distances().view(), 0.0);
        assert!(cov.iter().all(|&c| c == 1.0));
    }

    #[test]
    // Purpose
    // -------
    // Large decay drives off-diagonal correlation to zero.
    //
    // Given
    // -----
    // - a = 1e3 with positive distances.
    //
    // Expect
    // ------
    // - The matrix equals the identity (off-diagonals underflow to 0).
    fn large_decay_approaches_identity() {
        let cov = build_covariance(three_site_distances().view(), 1e3);
        assert_eq!(cov, Array2::<f64>::eye(3));
    }

    #[test]
    // Purpose
    // -------
    // Only the strict lower triangle of `dd` contributes.
    //
    // Given
    // -----
    // - A distance matrix whose upper triangle and diagonal hold garbage.
    //
    // Expect
    // ------
    // - The result equals the one built from the clean matrix.
    fn upper_triangle_and_diagonal_are_ignored() {
        let clean = three_site_distances();
        let mut dirty = clean.clone();
        dirty[[0, 1]] = 99.0;
        dirty[[0, 2]] = -7.0;
        dirty[[1, 1]] = 3.0;
        assert_eq!(
            build_covariance(dirty.view(), 0.8),
            build_covariance(clean.view(), 0.8)
        );
    }

    #[test]
    fn decay_derivative_matches_central_difference() {
        let dd = three_site_distances();
        let (a, h) = (0.7, 1e-6);
        let analytic = covariance_decay_derivative(dd.view(), a);
        let numeric = (build_covariance(dd.view(), a + h) - build_covariance(dd.view(), a - h))
            / (2.0 * h);
        for (x, y) in analytic.iter().zip(numeric.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-8);
        }
    }
}
