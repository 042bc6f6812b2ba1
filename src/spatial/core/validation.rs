//! Validation helpers for the spatial CPUE core.
//!
//! Purpose
//! -------
//! Centralize the finite/positivity/shape checks shared by the data
//! container, the kernel densities, and the optimizer-vector mapping, so
//! every entry point reports the same error variants for the same defect.
//!
//! Conventions
//! -----------
//! - Validators return the first offending index/value only.
//! - Kernel validators are strict: out-of-domain inputs are errors, never
//!   clamped or coerced.
use crate::spatial::errors::{CPUEError, CPUEResult, ParamError, ParamResult};
use ndarray::{ArrayView1, ArrayView2};

/// Absolute tolerance when comparing `dd[i][j]` with `dd[j][i]`.
pub const DISTANCE_SYMMETRY_TOL: f64 = 1e-9;

/// Number of scalar parameters preceding the latent vector in θ.
pub const N_FIXED: usize = 7;

/// Validate a positive-value kernel outcome `x`.
///
/// # Errors
/// Returns [`CPUEError::NonPositiveKernelInput`] if `x` is non-finite or ≤ 0.
pub fn validate_kernel_input(x: f64) -> CPUEResult<f64> {
    if !x.is_finite() || x <= 0.0 {
        return Err(CPUEError::NonPositiveKernelInput { value: x });
    }
    Ok(x)
}

/// Validate a kernel parameter that must be finite and strictly positive.
///
/// # Errors
/// Returns [`CPUEError::InvalidKernelParam`] naming the parameter.
pub fn validate_positive_param(name: &'static str, value: f64) -> CPUEResult<f64> {
    if !value.is_finite() {
        return Err(CPUEError::InvalidKernelParam {
            name,
            value,
            reason: "Parameter must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(CPUEError::InvalidKernelParam {
            name,
            value,
            reason: "Parameter must be strictly positive.",
        });
    }
    Ok(value)
}

/// Validate that a vector has length `n` and finite entries.
///
/// # Errors
/// - [`CPUEError::LengthMismatch`] if `values.len() != n`.
/// - [`CPUEError::NonFiniteData`] for the first NaN/±inf entry.
pub fn validate_finite_vector(
    field: &'static str, values: ArrayView1<f64>, n: usize,
) -> CPUEResult<()> {
    if values.len() != n {
        return Err(CPUEError::LengthMismatch { field, expected: n, actual: values.len() });
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(CPUEError::NonFiniteData { field, index, value });
        }
    }
    Ok(())
}

/// Validate catch observations: finite and non-negative.
///
/// # Errors
/// - [`CPUEError::NonFiniteData`] for NaN/±inf.
/// - [`CPUEError::NegativeObservation`] for values < 0.
pub fn validate_observations(y: ArrayView1<f64>) -> CPUEResult<()> {
    for (index, &value) in y.iter().enumerate() {
        if !value.is_finite() {
            return Err(CPUEError::NonFiniteData { field: "y", index, value });
        }
        if value < 0.0 {
            return Err(CPUEError::NegativeObservation { index, value });
        }
    }
    Ok(())
}

/// Validate a pairwise distance matrix for `n` locations.
///
/// Checks, in order: shape `n × n`, finite and non-negative entries, zero
/// diagonal, and symmetry within [`DISTANCE_SYMMETRY_TOL`].
///
/// # Errors
/// One of [`CPUEError::DistanceShape`], [`CPUEError::NonFiniteDistance`],
/// [`CPUEError::NegativeDistance`], [`CPUEError::NonZeroDiagonal`],
/// [`CPUEError::AsymmetricDistance`].
pub fn validate_distance_matrix(dd: ArrayView2<f64>, n: usize) -> CPUEResult<()> {
    let (rows, cols) = dd.dim();
    if rows != n || cols != n {
        return Err(CPUEError::DistanceShape { expected: n, rows, cols });
    }
    for ((row, col), &value) in dd.indexed_iter() {
        if !value.is_finite() {
            return Err(CPUEError::NonFiniteDistance { row, col, value });
        }
        if value < 0.0 {
            return Err(CPUEError::NegativeDistance { row, col, value });
        }
    }
    for i in 0..n {
        if dd[[i, i]] != 0.0 {
            return Err(CPUEError::NonZeroDiagonal { index: i, value: dd[[i, i]] });
        }
        for j in 0..i {
            let lower = dd[[i, j]];
            let upper = dd[[j, i]];
            if (lower - upper).abs() > DISTANCE_SYMMETRY_TOL {
                return Err(CPUEError::AsymmetricDistance { row: i, col: j, upper, lower });
            }
        }
    }
    Ok(())
}

/// Validate an optimizer-space vector θ for `n` locations.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != 7 + n`.
/// - [`ParamError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, n: usize) -> ParamResult<()> {
    let expected = N_FIXED + n;
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the first-failure reporting of each validator. The
    // data container tests exercise the same paths through `CPUEData::new`.
    // -------------------------------------------------------------------------

    #[test]
    fn kernel_input_rejects_zero_negative_and_nan() {
        for &x in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_kernel_input(x),
                Err(CPUEError::NonPositiveKernelInput { .. })
            ));
        }
        assert_eq!(validate_kernel_input(0.25), Ok(0.25));
    }

    #[test]
    fn positive_param_reports_name() {
        let err = validate_positive_param("shape", -2.0).unwrap_err();
        match err {
            CPUEError::InvalidKernelParam { name, value, .. } => {
                assert_eq!(name, "shape");
                assert_eq!(value, -2.0);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Distance checks fire in the documented order.
    //
    // Given
    // -----
    // - A matrix with a nonzero diagonal entry and, separately, one with an
    //   asymmetric off-diagonal pair.
    //
    // Expect
    // ------
    // - `NonZeroDiagonal` and `AsymmetricDistance` respectively.
    fn distance_matrix_reports_diagonal_and_asymmetry() {
        let diag = array![[0.0, 1.0], [1.0, 0.5]];
        assert_eq!(
            validate_distance_matrix(diag.view(), 2),
            Err(CPUEError::NonZeroDiagonal { index: 1, value: 0.5 })
        );

        let asym = array![[0.0, 1.0], [2.0, 0.0]];
        assert_eq!(
            validate_distance_matrix(asym.view(), 2),
            Err(CPUEError::AsymmetricDistance { row: 1, col: 0, upper: 1.0, lower: 2.0 })
        );

        let wrong = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0]];
        assert_eq!(
            validate_distance_matrix(wrong.view(), 2),
            Err(CPUEError::DistanceShape { expected: 2, rows: 2, cols: 3 })
        );
    }

    #[test]
    fn theta_validation_checks_length_then_finiteness() {
        let short = Array1::<f64>::zeros(N_FIXED + 1);
        assert_eq!(
            validate_theta(short.view(), 2),
            Err(ParamError::ThetaLengthMismatch { expected: 9, actual: 8 })
        );

        let mut bad = Array1::<f64>::zeros(N_FIXED + 2);
        bad[4] = f64::NEG_INFINITY;
        assert_eq!(
            validate_theta(bad.view(), 2),
            Err(ParamError::InvalidThetaInput { index: 4, value: f64::NEG_INFINITY })
        );
    }
}
