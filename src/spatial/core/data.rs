//! Validated observation container for the spatial CPUE model.
//!
//! Purpose
//! -------
//! Hold the catch observations, their coordinates, and the pairwise distance
//! matrix in one immutable value whose invariants downstream code can rely
//! on without re-checking.
//!
//! Key behaviors
//! -------------
//! - [`CPUEData::new`] validates every input once, at the boundary where raw
//!   arrays enter the model.
//! - Zero and positive observation counts are computed at construction and
//!   exposed for diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - `y`, `lat`, `lon` have the same non-zero length `n`.
//! - `y` is finite and non-negative; exact `0.0` marks a zero catch.
//! - `dd` is `n × n`, finite, non-negative, zero on the diagonal, and
//!   symmetric within
//!   [`DISTANCE_SYMMETRY_TOL`](crate::spatial::core::validation::DISTANCE_SYMMETRY_TOL).
//!
//! Conventions
//! -----------
//! - Coordinates are used as given; no projection or centering is applied.
//! - Distances are produced upstream; this module never computes them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path plus each rejection path of
//!   `CPUEData::new`, in the order the checks run.
use crate::spatial::{
    core::validation::{validate_distance_matrix, validate_finite_vector, validate_observations},
    errors::{CPUEError, CPUEResult},
};
use ndarray::{Array1, Array2};

/// `CPUEData` — validated catch observations at spatial locations.
///
/// Fields
/// ------
/// - `y`: `Array1<f64>`
///   Catch per unit effort; finite and ≥ 0, with `0.0` meaning no catch.
/// - `lat`, `lon`: `Array1<f64>`
///   Coordinates parallel to `y`.
/// - `dd`: `Array2<f64>`
///   Pairwise distances between the `n` locations.
///
/// Invariants
/// ----------
/// - See the module docs. Fields are private so the invariants hold for the
///   lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct CPUEData {
    y: Array1<f64>,
    lat: Array1<f64>,
    lon: Array1<f64>,
    dd: Array2<f64>,
    n_zero: usize,
}

impl CPUEData {
    /// Construct a validated [`CPUEData`].
    ///
    /// Parameters
    /// ----------
    /// - `y`: `Array1<f64>`
    ///   Observations. Must be non-empty, finite and non-negative.
    /// - `lat`, `lon`: `Array1<f64>`
    ///   Coordinates with `y.len()` finite entries each.
    /// - `dd`: `Array2<f64>`
    ///   `n × n` distance matrix.
    ///
    /// Errors
    /// ------
    /// - `CPUEError::EmptyData` when `y` is empty.
    /// - `CPUEError::NonFiniteData` / `CPUEError::NegativeObservation` for
    ///   the first invalid observation.
    /// - `CPUEError::LengthMismatch` / `CPUEError::NonFiniteData` for the
    ///   coordinate vectors.
    /// - Distance-matrix errors from
    ///   [`validate_distance_matrix`](crate::spatial::core::validation::validate_distance_matrix).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use cpue_spatial::spatial::core::data::CPUEData;
    /// let data = CPUEData::new(
    ///     array![0.0, 1.5],
    ///     array![10.0, 11.0],
    ///     array![-3.0, -3.5],
    ///     array![[0.0, 0.7], [0.7, 0.0]],
    /// )
    /// .unwrap();
    /// assert_eq!(data.n(), 2);
    /// assert_eq!(data.n_zero(), 1);
    /// ```
    pub fn new(
        y: Array1<f64>, lat: Array1<f64>, lon: Array1<f64>, dd: Array2<f64>,
    ) -> CPUEResult<Self> {
        if y.is_empty() {
            return Err(CPUEError::EmptyData);
        }
        let n = y.len();
        validate_observations(y.view())?;
        validate_finite_vector("lat", lat.view(), n)?;
        validate_finite_vector("lon", lon.view(), n)?;
        validate_distance_matrix(dd.view(), n)?;

        let n_zero = y.iter().filter(|&&v| v == 0.0).count();
        Ok(CPUEData { y, lat, lon, dd, n_zero })
    }

    /// Number of observations / locations.
    pub fn n(&self) -> usize {
        self.y.len()
    }

    /// Number of exact-zero observations.
    pub fn n_zero(&self) -> usize {
        self.n_zero
    }

    /// Number of strictly positive observations.
    pub fn n_positive(&self) -> usize {
        self.n() - self.n_zero
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn lat(&self) -> &Array1<f64> {
        &self.lat
    }

    pub fn lon(&self) -> &Array1<f64> {
        &self.lon
    }

    pub fn dd(&self) -> &Array2<f64> {
        &self.dd
    }
}
