//! Linear predictor for the positive-catch kernel.
use ndarray::{Array1, ArrayView1, Zip};

/// Assemble `pred[i] = intercept + beta_lat·lat[i] + beta_lon·lon[i] +
/// sigma_space·u[i]`.
///
/// Inputs are assumed to share one length; `CPUEData::new` and
/// `CPUEParams::from_theta` enforce that upstream.
pub fn linear_predictor(
    lat: ArrayView1<f64>, lon: ArrayView1<f64>, u: ArrayView1<f64>, intercept: f64,
    beta_lat: f64, beta_lon: f64, sigma_space: f64,
) -> Array1<f64> {
    Zip::from(lat)
        .and(lon)
        .and(u)
        .map_collect(|&la, &lo, &ui| intercept + beta_lat * la + beta_lon * lo + sigma_space * ui)
}
