//! Read-only diagnostics produced alongside the negative log-likelihood.
use ndarray::{Array1, Array2};

/// Additive breakdown of the negative log-likelihood.
///
/// `total() = spatial_penalty + zero_mass + positive_mass + kernel`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NllComponents {
    /// `−ln N(u; 0, cov)`.
    pub spatial_penalty: f64,
    /// `Σ_{y=0} −ln(zero_prob)`.
    pub zero_mass: f64,
    /// `Σ_{y>0} −ln(1 − zero_prob)`.
    pub positive_mass: f64,
    /// `Σ_{y>0} −ln f(y | pred, sigma)`.
    pub kernel: f64,
}

impl NllComponents {
    pub fn total(&self) -> f64 {
        self.spatial_penalty + self.zero_mass + self.positive_mass + self.kernel
    }
}

/// Outcome of one likelihood evaluation: the objective plus the derived
/// quantities a caller may want to inspect after fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct CPUEReport {
    /// Negative log-likelihood; equals `components.total()`.
    pub nll: f64,
    pub components: NllComponents,
    pub zero_prob: f64,
    pub sigma: f64,
    pub sigma_space: f64,
    /// Linear predictor per observation.
    pub pred: Array1<f64>,
    /// Spatial covariance used for the penalty.
    pub cov: Array2<f64>,
    /// Latent effects as supplied.
    pub u: Array1<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_all_components() {
        let c =
            NllComponents { spatial_penalty: 1.5, zero_mass: 0.25, positive_mass: 2.0, kernel: -0.75 };
        assert_eq!(c.total(), 3.0);
        assert_eq!(NllComponents::default().total(), 0.0);
    }
}
