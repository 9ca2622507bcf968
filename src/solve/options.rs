//! Options for solve_ivp

use bon::Builder;

use crate::{Float, methods::settings::Tolerance};

#[derive(Builder, Clone, Debug)]
/// Options for solve_ivp similar to SciPy
pub struct IVPOptions {
    /// Relative tolerance for error estimation. Default: `1e-3`.
    #[builder(default = Tolerance::Scalar(1e-3), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation. Default: `1e-6`.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub atol: Tolerance,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Number of accepted steps between stiffness tests.
    pub nstiff: Option<usize>,
    /// Points where the solution is requested. When provided, the solution is
    /// sampled at exactly these abscissae using the per-step dense output and
    /// step endpoints are not recorded.
    pub t_eval: Option<Vec<Float>>,
    /// Keep the dense output of every accepted step so the solution can be
    /// evaluated anywhere in the integration span afterwards.
    #[builder(default = false)]
    pub dense_output: bool,
    /// Convenience alias for the initial step suggestion (maps to `settings.h0`).
    pub first_step: Option<Float>,
    /// Convenience alias for maximum step size (maps to `settings.hmax`).
    pub max_step: Option<Float>,
}

impl Default for IVPOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_scipy() {
        let options = IVPOptions::default();
        assert_eq!(options.rtol, Tolerance::Scalar(1e-3));
        assert_eq!(options.atol, Tolerance::Scalar(1e-6));
        assert!(!options.dense_output);
        assert!(options.t_eval.is_none());
    }

    #[test]
    fn tolerances_accept_scalars_and_arrays() {
        let options = IVPOptions::builder().rtol(1e-9).atol([1e-9, 1e-12]).build();
        assert_eq!(options.rtol, Tolerance::Scalar(1e-9));
        assert_eq!(options.atol, Tolerance::Vector(vec![1e-9, 1e-12]));
    }
}
