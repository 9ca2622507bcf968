//! Settings for numerical integrators

use std::ops::Index;

use bon::Builder;

use crate::Float;

#[derive(Builder, Clone, Debug, Default)]
/// Settings for the numerical integrators.
///
/// Every field is optional; `None` selects the method's default, which
/// should be suitable for most problems.
pub struct Settings {
    /// The rounding unit, typically machine epsilon
    pub uround: Option<Float>,
    /// safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable. Negative values
    /// are not accepted.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the `hinit` heuristic.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Number of steps before performing a stiffness test.
    pub nstiff: Option<usize>,
}

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Number of entries for a vector tolerance, `None` for a scalar one.
    pub fn n_components(&self) -> Option<usize> {
        match self {
            Tolerance::Scalar(_) => None,
            Tolerance::Vector(vs) => Some(vs.len()),
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tolerance_indexes_every_component() {
        let tol = Tolerance::from(1e-6);
        assert_eq!(tol[0], 1e-6);
        assert_eq!(tol[7], 1e-6);
        assert_eq!(tol.n_components(), None);
    }

    #[test]
    fn vector_tolerance_keeps_components() {
        let tol = Tolerance::from([1e-3, 1e-9]);
        assert_eq!(tol[1], 1e-9);
        assert_eq!(tol.n_components(), Some(2));
    }

    #[test]
    fn settings_builder_leaves_unset_fields_empty() {
        let settings = Settings::builder().nmax(10).build();
        assert_eq!(settings.nmax, Some(10));
        assert!(settings.h0.is_none());
        assert!(settings.beta.is_none());
    }
}
