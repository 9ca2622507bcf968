//! Interpolation inside a single accepted step.

use crate::Float;

/// Trait for interpolating the solution within a step.
pub trait Interpolate {
    /// Interpolate the solution at the given abscissa `xi`.
    fn interpolate(&self, xi: Float, yi: &mut [Float]);

    /// Copy of the step's dense-output coefficients together with the left
    /// end `xold` and step size `h` they were computed for.
    fn get_cont(&self) -> (Vec<Float>, Float, Float);
}
