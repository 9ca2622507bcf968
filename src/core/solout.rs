//! User defined callback hook executed after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    /// Proceed with integration as normal.
    Continue,
    /// Stop integration and return control to the caller.
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop (with `xold == x` and no
/// interpolator) and after every accepted step. The arguments are:
/// - `xold`: the left end of the last accepted step,
/// - `x`: the new abscissa after the accepted step,
/// - `y`: the integrator's current solution at `x`,
/// - `interpolator`: dense output valid on `[xold, x]`, present whenever the
///   integrator was asked to compute dense-output coefficients.
///
/// # Example
///
/// ```
/// use forced_pendulum::{Float, prelude::*};
///
/// /// Stops the integration once the first component turns negative.
/// struct StopWhenNegative;
///
/// impl SolOut for StopWhenNegative {
///     fn solout<I: Interpolate>(
///         &mut self,
///         _xold: Float,
///         _x: Float,
///         y: &[Float],
///         _interpolator: Option<&I>,
///     ) -> ControlFlag {
///         if y[0] < 0.0 { ControlFlag::Interrupt } else { ControlFlag::Continue }
///     }
/// }
/// ```
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag;
}

/// No-op callback, used when the caller does not need step notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSolOut;

impl SolOut for NoSolOut {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        _x: Float,
        _y: &[Float],
        _interpolator: Option<&I>,
    ) -> ControlFlag {
        ControlFlag::Continue
    }
}
