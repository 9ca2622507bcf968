#![allow(dead_code)]

use forced_pendulum::{Float, prelude::*};

/// Simple harmonic oscillator y'' = -y, with y(t) = cos t for y0 = [1, 0].
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

/// Tight tolerances with dense output enabled.
pub fn default_opts_dense() -> IVPOptions {
    IVPOptions::builder()
        .rtol(1e-9)
        .atol(1e-9)
        .dense_output(true)
        .build()
}

/// Unforced, undamped pendulum released from rest at `theta0`.
pub fn free_pendulum(theta0: Float, t_end: Float) -> PendulumConfig {
    PendulumConfig::builder()
        .pendulum(ForcedDampedPendulum::free(9.81))
        .theta0(theta0)
        .omega0(0.0)
        .t_end(t_end)
        .rtol(1e-10)
        .atol(1e-12)
        .build()
}
