//! The forced, damped pendulum and the pipeline built around it.
//!
//! θ' = ω, ω' = −b·ω − g·sin θ + A·cos(ω_f·t)

mod config;
mod poincare;
mod simulation;

pub use config::PendulumConfig;
pub use poincare::{PoincareSection, strobe_times};
pub use simulation::{PendulumRun, SolverStats, Trajectory, simulate};

use serde::{Deserialize, Serialize};

use crate::{Float, core::ode::ODE};

/// Physical parameters of the forced damped pendulum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcedDampedPendulum {
    /// Linear damping coefficient b.
    pub damping: Float,
    /// Effective gravity g (gravity over length, L = 1).
    pub gravity: Float,
    /// Driving torque amplitude A.
    pub amplitude: Float,
    /// Driving angular frequency ω_f.
    pub drive_freq: Float,
}

impl Default for ForcedDampedPendulum {
    fn default() -> Self {
        Self {
            damping: 0.2,
            gravity: 9.81,
            amplitude: 1.2,
            drive_freq: 2.0,
        }
    }
}

impl ForcedDampedPendulum {
    /// Unforced, undamped pendulum with the given effective gravity.
    pub fn free(gravity: Float) -> Self {
        Self {
            damping: 0.0,
            gravity,
            amplitude: 0.0,
            drive_freq: 1.0,
        }
    }

    /// (dθ/dt, dω/dt) at time `t`. θ is used as given, never wrapped.
    pub fn derivative(&self, t: Float, theta: Float, omega: Float) -> (Float, Float) {
        (
            omega,
            -self.damping * omega - self.gravity * theta.sin()
                + self.amplitude * (self.drive_freq * t).cos(),
        )
    }

    /// Period of the driving torque, 2π/ω_f.
    pub fn drive_period(&self) -> Float {
        TAU / self.drive_freq
    }

    /// Mechanical energy per unit mass, ½ω² + g(1 − cos θ).
    pub fn energy(&self, theta: Float, omega: Float) -> Float {
        0.5 * omega * omega + self.gravity * (1.0 - theta.cos())
    }
}

impl ODE for ForcedDampedPendulum {
    fn ode(&self, t: Float, y: &[Float], dydt: &mut [Float]) {
        let (dtheta, domega) = self.derivative(t, y[0], y[1]);
        dydt[0] = dtheta;
        dydt[1] = domega;
    }
}

#[cfg(feature = "f64")]
pub(crate) const TAU: Float = std::f64::consts::TAU;
#[cfg(feature = "f32")]
pub(crate) const TAU: Float = std::f32::consts::TAU;

/// Wrap an angle into [−π, π). Presentation only; the model never wraps.
pub fn wrap_angle(theta: Float) -> Float {
    (theta + 0.5 * TAU).rem_euclid(TAU) - 0.5 * TAU
}
