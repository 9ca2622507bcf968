//! Forced damped pendulum explorer.
//!
//! Integrates θ'' = −b·θ' − g·sin θ + A·cos(ω_f·t) with an adaptive
//! Dormand–Prince 5(4) method, keeps the dense output of every step, samples
//! it stroboscopically to obtain a Poincaré section, and renders the
//! results.
//!
//! The integrator front end ([`solve::solve_ivp`]) is generic over any
//! [`ODE`](core::ode::ODE); the pendulum pipeline lives in [`pendulum`].
//!
//! ```
//! use forced_pendulum::prelude::*;
//!
//! let run = simulate(&PendulumConfig::default()).unwrap();
//! assert_eq!(run.trajectory.t.len(), 1000);
//! assert_eq!(run.poincare.times[0], 0.0);
//! ```

pub mod core;
pub mod error;
pub mod methods;
pub mod pendulum;
pub mod prelude;
pub mod render;
pub mod solve;

pub use error::{Error, Result, SettingsError};

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

#[cfg(not(any(feature = "f32", feature = "f64")))]
compile_error!("enable exactly one Float precision feature: 'f32' or 'f64'");

/// Change this to f128, f64, f32 as desired.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
