//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use forced_pendulum::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `Interpolate`, `SolOut`, `ControlFlag`, `Status`.
//! - High-level API: `solve_ivp`, `solve_ivp_with`, `IVPOptions`, `IVPSolution`.
//! - The pendulum pipeline: `ForcedDampedPendulum`, `PendulumConfig`, `simulate`.
//!

pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    solout::{ControlFlag, NoSolOut, SolOut},
    status::Status,
};
pub use crate::pendulum::{
    ForcedDampedPendulum, PendulumConfig, PendulumRun, PoincareSection, Trajectory, simulate,
    strobe_times, wrap_angle,
};
pub use crate::solve::{
    ContinuousOutput, IVPOptions, IVPSolution, linspace, solve_ivp, solve_ivp_with,
};
