//! A struct representing the outputted result of a numerical integrator.

use crate::{Float, core::status::Status};

/// Counters for right-hand side evaluations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evals {
    /// Number of calls to [`ODE::ode`](crate::core::ode::ODE::ode)
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counters for integration steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steps {
    /// Total number of attempted steps
    pub total: usize,
    /// Number of accepted steps
    pub accepted: usize,
    /// Number of rejected steps
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a numerical integrator
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// The status of the integration process
    pub status: Status,
    /// Function evaluation counters
    pub evals: Evals,
    /// Step counters
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(x: Float, status: Status, evals: Evals, steps: Steps) -> Self {
        Self {
            x,
            status,
            evals,
            steps,
        }
    }
}
