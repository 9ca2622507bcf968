//! Errors for integration methods and the pendulum pipeline

use thiserror::Error;

use crate::{Float, core::status::Status};

/// Validation errors returned by the integrator entry points before any step
/// is taken. All problems found are reported together.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),
    #[error("nstiff must be positive (got {0})")]
    NStiffMustBePositive(usize),
    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),
    #[error("step size must be positive and finite (got {0})")]
    InvalidStepSize(Float),
    #[error("integration span is empty (x0 = xend = {0})")]
    EmptySpan(Float),
    #[error("{name} has {got} entries but the state has {expected}")]
    ToleranceLength {
        name: &'static str,
        got: usize,
        expected: usize,
    },
    #[error("t_eval entry {t} lies outside [{x0}, {xend}]")]
    TEvalOutOfSpan { t: Float, x0: Float, xend: Float },
    #[error("t_eval must be sorted in the direction of integration")]
    TEvalNotSorted,
}

/// Errors surfaced by the solver front end and the pendulum pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid solver settings: {}", join(.0))]
    Settings(Vec<SettingsError>),

    #[error("integration failed to converge at t = {t} ({status:?})")]
    ConvergenceFailed { status: Status, t: Float },

    #[error("dense output queried outside its span at t = {0}")]
    OutsideDenseSpan(Float),

    #[error("dense output was not enabled for this solution")]
    DenseOutputDisabled,

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: Float },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<Vec<SettingsError>> for Error {
    fn from(errors: Vec<SettingsError>) -> Self {
        Error::Settings(errors)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn join(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
