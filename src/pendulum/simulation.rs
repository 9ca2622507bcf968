//! One run of the pipeline: integrate, sample the grid, take the section.

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    Float,
    core::status::Status,
    error::{Error, Result},
    solve::{IVPOptions, IVPSolution, linspace, solve_ivp},
};

use super::{PendulumConfig, PoincareSection};

/// θ and ω sampled on the evaluation grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub t: Vec<Float>,
    pub theta: Vec<Float>,
    pub omega: Vec<Float>,
}

impl Trajectory {
    fn from_solution(sol: &IVPSolution) -> Self {
        Self {
            t: sol.t.clone(),
            theta: sol.component(0),
            omega: sol.component(1),
        }
    }
}

/// Integrator bookkeeping for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolverStats {
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
    pub status: Status,
}

/// Everything a run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PendulumRun {
    pub config: PendulumConfig,
    pub trajectory: Trajectory,
    pub poincare: PoincareSection,
    pub stats: SolverStats,
    /// Full solver output, including the dense interpolant.
    #[serde(skip)]
    pub solution: IVPSolution,
}

/// Integrate the pendulum described by `config` and derive the evaluation
/// grid samples and the Poincaré section.
///
/// Any integrator status other than success is reported as
/// [`Error::ConvergenceFailed`].
#[instrument(level = "info", skip_all)]
pub fn simulate(config: &PendulumConfig) -> Result<PendulumRun> {
    config.validate()?;

    let t_eval = linspace(config.t_start, config.t_end, config.samples);
    let options = IVPOptions::builder()
        .rtol(config.rtol)
        .atol(config.atol)
        .nmax(config.max_steps)
        .t_eval(t_eval)
        .dense_output(true)
        .build();

    let solution = solve_ivp(
        &config.pendulum,
        config.t_start,
        config.t_end,
        &config.y0(),
        options,
    )?;
    if !solution.success() {
        return Err(Error::ConvergenceFailed {
            status: solution.status,
            t: solution.t_final,
        });
    }

    let dense = solution.dense().ok_or(Error::DenseOutputDisabled)?;
    let poincare = PoincareSection::sample(
        dense,
        config.pendulum.drive_freq,
        config.t_start,
        config.t_end,
    )?;

    let stats = SolverStats {
        nfev: solution.nfev,
        nstep: solution.nstep,
        naccpt: solution.naccpt,
        nrejct: solution.nrejct,
        status: solution.status,
    };
    info!(
        samples = solution.t.len(),
        section = poincare.len(),
        nfev = stats.nfev,
        naccpt = stats.naccpt,
        nrejct = stats.nrejct,
        "pendulum integrated"
    );

    Ok(PendulumRun {
        config: config.clone(),
        trajectory: Trajectory::from_solution(&solution),
        poincare,
        stats,
        solution,
    })
}
