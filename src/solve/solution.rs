//! Rich solution type for solve_ivp: sampled data, stats, and dense evaluation helpers.

use crate::{Float, core::status::Status};

use super::cont::ContinuousOutput;

/// Rich solution of solve_ivp: sampled data plus basic stats
#[derive(Debug, Clone)]
pub struct IVPSolution {
    /// Sample abscissae: `t_eval` verbatim when it was given, otherwise the
    /// initial point and every accepted step endpoint.
    pub t: Vec<Float>,
    /// State at each entry of `t`.
    pub y: Vec<Vec<Float>>,
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
    pub status: Status,
    /// Abscissa the integrator stopped at; equals the end of the span on
    /// success.
    pub t_final: Float,
    /// Stores continuous solution if dense output was enabled.
    pub(crate) dense_output: Option<ContinuousOutput>,
}

impl IVPSolution {
    /// `true` when the integrator reached the end of the span.
    pub fn success(&self) -> bool {
        self.status == Status::Success
    }

    /// Evaluate the continuous solution at a single time t.
    /// Returns None if dense_output was disabled or t is outside the covered range.
    pub fn sol(&self, t: Float) -> Option<Vec<Float>> {
        self.dense_output.as_ref()?.evaluate(t)
    }

    /// Evaluate the continuous solution at many time points.
    /// If dense output is disabled, returns a Vec of None of the same length.
    /// Points outside the range yield None entries.
    pub fn sol_many(&self, ts: &[Float]) -> Vec<Option<Vec<Float>>> {
        match self.dense_output.as_ref() {
            Some(dense) => dense.evaluate_many(ts),
            None => vec![None; ts.len()],
        }
    }

    /// Return the time span covered by the dense output if available.
    pub fn sol_span(&self) -> Option<(Float, Float)> {
        self.dense_output.as_ref()?.t_span()
    }

    /// Borrow the continuous solution, if it was recorded.
    pub fn dense(&self) -> Option<&ContinuousOutput> {
        self.dense_output.as_ref()
    }

    /// Extract one state component across all samples (a row of SciPy's `sol.y`).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than the state dimension.
    pub fn component(&self, index: usize) -> Vec<Float> {
        self.y.iter().map(|yi| yi[index]).collect()
    }

    /// Iterate over stored sample pairs (t_i, y_i) from the discrete output.
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }
}

/// Iterator over (t, y) pairs of stored samples in an IVPSolution.
pub struct SolutionIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, Vec<Float>>,
}

impl<'a> Iterator for SolutionIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}
