//! Stroboscopic sampling of the dense solution.

use serde::Serialize;

use crate::{
    Float,
    error::{Error, Result},
    solve::ContinuousOutput,
};

use super::TAU;

/// Sample times `t0 + k·2π/ω_f` for k = 0, 1, … strictly below `t1`.
///
/// Returns an empty vector when `drive_freq` is not a positive finite number.
pub fn strobe_times(t0: Float, t1: Float, drive_freq: Float) -> Vec<Float> {
    let period = TAU / drive_freq;
    if !(period.is_finite() && period > 0.0) {
        return Vec::new();
    }
    (0..)
        .map(|k| t0 + k as Float * period)
        .take_while(|&t| t < t1)
        .collect()
}

/// Points of the stroboscopic (Poincaré) map, one per driving period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoincareSection {
    pub times: Vec<Float>,
    pub theta: Vec<Float>,
    pub omega: Vec<Float>,
}

impl PoincareSection {
    /// Evaluate the dense interpolant at every strobe time of `[t0, t1)`.
    pub fn sample(
        dense: &ContinuousOutput,
        drive_freq: Float,
        t0: Float,
        t1: Float,
    ) -> Result<Self> {
        let times = strobe_times(t0, t1, drive_freq);
        let mut theta = Vec::with_capacity(times.len());
        let mut omega = Vec::with_capacity(times.len());
        for &t in &times {
            let y = dense.evaluate(t).ok_or(Error::OutsideDenseSpan(t))?;
            theta.push(y[0]);
            omega.push(y[1]);
        }
        Ok(Self {
            times,
            theta,
            omega,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_strobe_times() {
        let times = strobe_times(0.0, 50.0, 2.0);
        let period = TAU / 2.0;
        assert_eq!(times.len(), 16);
        for (k, &t) in times.iter().enumerate() {
            assert_eq!(t, k as Float * period);
        }
        assert!(*times.last().unwrap() < 50.0);
    }

    #[test]
    fn end_of_span_is_excluded() {
        // 2π/ω_f = 1 exactly divides the span; t1 itself is not sampled.
        let times = strobe_times(0.0, 3.0, TAU);
        assert_eq!(times.len(), 3);
    }

    #[test]
    fn invalid_frequency_yields_no_samples() {
        assert!(strobe_times(0.0, 50.0, 0.0).is_empty());
        assert!(strobe_times(0.0, 50.0, -1.0).is_empty());
        assert!(strobe_times(0.0, 50.0, Float::NAN).is_empty());
    }
}
