//! Continuous output provided by dense output coefficients (cont) from each step.

use crate::{Float, methods::dp::contdp5};

/// Dense-output coefficients of one accepted step covering `[xold, x]`.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    pub(crate) cont: Vec<Float>,
    pub(crate) xold: Float,
    pub(crate) x: Float,
    pub(crate) h: Float,
}

/// Piecewise dense output over all accepted steps.
///
/// A pure function of time: evaluation never mutates the object, so the
/// interpolant can be queried repeatedly and in any order.
#[derive(Debug, Clone)]
pub struct ContinuousOutput {
    segs: Vec<Segment>,
    /// +1 when the segments run forward in time, -1 when backward
    direction: Float,
}

impl ContinuousOutput {
    /// Build a ContinuousOutput from the accepted steps, in integration order.
    pub(crate) fn from_segments(segs: Vec<Segment>) -> Self {
        let segs: Vec<Segment> = segs.into_iter().filter(|s| s.h != 0.0).collect();
        let direction = segs.first().map_or(1.0, |s| s.h.signum());
        Self { segs, direction }
    }

    /// Domain covered by the dense output, `(t0, t1)` in integration order.
    pub fn t_span(&self) -> Option<(Float, Float)> {
        let first = self.segs.first()?;
        let last = self.segs.last()?;
        Some((first.xold, last.x))
    }

    /// Interpolate y(t) if t lies within any recorded step; returns None if outside.
    pub fn evaluate(&self, t: Float) -> Option<Vec<Float>> {
        let seg = self.find_segment(t)?;
        let n = seg.cont.len() / 5;
        let mut yi = vec![0.0; n];
        contdp5(t, &mut yi, &seg.cont, seg.xold, seg.h);
        Some(yi)
    }

    /// Batch-evaluate at many times; returns None for points outside coverage.
    pub fn evaluate_many(&self, ts: &[Float]) -> Vec<Option<Vec<Float>>> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }

    fn find_segment(&self, t: Float) -> Option<&Segment> {
        // Segments are contiguous and ordered along `direction`; take the
        // first one whose right end is not behind t.
        let idx = self
            .segs
            .partition_point(|s| (s.x - t) * self.direction < 0.0);
        let seg = self.segs.get(idx)?;
        if (t - seg.xold) * self.direction >= 0.0 {
            Some(seg)
        } else {
            None
        }
    }
}
