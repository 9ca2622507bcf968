//! Default SolOut that implements t_eval sampling, endpoint recording and
//! dense-output capture; wraps a user SolOut.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        solout::{ControlFlag, SolOut},
    },
};

use super::cont::Segment;

pub struct DefaultSolOut<'a, S: SolOut> {
    t_eval: Option<&'a [Float]>,
    save_endpoints: bool,
    dense_output: bool,
    /// +1 for forward integration, -1 for backward
    direction: Float,
    next_idx: usize,
    tol: Float,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    segments: Vec<Segment>,
    user: Option<&'a mut S>,
}

impl<'a, S: SolOut> DefaultSolOut<'a, S> {
    pub fn new(
        t_eval: Option<&'a [Float]>,
        dense_output: bool,
        direction: Float,
        user: Option<&'a mut S>,
    ) -> Self {
        Self {
            t_eval,
            save_endpoints: t_eval.is_none(),
            dense_output,
            direction,
            next_idx: 0,
            tol: 1e-12,
            t: Vec::new(),
            y: Vec::new(),
            segments: Vec::new(),
            user,
        }
    }

    pub fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>, Vec<Segment>) {
        (self.t, self.y, self.segments)
    }

    fn sample<I: Interpolate>(
        &mut self,
        te: &[Float],
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) {
        let mut i = self.next_idx;
        match interpolator {
            // Initial call (xold == x) or no dense output: only exact matches
            None => {
                while i < te.len() && (te[i] - x).abs() <= self.tol {
                    self.t.push(te[i]);
                    self.y.push(y.to_vec());
                    i += 1;
                }
            }
            // Regular accepted step: all te[i] in (xold, x] up to tolerance
            Some(interpolator) => {
                while i < te.len() && (te[i] - x) * self.direction <= self.tol {
                    if (te[i] - xold) * self.direction >= -self.tol {
                        let mut yi = vec![0.0; y.len()];
                        interpolator.interpolate(te[i], &mut yi);
                        self.t.push(te[i]);
                        self.y.push(yi);
                    }
                    i += 1;
                }
            }
        }
        self.next_idx = i;
    }
}

impl<S: SolOut> SolOut for DefaultSolOut<'_, S> {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag {
        if self.save_endpoints {
            self.t.push(x);
            self.y.push(y.to_vec());
        }

        if let Some(te) = self.t_eval {
            self.sample(te, xold, x, y, interpolator);
        }

        if self.dense_output {
            if let Some(interpolator) = interpolator {
                let (cont, seg_xold, h) = interpolator.get_cont();
                self.segments.push(Segment {
                    cont,
                    xold: seg_xold,
                    x,
                    h,
                });
            }
        }

        // Forward to user callback if any
        if let Some(user) = self.user.as_deref_mut() {
            return user.solout(xold, x, y, interpolator);
        }

        ControlFlag::Continue
    }
}
