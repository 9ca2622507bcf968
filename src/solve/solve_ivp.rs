//! SciPy-like solve_ivp entry point implementation

use tracing::{debug, warn};

use crate::{
    Float,
    core::{
        ode::ODE,
        solout::{NoSolOut, SolOut},
        status::Status,
    },
    error::{Error, SettingsError},
    methods::{
        dp::{dopri5, resolve_settings},
        settings::Settings,
    },
};

use super::{
    cont::ContinuousOutput, options::IVPOptions, solout::DefaultSolOut, solution::IVPSolution,
};

/// Solve an initial value problem with SciPy-like options using the
/// Dormand–Prince 5(4) method.
///
/// # Example
///
/// ```
/// use forced_pendulum::{Float, prelude::*};
///
/// struct Decay;
///
/// impl ODE for Decay {
///     fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
///         dydx[0] = -y[0];
///     }
/// }
///
/// let options = IVPOptions::builder()
///     .rtol(1e-8)
///     .atol(1e-10)
///     .t_eval(vec![0.0, 0.5, 1.0])
///     .build();
/// let sol = solve_ivp(&Decay, 0.0, 1.0, &[1.0], options).unwrap();
/// assert_eq!(sol.t, vec![0.0, 0.5, 1.0]);
/// assert!((sol.y[2][0] - (-1.0 as Float).exp()).abs() < 1e-6);
/// ```
pub fn solve_ivp<F>(
    f: &F,
    x0: Float,
    xend: Float,
    y0: &[Float],
    options: IVPOptions,
) -> Result<IVPSolution, Error>
where
    F: ODE + ?Sized,
{
    solve_ivp_with(f, x0, xend, y0, options, None::<&mut NoSolOut>)
}

/// Like [`solve_ivp`] but also forwards every accepted step to a user
/// [`SolOut`] callback, which may interrupt the integration.
pub fn solve_ivp_with<F, S>(
    f: &F,
    x0: Float,
    xend: Float,
    y0: &[Float],
    options: IVPOptions,
    solout: Option<&mut S>,
) -> Result<IVPSolution, Error>
where
    F: ODE + ?Sized,
    S: SolOut,
{
    let settings = Settings::builder()
        .maybe_h0(options.first_step)
        .maybe_hmax(options.max_step)
        .maybe_nmax(options.nmax)
        .maybe_nstiff(options.nstiff)
        .build();

    let mut errors = resolve_settings(x0, xend, y0.len(), &options.rtol, &options.atol, &settings)
        .err()
        .unwrap_or_default();
    errors.extend(validate_t_eval(x0, xend, &options));
    if !errors.is_empty() {
        return Err(Error::Settings(errors));
    }

    let direction = if xend >= x0 { 1.0 } else { -1.0 };
    let mut default_solout = DefaultSolOut::new(
        options.t_eval.as_deref(),
        options.dense_output,
        direction,
        solout,
    );

    let mut y = y0.to_vec();
    let result = dopri5(
        f,
        x0,
        xend,
        &mut y,
        &options.rtol,
        &options.atol,
        Some(&mut default_solout),
        options.dense_output || options.t_eval.is_some(),
        &settings,
    )?;

    debug!(
        status = ?result.status,
        x = result.x,
        nfev = result.evals.ode,
        naccpt = result.steps.accepted,
        nrejct = result.steps.rejected,
        "solve_ivp finished"
    );
    if result.status != Status::Success {
        warn!(status = ?result.status, x = result.x, "integration stopped early");
    }

    let (t, y, segments) = default_solout.into_data();
    let dense_output = options
        .dense_output
        .then(|| ContinuousOutput::from_segments(segments));

    Ok(IVPSolution {
        t,
        y,
        nfev: result.evals.ode,
        nstep: result.steps.total,
        naccpt: result.steps.accepted,
        nrejct: result.steps.rejected,
        status: result.status,
        t_final: result.x,
        dense_output,
    })
}

/// `t_eval` must lie inside the span and follow the integration direction.
fn validate_t_eval(x0: Float, xend: Float, options: &IVPOptions) -> Vec<SettingsError> {
    let mut errors = Vec::new();

    if let Some(te) = options.t_eval.as_deref() {
        let (lo, hi) = if x0 <= xend { (x0, xend) } else { (xend, x0) };
        if let Some(&t) = te.iter().find(|&&t| !(lo..=hi).contains(&t)) {
            errors.push(SettingsError::TEvalOutOfSpan { t, x0, xend });
        }
        let direction = (xend - x0).signum();
        if te.windows(2).any(|w| (w[1] - w[0]) * direction < 0.0) {
            errors.push(SettingsError::TEvalNotSorted);
        }
    }

    errors
}

/// `n` evenly spaced samples over `[start, end]`, endpoints included, computed
/// as `start + i * step` with the final sample pinned to `end`.
pub fn linspace(start: Float, end: Float, n: usize) -> Vec<Float> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Float;
            let mut grid: Vec<Float> = (0..n).map(|i| start + i as Float * step).collect();
            grid[n - 1] = end;
            grid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_pins_both_ends() {
        let grid = linspace(0.0, 50.0, 1000);
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[999], 50.0);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn linspace_degenerate_sizes() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn t_eval_outside_span_is_rejected() {
        let options = IVPOptions::builder().t_eval(vec![0.0, 2.0]).build();
        let errors = validate_t_eval(0.0, 1.0, &options);
        assert_eq!(
            errors,
            vec![SettingsError::TEvalOutOfSpan {
                t: 2.0,
                x0: 0.0,
                xend: 1.0
            }]
        );
    }

    #[test]
    fn t_eval_must_follow_direction() {
        let options = IVPOptions::builder().t_eval(vec![0.0, 0.5, 0.25]).build();
        let errors = validate_t_eval(0.0, 1.0, &options);
        assert_eq!(errors, vec![SettingsError::TEvalNotSorted]);

        let backward = IVPOptions::builder().t_eval(vec![1.0, 0.5, 0.0]).build();
        assert!(validate_t_eval(1.0, 0.0, &backward).is_empty());
    }
}
