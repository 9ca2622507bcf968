//! DOPRI5 - Dormand–Prince 5(4) explicit Runge–Kutta integrator
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).
//!

use tracing::trace;

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        ode::ODE,
        solout::{ControlFlag, SolOut},
        status::Status,
    },
    error::SettingsError,
    methods::{
        hinit,
        result::{Evals, IntegrationResult, Steps},
        settings::{Settings, Tolerance},
    },
};

/// Dormand–Prince DOPRI5: explicit embedded Runge–Kutta 5(4) solver with
/// adaptive step-size control and optional dense output.
///
/// This function integrates the system `y' = f(x, y)` from `x` to `xend`,
/// advancing the provided state buffer `y` in-place. It performs classical
/// error control (embedded estimates) and, optionally, computes dense-output
/// coefficients for continuous interpolation inside each step.
///
/// # Arguments
///
/// ## Defining the Problem
/// - `f`: Right‑hand side implementing `ODE`.
/// - `x`: Initial independent variable value.
/// - `xend`: Final independent variable value. The last accepted step ends
///   exactly on `xend`.
/// - `y`: Mutable slice containing the initial state; on return contains the
///   state at the last accepted abscissa.
/// - `rtol`, `atol`: Relative and absolute tolerances (see [`Tolerance`]).
///
/// ## Output Control
/// - `solout`: Optional mutable reference to a `SolOut` callback used for
///   intermediate output. If `dense_output` is `true` the callback receives
///   a dense interpolant for each accepted step.
/// - `dense_output`: If `true`, dense‑output coefficients are computed every
///   accepted step.
///
/// ## Optional Settings
///
/// - `uround` (default `2.3e-16`)
/// - `safety_factor` (default `0.9`)
/// - `scale_min` (default `0.2`)
/// - `scale_max` (default `10.0`)
/// - `beta` (default `0.04`, stabilization parameter)
/// - `hmax` (default `|xend - x|`)
/// - `h0` (initial step; heuristic if `None`)
/// - `nmax` (default `100_000`)
/// - `nstiff` (steps between stiffness tests, default `1000`)
///
/// # Returns
/// A `Result` with `IntegrationResult` on success or a vector of
/// `SettingsError` values describing input validation issues.
pub fn dopri5<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: &Tolerance,
    atol: &Tolerance,
    mut solout: Option<&mut S>,
    dense_output: bool,
    settings: &Settings,
) -> Result<IntegrationResult, Vec<SettingsError>>
where
    F: ODE + ?Sized,
    S: SolOut,
{
    // --- Input Validation ---
    let Params {
        uround,
        safety_factor,
        facc1,
        facc2,
        beta,
        h_max,
        nmax,
        nstiff,
    } = resolve_settings(x, xend, y.len(), rtol, atol, settings)?;

    // --- Declarations ---
    let n = y.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut ysti = vec![0.0; n];
    let mut cont = vec![0.0; n * 5];
    let mut facold: Float = 1e-4;
    let mut last = false;
    let mut reject = false;
    let mut nonstiff = 0;
    let mut hlamb: Float = 0.0;
    let mut iasti = 0;
    let mut fac11: Float;
    let mut fac: Float;
    let mut hnew: Float;
    let mut xph: Float;
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut xold = x;
    let status;
    let expo1 = 0.2 - beta * 0.75;
    let posneg = (xend - x).signum();

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    evals.ode += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.min(h_max) * posneg,
        None => {
            evals.ode += 1;
            hinit(
                f, x, y, posneg, &k1, &mut k2, &mut y1, 5, h_max, atol, rtol,
            )
        }
    };

    // Initial SolOut call
    if let Some(solout) = solout.as_mut() {
        if let ControlFlag::Interrupt = solout.solout::<DenseOutput>(xold, x, y, None) {
            return Ok(IntegrationResult::new(
                x,
                Status::UserInterrupt,
                evals,
                steps,
            ));
        }
    }

    // --- Main integration loop ---
    loop {
        // Check for maximum number of steps
        if steps.total >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Check for underflow due to machine rounding
        if 0.1 * h.abs() <= x.abs() * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        // Adjust last step to land on xend
        if (x + 1.01 * h - xend) * posneg > 0.0 {
            h = xend - x;
            last = true;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &y1, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(x + C3 * h, &y1, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(x + C4 * h, &y1, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(x + C5 * h, &y1, &mut k5);

        // Stage 6 (ysti)
        for i in 0..n {
            ysti[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        xph = if last { xend } else { x + h };
        f.ode(xph, &ysti, &mut k6);

        // Final stage
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(xph, &y1, &mut k2);
        evals.ode += 6;

        // Prepare last segment of dense output before recalculating k4
        if dense_output {
            for i in 0..n {
                cont[4 * n + i] = h
                    * (D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i] + D6 * k6[i] + D7 * k2[i]);
            }
        }

        // K4 scaled for error estimate
        for i in 0..n {
            k4[i] =
                (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]) * h;
        }

        // Error estimation
        let mut err: Float = 0.0;
        for i in 0..n {
            let sk = atol[i] + rtol[i] * y[i].abs().max(y1[i].abs());
            err += (k4[i] / sk) * (k4[i] / sk);
        }
        err = (err / n as Float).sqrt();

        // Computation of hnew
        fac11 = err.powf(expo1);
        // Lund-Stabilization
        fac = fac11 / facold.powf(beta);
        // We require scale_min <= hnew/h <= scale_max
        fac = facc2.max(facc1.min(fac / safety_factor));
        hnew = h / fac;

        if err <= 1.0 {
            // Step accepted
            facold = err.max(1.0e-4);
            steps.accepted += 1;

            // Stiffness detection
            if (steps.accepted % nstiff == 0) || (iasti > 0) {
                let mut stnum: Float = 0.0;
                let mut stden: Float = 0.0;
                for i in 0..n {
                    let d1 = k2[i] - k6[i];
                    let d2 = y1[i] - ysti[i];
                    stnum += d1 * d1;
                    stden += d2 * d2;
                }
                if stden > 0.0 {
                    hlamb = h.abs() * (stnum / stden).sqrt();
                }
                if hlamb > 3.25 {
                    nonstiff = 0;
                    iasti += 1;
                    if iasti == 15 {
                        status = Status::ProbablyStiff;
                        break;
                    }
                } else {
                    nonstiff += 1;
                    if nonstiff == 6 {
                        iasti = 0;
                    }
                }
            }

            // Prepare dense output
            if dense_output {
                for i in 0..n {
                    let ydiff = y1[i] - y[i];
                    let bspl = h * k1[i] - ydiff;
                    cont[i] = y[i];
                    cont[n + i] = ydiff;
                    cont[2 * n + i] = bspl;
                    cont[3 * n + i] = -h * k2[i] + ydiff - bspl;
                }
            }

            // Update state variables
            k1.copy_from_slice(&k2);
            y.copy_from_slice(&y1);
            xold = x;
            x = xph;
            trace!(x = x, h = h, err = err, "dopri5 step accepted");

            if let Some(solout) = solout.as_mut() {
                let interpolator = DenseOutput {
                    cont: &cont,
                    xold,
                    h,
                };
                let interpolation = if dense_output {
                    Some(&interpolator)
                } else {
                    None
                };
                if let ControlFlag::Interrupt = solout.solout(xold, x, y, interpolation) {
                    status = Status::UserInterrupt;
                    break;
                }
            }

            // Normal exit
            if last {
                h = hnew;
                status = Status::Success;
                break;
            }

            // Check for step size limits
            if hnew.abs() > h_max {
                hnew = posneg * h_max;
            }

            // Prevent oscillations due to previous rejected step
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            // Step rejected
            hnew = h / facc1.min(fac11 / safety_factor);
            reject = true;
            if steps.accepted >= 1 {
                steps.rejected += 1;
            }
            last = false;
        }
        h = hnew;
    }

    Ok(IntegrationResult::new(x, status, evals, steps))
}

/// Step-control parameters after defaults are applied.
pub(crate) struct Params {
    uround: Float,
    safety_factor: Float,
    facc1: Float,
    facc2: Float,
    beta: Float,
    h_max: Float,
    nmax: usize,
    nstiff: usize,
}

/// Apply defaults to `settings` and collect every problem with them, the
/// span, and the tolerance lengths for a `dim`-component state.
pub(crate) fn resolve_settings(
    x: Float,
    xend: Float,
    dim: usize,
    rtol: &Tolerance,
    atol: &Tolerance,
    settings: &Settings,
) -> Result<Params, Vec<SettingsError>> {
    let mut errors: Vec<SettingsError> = Vec::new();

    if x == xend {
        errors.push(SettingsError::EmptySpan(x));
    }

    // Rounding Unit
    let uround = match settings.uround {
        Some(u) => {
            if u <= 1e-35 || u >= 1.0 {
                errors.push(SettingsError::URoundOutOfRange(u));
            }
            u
        }
        None => 2.3e-16,
    };

    // Safety Factor
    let safety_factor = match settings.safety_factor {
        Some(f) => {
            if f >= 1.0 || f <= 1e-4 {
                errors.push(SettingsError::SafetyFactorOutOfRange(f));
            }
            f
        }
        None => 0.9,
    };

    // Parameters for step size selection
    let facc1 = match settings.scale_min {
        Some(f) => 1.0 / f,
        None => 5.0,
    };
    let facc2 = match settings.scale_max {
        Some(f) => 1.0 / f,
        None => 1.0 / 10.0,
    };

    // Beta for step control stabilization
    let beta = match settings.beta {
        Some(b) => {
            if b > 0.2 {
                errors.push(SettingsError::BetaTooLarge(b));
            }
            b.max(0.0)
        }
        None => 0.04,
    };

    // Maximum step size
    let h_max = match settings.hmax {
        Some(h) => {
            if !(h > 0.0 && h.is_finite()) {
                errors.push(SettingsError::InvalidStepSize(h));
            }
            h.abs()
        }
        None => (xend - x).abs(),
    };

    // Initial step size
    if let Some(h0) = settings.h0 {
        if !(h0 > 0.0 && h0.is_finite()) {
            errors.push(SettingsError::InvalidStepSize(h0));
        }
    }

    // Maximum Number of Steps
    let nmax = match settings.nmax {
        Some(n) => {
            if n == 0 {
                errors.push(SettingsError::NMaxMustBePositive(n));
            }
            n
        }
        None => 100_000,
    };

    // Number of steps before performing a stiffness test
    let nstiff = match settings.nstiff {
        Some(n) => {
            if n == 0 {
                errors.push(SettingsError::NStiffMustBePositive(n));
            }
            n
        }
        None => 1000,
    };

    for (name, tol) in [("rtol", rtol), ("atol", atol)] {
        if let Some(got) = tol.n_components() {
            if got != dim {
                errors.push(SettingsError::ToleranceLength {
                    name,
                    got,
                    expected: dim,
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Params {
        uround,
        safety_factor,
        facc1,
        facc2,
        beta,
        h_max,
        nmax,
        nstiff,
    })
}

/// Continuous output function for DOPRI5
pub fn contdp5(xi: Float, yi: &mut [Float], cont: &[Float], xold: Float, h: Float) {
    let n = cont.len() / 5;
    let theta = (xi - xold) / h;
    let theta1 = 1.0 - theta;
    for i in 0..n {
        yi[i] = cont[i]
            + theta
                * (cont[n + i]
                    + theta1
                        * (cont[2 * n + i] + theta * (cont[3 * n + i] + theta1 * cont[4 * n + i])));
    }
}

/// Dense output interpolator for the most recent DOPRI5 step
struct DenseOutput<'a> {
    cont: &'a [Float],
    xold: Float,
    h: Float,
}

impl Interpolate for DenseOutput<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        contdp5(xi, yi, self.cont, self.xold, self.h);
    }

    fn get_cont(&self) -> (Vec<Float>, Float, Float) {
        (self.cont.to_vec(), self.xold, self.h)
    }
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;

const D1: Float = -12715105075.0 / 11282082432.0;
const D3: Float = 87487479700.0 / 32700410799.0;
const D4: Float = -10690763975.0 / 1880347072.0;
const D5: Float = 701980252875.0 / 199316789632.0;
const D6: Float = -1453857185.0 / 822651844.0;
const D7: Float = 69997945.0 / 29380423.0;
