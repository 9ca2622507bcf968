use forced_pendulum::{Float, prelude::*};

mod common;
use common::{SHO, default_opts_dense};

#[test]
fn dense_output_tracks_the_harmonic_oscillator() {
    let period = 2.0 * std::f64::consts::PI;
    let sol = solve_ivp(&SHO, 0.0, period, &[1.0, 0.0], default_opts_dense()).unwrap();
    assert!(sol.success());

    let ts = linspace(0.0, period, 41);
    for (t, y) in ts.iter().zip(sol.sol_many(&ts)) {
        let y = y.expect("inside the span");
        assert!((y[0] - t.cos()).abs() < 1e-6, "t = {t}");
        assert!((y[1] + t.sin()).abs() < 1e-6, "t = {t}");
    }
}

#[test]
fn t_eval_is_returned_verbatim() {
    let t_eval = vec![0.0, 0.1, 0.25, 1.0 / 3.0, 2.0];
    let options = IVPOptions::builder()
        .rtol(1e-8)
        .atol(1e-8)
        .t_eval(t_eval.clone())
        .build();
    let sol = solve_ivp(&SHO, 0.0, 2.0, &[1.0, 0.0], options).unwrap();
    assert_eq!(sol.t, t_eval);
    assert_eq!(sol.y[0], vec![1.0, 0.0]);
    for (t, y) in sol.iter() {
        assert!((y[0] - t.cos()).abs() < 1e-6);
    }
}

/// Stops once x passes a threshold and counts the steps it saw.
struct StopAfter {
    threshold: Float,
    calls: usize,
    saw_interpolator: bool,
}

impl SolOut for StopAfter {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        x: Float,
        _y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag {
        self.calls += 1;
        self.saw_interpolator |= interpolator.is_some();
        if x > self.threshold {
            ControlFlag::Interrupt
        } else {
            ControlFlag::Continue
        }
    }
}

#[test]
fn user_callback_can_interrupt() {
    let mut stop = StopAfter {
        threshold: 1.0,
        calls: 0,
        saw_interpolator: false,
    };
    let options = IVPOptions::builder()
        .rtol(1e-6)
        .atol(1e-6)
        .dense_output(true)
        .build();
    let sol = solve_ivp_with(&SHO, 0.0, 10.0, &[1.0, 0.0], options, Some(&mut stop)).unwrap();
    assert_eq!(sol.status, Status::UserInterrupt);
    assert!(!sol.success());
    assert!(stop.calls >= 2);
    assert!(stop.saw_interpolator);
    let (_, t1) = sol.sol_span().unwrap();
    assert!(t1 > 1.0 && t1 < 10.0);
}

#[test]
fn step_budget_exhaustion_is_reported() {
    let options = IVPOptions::builder().rtol(1e-10).atol(1e-10).nmax(3).build();
    let sol = solve_ivp(&SHO, 0.0, 100.0, &[1.0, 0.0], options).unwrap();
    assert_eq!(sol.status, Status::NeedLargerNMax);
    assert_eq!(sol.nstep, 3);
    assert!(sol.t_final > 0.0 && sol.t_final < 100.0);
    assert_eq!(sol.t.last(), Some(&sol.t_final));
}

#[test]
fn t_final_is_the_end_of_the_span_on_success() {
    let options = IVPOptions::builder().t_eval(vec![0.0, 0.5]).build();
    let sol = solve_ivp(&SHO, 0.0, 2.0, &[1.0, 0.0], options).unwrap();
    assert!(sol.success());
    assert_eq!(sol.t_final, 2.0);
    assert_eq!(sol.t.last(), Some(&0.5));
}

#[test]
fn components_follow_the_state_layout() {
    let options = IVPOptions::builder().t_eval(vec![0.0, 1.0]).build();
    let sol = solve_ivp(&SHO, 0.0, 1.0, &[1.0, 0.0], options).unwrap();
    assert_eq!(sol.component(0)[0], 1.0);
    assert_eq!(sol.component(1)[0], 0.0);
}

#[test]
#[should_panic]
fn component_past_the_state_dimension_panics() {
    let options = IVPOptions::builder().t_eval(vec![0.0, 1.0]).build();
    let sol = solve_ivp(&SHO, 0.0, 1.0, &[1.0, 0.0], options).unwrap();
    let _ = sol.component(2);
}

#[test]
fn max_step_limits_step_size() {
    let options = IVPOptions::builder()
        .rtol(1e-3)
        .atol(1e-3)
        .max_step(0.1)
        .build();
    let sol = solve_ivp(&SHO, 0.0, 2.0, &[1.0, 0.0], options).unwrap();
    // The final step may stretch by up to 1% to land on xend.
    assert!(sol.t.windows(2).all(|w| w[1] - w[0] <= 0.101 + 1e-9));
    assert!(sol.naccpt >= 20);
}
