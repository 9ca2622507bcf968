use approx::assert_relative_eq;
use forced_pendulum::{Float, prelude::*};

mod common;
use common::free_pendulum;

#[test]
fn free_pendulum_conserves_energy() {
    let config = free_pendulum(1.0, 50.0);
    let run = simulate(&config).unwrap();
    let p = config.pendulum;
    let e0 = p.energy(config.theta0, config.omega0);

    let traj = &run.trajectory;
    let drift = traj
        .theta
        .iter()
        .zip(&traj.omega)
        .map(|(&th, &om)| ((p.energy(th, om) - e0) / e0).abs())
        .fold(0.0 as Float, Float::max);
    assert!(drift < 1e-5, "relative energy drift {drift}");
}

#[test]
fn small_oscillations_follow_the_linearized_solution() {
    let theta0 = 0.01;
    let t_end = 6.0; // about three small-angle periods
    let config = free_pendulum(theta0, t_end);
    let run = simulate(&config).unwrap();
    let w0 = config.pendulum.gravity.sqrt();

    for (&t, &theta) in run.trajectory.t.iter().zip(&run.trajectory.theta) {
        let linear = theta0 * (w0 * t).cos();
        assert!((theta - linear).abs() < 1e-5, "t = {t}: {theta} vs {linear}");
    }
}

#[test]
fn poincare_times_are_multiples_of_the_drive_period() {
    let run = simulate(&PendulumConfig::default()).unwrap();
    let period = run.config.pendulum.drive_period();
    let times = &run.poincare.times;

    assert_eq!(times.len(), 16);
    for (k, &t) in times.iter().enumerate() {
        assert_eq!(t, k as Float * period);
        assert!(t < 50.0);
    }
    assert!(times.len() as Float * period >= 50.0);
    assert_eq!(run.poincare.theta.len(), times.len());
    assert_eq!(run.poincare.omega.len(), times.len());
}

#[test]
fn trajectory_time_values_equal_the_requested_grid() {
    let run = simulate(&PendulumConfig::default()).unwrap();
    let t = &run.trajectory.t;
    assert_eq!(t, &linspace(0.0, 50.0, 1000));
    assert_eq!(t[0], 0.0);
    assert_eq!(t[999], 50.0);
    assert_relative_eq!(t[1], 50.0 / 999.0);
}

#[test]
fn runs_are_deterministic() {
    let a = simulate(&PendulumConfig::default()).unwrap();
    let b = simulate(&PendulumConfig::default()).unwrap();
    assert_eq!(a.trajectory, b.trajectory);
    assert_eq!(a.poincare, b.poincare);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn dense_output_reproduces_the_initial_condition() {
    let run = simulate(&PendulumConfig::default()).unwrap();
    assert_eq!(run.solution.sol(0.0), Some(vec![0.1, 0.0]));
    assert_eq!(run.trajectory.theta[0], 0.1);
    assert_eq!(run.trajectory.omega[0], 0.0);
    assert_eq!(run.poincare.theta[0], 0.1);
    assert_eq!(run.poincare.omega[0], 0.0);
}

#[test]
fn dense_output_agrees_with_grid_samples() {
    let run = simulate(&PendulumConfig::default()).unwrap();
    let traj = &run.trajectory;
    for i in (0..traj.t.len()).step_by(97) {
        let y = run.solution.sol(traj.t[i]).unwrap();
        assert_relative_eq!(y[0], traj.theta[i], epsilon = 1e-12);
        assert_relative_eq!(y[1], traj.omega[i], epsilon = 1e-12);
    }
}

#[test]
fn theta_is_not_wrapped() {
    // Strong drive makes the pendulum rotate over the top.
    let config = PendulumConfig::builder()
        .pendulum(ForcedDampedPendulum {
            damping: 0.05,
            gravity: 1.0,
            amplitude: 3.0,
            drive_freq: 0.7,
        })
        .theta0(0.0)
        .omega0(3.0)
        .build();
    let run = simulate(&config).unwrap();
    let max_abs = run
        .trajectory
        .theta
        .iter()
        .fold(0.0 as Float, |m, th| m.max(th.abs()));
    assert!(max_abs > std::f64::consts::PI as Float, "max |θ| = {max_abs}");
}
