//! Run configuration. Defaults reproduce the reference experiment.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Float,
    error::{Error, Result},
};

use super::ForcedDampedPendulum;

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything needed to reproduce one pendulum run.
pub struct PendulumConfig {
    /// Physical parameters.
    #[builder(default)]
    pub pendulum: ForcedDampedPendulum,
    /// Initial angle θ0 in radians.
    #[builder(default = 0.1)]
    pub theta0: Float,
    /// Initial angular velocity ω0 in radians per second.
    #[builder(default = 0.0)]
    pub omega0: Float,
    /// Start of the integration span.
    #[builder(default = 0.0)]
    pub t_start: Float,
    /// End of the integration span.
    #[builder(default = 50.0)]
    pub t_end: Float,
    /// Number of points in the evenly spaced evaluation grid.
    #[builder(default = 1000)]
    pub samples: usize,
    /// Relative tolerance of the integrator.
    #[builder(default = 1e-3)]
    pub rtol: Float,
    /// Absolute tolerance of the integrator.
    #[builder(default = 1e-6)]
    pub atol: Float,
    /// Step budget of the integrator; running out is a convergence failure.
    #[builder(default = 100_000)]
    pub max_steps: usize,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PendulumConfig {
    /// Initial state (θ0, ω0).
    pub fn y0(&self) -> [Float; 2] {
        [self.theta0, self.omega0]
    }

    /// Reject values the pipeline cannot run with. Solver settings are
    /// checked separately by the integrator.
    pub fn validate(&self) -> Result<()> {
        let p = &self.pendulum;
        let finite = [
            ("damping", p.damping),
            ("gravity", p.gravity),
            ("amplitude", p.amplitude),
            ("theta0", self.theta0),
            ("omega0", self.omega0),
            ("t_start", self.t_start),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        if !(p.drive_freq.is_finite() && p.drive_freq > 0.0) {
            return Err(Error::InvalidParameter {
                name: "drive_freq",
                value: p.drive_freq,
            });
        }
        if !(self.t_end.is_finite() && self.t_end > self.t_start) {
            return Err(Error::InvalidParameter {
                name: "t_end",
                value: self.t_end,
            });
        }
        if self.samples < 2 {
            return Err(Error::InvalidParameter {
                name: "samples",
                value: self.samples as Float,
            });
        }
        for (name, value) in [("rtol", self.rtol), ("atol", self.atol)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_reference_constants() {
        let config = PendulumConfig::default();
        assert_eq!(config.pendulum, ForcedDampedPendulum::default());
        assert_eq!(config.y0(), [0.1, 0.0]);
        assert_eq!((config.t_start, config.t_end), (0.0, 50.0));
        assert_eq!(config.samples, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_drive_frequency_is_rejected() {
        let config = PendulumConfig::builder()
            .pendulum(ForcedDampedPendulum {
                drive_freq: 0.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "drive_freq", .. })
        ));
    }

    #[test]
    fn reversed_span_is_rejected() {
        let config = PendulumConfig::builder().t_start(10.0).t_end(5.0).build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "t_end", .. })
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let config = PendulumConfig::builder().theta0(0.2).samples(10).build();
        let json = serde_json::to_string(&config).unwrap();
        let back: PendulumConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
