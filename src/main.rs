use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use forced_pendulum::{
    Float, Result,
    pendulum::{ForcedDampedPendulum, PendulumConfig, simulate},
    render::{RenderOptions, render_all},
};

#[derive(Parser)]
#[command(name = "pendulum")]
#[command(about = "Forced damped pendulum: time series, phase portrait and Poincaré section", long_about = None)]
struct Cli {
    /// Damping coefficient b
    #[arg(long, default_value_t = 0.2)]
    damping: Float,
    /// Effective gravity g (L = 1)
    #[arg(long, default_value_t = 9.81)]
    gravity: Float,
    /// Driving torque amplitude A
    #[arg(long, default_value_t = 1.2)]
    amplitude: Float,
    /// Driving angular frequency ω_f
    #[arg(long, default_value_t = 2.0)]
    drive_freq: Float,
    /// Initial angle (rad)
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    theta0: Float,
    /// Initial angular velocity (rad/s)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    omega0: Float,
    /// End of the time span (starts at 0)
    #[arg(long, default_value_t = 50.0)]
    t_end: Float,
    /// Number of evenly spaced output samples
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    /// Relative tolerance
    #[arg(long, default_value_t = 1e-3)]
    rtol: Float,
    /// Absolute tolerance
    #[arg(long, default_value_t = 1e-6)]
    atol: Float,
    /// Maximum number of integrator steps
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,
    /// Directory the SVG figures are written to
    #[arg(short, long, default_value = "plots")]
    out_dir: PathBuf,
    /// Wrap θ into [-π, π) in the phase and Poincaré figures
    #[arg(long)]
    wrap: bool,
    /// Also write the trajectory and section as JSON
    #[arg(long)]
    export: Option<PathBuf>,
    /// Skip drawing the figures
    #[arg(long)]
    no_plot: bool,
}

impl Cli {
    fn config(&self) -> PendulumConfig {
        PendulumConfig::builder()
            .pendulum(ForcedDampedPendulum {
                damping: self.damping,
                gravity: self.gravity,
                amplitude: self.amplitude,
                drive_freq: self.drive_freq,
            })
            .theta0(self.theta0)
            .omega0(self.omega0)
            .t_end(self.t_end)
            .samples(self.samples)
            .rtol(self.rtol)
            .atol(self.atol)
            .max_steps(self.max_steps)
            .build()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let run = simulate(&cli.config())?;

    if let Some(path) = &cli.export {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &run)?;
        info!(path = %path.display(), "run exported");
    }

    if !cli.no_plot {
        let options = RenderOptions {
            wrap_angle: cli.wrap,
        };
        render_all(&run, &cli.out_dir, options)?;
    }

    Ok(())
}
