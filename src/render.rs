//! SVG figures for a pendulum run: time series, phase portrait and Poincaré
//! section.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::prelude::*;
use tracing::info;

use crate::{
    Float,
    error::{Error, Result},
    pendulum::{PendulumRun, wrap_angle},
};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// File names written by [`render_all`], in drawing order.
pub const FIGURES: [&str; 3] = ["time_series.svg", "phase_space.svg", "poincare.svg"];

/// Presentation options for the figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Wrap θ into [−π, π) in the phase portrait and the Poincaré section.
    pub wrap_angle: bool,
}

/// Draw the three figures into `out_dir`, creating it if needed. Returns the
/// paths written.
pub fn render_all(
    run: &PendulumRun,
    out_dir: &Path,
    options: RenderOptions,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let paths: Vec<PathBuf> = FIGURES.iter().map(|name| out_dir.join(name)).collect();

    let traj = &run.trajectory;
    let section = &run.poincare;
    let present = |theta: &[Float]| -> Vec<Float> {
        if options.wrap_angle {
            theta.iter().map(|&th| wrap_angle(th)).collect()
        } else {
            theta.to_vec()
        }
    };

    line_plot(
        &paths[0],
        (1000, 500),
        "Forced Damped Pendulum Motion",
        ("Time (s)", "Angle (rad)"),
        "θ(t)",
        &traj.t,
        &traj.theta,
    )
    .map_err(render_error)?;

    line_plot(
        &paths[1],
        (600, 600),
        "Phase Space Plot",
        ("θ (rad)", "ω (rad/s)"),
        "Phase Space",
        &present(&traj.theta),
        &traj.omega,
    )
    .map_err(render_error)?;

    scatter_plot(
        &paths[2],
        (600, 600),
        "Poincaré Section",
        ("θ (rad)", "ω (rad/s)"),
        "Poincaré Section",
        &present(&section.theta),
        &section.omega,
    )
    .map_err(render_error)?;

    for path in &paths {
        info!(path = %path.display(), "figure written");
    }
    Ok(paths)
}

fn render_error(err: Box<dyn std::error::Error>) -> Error {
    Error::Render(err.to_string())
}

fn line_plot(
    path: &Path,
    size: (u32, u32),
    title: &str,
    (x_desc, y_desc): (&str, &str),
    label: &str,
    xs: &[Float],
    ys: &[Float],
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(bounds(xs), bounds(ys))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            xs.iter().copied().zip(ys.iter().copied()),
            &BLUE,
        ))?
        .label(label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn scatter_plot(
    path: &Path,
    size: (u32, u32),
    title: &str,
    (x_desc, y_desc): (&str, &str),
    label: &str,
    xs: &[Float],
    ys: &[Float],
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(bounds(xs), bounds(ys))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart
        .draw_series(
            xs.iter()
                .zip(ys.iter())
                .map(|(&x, &y)| Circle::new((x, y), 3, RED.filled())),
        )?
        .label(label)
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Axis range covering `values` with 5% padding; degenerate or empty data
/// gets a unit-wide range.
fn bounds(values: &[Float]) -> Range<Float> {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return -1.0..1.0;
    }
    let pad = 0.05 * (hi - lo);
    if pad == 0.0 {
        return (lo - 0.5)..(hi + 0.5);
    }
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_data() {
        let r = bounds(&[0.0, 10.0]);
        assert_eq!(r, -0.5..10.5);
    }

    #[test]
    fn bounds_of_constant_and_empty_data() {
        assert_eq!(bounds(&[2.0, 2.0]), 1.5..2.5);
        assert_eq!(bounds(&[]), -1.0..1.0);
        assert_eq!(bounds(&[Float::NAN]), -1.0..1.0);
    }
}
