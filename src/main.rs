//! Scan Bench Charts - renders the benchmark report figures.
//!
//! Writes every report figure into the current directory, then opens each
//! one in the default image viewer when a display is available.

use anyhow::{Context, Result};
use scan_bench_charts::data::report_figures;
use scan_bench_charts::{logging, viewer, BarChartRenderer};
use std::path::Path;
use tracing::warn;

fn main() -> Result<()> {
    logging::init_logging();

    let figures = report_figures(Path::new(".")).context("Failed to build report figures")?;

    for figure in &figures {
        BarChartRenderer::render(&figure.series, &figure.config).with_context(|| {
            format!("Failed to render {}", figure.config.output_path.display())
        })?;
    }

    for figure in &figures {
        if let Err(e) = viewer::show(&figure.config.output_path) {
            warn!(
                path = %figure.config.output_path.display(),
                error = %e,
                "could not open chart viewer"
            );
        }
    }

    Ok(())
}
