//! Scan Bench Charts
//!
//! Annotated bar charts of histogram / prefix-scan benchmark timings,
//! rendered to PNG.
//!
//! ```no_run
//! use scan_bench_charts::{BarChartRenderer, ChartConfig, Series};
//!
//! let series = Series::from_columns(&["A", "B"], &[0.019144, 0.0174948], &["blue", "red"])?;
//! let config = ChartConfig {
//!     y_min: 0.015,
//!     y_max: 0.020,
//!     y_ticks: vec![0.015, 0.016, 0.017, 0.018, 0.019, 0.020],
//!     output_path: "timings.png".into(),
//!     ..Default::default()
//! };
//! BarChartRenderer::render(&series, &config)?;
//! # Ok::<(), scan_bench_charts::RenderError>(())
//! ```

pub mod charts;
pub mod data;
pub mod error;
pub mod logging;
pub mod viewer;

pub use charts::{BarChartRenderer, ChartLayout};
pub use data::{BarColor, BarRecord, ChartConfig, Figure, Series};
pub use error::RenderError;
