//! Data module - Chart series, display options and benchmark figures

pub mod benchmarks;
mod config;
mod series;

pub use benchmarks::{report_figures, Figure};
pub use config::{ChartConfig, DEFAULT_LABEL_OFFSET, MAX_PIXELS};
pub use series::{BarColor, BarRecord, Series};
