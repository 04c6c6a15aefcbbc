//! Charts module - Layout and static rendering of annotated bar charts

pub mod layout;
mod renderer;

pub use layout::{format_ticks, format_value_label, ChartLayout, TextMeasure};
pub use renderer::BarChartRenderer;
