//! Benchmark Figures
//! Measured execution times of the parallel histogram / scan benchmark,
//! packaged as ready-to-render charts.

use crate::data::{ChartConfig, Series};
use crate::error::RenderError;
use std::path::Path;

pub const SCAN_VARIANT_FILE: &str = "scan_variant_bin_comparison.png";
pub const IMAGE_TYPE_FILE: &str = "rgb_vs_grayscale_256bins_comparison.png";

const REPORT_DPI: u32 = 150;
const Y_AXIS_LABEL: &str = "Total Execution Time (s)";

/// A chart ready for rendering.
#[derive(Debug, Clone)]
pub struct Figure {
    pub series: Series,
    pub config: ChartConfig,
}

/// Shared styling: large title/axis/tick fonts, small value labels.
fn report_config() -> ChartConfig {
    ChartConfig {
        y_axis_label: Y_AXIS_LABEL.to_string(),
        font_size_title: 20,
        font_size_axis: 20,
        font_size_tick: 20,
        font_size_label: 8,
        dpi: REPORT_DPI,
        ..Default::default()
    }
}

/// Hillis-Steele vs Blelloch scan at 1025 and 10 bins (16-bit colour image).
pub fn scan_variant_comparison(output_dir: &Path) -> Result<Figure, RenderError> {
    let series = Series::from_columns(
        &[
            "Hillis-Steele\n(1025 bins)",
            "Blelloch\n(1025 bins)",
            "Hillis-Steele\n(10 bins)",
            "Blelloch\n(10 bins)",
        ],
        &[0.019144, 0.0174948, 0.0167292, 0.0168807],
        &["blue", "red", "green", "purple"],
    )?;

    let config = ChartConfig {
        title: "Total Execution Time for 16-bit Colour Image\n(3 Channels)".to_string(),
        x_axis_label: "Scan Variant and Bin Size".to_string(),
        y_min: 0.015,
        y_max: 0.020,
        y_ticks: vec![0.015, 0.016, 0.017, 0.018, 0.019, 0.020],
        figure_width: 5.0,
        figure_height: 3.0,
        bar_width: 0.6,
        output_path: output_dir.join(SCAN_VARIANT_FILE),
        ..report_config()
    };

    Ok(Figure { series, config })
}

/// Colour vs grayscale input with Blelloch scan at 256 bins.
pub fn image_type_comparison(output_dir: &Path) -> Result<Figure, RenderError> {
    let series = Series::from_columns(
        &["Colour (3 Channels)", "Grayscale (1 Channel)"],
        &[0.0168732, 0.005558496],
        &["orange", "gray"],
    )?;

    let config = ChartConfig {
        title: "Total Execution Time for 16-bit Image\n(Blelloch, 256 Bins)".to_string(),
        x_axis_label: "Image Type".to_string(),
        y_min: 0.0,
        y_max: 0.02,
        y_ticks: vec![0.0, 0.005, 0.010, 0.015, 0.020],
        figure_width: 4.0,
        figure_height: 3.0,
        bar_width: 0.5,
        output_path: output_dir.join(IMAGE_TYPE_FILE),
        ..report_config()
    };

    Ok(Figure { series, config })
}

/// All report figures, in render order.
pub fn report_figures(output_dir: &Path) -> Result<Vec<Figure>, RenderError> {
    Ok(vec![
        scan_variant_comparison(output_dir)?,
        image_type_comparison(output_dir)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BarColor;

    #[test]
    fn report_figures_are_valid() {
        let figures = report_figures(Path::new("out")).unwrap();
        assert_eq!(figures.len(), 2);
        for figure in &figures {
            figure.series.validate().unwrap();
            figure.config.validate().unwrap();
            assert_eq!(figure.config.dpi, 150);
        }
    }

    #[test]
    fn scan_variant_figure_matches_measurements() {
        let figure = scan_variant_comparison(Path::new("out")).unwrap();
        let values: Vec<f64> = figure.series.records().iter().map(|r| r.value).collect();
        assert_eq!(values, [0.019144, 0.0174948, 0.0167292, 0.0168807]);
        assert_eq!(figure.series.records()[3].color, BarColor::rgb(128, 0, 128));
        assert_eq!(figure.config.pixel_size(), (750, 450));
        assert_eq!(figure.config.output_path, Path::new("out").join(SCAN_VARIANT_FILE));
    }

    #[test]
    fn image_type_figure_matches_measurements() {
        let figure = image_type_comparison(Path::new("out")).unwrap();
        assert_eq!(figure.series.len(), 2);
        assert_eq!(figure.series.records()[0].color, BarColor::rgb(255, 165, 0));
        assert_eq!((figure.config.y_min, figure.config.y_max), (0.0, 0.02));
        assert_eq!(figure.config.pixel_size(), (600, 450));
        assert_eq!(figure.config.output_path, Path::new("out").join(IMAGE_TYPE_FILE));
    }
}
