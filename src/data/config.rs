//! Chart Configuration Module
//! Display options for a single bar chart render.

use crate::error::RenderError;
use std::path::PathBuf;

/// Vertical gap between a bar top and its value label, in data units.
pub const DEFAULT_LABEL_OFFSET: f64 = 0.0001;

/// Largest raster the renderer will allocate (width x height).
pub const MAX_PIXELS: u64 = 100_000_000;

/// Display options for one chart. Sizes are in inches, fonts in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub y_ticks: Vec<f64>,
    pub figure_width: f64,
    pub figure_height: f64,
    pub font_size_title: u32,
    pub font_size_axis: u32,
    pub font_size_tick: u32,
    pub font_size_label: u32,
    pub bar_width: f64,
    pub label_offset: f64,
    pub output_path: PathBuf,
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            y_min: 0.0,
            y_max: 1.0,
            y_ticks: vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0],
            figure_width: 6.4,
            figure_height: 4.8,
            font_size_title: 10,
            font_size_axis: 10,
            font_size_tick: 10,
            font_size_label: 8,
            bar_width: 0.8,
            label_offset: DEFAULT_LABEL_OFFSET,
            output_path: PathBuf::from("chart.png"),
            dpi: 100,
        }
    }
}

impl ChartConfig {
    /// Output size in pixels: figure inches times dpi.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.figure_width * dpi).round() as u32,
            (self.figure_height * dpi).round() as u32,
        )
    }

    /// Convert a point size to pixels at the configured dpi.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.y_min.is_finite() || !self.y_max.is_finite() {
            return Err(RenderError::invalid("y-axis bounds must be finite"));
        }
        if self.y_min >= self.y_max {
            return Err(RenderError::invalid(format!(
                "y_min ({}) must be less than y_max ({})",
                self.y_min, self.y_max
            )));
        }
        if !(self.bar_width > 0.0 && self.bar_width <= 1.0) {
            return Err(RenderError::invalid(format!(
                "bar_width must be in (0, 1], got {}",
                self.bar_width
            )));
        }
        let figure_ok = |v: f64| v.is_finite() && v > 0.0;
        if !figure_ok(self.figure_width) || !figure_ok(self.figure_height) {
            return Err(RenderError::invalid(format!(
                "figure size must be positive, got {}x{}",
                self.figure_width, self.figure_height
            )));
        }
        if self.dpi == 0 {
            return Err(RenderError::invalid("dpi must be positive"));
        }
        let dpi = self.dpi as f64;
        let (width_px, height_px) = (
            (self.figure_width * dpi).round(),
            (self.figure_height * dpi).round(),
        );
        if width_px > u32::MAX as f64 || height_px > u32::MAX as f64 {
            return Err(RenderError::invalid(format!(
                "figure of {}x{} px exceeds the pixel limit",
                width_px, height_px
            )));
        }
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return Err(RenderError::invalid("figure is smaller than one pixel"));
        }
        match (width as u64).checked_mul(height as u64) {
            Some(pixels) if pixels <= MAX_PIXELS => {}
            _ => {
                return Err(RenderError::invalid(format!(
                    "figure of {}x{} px exceeds the {} pixel limit",
                    width, height, MAX_PIXELS
                )))
            }
        }
        if [
            self.font_size_title,
            self.font_size_axis,
            self.font_size_tick,
            self.font_size_label,
        ]
        .contains(&0)
        {
            return Err(RenderError::invalid("font sizes must be positive"));
        }
        if !self.label_offset.is_finite() {
            return Err(RenderError::invalid("label_offset must be finite"));
        }
        if self.y_ticks.iter().any(|t| !t.is_finite()) {
            return Err(RenderError::invalid("y_ticks must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn pixel_size_follows_dpi() {
        let config = ChartConfig {
            figure_width: 5.0,
            figure_height: 3.0,
            dpi: 150,
            ..Default::default()
        };
        assert_eq!(config.pixel_size(), (750, 450));
        assert!((config.points_to_px(72.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_inverted_or_equal_y_range() {
        for (y_min, y_max) in [(0.02, 0.015), (0.015, 0.015)] {
            let config = ChartConfig {
                y_min,
                y_max,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_bar_width_outside_unit_interval() {
        for bar_width in [0.0, -0.5, 1.5, f64::NAN] {
            let config = ChartConfig {
                bar_width,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "bar_width {} accepted", bar_width);
        }
        let full = ChartConfig {
            bar_width: 1.0,
            ..Default::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn rejects_oversized_figure() {
        let config = ChartConfig {
            figure_width: 1e10,
            figure_height: 1e10,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        // each side fits in u32, the area does not fit the limit
        let config = ChartConfig {
            figure_width: 200.0,
            figure_height: 200.0,
            dpi: 300,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = ChartConfig {
            figure_width: 30.0,
            figure_height: 20.0,
            dpi: 300,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_figure() {
        let config = ChartConfig {
            dpi: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ChartConfig {
            figure_width: 0.001,
            dpi: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
