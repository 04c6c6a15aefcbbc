//! Static Bar Chart Renderer
//! Draws an annotated bar chart into an RGB buffer with plotters and
//! encodes it as PNG tagged with the chart's dpi.
//!
//! Layout:
//! 1. Title centered above the axes
//! 2. Axes box with outward ticks, y tick labels on the left
//! 3. One filled bar per record, category label beneath, value label
//!    ("0.019144 s") just above the bar top
//! 4. Axis labels below and (rotated) left of the axes

use crate::charts::layout::{BarGeometry, ChartLayout, TextBlock, TextMeasure};
use crate::data::{BarColor, ChartConfig, Series};
use crate::error::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use tracing::{debug, info};

const FONT_FAMILY: &str = "sans-serif";
const METERS_PER_INCH: f64 = 0.0254;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Measures text with the drawing area's font backend.
struct AreaMeasure<'a, 'b>(&'a Area<'b>);

impl TextMeasure for AreaMeasure<'_, '_> {
    fn line_size(&self, text: &str, font_px: f64) -> Result<(u32, u32), RenderError> {
        let style = (FONT_FAMILY, font_px).into_font().color(&BLACK);
        self.0
            .estimate_text_size(text, &style)
            .map_err(RenderError::backend)
    }
}

impl From<BarColor> for RGBColor {
    fn from(color: BarColor) -> Self {
        RGBColor(color.r, color.g, color.b)
    }
}

pub struct BarChartRenderer;

impl BarChartRenderer {
    /// Render `series` and write it as PNG to `config.output_path`.
    ///
    /// The file is only created once the image has been fully encoded.
    pub fn render(series: &Series, config: &ChartConfig) -> Result<(), RenderError> {
        let png = Self::render_to_bytes(series, config)?;

        fs::write(&config.output_path, &png).map_err(|source| RenderError::IoFailure {
            path: config.output_path.clone(),
            source,
        })?;

        info!(
            path = %config.output_path.display(),
            bars = series.len(),
            bytes = png.len(),
            "chart written"
        );
        Ok(())
    }

    /// Render `series` to in-memory PNG bytes.
    pub fn render_to_bytes(series: &Series, config: &ChartConfig) -> Result<Vec<u8>, RenderError> {
        series.validate()?;
        config.validate()?;

        let (width, height) = config.pixel_size();
        let mut buffer = vec![255u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(RenderError::backend)?;

            let layout = ChartLayout::compute(series, config, &AreaMeasure(&root))?;
            debug!(
                title = %config.title,
                width,
                height,
                tight = layout.tight,
                "rendering bar chart"
            );
            Self::draw_chart(&root, &layout)?;

            root.present().map_err(RenderError::backend)?;
        }

        Self::encode_png(&buffer, width, height, config.dpi)
    }

    /// Encode an RGB buffer as PNG with a `pHYs` chunk recording `dpi`.
    fn encode_png(rgb: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>, RenderError> {
        let mut png_bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut png_bytes, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let pixels_per_meter = (dpi as f64 / METERS_PER_INCH).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_meter,
            yppu: pixels_per_meter,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header().map_err(RenderError::backend)?;
        writer
            .write_image_data(rgb)
            .map_err(RenderError::backend)?;
        writer.finish().map_err(RenderError::backend)?;
        Ok(png_bytes)
    }

    fn draw_chart(root: &Area, layout: &ChartLayout) -> Result<(), RenderError> {
        for bar in &layout.bars {
            Self::draw_bar(root, bar)?;
        }
        Self::draw_axes(root, layout)?;

        for bar in &layout.bars {
            Self::draw_block(
                root,
                &bar.category,
                bar.center_x,
                layout.x_tick_label_top,
                HPos::Center,
            )?;
            let style = (FONT_FAMILY, layout.value_label_px)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            root.draw(&Text::new(bar.value_label.as_str(), bar.label_anchor, style))
                .map_err(RenderError::backend)?;
        }

        for tick in &layout.y_ticks {
            let top = tick.y - tick.label.height as i32 / 2;
            Self::draw_block(root, &tick.label, layout.y_tick_label_right, top, HPos::Right)?;
        }

        let (title_x, title_y) = layout.title_origin;
        Self::draw_block(root, &layout.title, title_x, title_y, HPos::Center)?;
        let (label_x, label_y) = layout.x_label_origin;
        Self::draw_block(root, &layout.x_label, label_x, label_y, HPos::Center)?;
        Self::draw_rotated_block(root, &layout.y_label, layout.y_label_origin)?;

        Ok(())
    }

    fn draw_bar(root: &Area, bar: &BarGeometry) -> Result<(), RenderError> {
        let Some(rect) = bar.rect else {
            return Ok(());
        };
        let color: RGBColor = bar.color.into();
        root.draw(&Rectangle::new(rect, color.filled()))
            .map_err(RenderError::backend)
    }

    /// Axes box plus outward tick marks.
    fn draw_axes(root: &Area, layout: &ChartLayout) -> Result<(), RenderError> {
        let plot = layout.plot;
        let frame = [(plot.left, plot.top), (plot.right, plot.bottom)];
        root.draw(&Rectangle::new(frame, BLACK.stroke_width(1)))
            .map_err(RenderError::backend)?;

        for tick in &layout.y_ticks {
            root.draw(&PathElement::new(
                vec![(plot.left - layout.tick_length, tick.y), (plot.left, tick.y)],
                BLACK.stroke_width(1),
            ))
            .map_err(RenderError::backend)?;
        }
        for bar in &layout.bars {
            root.draw(&PathElement::new(
                vec![
                    (bar.center_x, plot.bottom),
                    (bar.center_x, plot.bottom + layout.tick_length),
                ],
                BLACK.stroke_width(1),
            ))
            .map_err(RenderError::backend)?;
        }
        Ok(())
    }

    /// Draw a multi-line block whose top edge is at `top`. `h_pos` says
    /// whether `x` is the left edge, center or right edge of each line.
    fn draw_block(
        root: &Area,
        block: &TextBlock,
        x: i32,
        top: i32,
        h_pos: HPos,
    ) -> Result<(), RenderError> {
        for line in block.lines.iter().filter(|l| !l.text.trim().is_empty()) {
            let style = (FONT_FAMILY, block.font_px)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Top));
            root.draw(&Text::new(
                line.text.as_str(),
                (x, top + line.offset as i32),
                style,
            ))
            .map_err(RenderError::backend)?;
        }
        Ok(())
    }

    /// Draw a block turned a quarter counter-clockwise. Lines run bottom to
    /// top and stack left to right starting at `origin.0`, centered on
    /// `origin.1`.
    fn draw_rotated_block(
        root: &Area,
        block: &TextBlock,
        origin: (i32, i32),
    ) -> Result<(), RenderError> {
        let (left, center_y) = origin;
        for line in block.lines.iter().filter(|l| !l.text.trim().is_empty()) {
            let style = (FONT_FAMILY, block.font_px)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let x = left + line.offset as i32 + line.height as i32 / 2;
            root.draw(&Text::new(line.text.as_str(), (x, center_y), style))
                .map_err(RenderError::backend)?;
        }
        Ok(())
    }
}
