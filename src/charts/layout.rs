//! Chart Layout
//! Pixel geometry for an annotated bar chart: margins sized from measured
//! text, bar rectangles, tick positions and label anchors.
//!
//! Layout is backend independent. Text extents come from a `TextMeasure`
//! so the renderer can plug in its font backend and tests can use fixed
//! metrics.

use crate::data::{BarColor, ChartConfig, Series};
use crate::error::RenderError;
use tracing::{debug, warn};

/// Digits after the decimal point in bar value labels.
pub const VALUE_PRECISION: usize = 6;
/// Unit suffix appended to bar value labels.
pub const VALUE_SUFFIX: &str = " s";

/// Base font size the layout paddings are expressed in (points).
const BASE_FONT_PT: f64 = 10.0;
const LAYOUT_PAD: f64 = 1.08;
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const LABEL_PAD_PT: f64 = 4.0;
const TITLE_PAD_PT: f64 = 6.0;
/// Extra spacing between lines of multi-line text, as a fraction of font size.
const LINE_GAP: f64 = 0.2;
/// Fraction of the bar span added as horizontal margin on each side.
const X_MARGIN: f64 = 0.05;
const MIN_PLOT_PX: i32 = 8;

/// Subplot fractions used when tight layout cannot fit the text.
const FALLBACK_LEFT: f64 = 0.125;
const FALLBACK_RIGHT: f64 = 0.9;
const FALLBACK_BOTTOM: f64 = 0.11;
const FALLBACK_TOP: f64 = 0.88;

/// Measures single lines of text at a given pixel font size.
pub trait TextMeasure {
    /// Returns (width, height) in pixels of `text` drawn unrotated.
    fn line_size(&self, text: &str, font_px: f64) -> Result<(u32, u32), RenderError>;
}

/// Format a bar value label, e.g. `0.019144` -> `"0.019144 s"`.
pub fn format_value_label(value: f64) -> String {
    format!("{:.*}{}", VALUE_PRECISION, value, VALUE_SUFFIX)
}

/// Format tick values with a shared decimal count: the fewest digits
/// (at most 10) that print every tick without loss.
pub fn format_ticks(ticks: &[f64]) -> Vec<String> {
    let decimals = (0..=10usize)
        .find(|&d| {
            let scale = 10f64.powi(d as i32);
            ticks.iter().all(|&t| {
                let scaled = t * scale;
                (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
            })
        })
        .unwrap_or(10);

    ticks
        .iter()
        .map(|&t| {
            // avoid printing "-0.000"
            let t = if t == 0.0 { 0.0 } else { t };
            format!("{:.*}", decimals, t)
        })
        .collect()
}

/// Horizontal data range shown for `count` bars of `bar_width`.
pub fn x_view_range(count: usize, bar_width: f64) -> (f64, f64) {
    let lo = -bar_width / 2.0;
    let hi = count.saturating_sub(1) as f64 + bar_width / 2.0;
    let margin = (hi - lo) * X_MARGIN;
    (lo - margin, hi + margin)
}

/// Left/right edges (data units) of each bar; bar `i` is centered on `i`.
pub fn bar_slots(count: usize, bar_width: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let center = i as f64;
            (center - bar_width / 2.0, center + bar_width / 2.0)
        })
        .collect()
}

/// Vertical extent of a bar clipped to the y range, or `None` if the bar
/// lies entirely outside it.
pub fn clipped_bar_span(value: f64, y_min: f64, y_max: f64) -> Option<(f64, f64)> {
    let lo = value.min(0.0).max(y_min);
    let hi = value.max(0.0).min(y_max);
    (hi > lo).then_some((lo, hi))
}

/// One line of measured text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: u32,
    pub height: u32,
    /// Distance from the top of the block to the top of this line.
    pub offset: u32,
}

/// Possibly multi-line text with measured extents.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub font_px: f64,
    pub width: u32,
    pub height: u32,
}

impl TextBlock {
    pub fn measure(
        measure: &dyn TextMeasure,
        text: &str,
        font_px: f64,
    ) -> Result<Self, RenderError> {
        let mut lines = Vec::new();
        if !text.is_empty() {
            let gap = (font_px * LINE_GAP).round() as u32;
            let mut offset = 0u32;
            for line in text.split('\n') {
                let (width, height) = if line.trim().is_empty() {
                    (0, font_px.round() as u32)
                } else {
                    measure.line_size(line, font_px)?
                };
                lines.push(TextLine {
                    text: line.to_string(),
                    width,
                    height,
                    offset,
                });
                offset += height + gap;
            }
        }

        let width = lines.iter().map(|l| l.width).max().unwrap_or(0);
        let height = lines.last().map(|l| l.offset + l.height).unwrap_or(0);

        Ok(Self {
            lines,
            font_px,
            width,
            height,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pixel rectangle of the axes area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PlotRect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }
}

/// A y-axis tick inside the visible range.
#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: f64,
    pub y: i32,
    pub label: TextBlock,
}

/// A bar ready to draw, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    /// Filled area as (upper-left, lower-right); `None` when clipped away.
    pub rect: Option<[(i32, i32); 2]>,
    pub center_x: i32,
    pub color: BarColor,
    pub category: TextBlock,
    pub value_label: String,
    /// Bottom-center point of the value label.
    pub label_anchor: (i32, i32),
}

/// Complete pixel layout of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub plot: PlotRect,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub tick_length: i32,
    pub title: TextBlock,
    /// Top-center point of the title block.
    pub title_origin: (i32, i32),
    pub x_label: TextBlock,
    /// Top-center point of the x-axis label block.
    pub x_label_origin: (i32, i32),
    /// Unrotated y-axis label block; drawn rotated a quarter turn.
    pub y_label: TextBlock,
    /// Left-center point of the rotated y-axis label.
    pub y_label_origin: (i32, i32),
    pub y_ticks: Vec<YTick>,
    /// Right edge of the y tick labels.
    pub y_tick_label_right: i32,
    /// Top of the category labels under the bars.
    pub x_tick_label_top: i32,
    pub bars: Vec<BarGeometry>,
    pub value_label_px: f64,
    /// False when the text did not fit and default margins were used.
    pub tight: bool,
    /// Horizontal pixel span of the widest title line.
    pub title_span: (i32, i32),
    /// Vertical pixel span of the rotated y-axis label.
    pub y_label_span: (i32, i32),
    /// True when the title, axis labels or rotated y label run past the
    /// figure edges. Margins cannot fix this; the text is clipped.
    pub text_overflow: bool,
}

/// Paddings in pixels at the chart's dpi.
struct Spacing {
    pad: f64,
    tick_length: f64,
    tick_pad: f64,
    label_pad: f64,
    title_pad: f64,
}

impl Spacing {
    fn for_config(config: &ChartConfig) -> Self {
        Self {
            pad: config.points_to_px(LAYOUT_PAD * BASE_FONT_PT),
            tick_length: config.points_to_px(TICK_LENGTH_PT),
            tick_pad: config.points_to_px(TICK_PAD_PT),
            label_pad: config.points_to_px(LABEL_PAD_PT),
            title_pad: config.points_to_px(TITLE_PAD_PT),
        }
    }
}

impl ChartLayout {
    /// Lay out `series` according to `config`.
    pub fn compute(
        series: &Series,
        config: &ChartConfig,
        measure: &dyn TextMeasure,
    ) -> Result<Self, RenderError> {
        series.validate()?;
        config.validate()?;

        let (width, height) = config.pixel_size();
        let spacing = Spacing::for_config(config);
        let title_px = config.points_to_px(config.font_size_title as f64);
        let axis_px = config.points_to_px(config.font_size_axis as f64);
        let tick_px = config.points_to_px(config.font_size_tick as f64);

        let title = TextBlock::measure(measure, &config.title, title_px)?;
        let x_label = TextBlock::measure(measure, &config.x_axis_label, axis_px)?;
        let y_label = TextBlock::measure(measure, &config.y_axis_label, axis_px)?;

        let y_range = (config.y_min, config.y_max);
        let eps = (config.y_max - config.y_min) * 1e-9;
        let visible_ticks: Vec<f64> = config
            .y_ticks
            .iter()
            .copied()
            .filter(|&t| t >= config.y_min - eps && t <= config.y_max + eps)
            .collect();
        let tick_labels = format_ticks(&visible_ticks)
            .iter()
            .map(|label| TextBlock::measure(measure, label, tick_px))
            .collect::<Result<Vec<_>, _>>()?;
        let categories = series
            .records()
            .iter()
            .map(|r| TextBlock::measure(measure, &r.label, tick_px))
            .collect::<Result<Vec<_>, _>>()?;

        let max_y_tick_w = tick_labels.iter().map(|b| b.width).max().unwrap_or(0) as f64;
        let max_x_tick_h = categories.iter().map(|b| b.height).max().unwrap_or(0) as f64;
        let gap_after = |block: &TextBlock, pad: f64| if block.is_empty() { 0.0 } else { pad };

        let top = spacing.pad + title.height as f64 + gap_after(&title, spacing.title_pad);
        let bottom = spacing.pad
            + x_label.height as f64
            + gap_after(&x_label, spacing.label_pad)
            + max_x_tick_h
            + spacing.tick_pad
            + spacing.tick_length;
        let mut left = spacing.pad
            + y_label.height as f64
            + gap_after(&y_label, spacing.label_pad)
            + max_y_tick_w
            + spacing.tick_pad
            + spacing.tick_length;
        let mut right = spacing.pad;

        // Category labels under the outer bars may be wider than the space
        // between the bar and the figure edge.
        let x_range = x_view_range(series.len(), config.bar_width);
        let span = x_range.1 - x_range.0;
        let first_ratio = (0.0 - x_range.0) / span;
        let last_ratio = (x_range.1 - (series.len() - 1) as f64) / span;
        let first_half = categories.first().map(|b| b.width).unwrap_or(0) as f64 / 2.0;
        let last_half = categories.last().map(|b| b.width).unwrap_or(0) as f64 / 2.0;
        let base_left = left;
        for _ in 0..3 {
            let plot_w = width as f64 - left - right;
            left = base_left.max(spacing.pad + first_half - first_ratio * plot_w);
            right = spacing.pad.max(spacing.pad + last_half - last_ratio * plot_w);
        }

        let mut plot = PlotRect {
            left: left.round() as i32,
            top: top.round() as i32,
            right: (width as f64 - right).round() as i32,
            bottom: (height as f64 - bottom).round() as i32,
        };
        let tight = plot.width() >= MIN_PLOT_PX && plot.height() >= MIN_PLOT_PX;
        if !tight {
            warn!(
                width,
                height,
                "chart text does not fit; tight layout not applied"
            );
            plot = PlotRect {
                left: (width as f64 * FALLBACK_LEFT).round() as i32,
                top: (height as f64 * (1.0 - FALLBACK_TOP)).round() as i32,
                right: (width as f64 * FALLBACK_RIGHT).round() as i32,
                bottom: (height as f64 * (1.0 - FALLBACK_BOTTOM)).round() as i32,
            };
        }
        debug!(?plot, tight, "computed plot area");

        let map_x = |x: f64| plot.left as f64 + (x - x_range.0) / span * plot.width() as f64;
        let map_y = |y: f64| {
            plot.bottom as f64 - (y - y_range.0) / (y_range.1 - y_range.0) * plot.height() as f64
        };

        let y_ticks = visible_ticks
            .iter()
            .zip(tick_labels)
            .map(|(&value, label)| YTick {
                value,
                y: map_y(value).round() as i32,
                label,
            })
            .collect();

        let bars = series
            .records()
            .iter()
            .zip(bar_slots(series.len(), config.bar_width))
            .zip(categories)
            .enumerate()
            .map(|(i, ((record, (x0, x1)), category))| {
                let rect = clipped_bar_span(record.value, y_range.0, y_range.1).map(|(lo, hi)| {
                    [
                        (map_x(x0).round() as i32, map_y(hi).round() as i32),
                        (map_x(x1).round() as i32, map_y(lo).round() as i32),
                    ]
                });
                let center_x = map_x(i as f64).round() as i32;
                BarGeometry {
                    rect,
                    center_x,
                    color: record.color,
                    category,
                    value_label: format_value_label(record.value),
                    label_anchor: (
                        center_x,
                        map_y(record.value + config.label_offset).round() as i32,
                    ),
                }
            })
            .collect();

        let tick_length = spacing.tick_length.round() as i32;
        let tick_reach = spacing.tick_length + spacing.tick_pad;
        let x_tick_label_top = plot.bottom + tick_reach.round() as i32;
        let y_tick_label_right = plot.left - tick_reach.round() as i32;

        let title_origin = (
            plot.center_x(),
            plot.top - (spacing.title_pad + title.height as f64).round() as i32,
        );
        let x_label_origin = (
            plot.center_x(),
            x_tick_label_top + (max_x_tick_h + spacing.label_pad).round() as i32,
        );
        let y_label_origin = (
            y_tick_label_right
                - (max_y_tick_w + spacing.label_pad + y_label.height as f64).round() as i32,
            plot.center_y(),
        );

        let centered = |center: i32, extent: u32| {
            let half = extent as i32 / 2;
            (center - half, center - half + extent as i32)
        };
        let title_span = centered(plot.center_x(), title.width);
        let x_label_span = centered(plot.center_x(), x_label.width);
        let y_label_span = centered(plot.center_y(), y_label.width);
        let fits = |(lo, hi): (i32, i32), limit: u32| lo >= 0 && hi <= limit as i32;

        let mut overflowing = Vec::new();
        if !title.is_empty() && (!fits(title_span, width) || title_origin.1 < 0) {
            overflowing.push("title");
        }
        if !x_label.is_empty()
            && (!fits(x_label_span, width)
                || x_label_origin.1 + x_label.height as i32 > height as i32)
        {
            overflowing.push("x-axis label");
        }
        if !y_label.is_empty() && (!fits(y_label_span, height) || y_label_origin.0 < 0) {
            overflowing.push("y-axis label");
        }
        let text_overflow = !overflowing.is_empty();
        if text_overflow {
            warn!(
                ?overflowing,
                ?title_span,
                ?y_label_span,
                width,
                height,
                "chart text extends past the figure edges and will be clipped"
            );
        }

        Ok(Self {
            width,
            height,
            plot,
            x_range,
            y_range,
            tick_length,
            title,
            title_origin,
            x_label,
            x_label_origin,
            y_label,
            y_label_origin,
            y_ticks,
            y_tick_label_right,
            x_tick_label_top,
            bars,
            value_label_px: config.points_to_px(config.font_size_label as f64),
            tight,
            title_span,
            y_label_span,
            text_overflow,
        })
    }
}
