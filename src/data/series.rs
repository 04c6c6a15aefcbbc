//! Bar Series Module
//! Ordered (label, value, color) records that become left-to-right bars.

use crate::error::RenderError;
use std::str::FromStr;

/// Fill color of a bar, stored as RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colors accepted by `BarColor::from_str` (matplotlib values).
const NAMED_COLORS: [(&str, (u8, u8, u8)); 20] = [
    ("blue", (0, 0, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("purple", (128, 0, 128)),
    ("orange", (255, 165, 0)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("b", (0, 0, 255)),
    ("g", (0, 128, 0)),
    ("r", (255, 0, 0)),
    ("c", (0, 191, 191)),
    ("m", (191, 0, 191)),
    ("y", (191, 191, 0)),
    ("k", (0, 0, 0)),
    ("w", (255, 255, 255)),
];

impl BarColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // "#abc" expands to "#aabbcc"
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }
}

impl FromStr for BarColor {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(hex) = name.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| RenderError::invalid(format!("invalid hex color '{}'", s)));
        }

        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, (r, g, b))| Self::rgb(r, g, b))
            .ok_or_else(|| RenderError::invalid(format!("unknown color '{}'", s)))
    }
}

/// One bar: category label, measured value and fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRecord {
    pub label: String,
    pub value: f64,
    pub color: BarColor,
}

impl BarRecord {
    pub fn new(label: impl Into<String>, value: f64, color: BarColor) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Ordered bar records. Order determines left-to-right position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    records: Vec<BarRecord>,
}

impl Series {
    pub fn new(records: Vec<BarRecord>) -> Self {
        Self { records }
    }

    /// Build a series from parallel label/value/color columns.
    ///
    /// Colors are parsed with `BarColor::from_str`.
    pub fn from_columns<L, C>(
        labels: &[L],
        values: &[f64],
        colors: &[C],
    ) -> Result<Self, RenderError>
    where
        L: AsRef<str>,
        C: AsRef<str>,
    {
        if labels.len() != values.len() || labels.len() != colors.len() {
            return Err(RenderError::invalid(format!(
                "series columns differ in length: {} labels, {} values, {} colors",
                labels.len(),
                values.len(),
                colors.len()
            )));
        }

        let records = labels
            .iter()
            .zip(values)
            .zip(colors)
            .map(|((label, &value), color)| -> Result<BarRecord, RenderError> {
                Ok(BarRecord::new(label.as_ref(), value, color.as_ref().parse()?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn push(&mut self, record: BarRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[BarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the series can be charted: non-empty with finite values.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.records.is_empty() {
            return Err(RenderError::invalid("series is empty"));
        }
        if let Some(bad) = self.records.iter().find(|r| !r.value.is_finite()) {
            return Err(RenderError::invalid(format!(
                "value for '{}' is not finite ({})",
                bad.label, bad.value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!("blue".parse::<BarColor>().unwrap(), BarColor::rgb(0, 0, 255));
        assert_eq!("Green".parse::<BarColor>().unwrap(), BarColor::rgb(0, 128, 0));
        assert_eq!("grey".parse::<BarColor>().unwrap(), "gray".parse::<BarColor>().unwrap());
        assert_eq!("#ffa500".parse::<BarColor>().unwrap(), BarColor::rgb(255, 165, 0));
        assert_eq!("#f0a".parse::<BarColor>().unwrap(), BarColor::rgb(255, 0, 170));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!(matches!(
            "chartreuse-ish".parse::<BarColor>(),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!("#12345".parse::<BarColor>().is_err());
        assert!("#gggggg".parse::<BarColor>().is_err());
    }

    #[test]
    fn from_columns_keeps_order() {
        let series =
            Series::from_columns(&["A", "B"], &[0.019144, 0.0174948], &["blue", "red"]).unwrap();
        let labels: Vec<_> = series.records().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(series.records()[1].color, BarColor::rgb(255, 0, 0));
    }

    #[test]
    fn from_columns_rejects_mismatched_lengths() {
        let err = Series::from_columns(&["A", "B"], &[1.0], &["blue", "red"]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_empty_and_non_finite() {
        assert!(Series::default().validate().is_err());

        let mut series = Series::default();
        series.push(BarRecord::new("ok", 1.0, BarColor::rgb(0, 0, 0)));
        assert!(series.validate().is_ok());

        series.push(BarRecord::new("nan", f64::NAN, BarColor::rgb(0, 0, 0)));
        assert!(matches!(series.validate(), Err(RenderError::InvalidConfig(_))));
    }
}
