use crate::{Error, FontWeight, Result};
use serde::Serialize;

pub mod wrap;

/// How a piece of text is rendered: font family list, weight, pixel size and letter spacing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Comma separated family list; may name the generic `sans-serif` family.
    pub font: String,
    pub weight: FontWeight,
    pub size: u32,
    /// Extra pixels added after every character.
    pub spacing: i32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            weight: FontWeight::Default,
            size: 16,
            spacing: 0,
        }
    }
}

impl TextStyle {
    pub fn new(font: impl Into<String>, size: u32) -> Self {
        Self {
            font: font.into(),
            size,
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub(crate) fn size_px(&self) -> f64 {
        f64::from(self.size.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderResult {
    pub width: f64,
    pub height: f64,
    pub lines: usize,
}

/// Measurement backend used by [`crate::MetricsChecker`].
///
/// Implementors only measure single lines; [`TextMeasurer::measure`] wraps text greedily on
/// top of that.
pub trait TextMeasurer {
    /// Advance width of a single line, in pixels.
    fn line_width(&self, line: &str, style: &TextStyle) -> Result<f64>;

    fn line_height(&self, style: &TextStyle) -> Result<f64>;

    /// Measures `text`, wrapping at `max_width` when given.
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> Result<RenderResult> {
        let lines = wrap::wrap_text_lines(text, self, style, max_width)?;
        let mut width = 0.0f64;
        for line in &lines {
            width = width.max(self.line_width(line, style)?);
        }
        let height = lines.len() as f64 * self.line_height(style)?;
        Ok(RenderResult {
            width,
            height,
            lines: lines.len(),
        })
    }
}

/// Backend used when no rendering capability has been configured.
///
/// Every call fails with [`Error::MeasurementUnavailable`] so a missing backend can never be
/// mistaken for a zero-sized rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTextMeasurer;

impl TextMeasurer for UnavailableTextMeasurer {
    fn line_width(&self, _line: &str, _style: &TextStyle) -> Result<f64> {
        Err(Error::MeasurementUnavailable)
    }

    fn line_height(&self, _style: &TextStyle) -> Result<f64> {
        Err(Error::MeasurementUnavailable)
    }
}

/// Font-free approximation: every character is `char_width_factor` em wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn char_width_factor(&self) -> f64 {
        if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        }
    }

    fn line_height_factor(&self) -> f64 {
        if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn line_width(&self, line: &str, style: &TextStyle) -> Result<f64> {
        let chars = line.chars().count() as f64;
        let advance = style.size_px() * self.char_width_factor() + f64::from(style.spacing);
        Ok((chars * advance).max(0.0))
    }

    fn line_height(&self, style: &TextStyle) -> Result<f64> {
        Ok(style.size_px() * self.line_height_factor())
    }
}
