//! Text measurement contract.
//!
//! The layout pass never touches a drawing surface. Whoever renders the chart
//! supplies a [`TextMeasurer`] and every label is measured exactly once, up
//! front, before any collision resolution runs.

use crate::text_metrics;

/// Font inputs relevant to measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
}

impl TextStyle {
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
        }
    }
}

/// Bounding box of a single line of text drawn with a start anchor at `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBox {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        (**self).measure(text, style)
    }
}

/// Deterministic widths from a per-character table. Needs no fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        TextBox {
            x: 0.0,
            width: fallback_text_width(text, style.font_size),
            height: style.font_size * LINE_HEIGHT,
        }
    }
}

/// Installed-font metrics, falling back to the heuristic table when the
/// family does not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontTextMeasurer;

impl TextMeasurer for FontTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        let normalized = text.replace('\t', "    ");
        match text_metrics::measure_line(&normalized, style.font_size, &style.font_family) {
            Some(metrics) => TextBox {
                x: 0.0,
                width: metrics.width,
                height: metrics.height,
            },
            None => HeuristicTextMeasurer.measure(&normalized, style),
        }
    }
}

/// Picks the measurer the CLI and benches use.
pub fn measurer_for(fast_text_metrics: bool) -> Box<dyn TextMeasurer> {
    if fast_text_metrics {
        Box::new(HeuristicTextMeasurer)
    } else {
        Box::new(FontTextMeasurer)
    }
}

const LINE_HEIGHT: f32 = 1.2;

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars()
        .filter(|ch| *ch != '\n')
        .map(char_width_factor)
        .sum::<f32>()
        * font_size
}

fn char_width_factor(ch: char) -> f32 {
    // Em-relative advances of a Helvetica-like sans-serif.
    match ch {
        ' ' => 0.278,
        '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.278,
        '(' | ')' | '[' | ']' | '{' | '}' | '-' => 0.333,
        '%' => 0.889,
        '@' | '#' | '&' => 0.8,
        'I' | 'i' | 'j' | 'l' => 0.222,
        'f' | 't' | 'r' => 0.333,
        'm' | 'M' | 'W' => 0.833,
        'w' => 0.722,
        'A'..='Z' => 0.667,
        'a'..='z' => 0.556,
        '0'..='9' => 0.556,
        _ => 0.6,
    }
}
