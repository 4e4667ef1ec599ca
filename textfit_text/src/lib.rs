// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for fit-to-box sizing.
//!
//! The sizing engine in `textfit` never shapes text itself. Hosts that render
//! into a real layout engine (a browser DOM, for instance) answer measurement
//! queries directly; hosts without one can build a retained layout model on
//! top of the small interface in this crate.
//!
//! This crate is:
//! - `no_std`-friendly (it uses `alloc` for wrapped lines and family names), and
//! - renderer-agnostic (a shaping engine such as Parley and a plain heuristic
//!   can both implement [`TextMeasurer`]).

#![no_std]

extern crate alloc;

mod wrap;

use alloc::sync::Arc;

pub use wrap::wrap_lines;

/// A text measurement interface used to model inline text blocks.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate), or
/// - backed by a shaping engine (e.g. Parley).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; line breaks are the caller's job.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Measure a block of text, optionally wrapped at `max_width`.
    ///
    /// Explicit `\n` always starts a new line. When `max_width` is `Some`, words
    /// are greedily packed so each line fits; a single word wider than the
    /// limit gets a line of its own and overflows.
    ///
    /// The default implementation wraps with [`wrap_lines`] and measures each
    /// line with [`TextMeasurer::measure`]. Shaping backends with their own
    /// line breaker should override it.
    fn measure_block(&self, text: &str, style: &TextStyle, max_width: Option<f64>) -> BlockMetrics {
        let lines = wrap_lines(text, max_width, |line| self.measure(line, style).advance_width);
        let mut block = BlockMetrics::default();
        for line in &lines {
            let metrics = if line.is_empty() {
                // Empty lines still take up a line box.
                self.measure("M", style)
            } else {
                self.measure(line, style)
            };
            if !line.is_empty() {
                block.width = block.width.max(metrics.advance_width);
            }
            block.height += style.line_height.resolve(style.font_size, &metrics);
            block.line_count += 1;
        }
        block
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }

    fn measure_block(&self, text: &str, style: &TextStyle, max_width: Option<f64>) -> BlockMetrics {
        (**self).measure_block(text, style, max_width)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
    /// Height of each line box.
    pub line_height: LineHeight,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            line_height: LineHeight::Normal,
        }
    }

    /// Returns a copy of this style at a different font size.
    #[must_use]
    pub fn at_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the line height.
    #[must_use]
    pub fn with_line_height(mut self, line_height: LineHeight) -> Self {
        self.line_height = line_height;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        // Browser default `font-size: medium`.
        Self::new(16.0)
    }
}

/// CSS-style `line-height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    /// Use the font's own metrics (`ascent + descent + leading`).
    Normal,
    /// A multiple of the font size (CSS unitless `line-height`).
    Relative(f64),
    /// A fixed height in pixels.
    Absolute(f64),
}

impl LineHeight {
    /// Resolves the line box height for a line measured with `metrics`.
    #[must_use]
    pub fn resolve(self, font_size: f64, metrics: &TextMetrics) -> f64 {
        match self {
            Self::Normal => metrics.line_height(),
            Self::Relative(factor) => (factor * font_size).max(0.0),
            Self::Absolute(px) => px.max(0.0),
        }
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Nova Mono"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Parses a CSS-ish family name, mapping the generic keywords.
    #[must_use]
    pub fn from_css(name: &str) -> Self {
        match name.trim() {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            other => Self::Named(Arc::from(other.trim_matches(['"', '\'']))),
        }
    }

    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width of the line.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty line.
    pub const ZERO: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Measured extent of a block of (possibly wrapped) text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockMetrics {
    /// Number of line boxes.
    pub line_count: usize,
    /// Width of the widest line.
    pub width: f64,
    /// Sum of all line box heights.
    pub height: f64,
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_block_is_one_line_without_limit() {
        let block = HeuristicTextMeasurer.measure_block("12:45", &TextStyle::new(10.0), None);
        assert_eq!(block.line_count, 1, "unexpected line count: {block:?}");
        assert!((block.width - 30.0).abs() < 1e-9, "width was {}", block.width);
        assert!((block.height - 10.0).abs() < 1e-9, "height was {}", block.height);
    }

    #[test]
    fn explicit_newlines_stack_lines() {
        let style = TextStyle::new(10.0).with_line_height(LineHeight::Relative(1.5));
        let block = HeuristicTextMeasurer.measure_block("ab\ncdef", &style, None);
        assert_eq!(block.line_count, 2, "unexpected line count: {block:?}");
        assert!((block.width - 24.0).abs() < 1e-9, "width was {}", block.width);
        assert!((block.height - 30.0).abs() < 1e-9, "height was {}", block.height);
    }

    #[test]
    fn wrapping_limits_width() {
        let style = TextStyle::new(10.0);
        // Each word is 4 glyphs = 24px; "word word" is 54px.
        let block = HeuristicTextMeasurer.measure_block("word word word", &style, Some(50.0));
        assert_eq!(block.line_count, 3, "unexpected line count: {block:?}");
        assert!(block.width <= 50.0, "width was {}", block.width);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let block = HeuristicTextMeasurer.measure_block("", &TextStyle::default(), Some(10.0));
        assert_eq!(block, BlockMetrics::default());
    }

    #[test]
    fn css_family_keywords_are_generic() {
        assert_eq!(FontFamily::from_css("monospace"), FontFamily::Monospace);
        assert_eq!(
            FontFamily::from_css("'Nova Mono'").as_css_family(),
            "Nova Mono"
        );
    }
}
