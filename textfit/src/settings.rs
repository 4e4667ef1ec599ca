// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-call fit configuration.

use kurbo::Size;

use crate::error::ConfigurationError;

/// Minimum font size used when [`FitSettings::min_font_size`] is unset.
pub const DEFAULT_MIN_FONT_SIZE: u32 = 6;

/// Options for a single [`TextFitter::fit`](crate::TextFitter::fit) call.
///
/// All fields have defaults, so hosts typically start from
/// `FitSettings::default()` and override a few with the `with_*` setters.
/// With the `serde` feature enabled, the record deserializes from a partial
/// camelCase object such as `{"alignVert": true, "maxFontSize": 120}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FitSettings {
    /// Vertically center the fitted text using layout-level centering.
    pub align_vert: bool,
    /// Horizontally center the text.
    pub align_horiz: bool,
    /// Always allow wrapping. When `false`, text stays on one line unless
    /// multi-line content is detected.
    pub multi_line: bool,
    /// Infer multi-line content from the rendered height at the current size.
    pub detect_multi_line: bool,
    /// Smallest candidate font size in pixels (inclusive).
    ///
    /// `None` uses [`DEFAULT_MIN_FONT_SIZE`], lowered to an explicit
    /// maximum below it.
    pub min_font_size: Option<u32>,
    /// Largest candidate font size in pixels (inclusive).
    ///
    /// `None` uses the surface's available height.
    pub max_font_size: Option<u32>,
    /// Reconsider surfaces on every call. When `false`, a surface is fitted
    /// once and skipped on later one-shot calls.
    pub re_process: bool,
    /// Ignore height as a fit constraint.
    pub width_only: bool,
    /// Multiplier applied to the discovered size before it is committed.
    pub scale_factor: f64,
    /// When aligning vertically, also tag the surface for flexbox centering.
    pub align_vert_with_flexbox: bool,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            align_vert: false,
            align_horiz: false,
            multi_line: false,
            detect_multi_line: true,
            min_font_size: None,
            max_font_size: None,
            re_process: true,
            width_only: false,
            scale_factor: 1.0,
            align_vert_with_flexbox: false,
        }
    }
}

impl FitSettings {
    /// Sets vertical alignment.
    #[must_use]
    pub fn with_align_vert(mut self, align_vert: bool) -> Self {
        self.align_vert = align_vert;
        self
    }

    /// Sets horizontal alignment.
    #[must_use]
    pub fn with_align_horiz(mut self, align_horiz: bool) -> Self {
        self.align_horiz = align_horiz;
        self
    }

    /// Forces wrapping on or off.
    #[must_use]
    pub fn with_multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

    /// Enables or disables multi-line detection.
    #[must_use]
    pub fn with_detect_multi_line(mut self, detect: bool) -> Self {
        self.detect_multi_line = detect;
        self
    }

    /// Sets the inclusive font size bounds.
    #[must_use]
    pub fn with_font_size_range(mut self, min: u32, max: u32) -> Self {
        self.min_font_size = Some(min);
        self.max_font_size = Some(max);
        self
    }

    /// Sets the minimum font size, keeping the maximum as is.
    #[must_use]
    pub fn with_min_font_size(mut self, min: u32) -> Self {
        self.min_font_size = Some(min);
        self
    }

    /// Sets the maximum font size; `None` uses the available height.
    #[must_use]
    pub fn with_max_font_size(mut self, max: Option<u32>) -> Self {
        self.max_font_size = max;
        self
    }

    /// Sets whether already-fitted surfaces are reconsidered.
    #[must_use]
    pub fn with_re_process(mut self, re_process: bool) -> Self {
        self.re_process = re_process;
        self
    }

    /// Sets whether only the width constrains the fit.
    #[must_use]
    pub fn with_width_only(mut self, width_only: bool) -> Self {
        self.width_only = width_only;
        self
    }

    /// Sets the multiplier applied to the committed size.
    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Sets flexbox tagging for vertical alignment.
    #[must_use]
    pub fn with_align_vert_with_flexbox(mut self, flexbox: bool) -> Self {
        self.align_vert_with_flexbox = flexbox;
        self
    }

    /// Checks the settings that do not depend on any surface.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let (Some(min), Some(max)) = (self.min_font_size, self.max_font_size)
            && min > max
        {
            return Err(ConfigurationError::InvalidBounds { min, max });
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConfigurationError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }

    /// Resolves the inclusive search range for a surface with the given content box.
    ///
    /// The caller has already checked that the box has a usable width (and
    /// height, unless `width_only`). A defaulted maximum never drops below
    /// the minimum, and a defaulted minimum never exceeds an explicit maximum.
    pub(crate) fn search_bounds(&self, available: Size) -> (u32, u32) {
        let mut low = self.min_font_size.unwrap_or(DEFAULT_MIN_FONT_SIZE);
        let high = match self.max_font_size {
            Some(max) => max,
            None => {
                let limit = if has_extent(available.height) {
                    available.height
                } else {
                    available.width
                };
                floor_px(limit).max(low)
            }
        };
        if self.min_font_size.is_none() {
            low = low.min(high);
        }
        (low, high)
    }
}

pub(crate) fn has_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Float-to-int `as` saturates; the input is a positive finite extent"
)]
fn floor_px(v: f64) -> u32 {
    v as u32
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn default_max_follows_available_height() {
        let settings = FitSettings::default();
        assert_eq!(settings.search_bounds(Size::new(300.0, 72.9)), (6, 72));
    }

    #[test]
    fn width_only_without_height_falls_back_to_width() {
        let settings = FitSettings::default().with_width_only(true);
        assert_eq!(settings.search_bounds(Size::new(40.0, 0.0)), (6, 40));
    }

    #[test]
    fn defaulted_max_never_drops_below_min() {
        let settings = FitSettings::default().with_min_font_size(12);
        assert_eq!(settings.search_bounds(Size::new(300.0, 8.0)), (12, 12));
    }

    #[test]
    fn defaulted_min_yields_to_explicit_max() {
        let settings = FitSettings::default().with_max_font_size(Some(4));
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.search_bounds(Size::new(300.0, 100.0)), (4, 4));
    }

    #[test]
    fn inverted_explicit_bounds_are_rejected() {
        let settings = FitSettings::default().with_font_size_range(20, 10);
        assert_eq!(
            settings.validate(),
            Err(ConfigurationError::InvalidBounds { min: 20, max: 10 })
        );
    }

    #[test]
    fn non_positive_scale_factor_is_rejected() {
        let settings = FitSettings::default().with_scale_factor(0.0);
        assert!(
            matches!(
                settings.validate(),
                Err(ConfigurationError::InvalidScaleFactor(_))
            ),
            "zero scale factor must be rejected"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_camel_case_json_keeps_defaults() {
        let settings: FitSettings =
            serde_json::from_str(r#"{"alignVert": true, "maxFontSize": 120, "reProcess": false}"#)
                .unwrap();
        assert!(settings.align_vert, "alignVert should parse");
        assert!(!settings.re_process, "reProcess should parse");
        assert_eq!(settings.max_font_size, Some(120));
        assert_eq!(settings.min_font_size, None);
        assert_eq!(settings.search_bounds(Size::new(300.0, 200.0)), (6, 120));
        assert!(settings.detect_multi_line, "defaults should fill the rest");
    }
}
