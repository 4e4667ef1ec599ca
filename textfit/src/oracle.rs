// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host capability the engine measures through.

use kurbo::Size;

/// Live layout measurement supplied by the host UI.
///
/// The engine never computes text extents itself. Every probe is a
/// render-then-read round trip through this trait: [`set_font_size`] followed
/// by [`measure_box`]. Implementations are expected to relayout synchronously
/// so the box read after a write reflects that write.
///
/// The engine assumes the measured box grows with font size. Hosts where
/// wrapping reflow breaks that assumption still terminate; the result is then
/// *a* fitting size, not necessarily the largest one.
///
/// [`set_font_size`]: LayoutOracle::set_font_size
/// [`measure_box`]: LayoutOracle::measure_box
pub trait LayoutOracle {
    /// Identity handle for a display surface.
    ///
    /// Per-surface bookkeeping is keyed by this handle, so two handles that
    /// compare equal must refer to the same surface.
    type Surface: Clone + Eq + core::hash::Hash;
    /// Handle for the inner measurable unit wrapping a surface's text.
    type Unit: Clone;
    /// Host-side failure (e.g. a detached surface).
    type Error;

    /// Returns the surface's content box, padding excluded.
    ///
    /// A zero or non-finite dimension means the host has no static size for it.
    fn content_box(&mut self, surface: &Self::Surface) -> Result<Size, Self::Error>;

    /// Moves the surface's content into a new inline-sized inner unit.
    ///
    /// The original content must be preserved inside the unit. If the surface
    /// already holds a unit from an earlier fit (e.g. after
    /// [`TextFitter::forget`] or from another fitter), that unit may be
    /// returned instead, but with any vertical alignment already stripped as
    /// by [`clear_vertical_alignment`]: the engine measures it right away and
    /// has no record of the earlier pass.
    ///
    /// [`TextFitter::forget`]: crate::TextFitter::forget
    /// [`clear_vertical_alignment`]: LayoutOracle::clear_vertical_alignment
    fn wrap_content(&mut self, surface: &Self::Surface) -> Result<Self::Unit, Self::Error>;

    /// Returns the unit's current computed font size in pixels.
    fn font_size(&mut self, unit: &Self::Unit) -> Result<f64, Self::Error>;

    /// Applies a font size to the unit.
    fn set_font_size(&mut self, unit: &Self::Unit, px: f64) -> Result<(), Self::Error>;

    /// Returns the unit's rendered box after layout.
    fn measure_box(&mut self, unit: &Self::Unit) -> Result<Size, Self::Error>;

    /// Returns the unit's natural content height (its scroll extent).
    fn content_height(&mut self, unit: &Self::Unit) -> Result<f64, Self::Error>;

    /// Allows or forbids line wrapping inside the surface.
    fn set_wrapping(&mut self, surface: &Self::Surface, allow: bool) -> Result<(), Self::Error>;

    /// Applies the cosmetic alignment treatments.
    fn apply_alignment(
        &mut self,
        surface: &Self::Surface,
        unit: &Self::Unit,
        styles: &AlignmentStyles,
    ) -> Result<(), Self::Error>;

    /// Strips a previous vertical alignment pass, including the fixed unit height.
    fn clear_vertical_alignment(
        &mut self,
        surface: &Self::Surface,
        unit: &Self::Unit,
    ) -> Result<(), Self::Error>;
}

/// Alignment treatments applied after a size has been committed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlignmentStyles {
    /// Center text horizontally in both the surface and the unit.
    pub center_horizontally: bool,
    /// Vertically center the unit inside the surface.
    pub vertical: Option<VerticalCentering>,
}

/// Layout-level vertical centering of the inner unit.
///
/// Hosts should position the surface if it uses default flow positioning,
/// tag the unit for centering, and fix its height to `content_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalCentering {
    /// The unit's natural content height at the committed size.
    pub content_height: f64,
    /// Also tag the outer surface for flexbox-based centering.
    pub flexbox: bool,
}
