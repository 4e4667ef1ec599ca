// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory layout host driven by a [`TextMeasurer`].
//!
//! [`RetainedOracle`] models just enough of a box layout to fit text without a
//! browser: each surface is a fixed box with padding, its inner unit is an
//! inline block sized to its text, and wrapping follows the surface's
//! white-space mode. It is useful for native renderers, headless tests, and
//! the demo binary.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Insets, Size};
use textfit_text::{TextMeasurer, TextStyle};

use crate::oracle::{AlignmentStyles, LayoutOracle};

/// Identifies a surface owned by a [`RetainedOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u32);

/// Identifies the inner unit of a retained surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnitId(SurfaceId);

/// Errors reported by [`RetainedOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RetainedError {
    /// The surface id was not issued by this oracle.
    #[error("unknown surface {0:?}")]
    UnknownSurface(SurfaceId),
    /// The unit's surface has no inner unit yet.
    #[error("surface {0:?} has not been wrapped")]
    NotWrapped(SurfaceId),
}

/// How a surface participates in positioning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Default flow positioning.
    #[default]
    Static,
    /// Positioned, so absolutely positioned children center against it.
    Relative,
}

/// Description of a surface to add to a [`RetainedOracle`].
#[derive(Clone, Debug, PartialEq)]
pub struct RetainedSurface {
    /// Outer box size (padding included).
    pub size: Size,
    /// Padding inside the outer box.
    pub padding: Insets,
    /// Text content; `\n` is a hard line break.
    pub text: String,
    /// Text style; its `font_size` is the initial (natural) size.
    pub style: TextStyle,
}

impl RetainedSurface {
    /// Creates a surface with no padding and the default text style.
    pub fn new(text: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            padding: Insets::ZERO,
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Insets>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Sets the text style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Clone, Debug)]
struct Node {
    spec: RetainedSurface,
    wrapped: bool,
    font_size: f64,
    allow_wrap: bool,
    position: Position,
    centered_horizontally: bool,
    fixed_height: Option<f64>,
    flex_centered: bool,
}

/// A [`LayoutOracle`] over in-memory surfaces.
#[derive(Clone, Debug)]
pub struct RetainedOracle<M> {
    measurer: M,
    nodes: Vec<Node>,
    layout_passes: u64,
}

impl<M: TextMeasurer> RetainedOracle<M> {
    /// Creates an empty host measuring text with `measurer`.
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            nodes: Vec::new(),
            layout_passes: 0,
        }
    }

    /// Adds a surface and returns its id.
    pub fn add_surface(&mut self, surface: RetainedSurface) -> SurfaceId {
        let id = SurfaceId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let font_size = surface.style.font_size;
        self.nodes.push(Node {
            spec: surface,
            wrapped: false,
            font_size,
            allow_wrap: true,
            position: Position::Static,
            centered_horizontally: false,
            fixed_height: None,
            flex_centered: false,
        });
        id
    }

    /// Number of layout reads served so far.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Returns the surface description.
    pub fn surface(&self, id: SurfaceId) -> Option<&RetainedSurface> {
        self.node(id).ok().map(|node| &node.spec)
    }

    /// Returns the font size currently applied to the surface's text.
    pub fn font_size_of(&self, id: SurfaceId) -> Option<f64> {
        self.node(id).ok().map(|node| node.font_size)
    }

    /// Returns `true` once the surface's text sits in an inner unit.
    pub fn is_wrapped(&self, id: SurfaceId) -> bool {
        self.node(id).is_ok_and(|node| node.wrapped)
    }

    /// Returns `true` if the surface allows line wrapping.
    pub fn allows_wrapping(&self, id: SurfaceId) -> bool {
        self.node(id).is_ok_and(|node| node.allow_wrap)
    }

    /// Returns the surface's positioning mode.
    pub fn position(&self, id: SurfaceId) -> Option<Position> {
        self.node(id).ok().map(|node| node.position)
    }

    /// Returns `true` if text is horizontally centered.
    pub fn is_centered_horizontally(&self, id: SurfaceId) -> bool {
        self.node(id).is_ok_and(|node| node.centered_horizontally)
    }

    /// Returns the fixed unit height set by vertical alignment, if active.
    pub fn vertical_alignment(&self, id: SurfaceId) -> Option<f64> {
        self.node(id).ok().and_then(|node| node.fixed_height)
    }

    /// Returns `true` if the surface is tagged for flexbox centering.
    pub fn is_flex_centered(&self, id: SurfaceId) -> bool {
        self.node(id).is_ok_and(|node| node.flex_centered)
    }

    /// Replaces the surface's text, keeping its current font size.
    pub fn set_text(&mut self, id: SurfaceId, text: impl Into<String>) -> Result<(), RetainedError> {
        self.node_mut(id)?.spec.text = text.into();
        Ok(())
    }

    /// Resizes the surface's outer box.
    pub fn set_size(&mut self, id: SurfaceId, size: Size) -> Result<(), RetainedError> {
        self.node_mut(id)?.spec.size = size;
        Ok(())
    }

    fn node(&self, id: SurfaceId) -> Result<&Node, RetainedError> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(RetainedError::UnknownSurface(id))
    }

    fn node_mut(&mut self, id: SurfaceId) -> Result<&mut Node, RetainedError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(RetainedError::UnknownSurface(id))
    }

    fn unit_node(&self, unit: UnitId) -> Result<&Node, RetainedError> {
        let node = self.node(unit.0)?;
        if node.wrapped {
            Ok(node)
        } else {
            Err(RetainedError::NotWrapped(unit.0))
        }
    }

    fn unit_node_mut(&mut self, unit: UnitId) -> Result<&mut Node, RetainedError> {
        let node = self.node_mut(unit.0)?;
        if node.wrapped {
            Ok(node)
        } else {
            Err(RetainedError::NotWrapped(unit.0))
        }
    }

    fn content_size(node: &Node) -> Size {
        let padding = node.spec.padding;
        Size::new(
            (node.spec.size.width - padding.x_value()).max(0.0),
            (node.spec.size.height - padding.y_value()).max(0.0),
        )
    }

    fn natural_size(&self, node: &Node) -> Size {
        let style = node.spec.style.at_size(node.font_size);
        let max_width = node.allow_wrap.then(|| Self::content_size(node).width);
        let block = self
            .measurer
            .measure_block(&node.spec.text, &style, max_width);
        Size::new(block.width, block.height)
    }
}

impl<M: TextMeasurer> LayoutOracle for RetainedOracle<M> {
    type Surface = SurfaceId;
    type Unit = UnitId;
    type Error = RetainedError;

    fn content_box(&mut self, surface: &SurfaceId) -> Result<Size, RetainedError> {
        self.layout_passes += 1;
        Ok(Self::content_size(self.node(*surface)?))
    }

    fn wrap_content(&mut self, surface: &SurfaceId) -> Result<UnitId, RetainedError> {
        let node = self.node_mut(*surface)?;
        node.wrapped = true;
        // A unit left over from an earlier fit must not keep its fixed height.
        node.fixed_height = None;
        node.flex_centered = false;
        Ok(UnitId(*surface))
    }

    fn font_size(&mut self, unit: &UnitId) -> Result<f64, RetainedError> {
        Ok(self.unit_node(*unit)?.font_size)
    }

    fn set_font_size(&mut self, unit: &UnitId, px: f64) -> Result<(), RetainedError> {
        self.unit_node_mut(*unit)?.font_size = px;
        Ok(())
    }

    fn measure_box(&mut self, unit: &UnitId) -> Result<Size, RetainedError> {
        self.layout_passes += 1;
        let node = self.unit_node(*unit)?;
        let natural = self.natural_size(node);
        Ok(Size::new(
            natural.width,
            node.fixed_height.unwrap_or(natural.height),
        ))
    }

    fn content_height(&mut self, unit: &UnitId) -> Result<f64, RetainedError> {
        self.layout_passes += 1;
        let node = self.unit_node(*unit)?;
        Ok(self.natural_size(node).height)
    }

    fn set_wrapping(&mut self, surface: &SurfaceId, allow: bool) -> Result<(), RetainedError> {
        self.node_mut(*surface)?.allow_wrap = allow;
        Ok(())
    }

    fn apply_alignment(
        &mut self,
        surface: &SurfaceId,
        unit: &UnitId,
        styles: &AlignmentStyles,
    ) -> Result<(), RetainedError> {
        self.unit_node(*unit)?;
        let node = self.node_mut(*surface)?;
        if styles.center_horizontally {
            node.centered_horizontally = true;
        }
        if let Some(vertical) = styles.vertical {
            if node.position == Position::Static {
                node.position = Position::Relative;
            }
            node.fixed_height = Some(vertical.content_height);
            if vertical.flexbox {
                node.flex_centered = true;
            }
        }
        Ok(())
    }

    fn clear_vertical_alignment(
        &mut self,
        surface: &SurfaceId,
        unit: &UnitId,
    ) -> Result<(), RetainedError> {
        self.unit_node(*unit)?;
        let node = self.node_mut(*surface)?;
        node.fixed_height = None;
        node.flex_centered = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use textfit_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn content_box_excludes_padding() {
        let mut host = RetainedOracle::new(HeuristicTextMeasurer);
        let id = host.add_surface(RetainedSurface::new("x", 100.0, 50.0).with_padding(5.0));
        assert_eq!(host.content_box(&id), Ok(Size::new(90.0, 40.0)));
    }

    #[test]
    fn unit_requires_wrapping_first() {
        let mut host = RetainedOracle::new(HeuristicTextMeasurer);
        let id = host.add_surface(RetainedSurface::new("x", 100.0, 50.0));
        assert_eq!(
            host.measure_box(&UnitId(id)),
            Err(RetainedError::NotWrapped(id))
        );
        let unit = host.wrap_content(&id).unwrap();
        assert!(host.measure_box(&unit).is_ok(), "wrapped unit should measure");
    }

    #[test]
    fn unknown_surface_is_an_error() {
        let mut host = RetainedOracle::new(HeuristicTextMeasurer);
        let bogus = SurfaceId(7);
        assert_eq!(
            host.content_box(&bogus),
            Err(RetainedError::UnknownSurface(bogus))
        );
    }

    #[test]
    fn rewrapping_strips_vertical_alignment() {
        let mut host = RetainedOracle::new(HeuristicTextMeasurer);
        let id = host.add_surface(RetainedSurface::new("x", 100.0, 50.0));
        let unit = host.wrap_content(&id).unwrap();
        let styles = AlignmentStyles {
            center_horizontally: false,
            vertical: Some(crate::VerticalCentering {
                content_height: 400.0,
                flexbox: true,
            }),
        };
        host.apply_alignment(&id, &unit, &styles).unwrap();
        assert_eq!(host.measure_box(&unit).unwrap().height, 400.0);

        let unit = host.wrap_content(&id).unwrap();
        assert_eq!(host.vertical_alignment(id), None);
        assert!(!host.is_flex_centered(id), "flexbox tag is stripped");
        assert!(host.measure_box(&unit).unwrap().height < 400.0);
        assert_eq!(host.position(id), Some(Position::Relative));
    }

    #[test]
    fn nowrap_keeps_one_line() {
        let mut host = RetainedOracle::new(HeuristicTextMeasurer);
        let style = TextStyle::new(10.0);
        let id = host.add_surface(
            RetainedSurface::new("aaaa bbbb cccc", 30.0, 100.0).with_style(style),
        );
        let unit = host.wrap_content(&id).unwrap();
        let wrapped = host.measure_box(&unit).unwrap();
        host.set_wrapping(&id, false).unwrap();
        let single = host.measure_box(&unit).unwrap();
        assert!(wrapped.height > single.height, "{wrapped:?} vs {single:?}");
        assert!((single.height - 10.0).abs() < 1e-9, "{single:?}");
    }
}
