// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for textfit.
//!
//! On `wasm32` targets this crate provides [`DomOracle`], a
//! [`textfit::LayoutOracle`] over live DOM elements: each probe writes an
//! inline `font-size` and reads back `getBoundingClientRect`, which forces a
//! synchronous layout pass.
//!
//! The class names and the alignment stylesheet are exported on every target
//! so server-rendered pages can ship the same CSS.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(any(target_arch = "wasm32", test))]
mod slots;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomOracle, DomSurface};

use alloc::string::String;

/// Class of the inner inline-block span holding a surface's text.
pub const FITTED_CLASS: &str = "textFitted";
/// Class marking a vertically centered inner span.
pub const ALIGN_VERT_CLASS: &str = "textFitAlignVert";
/// Class marking a surface that centers its span with flexbox.
pub const ALIGN_VERT_FLEX_CLASS: &str = "textFitAlignVertFlex";
/// Id of the injected `<style>` element.
pub const STYLESHEET_ID: &str = "textFitStyleSheet";

/// Rules backing the vertical alignment classes.
pub const STYLESHEET: &str = concat!(
    ".textFitAlignVert{",
    "position: absolute;",
    "top: 0; right: 0; bottom: 0; left: 0;",
    "margin: auto;",
    "display: flex;",
    "justify-content: center;",
    "flex-direction: column;",
    "}",
    ".textFitAlignVertFlex{",
    "display: flex;",
    "}",
    ".textFitAlignVertFlex .textFitAlignVert{",
    "position: static;",
    "}",
);

/// Errors reported by the DOM host.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// There is no global `window`.
    #[error("textfit_web: missing window")]
    MissingWindow,
    /// The window has no `document` (or no `<body>` for the stylesheet).
    #[error("textfit_web: missing document")]
    MissingDocument,
    /// The surface handle was not issued by this oracle.
    #[error("textfit_web: unknown surface {0}")]
    UnknownSurface(u32),
    /// An element could not be styled because it has no computed style.
    #[error("textfit_web: element has no computed style")]
    MissingComputedStyle,
    /// A DOM call threw.
    #[error("textfit_web: DOM call failed: {0}")]
    Js(String),
}

/// Parses a computed CSS pixel length such as `"12.5px"`.
///
/// Anything unparseable (including `""` and keywords) reads as `0`.
#[must_use]
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parses_computed_lengths() {
        assert!((parse_px("12px") - 12.0).abs() < 1e-9, "integer px");
        assert!((parse_px(" 7.25px ") - 7.25).abs() < 1e-9, "fractional px");
        assert!(parse_px("").abs() < 1e-9, "empty reads as zero");
        assert!(parse_px("auto").abs() < 1e-9, "keywords read as zero");
    }

    #[test]
    fn stylesheet_covers_alignment_classes() {
        assert!(STYLESHEET.contains(&alloc::format!(".{ALIGN_VERT_CLASS}{{")));
        assert!(STYLESHEET.contains(&alloc::format!(".{ALIGN_VERT_FLEX_CLASS}{{")));
    }
}
