// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// A caller contract violation: the engine cannot search without a fixed target.
///
/// These are not retried; the caller must fix the surface layout or the
/// settings before fitting again.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The surface has no resolvable static width.
    #[error("set a static width on the target surface before fitting text")]
    MissingWidth,
    /// The surface has no resolvable static height (and `width_only` is off).
    #[error("set a static height and width on the target surface before fitting text")]
    MissingHeight,
    /// An explicit minimum font size is larger than the explicit maximum.
    #[error("min font size {min}px exceeds max font size {max}px")]
    InvalidBounds {
        /// The configured minimum.
        min: u32,
        /// The configured maximum.
        max: u32,
    },
    /// The scale factor is zero, negative, or not finite.
    #[error("scale factor {0} must be finite and positive")]
    InvalidScaleFactor(f64),
}

/// Errors returned when fitting a single surface.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FitError<E> {
    /// The surface or settings violate the caller contract.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The layout oracle failed while measuring or mutating the surface.
    #[error("layout oracle failed")]
    Oracle(#[source] E),
}

impl<E> FitError<E> {
    /// Returns `true` if this is a caller contract violation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
