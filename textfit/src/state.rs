// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface bookkeeping kept outside the host's own attribute system.

/// Where a surface is in its fit lifecycle.
///
/// `Unprocessed → Wrapped → Sized → (Aligned)`. Wrapping happens once per
/// surface; sizing is re-entered on every reprocessing call; alignment is
/// re-derived whenever it is requested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitPhase {
    /// The engine has never seen this surface (or it was forgotten).
    Unprocessed,
    /// The content has been wrapped in an inner unit, but no size committed.
    Wrapped,
    /// A font size has been committed.
    Sized {
        /// The committed (scaled) font size in pixels.
        font_size: f64,
    },
    /// A font size has been committed and the unit is vertically centered.
    Aligned {
        /// The committed (scaled) font size in pixels.
        font_size: f64,
        /// The fixed unit height set by the alignment pass.
        content_height: f64,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct SurfaceRecord<U> {
    pub(crate) unit: U,
    pub(crate) phase: FitPhase,
    /// Set by a one-shot (`re_process == false`) fit; such surfaces are
    /// skipped by later one-shot calls.
    pub(crate) fitted_once: bool,
}

impl<U> SurfaceRecord<U> {
    pub(crate) fn wrapped(unit: U) -> Self {
        Self {
            unit,
            phase: FitPhase::Wrapped,
            fitted_once: false,
        }
    }

    pub(crate) fn is_vertically_aligned(&self) -> bool {
        matches!(self.phase, FitPhase::Aligned { .. })
    }
}
