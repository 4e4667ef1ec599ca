// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit text to a fixed box by searching for the largest font size.
//!
//! There is no closed-form mapping from font size to rendered extent: it
//! depends on font metrics, kerning, wrapping, and the rendering engine. So
//! instead of computing a size, [`TextFitter`] binary searches integer pixel
//! sizes and asks the host, through a [`LayoutOracle`], to render each
//! candidate and report the resulting box.
//!
//! The crate is split so each piece can be tested on its own:
//! - [`search_best_fit`] is the pure search, driven by any predicate.
//! - [`TextFitter`] runs the search against live surfaces, keeps per-surface
//!   state in a side table, and applies the alignment treatments.
//! - [`RetainedOracle`] is a host without a browser, built on
//!   [`textfit_text::TextMeasurer`].
//!
//! ```
//! use textfit::{FitSettings, RetainedOracle, RetainedSurface, TextFitter};
//! use textfit_text::HeuristicTextMeasurer;
//!
//! let mut host = RetainedOracle::new(HeuristicTextMeasurer);
//! let clock = host.add_surface(RetainedSurface::new("12:45", 400.0, 120.0));
//!
//! let mut fitter = TextFitter::new(host);
//! let report = fitter.fit([clock], &FitSettings::default().with_scale_factor(0.5));
//! assert!(report.is_ok());
//! assert_eq!(fitter.oracle().font_size_of(clock), Some(60.0));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod fitter;
mod oracle;
mod report;
mod retained;
mod search;
mod settings;
mod state;

pub use error::{ConfigurationError, FitError};
pub use fitter::TextFitter;
pub use oracle::{AlignmentStyles, LayoutOracle, VerticalCentering};
pub use report::{FitOutcome, FitReport, FittedSize};
pub use retained::{Position, RetainedError, RetainedOracle, RetainedSurface, SurfaceId, UnitId};
pub use search::{SearchResult, search_best_fit};
pub use settings::{DEFAULT_MIN_FONT_SIZE, FitSettings};
pub use state::FitPhase;
