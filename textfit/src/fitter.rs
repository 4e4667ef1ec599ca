// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sizing engine.

use hashbrown::HashMap;
use kurbo::Size;

use crate::error::{ConfigurationError, FitError};
use crate::oracle::{AlignmentStyles, LayoutOracle, VerticalCentering};
use crate::report::{FitOutcome, FitReport, FittedSize};
use crate::search::search_best_fit;
use crate::settings::{FitSettings, has_extent};
use crate::state::{FitPhase, SurfaceRecord};

/// Finds and applies the largest font size at which each surface's text fits.
///
/// The fitter owns its [`LayoutOracle`] and a side table of per-surface state
/// keyed by surface identity. Nothing is stamped onto the host's surfaces
/// beyond what the oracle does to render.
///
/// Fitting is synchronous and single-threaded: every probe is a blocking
/// write-then-read through the oracle, and surfaces in a batch are processed
/// strictly in order. Callers must not fit overlapping surfaces from
/// concurrently running contexts.
pub struct TextFitter<O: LayoutOracle> {
    oracle: O,
    surfaces: HashMap<O::Surface, SurfaceRecord<O::Unit>>,
}

impl<O> core::fmt::Debug for TextFitter<O>
where
    O: LayoutOracle + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextFitter")
            .field("oracle", &self.oracle)
            .field("tracked_surfaces", &self.surfaces.len())
            .finish()
    }
}

impl<O: LayoutOracle> TextFitter<O> {
    /// Creates a fitter measuring through `oracle`.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            surfaces: HashMap::new(),
        }
    }

    /// Returns the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns the oracle mutably (e.g. to edit host surfaces between fits).
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Consumes the fitter, returning the oracle.
    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Returns where `surface` is in its fit lifecycle.
    pub fn phase(&self, surface: &O::Surface) -> FitPhase {
        self.surfaces
            .get(surface)
            .map_or(FitPhase::Unprocessed, |record| record.phase)
    }

    /// Drops all bookkeeping for `surface`.
    ///
    /// Call this when the host replaced the surface's content, so the next
    /// fit wraps it again. Returns `true` if the surface was tracked.
    pub fn forget(&mut self, surface: &O::Surface) -> bool {
        self.surfaces.remove(surface).is_some()
    }

    /// Fits each surface in order.
    ///
    /// Accepts anything iterable: a single surface via `[surface]` or
    /// `Some(surface)`, an array, a `Vec`, or an iterator. Surfaces are fitted
    /// independently; a failure on one is recorded in the report and the
    /// batch continues.
    pub fn fit<I>(&mut self, surfaces: I, settings: &FitSettings) -> FitReport<O::Surface, O::Error>
    where
        I: IntoIterator<Item = O::Surface>,
    {
        let mut report = FitReport::new();
        for surface in surfaces {
            let result = self.fit_one(&surface, settings);
            report.push(surface, result);
        }
        report
    }

    /// Fits a single surface.
    pub fn fit_one(
        &mut self,
        surface: &O::Surface,
        settings: &FitSettings,
    ) -> Result<FitOutcome, FitError<O::Error>> {
        settings.validate()?;

        if !settings.re_process
            && self
                .surfaces
                .get(surface)
                .is_some_and(|record| record.fitted_once)
        {
            log::trace!("skipping surface fitted by an earlier one-shot call");
            return Ok(FitOutcome::Skipped);
        }

        let available = self
            .oracle
            .content_box(surface)
            .map_err(FitError::Oracle)?;
        check_static_box(available, settings).inspect_err(|err| {
            log::warn!("cannot fit surface with content box {available:?}: {err}");
        })?;

        let unit = self.prepare_unit(surface)?;

        let multi_line = self.detect_multi_line(&unit, settings)?;
        self.oracle
            .set_wrapping(surface, multi_line)
            .map_err(FitError::Oracle)?;

        let (low, high) = settings.search_bounds(available);
        let oracle = &mut self.oracle;
        let search = search_best_fit(low, high, |px| {
            oracle.set_font_size(&unit, f64::from(px))?;
            let rendered = oracle.measure_box(&unit)?;
            let fits = rendered.width <= available.width
                && (settings.width_only || rendered.height <= available.height);
            log::trace!("probe {px}px -> {rendered:?} fits={fits}");
            Ok(fits)
        })
        .map_err(FitError::Oracle)?;

        let applied = f64::from(search.size) * settings.scale_factor;
        if search.last_probe.map(f64::from) != Some(applied) {
            self.oracle
                .set_font_size(&unit, applied)
                .map_err(FitError::Oracle)?;
        }
        if !search.verified {
            log::warn!(
                "no size in {low}..={high}px fits {available:?}; applying {}px",
                search.size
            );
        }

        let mut phase = FitPhase::Sized { font_size: applied };
        if settings.align_horiz || settings.align_vert {
            let vertical = if settings.align_vert {
                let content_height = self
                    .oracle
                    .content_height(&unit)
                    .map_err(FitError::Oracle)?;
                phase = FitPhase::Aligned {
                    font_size: applied,
                    content_height,
                };
                Some(VerticalCentering {
                    content_height,
                    flexbox: settings.align_vert_with_flexbox,
                })
            } else {
                None
            };
            let styles = AlignmentStyles {
                center_horizontally: settings.align_horiz,
                vertical,
            };
            self.oracle
                .apply_alignment(surface, &unit, &styles)
                .map_err(FitError::Oracle)?;
        }

        if let Some(record) = self.surfaces.get_mut(surface) {
            record.phase = phase;
            if !settings.re_process {
                record.fitted_once = true;
            }
        }

        log::debug!(
            "fitted surface at {applied}px (best fit {}px, {} probes, multi_line={multi_line})",
            search.size,
            search.probes
        );
        Ok(FitOutcome::Fitted(FittedSize {
            best_fit: search.size,
            applied,
            multi_line,
            overflowing: !search.verified,
            probes: search.probes,
        }))
    }

    /// Returns the surface's inner unit, wrapping the content on first encounter.
    ///
    /// A reused unit has any previous vertical alignment stripped so its
    /// height is measured fresh.
    fn prepare_unit(&mut self, surface: &O::Surface) -> Result<O::Unit, FitError<O::Error>> {
        if let Some(record) = self.surfaces.get_mut(surface) {
            if record.is_vertically_aligned() {
                self.oracle
                    .clear_vertical_alignment(surface, &record.unit)
                    .map_err(FitError::Oracle)?;
                if let FitPhase::Aligned { font_size, .. } = record.phase {
                    record.phase = FitPhase::Sized { font_size };
                }
            }
            return Ok(record.unit.clone());
        }

        let unit = self
            .oracle
            .wrap_content(surface)
            .map_err(FitError::Oracle)?;
        self.surfaces
            .insert(surface.clone(), SurfaceRecord::wrapped(unit.clone()));
        Ok(unit)
    }

    /// Decides whether wrapping is allowed for this pass.
    ///
    /// With detection on, text whose rendered height at its current size is
    /// at least two font sizes tall is treated as already spanning lines.
    /// This is a heuristic; unusual line heights can fool it.
    fn detect_multi_line(
        &mut self,
        unit: &O::Unit,
        settings: &FitSettings,
    ) -> Result<bool, FitError<O::Error>> {
        if settings.multi_line || !settings.detect_multi_line {
            return Ok(settings.multi_line);
        }
        let font_size = self.oracle.font_size(unit).map_err(FitError::Oracle)?;
        let rendered = self.oracle.measure_box(unit).map_err(FitError::Oracle)?;
        let multi_line = rendered.height >= font_size * 2.0;
        if multi_line {
            log::debug!(
                "detected multi-line text ({}px tall at {font_size}px)",
                rendered.height
            );
        }
        Ok(multi_line)
    }
}

fn check_static_box(available: Size, settings: &FitSettings) -> Result<(), ConfigurationError> {
    if !has_extent(available.width) {
        return Err(ConfigurationError::MissingWidth);
    }
    if !settings.width_only && !has_extent(available.height) {
        return Err(ConfigurationError::MissingHeight);
    }
    Ok(())
}
