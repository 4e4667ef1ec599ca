// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-call results.

use smallvec::SmallVec;

use crate::error::FitError;

/// What happened to one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitOutcome {
    /// A size was discovered and committed.
    Fitted(FittedSize),
    /// The surface was already fitted by an earlier one-shot call and left untouched.
    Skipped,
}

impl FitOutcome {
    /// Returns the fitted size, if the surface was processed.
    pub fn fitted(&self) -> Option<&FittedSize> {
        match self {
            Self::Fitted(size) => Some(size),
            Self::Skipped => None,
        }
    }
}

/// The size committed to a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedSize {
    /// The discovered size before scaling, within the search bounds.
    pub best_fit: u32,
    /// The size applied to the surface (`best_fit * scale_factor`).
    pub applied: f64,
    /// Whether wrapping was permitted for this pass.
    pub multi_line: bool,
    /// No candidate fit; the minimum was applied and content may overflow.
    pub overflowing: bool,
    /// Number of probe measurements made by the search.
    pub probes: u32,
}

/// Results of a batch [`TextFitter::fit`](crate::TextFitter::fit) call, in input order.
///
/// A failure on one surface does not stop the batch.
#[derive(Debug)]
pub struct FitReport<S, E> {
    entries: SmallVec<[(S, Result<FitOutcome, FitError<E>>); 4]>,
}

impl<S, E> FitReport<S, E> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, surface: S, result: Result<FitOutcome, FitError<E>>) {
        self.entries.push((surface, result));
    }

    /// Number of surfaces in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(surface, result)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Result<FitOutcome, FitError<E>>)> {
        self.entries.iter().map(|(s, r)| (s, r))
    }

    /// Returns the result for a surface (the first occurrence if listed twice).
    pub fn get(&self, surface: &S) -> Option<&Result<FitOutcome, FitError<E>>>
    where
        S: PartialEq,
    {
        self.entries
            .iter()
            .find(|(s, _)| s == surface)
            .map(|(_, r)| r)
    }

    /// Number of surfaces that had a size committed.
    pub fn fitted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, r)| matches!(r, Ok(FitOutcome::Fitted(_))))
            .count()
    }

    /// Iterates over the failures.
    pub fn errors(&self) -> impl Iterator<Item = (&S, &FitError<E>)> {
        self.entries
            .iter()
            .filter_map(|(s, r)| r.as_ref().err().map(|e| (s, e)))
    }

    /// Returns `true` if no surface failed.
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Converts the report into abort-on-first-error form.
    ///
    /// Surfaces processed before the failure keep their committed state.
    pub fn into_result(self) -> Result<SmallVec<[(S, FitOutcome); 4]>, (S, FitError<E>)> {
        self.entries
            .into_iter()
            .map(|(s, r)| match r {
                Ok(outcome) => Ok((s, outcome)),
                Err(err) => Err((s, err)),
            })
            .collect()
    }
}
