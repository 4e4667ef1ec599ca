// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary search over integer pixel font sizes.
//!
//! This is independent of any rendering environment: the fit predicate is a
//! callback, so the search can be driven by a live layout oracle or by a pure
//! function in tests.

/// The outcome of [`search_best_fit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The largest candidate that satisfied the predicate, or `low` if none did.
    pub size: u32,
    /// Whether `size` was verified by the predicate.
    pub verified: bool,
    /// Number of predicate evaluations.
    pub probes: u32,
    /// The last candidate passed to the predicate, if any.
    pub last_probe: Option<u32>,
}

/// Finds the largest size in `low..=high` accepted by `fits`.
///
/// Each iteration probes `mid = floor((low + high) / 2)`; an accepted probe
/// raises the floor above `mid`, a rejected one lowers the ceiling below it.
/// The range strictly shrinks, so this terminates after `O(log(high - low))`
/// probes even when `fits` is not monotonic. In that case the result is a
/// fitting size but not necessarily the largest one.
///
/// If `low > high` no probe is made and `low` is returned unverified.
pub fn search_best_fit<E>(
    low: u32,
    high: u32,
    mut fits: impl FnMut(u32) -> Result<bool, E>,
) -> Result<SearchResult, E> {
    let mut result = SearchResult {
        size: low,
        verified: false,
        probes: 0,
        last_probe: None,
    };
    let (mut low, mut high) = (low, high);
    while low <= high {
        let mid = low + (high - low) / 2;
        result.probes += 1;
        result.last_probe = Some(mid);
        if fits(mid)? {
            result.size = mid;
            result.verified = true;
            let Some(next) = mid.checked_add(1) else {
                break;
            };
            low = next;
        } else {
            let Some(next) = mid.checked_sub(1) else {
                break;
            };
            high = next;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;

    use super::*;

    fn search(low: u32, high: u32, limit: u32) -> SearchResult {
        let Ok(result) = search_best_fit::<Infallible>(low, high, |px| Ok(px <= limit));
        result
    }

    #[test]
    fn finds_largest_fitting_size() {
        for limit in 0..=140 {
            let result = search(0, 128, limit);
            assert_eq!(result.size, limit.min(128), "limit {limit}");
            assert!(result.verified, "limit {limit} should verify");
        }
    }

    #[test]
    fn probe_count_is_logarithmic() {
        for limit in 0..=128 {
            let result = search(0, 128, limit);
            assert!(result.probes <= 8, "limit {limit}: {} probes", result.probes);
        }
    }

    #[test]
    fn nothing_fits_returns_low_unverified() {
        let Ok(result) = search_best_fit::<Infallible>(6, 80, |_| Ok(false));
        assert_eq!(result.size, 6);
        assert!(!result.verified, "no candidate should verify");
    }

    #[test]
    fn equal_bounds_probe_once() {
        let result = search(12, 12, 100);
        assert_eq!(result.size, 12);
        assert_eq!(result.probes, 1);
    }

    #[test]
    fn inverted_bounds_do_not_probe() {
        let result = search(20, 10, 100);
        assert_eq!(result.probes, 0);
        assert_eq!(result.size, 20);
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let result = search(0, u32::MAX, u32::MAX);
        assert_eq!(result.size, u32::MAX);
        let result = search(0, u32::MAX, 0);
        assert_eq!(result.size, 0);
    }

    #[test]
    fn non_monotonic_predicate_still_terminates_with_a_fit() {
        // Sizes 40..=50 "fit" again after 30..40 failed, as wrapping reflow can cause.
        let Ok(result) = search_best_fit::<Infallible>(0, 100, |px| {
            Ok(px < 30 || (40..=50).contains(&px))
        });
        assert!(
            result.size < 30 || (40..=50).contains(&result.size),
            "result {} must satisfy the predicate",
            result.size
        );
    }

    #[test]
    fn predicate_errors_propagate() {
        let result = search_best_fit(0, 10, |px| if px == 5 { Err("detached") } else { Ok(true) });
        assert_eq!(result, Err("detached"));
    }
}
