// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line wrapping.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Splits `text` into lines, wrapping at `max_width` if given.
///
/// `width_of` returns the advance width of a candidate line. Explicit `\n`
/// always breaks. Runs of whitespace inside a wrapped paragraph collapse to a
/// single space, mirroring `white-space: normal`; without a limit each
/// paragraph is kept verbatim. Empty input yields no lines.
pub fn wrap_lines(
    text: &str,
    max_width: Option<f64>,
    mut width_of: impl FnMut(&str) -> f64,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let max_width = max_width.filter(|w| w.is_finite() && *w >= 0.0);

    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let Some(max_width) = max_width else {
            out.push(String::from(paragraph));
            continue;
        };

        let mut cur = String::new();
        for word in paragraph.split_whitespace() {
            if cur.is_empty() {
                cur.push_str(word);
                continue;
            }
            let mut candidate = String::with_capacity(cur.len() + 1 + word.len());
            candidate.push_str(&cur);
            candidate.push(' ');
            candidate.push_str(word);
            if width_of(&candidate) <= max_width {
                cur = candidate;
            } else {
                out.push(core::mem::replace(&mut cur, String::from(word)));
            }
        }
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn long_word_overflows_on_its_own_line() {
        let lines = wrap_lines("a verylongword b", Some(5.0), chars);
        assert_eq!(lines, ["a", "verylongword", "b"]);
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_lines("aa bb cc dd", Some(5.0), chars);
        assert_eq!(lines, ["aa bb", "cc dd"]);
    }

    #[test]
    fn keeps_paragraphs_without_limit() {
        let lines = wrap_lines("12:45\nMonday,  Oct 19", None, chars);
        assert_eq!(lines, ["12:45", "Monday,  Oct 19"]);
    }
}
