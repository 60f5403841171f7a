// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

use core::ops::Range;

/// Tolerance applied to every width comparison.
///
/// The line builder, the truncator and the scale estimator must all use the same value,
/// otherwise a width that fits during estimation may overflow during layout and the scale
/// search can oscillate.
pub(crate) const WIDTH_EPSILON: f64 = 1.0 / 1024.0;

/// Tolerance applied to height comparisons against the frame.
pub(crate) const HEIGHT_EPSILON: f64 = 1.0 / 1024.0;

pub(crate) fn nearly_eq(x: f64, y: f64) -> bool {
    (x - y).abs() < f64::EPSILON
}

/// Returns how many whole `step`s fit in `value`, treating values within a small tolerance
/// of the next multiple as that multiple.
pub(crate) fn whole_steps(value: f64, step: f64) -> u32 {
    debug_assert!(step > 0., "step must be positive");
    (value / step + 1e-9).floor().clamp(0., f64::from(u32::MAX)) as u32
}

pub(crate) fn intersect(a: &Range<usize>, b: &Range<usize>) -> Range<usize> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end).max(start);
    start..end
}

/// Returns the byte length of the trailing whitespace run of `text`.
pub(crate) fn trailing_whitespace_len(text: &str) -> usize {
    text.len() - text.trim_end_matches(char::is_whitespace).len()
}

/// Returns the number of inter-word gaps: maximal whitespace runs that have
/// non-whitespace on both sides.
pub(crate) fn inter_word_gap_count(text: &str) -> usize {
    let text = text.trim_matches(char::is_whitespace);
    let mut count = 0;
    let mut in_gap = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                count += 1;
                in_gap = true;
            }
        } else {
            in_gap = false;
        }
    }
    count
}
