// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breaking a paragraph into lines, one line at a time.

use core::ops::Range;

use crate::hyphenation::{HyphenationLocale, HyphenationSource};
use crate::typesetter::{Shaped, Typesetter};
use crate::util::{trailing_whitespace_len, WIDTH_EPSILON};

/// Hyphenation settings of the paragraph being broken.
#[derive(Copy, Clone)]
pub(crate) struct HyphenationParams<'h> {
    pub(crate) source: &'h dyn HyphenationSource,
    pub(crate) locale: &'h HyphenationLocale,
    /// In `0.0..=1.0`, never 0.
    pub(crate) factor: f32,
}

/// A line as chosen by the line builder, not yet placed.
#[derive(Clone, Debug)]
pub(crate) struct BrokenLine<L> {
    pub(crate) range: Range<usize>,
    pub(crate) hyphen: Option<char>,
    pub(crate) trailing_whitespace_len: usize,
    pub(crate) shaped: Shaped<L>,
    /// Width without trailing whitespace.
    pub(crate) width: f64,
    /// Set if not even a single grapheme cluster fit the line.
    pub(crate) exceeds_max_width: bool,
}

/// Result of an attempt to end a line at a given index.
#[derive(Clone, Debug)]
pub(crate) struct BreakLineAtStatus<L> {
    /// Whether the line fits its maximum width.
    pub(crate) success: bool,
    /// Width without trailing whitespace and without the hyphen.
    pub(crate) width_without_hyphen: f64,
    pub(crate) shaped: Shaped<L>,
}

/// Returns the end of the next line starting at `range.start`, and whether the line
/// exceeds `max_width`.
///
/// Prefers line break opportunities, then grapheme cluster boundaries; if not even one
/// cluster fits, the line consists of the first cluster. The estimator and the line builder
/// both break lines through this function, so they agree on every break.
pub(crate) fn suggest_break<T: Typesetter>(
    typesetter: &T,
    range: Range<usize>,
    max_width: f64,
) -> (usize, bool) {
    if range.is_empty() {
        return (range.end, false);
    }
    let limit = max_width + WIDTH_EPSILON;
    let end = typesetter.suggest_line_break(range.clone(), limit);
    if end > range.start {
        return (end, false);
    }
    let end = typesetter.suggest_cluster_break(range.clone(), limit);
    if end > range.start {
        return (end, false);
    }
    (typesetter.next_cluster_break(range.start).min(range.end), true)
}

/// Breaks the next line of the paragraph text `range`, which starts at the line start and
/// ends at the paragraph end.
pub(crate) fn break_line<T: Typesetter>(
    typesetter: &T,
    text: &str,
    range: Range<usize>,
    max_width: f64,
    hyphenation: Option<HyphenationParams<'_>>,
) -> BrokenLine<T::Line> {
    let (end, exceeds_max_width) = suggest_break(typesetter, range.clone(), max_width);
    let status = break_line_at(typesetter, range.start, end, None, max_width);

    // A line ending at a soft hyphen displays a hyphen.
    if end < range.end && text[..end].ends_with('\u{ad}') {
        let hyphenated = break_line_at(typesetter, range.start, end, Some('-'), max_width);
        if hyphenated.success {
            return BrokenLine {
                range: range.start..end,
                hyphen: Some('-'),
                trailing_whitespace_len: 0,
                width: hyphenated.shaped.width_without_trailing_whitespace(),
                shaped: hyphenated.shaped,
                exceeds_max_width,
            };
        }
    }

    if let Some(hyphenation) = hyphenation {
        let ratio = if max_width > 0. {
            status.width_without_hyphen / max_width
        } else {
            1.
        };
        if end < range.end && (ratio as f32) < hyphenation.factor {
            let word = word_at_break(text, range.clone(), end);
            if let Some(line) =
                hyphenate_line_in_range(typesetter, text, range.start, word, end, max_width, hyphenation)
            {
                log::trace!(
                    "hyphenated line {}..{} instead of breaking at {end}",
                    line.range.start,
                    line.range.end
                );
                return line;
            }
        }
    }

    let line_range = range.start..end;
    BrokenLine {
        trailing_whitespace_len: trailing_whitespace_len(&text[line_range.clone()]),
        range: line_range,
        hyphen: None,
        width: status.shaped.width_without_trailing_whitespace(),
        shaped: status.shaped,
        exceeds_max_width,
    }
}

/// Shapes the line `line_start..index`, followed by `hyphen`, and checks whether it fits.
pub(crate) fn break_line_at<T: Typesetter>(
    typesetter: &T,
    line_start: usize,
    index: usize,
    hyphen: Option<char>,
    max_width: f64,
) -> BreakLineAtStatus<T::Line> {
    let shaped = typesetter.shape_line(line_start..index, hyphen);
    let width = shaped.width_without_trailing_whitespace();
    BreakLineAtStatus {
        success: width <= max_width + WIDTH_EPSILON,
        width_without_hyphen: width - shaped.hyphen_width,
        shaped,
    }
}

/// Tries to end the line inside `word` at a hyphenation opportunity after `min_end`,
/// latest opportunity first.
pub(crate) fn hyphenate_line_in_range<T: Typesetter>(
    typesetter: &T,
    text: &str,
    line_start: usize,
    word: Range<usize>,
    min_end: usize,
    max_width: f64,
    hyphenation: HyphenationParams<'_>,
) -> Option<BrokenLine<T::Line>> {
    if word.is_empty() {
        return None;
    }
    let fit = typesetter.suggest_cluster_break(line_start..word.end, max_width + WIDTH_EPSILON);
    if fit <= min_end {
        return None;
    }
    let mut before = typesetter.next_cluster_break(fit).min(word.end);
    loop {
        let location = hyphenation.source.hyphenation_location_before(
            text,
            word.clone(),
            before,
            hyphenation.locale,
        )?;
        if location.index >= before || location.index <= min_end || location.index <= line_start {
            return None;
        }
        let status = break_line_at(
            typesetter,
            line_start,
            location.index,
            Some(location.hyphen),
            max_width,
        );
        if status.success {
            return Some(BrokenLine {
                range: line_start..location.index,
                hyphen: Some(location.hyphen),
                trailing_whitespace_len: 0,
                width: status.shaped.width_without_trailing_whitespace(),
                shaped: status.shaped,
                exceeds_max_width: false,
            });
        }
        before = location.index;
    }
}

/// The whitespace-delimited word that the break at `end` ends before or splits.
fn word_at_break(text: &str, range: Range<usize>, end: usize) -> Range<usize> {
    let is_mid_word = end > range.start
        && text[..end].chars().next_back().is_some_and(|c| !c.is_whitespace())
        && text[end..].chars().next().is_some_and(|c| !c.is_whitespace());
    let start = if is_mid_word {
        text[range.start..end]
            .rfind(char::is_whitespace)
            .map_or(range.start, |i| {
                let ws = text[range.start + i..].chars().next().map_or(1, char::len_utf8);
                range.start + i + ws
            })
    } else {
        end
    };
    let word_end = text[start..range.end]
        .find(char::is_whitespace)
        .map_or(range.end, |i| start + i);
    start..word_end
}
