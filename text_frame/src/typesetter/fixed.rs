// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A typesetter with a fixed advance per em, for tests, previews and terminal-like output.

use core::ops::Range;

use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

use super::{Shaped, Typesetter};
use crate::shaped::ShapedText;
use crate::style::{FontMetrics, FontRef};

/// The line object of a [`FixedAdvanceTypesetter`].
#[derive(Clone, Debug, PartialEq)]
pub enum FixedAdvanceLine {
    /// A range of the shaped text, optionally followed by a hyphen.
    Text {
        /// Byte range in the shaped text.
        range: Range<usize>,
        /// Inserted hyphen.
        hyphen: Option<char>,
    },
    /// Text that is not part of the shaped text.
    Token {
        /// The token text.
        text: String,
    },
}

#[derive(Copy, Clone, Debug)]
struct CharInfo {
    offset: usize,
    advance: f64,
    is_whitespace: bool,
}

/// Every character advances by `font size × advance_per_em`, except paragraph terminators
/// and soft hyphens, which have no advance.
///
/// Line break opportunities come from the Unicode line breaking algorithm (UAX #14) and
/// clusters from extended grapheme cluster segmentation (UAX #29).
#[derive(Clone, Debug)]
pub struct FixedAdvanceTypesetter<'a> {
    shaped: &'a ShapedText,
    advance_per_em: f64,
    chars: Vec<CharInfo>,
    /// `prefix[i]` is the total advance of `chars[..i]`.
    prefix: Vec<f64>,
    line_breaks: Vec<usize>,
    clusters: Vec<usize>,
}

impl<'a> FixedAdvanceTypesetter<'a> {
    /// Creates a typesetter advancing by half an em per character.
    pub fn new(shaped: &'a ShapedText) -> Self {
        Self::with_advance_per_em(shaped, 0.5)
    }

    /// Creates a typesetter with the given advance per em.
    pub fn with_advance_per_em(shaped: &'a ShapedText, advance_per_em: f64) -> Self {
        let text = shaped.text();
        let chars = text
            .char_indices()
            .map(|(offset, ch)| {
                let size = f64::from(shaped.fonts()[shaped.style_at(offset).font_index as usize].size);
                CharInfo {
                    offset,
                    advance: if has_no_advance(ch) {
                        0.
                    } else {
                        size * advance_per_em
                    },
                    is_whitespace: ch.is_whitespace(),
                }
            })
            .collect::<Vec<_>>();
        let mut prefix = Vec::with_capacity(chars.len() + 1);
        let mut total = 0.;
        prefix.push(total);
        for info in &chars {
            total += info.advance;
            prefix.push(total);
        }
        let line_breaks = LineSegmenter::new_for_non_complex_scripts(LineBreakOptions::default())
            .segment_str(text)
            .collect();
        let clusters = GraphemeClusterSegmenter::new().segment_str(text).collect();
        Self {
            shaped,
            advance_per_em,
            chars,
            prefix,
            line_breaks,
            clusters,
        }
    }

    fn char_index(&self, offset: usize) -> usize {
        self.chars.partition_point(|info| info.offset < offset)
    }

    fn width(&self, range: Range<usize>) -> f64 {
        self.prefix[self.char_index(range.end)] - self.prefix[self.char_index(range.start)]
    }

    fn trailing_whitespace_width(&self, range: Range<usize>) -> f64 {
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.chars[start..end]
            .iter()
            .rev()
            .take_while(|info| info.is_whitespace)
            .map(|info| info.advance)
            .sum()
    }

    fn width_without_trailing_whitespace(&self, range: Range<usize>) -> f64 {
        self.width(range.clone()) - self.trailing_whitespace_width(range)
    }

    fn metrics(&self, range: Range<usize>) -> FontMetrics {
        let styles = self.shaped.styles();
        let first = crate::style::style_index_at(styles, range.start);
        let last = if range.is_empty() {
            first
        } else {
            crate::style::style_index_at(styles, range.end - 1)
        };
        styles[first..=last]
            .iter()
            .map(|style| self.shaped.font_metrics()[style.font_index as usize])
            .fold(FontMetrics::default(), FontMetrics::max)
    }

    fn longest_fitting_prefix(&self, boundaries: &[usize], range: Range<usize>, width: f64) -> usize {
        let first = boundaries.partition_point(|b| *b <= range.start);
        let candidates = boundaries[first..]
            .iter()
            .copied()
            .take_while(|b| *b < range.end)
            .chain(core::iter::once(range.end));
        let mut best = range.start;
        for end in candidates {
            if self.width_without_trailing_whitespace(range.start..end) > width {
                break;
            }
            best = end;
        }
        best
    }
}

impl Typesetter for FixedAdvanceTypesetter<'_> {
    type Line = FixedAdvanceLine;

    fn suggest_line_break(&self, range: Range<usize>, width: f64) -> usize {
        self.longest_fitting_prefix(&self.line_breaks, range, width)
    }

    fn suggest_cluster_break(&self, range: Range<usize>, width: f64) -> usize {
        self.longest_fitting_prefix(&self.clusters, range, width)
    }

    fn suggest_cluster_break_from_end(&self, range: Range<usize>, width: f64) -> usize {
        let end = self.clusters.partition_point(|b| *b < range.end);
        let mut best = range.end;
        for start in self.clusters[..end].iter().rev().copied() {
            if start < range.start {
                break;
            }
            if self.width_without_trailing_whitespace(start..range.end) > width {
                break;
            }
            best = start;
        }
        best
    }

    fn next_cluster_break(&self, index: usize) -> usize {
        let next = self.clusters.partition_point(|b| *b <= index);
        self.clusters
            .get(next)
            .copied()
            .unwrap_or_else(|| self.shaped.text().len())
    }

    fn shape_line(&self, range: Range<usize>, hyphen: Option<char>) -> Shaped<Self::Line> {
        let hyphen_width = match hyphen {
            Some(_) => {
                let offset = range.end.saturating_sub(1).max(range.start);
                let font = &self.shaped.fonts()[self.shaped.style_at(offset).font_index as usize];
                f64::from(font.size) * self.advance_per_em
            }
            None => 0.,
        };
        let trailing_whitespace_width = if hyphen.is_some() {
            0.
        } else {
            self.trailing_whitespace_width(range.clone())
        };
        Shaped {
            width: self.width(range.clone()) + hyphen_width,
            trailing_whitespace_width,
            hyphen_width,
            metrics: self.metrics(range.clone()),
            line: FixedAdvanceLine::Text { range, hyphen },
        }
    }

    fn shape_token(&self, text: &str, font: &FontRef, metrics: &FontMetrics) -> Shaped<Self::Line> {
        let advance = f64::from(font.size) * self.advance_per_em;
        let counted = text.chars().filter(|ch| !has_no_advance(*ch));
        let width = counted.clone().count() as f64 * advance;
        let trailing = text
            .trim_end_matches(has_no_advance)
            .chars()
            .rev()
            .take_while(|ch| ch.is_whitespace())
            .count() as f64
            * advance;
        Shaped {
            line: FixedAdvanceLine::Token {
                text: text.to_string(),
            },
            width,
            trailing_whitespace_width: trailing,
            hyphen_width: 0.,
            metrics: *metrics,
        }
    }
}

/// Paragraph terminators and soft hyphens.
fn has_no_advance(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2029}' | '\u{ad}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped(text: &str) -> ShapedText {
        let mut builder = ShapedText::builder(text);
        builder.add_font(
            FontRef::new(0, 20.),
            FontMetrics {
                ascent: 16.,
                descent: 4.,
                ..Default::default()
            },
        );
        builder.build().unwrap()
    }

    #[test]
    fn measures_ten_units_per_char() {
        let text = shaped("Hello world\n");
        let typesetter = FixedAdvanceTypesetter::new(&text);
        let line = typesetter.shape_line(0..12, None);
        assert_eq!(line.width, 110.);
        assert_eq!(line.trailing_whitespace_width, 0.);
        let line = typesetter.shape_line(0..6, None);
        assert_eq!(line.width, 60.);
        assert_eq!(line.trailing_whitespace_width, 10.);
        assert_eq!(line.width_without_trailing_whitespace(), 50.);
        let line = typesetter.shape_line(0..3, Some('-'));
        assert_eq!(line.width, 40.);
        assert_eq!(line.hyphen_width, 10.);
    }

    #[test]
    fn line_breaks_prefer_word_boundaries() {
        let text = shaped("Hello world again");
        let typesetter = FixedAdvanceTypesetter::new(&text);
        // "Hello " fits in 50 since trailing whitespace is not counted.
        assert_eq!(typesetter.suggest_line_break(0..17, 50.), 6);
        assert_eq!(typesetter.suggest_line_break(0..17, 115.), 12);
        assert_eq!(typesetter.suggest_line_break(0..17, 40.), 0);
        assert_eq!(typesetter.suggest_cluster_break(0..17, 40.), 4);
        assert_eq!(typesetter.suggest_line_break(0..17, 1000.), 17);
    }

    #[test]
    fn suffix_breaks() {
        let text = shaped("Hello world");
        let typesetter = FixedAdvanceTypesetter::new(&text);
        assert_eq!(typesetter.suggest_cluster_break_from_end(0..11, 50.), 6);
        assert_eq!(typesetter.suggest_cluster_break_from_end(0..11, 5.), 11);
        assert_eq!(typesetter.suggest_cluster_break_from_end(0..11, 500.), 0);
        assert_eq!(typesetter.next_cluster_break(3), 4);
        assert_eq!(typesetter.next_cluster_break(11), 11);
    }
}
