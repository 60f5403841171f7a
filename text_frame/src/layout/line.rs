// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use smallvec::SmallVec;

use crate::style::FontMetrics;

use super::line_height::LineHeightInfo;

/// How far the initialization of a line has progressed.
///
/// The steps are taken in order; accessors assert that the step they depend on was taken.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LineInitStep {
    /// The line's range, pieces and width are known.
    #[default]
    Broken,
    /// The style offsets into the original and token style tables are known.
    TokenStylesAssigned,
    /// The font metrics and line heights are known.
    MetricsInitialized,
}

/// What a piece of a line displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinePieceKind {
    /// A range of the original text.
    Text(Range<usize>),
    /// The truncation token, possibly clipped to fit the line.
    Token(String),
}

/// A separately shaped part of a line.
///
/// Lines consist of a single text piece, unless they are truncated.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePiece<L> {
    /// What the piece displays.
    pub kind: LinePieceKind,
    /// Width of the piece, including trailing whitespace that is not at the end of the line.
    pub width: f64,
    /// The shaped object, `None` after ownership was relinquished.
    pub shaped: Option<L>,
}

/// Extra space added to a justified line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Justification {
    /// Space added to every inter-word gap.
    pub extra_space_per_gap: f64,
    /// Number of inter-word gaps.
    pub gap_count: usize,
}

/// A laid out line.
///
/// All lengths are in inversely scaled frame coordinates, i.e. they need to be multiplied
/// by the scale to obtain frame coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFrameLine<L> {
    pub(crate) init_step: LineInitStep,
    pub(crate) pieces: SmallVec<[LinePiece<L>; 3]>,
    pub(crate) range_in_original_string: Range<usize>,
    pub(crate) range_in_truncated_string: Range<usize>,
    pub(crate) trailing_whitespace_len: usize,
    pub(crate) paragraph_index: usize,
    pub(crate) is_first_line_in_paragraph: bool,
    pub(crate) is_last_line_in_paragraph: bool,
    pub(crate) hyphen: Option<char>,
    pub(crate) has_truncation_token: bool,
    pub(crate) width: f64,
    pub(crate) max_width: f64,
    pub(crate) left_indent: f64,
    pub(crate) right_indent: f64,
    pub(crate) head_indent: f64,
    pub(crate) x: f64,
    pub(crate) baseline: f64,
    pub(crate) heights: LineHeightInfo,
    pub(crate) metrics: FontMetrics,
    pub(crate) justification: Option<Justification>,
    pub(crate) text_styles_offset: usize,
    pub(crate) token_styles_offset: Option<usize>,
}

impl<L> TextFrameLine<L> {
    pub(crate) fn new(
        range: Range<usize>,
        paragraph_index: usize,
        pieces: SmallVec<[LinePiece<L>; 3]>,
        width: f64,
    ) -> Self {
        Self {
            init_step: LineInitStep::Broken,
            pieces,
            range_in_original_string: range.clone(),
            range_in_truncated_string: range,
            trailing_whitespace_len: 0,
            paragraph_index,
            is_first_line_in_paragraph: false,
            is_last_line_in_paragraph: false,
            hyphen: None,
            has_truncation_token: false,
            width,
            max_width: 0.,
            left_indent: 0.,
            right_indent: 0.,
            head_indent: 0.,
            x: 0.,
            baseline: 0.,
            heights: LineHeightInfo::default(),
            metrics: FontMetrics::default(),
            justification: None,
            text_styles_offset: 0,
            token_styles_offset: None,
        }
    }

    /// How far initialization has progressed.
    pub fn init_step(&self) -> LineInitStep {
        self.init_step
    }

    /// The shaped pieces of the line, in logical order.
    pub fn pieces(&self) -> &[LinePiece<L>] {
        &self.pieces
    }

    /// Range in the original string, including trailing whitespace, the paragraph
    /// terminator of a paragraph's last line and any excised text.
    pub fn range_in_original_string(&self) -> Range<usize> {
        self.range_in_original_string.clone()
    }

    /// Range in the truncated string.
    pub fn range_in_truncated_string(&self) -> Range<usize> {
        self.range_in_truncated_string.clone()
    }

    /// Byte length of the trailing whitespace, which is not included in the width.
    pub fn trailing_whitespace_len(&self) -> usize {
        self.trailing_whitespace_len
    }

    /// Index of the line's paragraph in the layouter's paragraph list.
    pub fn paragraph_index(&self) -> usize {
        self.paragraph_index
    }

    /// Returns `true` for the first line of a paragraph.
    pub fn is_first_line_in_paragraph(&self) -> bool {
        self.is_first_line_in_paragraph
    }

    /// Returns `true` for the last line of a paragraph.
    pub fn is_last_line_in_paragraph(&self) -> bool {
        self.is_last_line_in_paragraph
    }

    /// The hyphen inserted at the end of the line.
    pub fn hyphen(&self) -> Option<char> {
        self.hyphen
    }

    /// Returns `true` if the line contains a truncation token.
    pub fn has_truncation_token(&self) -> bool {
        self.has_truncation_token
    }

    /// Width without trailing whitespace, including justification.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Width before justification.
    pub fn natural_width(&self) -> f64 {
        match self.justification {
            Some(j) => self.width - j.extra_space_per_gap * j.gap_count as f64,
            None => self.width,
        }
    }

    /// Width available to the line.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Distance of the line box from the left frame edge.
    pub fn left_indent(&self) -> f64 {
        self.left_indent
    }

    /// Distance of the line box from the right frame edge.
    pub fn right_indent(&self) -> f64 {
        self.right_indent
    }

    /// Indent at the start of the line.
    pub fn head_indent(&self) -> f64 {
        self.head_indent
    }

    /// Horizontal position of the line's left edge after alignment.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Justification applied to the line.
    pub fn justification(&self) -> Option<Justification> {
        self.justification
    }

    /// Index of the style run at the line start in the original style table.
    pub fn text_styles_offset(&self) -> usize {
        debug_assert!(
            self.init_step >= LineInitStep::TokenStylesAssigned,
            "line styles have not been assigned yet"
        );
        self.text_styles_offset
    }

    /// Index of the token's first style run in the token style table.
    pub fn token_styles_offset(&self) -> Option<usize> {
        debug_assert!(
            self.init_step >= LineInitStep::TokenStylesAssigned,
            "line styles have not been assigned yet"
        );
        self.token_styles_offset
    }

    /// Combined metrics of the fonts used in the line.
    pub fn metrics(&self) -> &FontMetrics {
        debug_assert!(
            self.init_step >= LineInitStep::MetricsInitialized,
            "line metrics have not been initialized yet"
        );
        &self.metrics
    }

    /// Vertical position of the baseline, from the top of the frame.
    pub fn baseline(&self) -> f64 {
        debug_assert!(
            self.init_step >= LineInitStep::MetricsInitialized,
            "line metrics have not been initialized yet"
        );
        self.baseline
    }

    /// Distance from the baseline to the top of the line box.
    pub fn height_above_baseline(&self) -> f64 {
        self.heights().height_above_baseline
    }

    /// Distance from the baseline to the bottom of the line box.
    pub fn height_below_baseline(&self) -> f64 {
        self.heights().height_below_baseline
    }

    pub(crate) fn heights(&self) -> &LineHeightInfo {
        debug_assert!(
            self.init_step >= LineInitStep::MetricsInitialized,
            "line metrics have not been initialized yet"
        );
        &self.heights
    }

    /// Bottom of the line box.
    pub(crate) fn bottom(&self) -> f64 {
        self.baseline() + self.heights().height_below_baseline
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn accessors_follow_init_steps() {
        let mut line: TextFrameLine<()> = TextFrameLine::new(0..4, 0, smallvec![], 40.);
        assert_eq!(line.init_step(), LineInitStep::Broken);
        line.init_step = LineInitStep::TokenStylesAssigned;
        assert_eq!(line.token_styles_offset(), None);
        line.init_step = LineInitStep::MetricsInitialized;
        line.baseline = 16.;
        line.heights.height_below_baseline = 4.;
        assert_eq!(line.bottom(), 20.);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "line metrics have not been initialized yet")]
    fn metrics_before_initialization_panic() {
        let line: TextFrameLine<()> = TextFrameLine::new(0..4, 0, smallvec![], 40.);
        let _ = line.baseline();
    }

    #[test]
    fn natural_width_excludes_justification() {
        let mut line: TextFrameLine<()> = TextFrameLine::new(0..4, 0, smallvec![], 100.);
        line.justification = Some(Justification {
            extra_space_per_gap: 5.,
            gap_count: 4,
        });
        assert_eq!(line.natural_width(), 80.);
    }
}
