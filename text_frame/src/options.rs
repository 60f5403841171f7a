// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout options and the small vocabulary types they are made of.

use core::fmt;
use core::ops::Range;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::hyphenation::HyphenationSource;
use crate::style::{Color, FontMetrics, FontRef};

/// Selects the line-height model.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TextLayoutMode {
    /// Extra line height and leading are distributed evenly above and below the text.
    #[default]
    Default,
    /// Extra line height is added above the text and leading below it, like TextKit does.
    TextKit,
}

/// Base writing direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum WritingDirection {
    /// Left-to-right.
    #[default]
    LeftToRight,
    /// Right-to-left.
    RightToLeft,
}

/// Horizontal alignment of a paragraph's lines.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TextAlignment {
    /// Resolved from the layouter's [`DefaultTextAlignment`] and the writing direction.
    #[default]
    Natural,
    /// Align lines to the left edge.
    Left,
    /// Align lines to the right edge.
    Right,
    /// Center lines.
    Center,
    /// Stretch all lines but the last to the full width, start-align the last line.
    Justified,
}

/// How [`TextAlignment::Natural`] is resolved.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum DefaultTextAlignment {
    /// Always left.
    Left,
    /// Always right.
    Right,
    /// Left for left-to-right paragraphs, right for right-to-left paragraphs.
    #[default]
    Start,
    /// Right for left-to-right paragraphs, left for right-to-left paragraphs.
    End,
}

impl DefaultTextAlignment {
    pub(crate) fn resolve(self, alignment: TextAlignment, direction: WritingDirection) -> TextAlignment {
        if alignment != TextAlignment::Natural {
            return alignment;
        }
        let is_rtl = direction == WritingDirection::RightToLeft;
        match (self, is_rtl) {
            (Self::Left, _) | (Self::Start, false) | (Self::End, true) => TextAlignment::Left,
            (Self::Right, _) | (Self::Start, true) | (Self::End, false) => TextAlignment::Right,
        }
    }
}

/// Interpretation of [`TextFrameOptions::first_line_offset`].
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum FirstLineOffsetType {
    /// The offset is added to the default position of the first baseline.
    #[default]
    OffsetOfFirstBaselineFromDefault,
    /// The offset is the distance of the first baseline from the top of the frame.
    OffsetOfFirstBaselineFromTop,
    /// The offset is the distance of the center of the first line's text from the top.
    OffsetOfFirstLineCenterFromTop,
    /// The offset is the distance of the first line's cap-height center from the top.
    OffsetOfFirstLineCapHeightCenterFromTop,
    /// The offset is the distance of the first line's x-height center from the top.
    OffsetOfFirstLineXHeightCenterFromTop,
}

/// Which vertical reference of the first line stays put when the text is scaled down.
///
/// The layouter only records this; renderers apply it when positioning the frame.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BaselineAdjustment {
    /// No adjustment.
    #[default]
    None,
    /// Keep the first baseline in place.
    AlignFirstBaseline,
    /// Keep the center of the first line in place.
    AlignFirstLineCenter,
    /// Keep the cap-height center of the first line in place.
    AlignFirstLineCapHeightCenter,
    /// Keep the x-height center of the first line in place.
    AlignFirstLineXHeightCenter,
}

/// Which part of the truncatable text is replaced by the truncation token.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TruncationType {
    /// Remove text from the start: `…end of the text`.
    Start,
    /// Remove text from the middle: `Start of…the text`.
    Middle,
    /// Remove text from the end: `Start of the…`.
    #[default]
    End,
}

/// Replacement text for truncated content.
#[derive(Clone, Debug, PartialEq)]
pub struct TruncationToken {
    /// The token text.
    pub text: String,
    /// Font for the token; inherited from the text at the truncation point when `None`.
    pub font: Option<(FontRef, FontMetrics)>,
    /// Color for the token; inherited from the text at the truncation point when `None`.
    pub color: Option<Color>,
}

impl TruncationToken {
    /// Creates a token that inherits all its attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            color: None,
        }
    }
}

impl Default for TruncationToken {
    fn default() -> Self {
        Self::new("\u{2026}")
    }
}

/// Lets the caller move the range of text removed by truncation, e.g. to whole words.
///
/// The adjusted range is only used when it lies within the truncatable range and the
/// truncated line still fits; otherwise the layouter keeps its own choice.
pub trait TruncationRangeAdjuster {
    /// Returns the range to excise instead of `excised`.
    fn adjust(&self, text: &str, truncatable: Range<usize>, excised: Range<usize>) -> Range<usize>;
}

impl<F> TruncationRangeAdjuster for F
where
    F: Fn(&str, Range<usize>, Range<usize>) -> Range<usize>,
{
    fn adjust(&self, text: &str, truncatable: Range<usize>, excised: Range<usize>) -> Range<usize> {
        self(text, truncatable, excised)
    }
}

/// Cooperative cancellation.
///
/// The layouter polls the flag between paragraphs and between scale-search iterations.
#[derive(Default, Debug)]
pub struct CancellationFlag(AtomicBool);

impl CancellationFlag {
    /// Creates a flag that is not set.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub(crate) static NEVER_CANCELLED: CancellationFlag = CancellationFlag::new();

/// Options for [`TextFrameLayouter`](crate::TextFrameLayouter).
///
/// The options are borrowed for the lifetime of the layouter, since
/// [`estimate_scale_factor_needed_to_fit`] consults them after the layout call.
///
/// [`estimate_scale_factor_needed_to_fit`]: crate::TextFrameLayouter::estimate_scale_factor_needed_to_fit
#[derive(Clone)]
pub struct TextFrameOptions {
    /// The line-height model.
    pub text_layout_mode: TextLayoutMode,
    /// Maximum number of lines in the frame, 0 for no limit.
    pub max_line_count: usize,
    /// Truncation applied to the last line when the text does not fit the frame.
    pub last_line_truncation_mode: TruncationType,
    /// Token used when the text does not fit the frame; `…` when `None`.
    pub truncation_token: Option<TruncationToken>,
    /// Optional hook that may move the excised range of a truncated line.
    pub truncation_range_adjuster: Option<Arc<dyn TruncationRangeAdjuster>>,
    /// Hyphenation factor for paragraphs that do not specify one, in `0.0..=1.0`.
    pub hyphenation_factor: f32,
    /// Source of hyphenation opportunities; the pattern-based default when `None`.
    pub hyphenation_source: Option<Arc<dyn HyphenationSource>>,
    /// Whether justified paragraphs are justified at all.
    pub justification_enabled: bool,
    /// Whether the last line of a justified paragraph is justified too.
    pub justify_last_line: bool,
    /// Interpretation of `first_line_offset`.
    pub first_line_offset_type: FirstLineOffsetType,
    /// Offset of the first line, in frame coordinates.
    pub first_line_offset: f64,
    /// Vertical reference that renderers keep fixed when the text is scaled.
    pub baseline_adjustment: BaselineAdjustment,
    /// Smallest scale `layout_and_scale` may use. Values below 1 enable shrink-to-fit.
    pub minimum_text_scale_factor: f64,
    /// Granularity of the scale search; the chosen scale is a multiple of it.
    pub text_scale_factor_step_size: f64,
}

impl TextFrameOptions {
    /// Returns `true` if `layout_and_scale` may shrink the text.
    pub fn shrinks_to_fit(&self) -> bool {
        self.clamped_minimum_text_scale_factor() < 1.
    }

    pub(crate) fn clamped_minimum_text_scale_factor(&self) -> f64 {
        if self.minimum_text_scale_factor.is_finite() && self.minimum_text_scale_factor > 0. {
            self.minimum_text_scale_factor.min(1.)
        } else {
            1.
        }
    }

    pub(crate) fn clamped_scale_step(&self) -> f64 {
        if self.text_scale_factor_step_size.is_finite() && self.text_scale_factor_step_size > 0. {
            self.text_scale_factor_step_size.min(1.)
        } else {
            1. / 128.
        }
    }

    pub(crate) fn clamped_hyphenation_factor(factor: f32) -> f32 {
        if factor.is_finite() {
            factor.clamp(0., 1.)
        } else {
            0.
        }
    }
}

impl Default for TextFrameOptions {
    fn default() -> Self {
        Self {
            text_layout_mode: TextLayoutMode::Default,
            max_line_count: 0,
            last_line_truncation_mode: TruncationType::End,
            truncation_token: None,
            truncation_range_adjuster: None,
            hyphenation_factor: 0.,
            hyphenation_source: None,
            justification_enabled: true,
            justify_last_line: false,
            first_line_offset_type: FirstLineOffsetType::default(),
            first_line_offset: 0.,
            baseline_adjustment: BaselineAdjustment::None,
            minimum_text_scale_factor: 1.,
            text_scale_factor_step_size: 1. / 128.,
        }
    }
}

impl fmt::Debug for TextFrameOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFrameOptions")
            .field("text_layout_mode", &self.text_layout_mode)
            .field("max_line_count", &self.max_line_count)
            .field("last_line_truncation_mode", &self.last_line_truncation_mode)
            .field("truncation_token", &self.truncation_token)
            .field(
                "truncation_range_adjuster",
                &self.truncation_range_adjuster.is_some(),
            )
            .field("hyphenation_factor", &self.hyphenation_factor)
            .field("hyphenation_source", &self.hyphenation_source.is_some())
            .field("justification_enabled", &self.justification_enabled)
            .field("justify_last_line", &self.justify_last_line)
            .field("first_line_offset_type", &self.first_line_offset_type)
            .field("first_line_offset", &self.first_line_offset)
            .field("baseline_adjustment", &self.baseline_adjustment)
            .field("minimum_text_scale_factor", &self.minimum_text_scale_factor)
            .field(
                "text_scale_factor_step_size",
                &self.text_scale_factor_step_size,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_alignment_follows_direction() {
        let ltr = WritingDirection::LeftToRight;
        let rtl = WritingDirection::RightToLeft;
        let start = DefaultTextAlignment::Start;
        assert_eq!(start.resolve(TextAlignment::Natural, ltr), TextAlignment::Left);
        assert_eq!(start.resolve(TextAlignment::Natural, rtl), TextAlignment::Right);
        assert_eq!(
            DefaultTextAlignment::End.resolve(TextAlignment::Natural, ltr),
            TextAlignment::Right
        );
        assert_eq!(start.resolve(TextAlignment::Center, rtl), TextAlignment::Center);
    }

    #[test]
    fn invalid_scale_options_are_clamped() {
        let options = TextFrameOptions {
            minimum_text_scale_factor: -3.,
            text_scale_factor_step_size: 0.,
            ..Default::default()
        };
        assert!(!options.shrinks_to_fit());
        assert_eq!(options.clamped_scale_step(), 1. / 128.);
    }
}
