// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// Errors reported when assembling a [`ShapedText`](crate::ShapedText).
///
/// Layout itself never fails; all validation happens once, up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapedTextError {
    /// A range does not lie within the text or does not start and end on character
    /// boundaries.
    InvalidRange(Range<usize>),
    /// A style run refers to a font that was never added.
    UnknownFont(u16),
    /// A style run refers to a color that was never added.
    UnknownColor(u16),
    /// The text uses a font, but no font has been added.
    MissingFont,
    /// A truncation scope refers to paragraphs that do not exist, or overlaps another scope.
    InvalidTruncationScope(Range<usize>),
}

impl fmt::Display for ShapedTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange(range) => {
                write!(f, "invalid text range {}..{}", range.start, range.end)
            }
            Self::UnknownFont(index) => write!(f, "unknown font index {index}"),
            Self::UnknownColor(index) => write!(f, "unknown color index {index}"),
            Self::MissingFont => f.write_str("no font available for the text"),
            Self::InvalidTruncationScope(range) => write!(
                f,
                "invalid truncation scope over paragraphs {}..{}",
                range.start, range.end
            ),
        }
    }
}

impl core::error::Error for ShapedTextError {}
