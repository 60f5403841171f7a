// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::options::{TextAlignment, WritingDirection};

use super::Indentations;

/// A laid out paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFrameParagraph {
    /// Index of the paragraph in [`ShapedText::paragraphs`](crate::ShapedText::paragraphs).
    pub paragraph_index: usize,
    /// Range in the original string, clamped to the layouter's string range.
    pub range_in_original_string: Range<usize>,
    /// Range in the truncated string, where excised text is replaced by the token.
    pub range_in_truncated_string: Range<usize>,
    /// Range of the original text replaced by the truncation token, or removed because the
    /// truncation scope ran out of lines. Empty if nothing was removed.
    pub excised_range: Range<usize>,
    /// Indices of the paragraph's lines in [`TextFrameLayouter::lines`](crate::TextFrameLayouter::lines).
    pub line_index_range: Range<usize>,
    /// Byte length of the truncation token text.
    pub truncation_token_len: usize,
    /// Whether one of the paragraph's lines carries a truncation token.
    pub has_truncation_token: bool,
    /// Alignment, with [`TextAlignment::Natural`] resolved.
    pub alignment: TextAlignment,
    /// Base writing direction.
    pub base_direction: WritingDirection,
    /// Indentations of the first line.
    pub first_line_indentations: Indentations,
    /// Indentations of the other lines.
    pub indentations: Indentations,
}

impl TextFrameParagraph {
    /// Number of lines of the paragraph.
    pub fn line_count(&self) -> usize {
        self.line_index_range.len()
    }

    /// Returns `true` if the paragraph has no lines, because its truncation scope ran out of
    /// lines before it.
    pub fn is_excised(&self) -> bool {
        self.line_index_range.is_empty()
    }

    /// Maps an index of the original string within this paragraph to the truncated string.
    ///
    /// Indices inside the excised range map to the end of the token.
    pub(crate) fn truncated_index(&self, index: usize, after_token: bool) -> usize {
        let base = self.range_in_truncated_string.start;
        let offset = index - self.range_in_original_string.start;
        if index < self.excised_range.start || (index == self.excised_range.start && !after_token) {
            base + offset
        } else {
            let removed = index.min(self.excised_range.end) - self.excised_range.start;
            base + offset - removed + self.truncation_token_len
        }
    }
}
