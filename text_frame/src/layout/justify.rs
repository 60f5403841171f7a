// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::options::TextAlignment;
use crate::util::{inter_word_gap_count, WIDTH_EPSILON};

use super::{Justification, TextFrameLine, TextFrameParagraph};

/// Returns the number of inter-word gaps to stretch if `line` should be justified.
pub(crate) fn justifiable_gaps<L>(
    line: &TextFrameLine<L>,
    paragraph: &TextFrameParagraph,
    text: &str,
    justify_last_line: bool,
) -> Option<usize> {
    if paragraph.alignment != TextAlignment::Justified
        || line.justification.is_some()
        || line.has_truncation_token
        || (line.is_last_line_in_paragraph && !justify_last_line)
        || line.width + WIDTH_EPSILON >= line.max_width
    {
        return None;
    }
    let range = line.range_in_original_string.clone();
    let content = &text[range.start..range.end - line.trailing_whitespace_len];
    let gaps = inter_word_gap_count(content);
    (gaps != 0).then_some(gaps)
}

/// Stretches the inter-word gaps of eligible lines so that they fill their maximum width.
///
/// Lines that were justified before are skipped, which makes this idempotent.
pub(crate) fn justify_lines<L>(
    lines: &mut [TextFrameLine<L>],
    paragraphs: &[TextFrameParagraph],
    text: &str,
    justify_last_line: bool,
) {
    for line in lines {
        let paragraph = &paragraphs[line.paragraph_index];
        let Some(gap_count) = justifiable_gaps(line, paragraph, text, justify_last_line) else {
            continue;
        };
        let free_space = line.max_width - line.width;
        line.justification = Some(Justification {
            extra_space_per_gap: free_space / gap_count as f64,
            gap_count,
        });
        line.width = line.max_width;
        line.x = line.left_indent;
    }
}
