// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers to assert truths about layouts during testing.

use crate::util::WIDTH_EPSILON;
use crate::{TextFrameLayouter, Typesetter};

/// Assert that the lines display the expected parts of the original text.
///
/// Truncated lines are compared by the text they were cut from.
pub(crate) fn assert_line_texts<T: Typesetter>(
    layouter: &TextFrameLayouter<'_, T>,
    text: &str,
    expected: &[&str],
    case: &str,
) {
    let actual = layouter
        .lines()
        .iter()
        .map(|line| &text[line.range_in_original_string()])
        .collect::<Vec<_>>();
    assert_eq!(actual, expected, "{case} line texts mismatch");
}

/// Assert that no line is wider than the width available to it.
pub(crate) fn assert_lines_fit<T: Typesetter>(layouter: &TextFrameLayouter<'_, T>, case: &str) {
    for (index, line) in layouter.lines().iter().enumerate() {
        assert!(
            line.width() <= line.max_width() + WIDTH_EPSILON,
            "{case} line {index} is {} wide, but only {} is available",
            line.width(),
            line.max_width()
        );
        let pieces = line.pieces().iter().map(|piece| piece.width).sum::<f64>();
        assert!(
            pieces + WIDTH_EPSILON >= line.natural_width(),
            "{case} line {index} pieces are narrower than the line"
        );
    }
}

/// Assert that two layouters expose the same layout.
pub(crate) fn assert_layouts_eq<T: Typesetter>(
    a: &TextFrameLayouter<'_, T>,
    b: &TextFrameLayouter<'_, T>,
    case: &str,
) where
    T::Line: PartialEq,
{
    assert_eq!(a.scale_info(), b.scale_info(), "{case} scale_info mismatch");
    assert_eq!(
        a.inversely_scaled_frame_size(),
        b.inversely_scaled_frame_size(),
        "{case} frame size mismatch"
    );
    assert_eq!(a.paragraphs(), b.paragraphs(), "{case} paragraphs mismatch");
    assert_eq!(a.lines(), b.lines(), "{case} lines mismatch");
    assert_eq!(
        a.range_in_original_string(),
        b.range_in_original_string(),
        "{case} range_in_original_string mismatch"
    );
    assert_eq!(
        a.text_is_clipped(),
        b.text_is_clipped(),
        "{case} text_is_clipped mismatch"
    );
    assert_eq!(
        a.truncated_string_length(),
        b.truncated_string_length(),
        "{case} truncated_string_length mismatch"
    );
    assert_eq!(a.text_height(), b.text_height(), "{case} text_height mismatch");
    assert_eq!(a.fonts(), b.fonts(), "{case} fonts mismatch");
    assert_eq!(a.colors(), b.colors(), "{case} colors mismatch");
    assert_eq!(
        a.truncation_token_text_styles(),
        b.truncation_token_text_styles(),
        "{case} token styles mismatch"
    );
    assert_eq!(
        a.need_to_justify_lines(),
        b.need_to_justify_lines(),
        "{case} need_to_justify_lines mismatch"
    );
}
