// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::options::WritingDirection;
use crate::shaped::ParagraphStyle;

use super::ScaleInfo;

/// Horizontal insets of a line, in inversely scaled frame coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Indentations {
    /// Distance of the line box from the left frame edge.
    pub left: f64,
    /// Distance of the line box from the right frame edge.
    pub right: f64,
    /// The indent at the start of the line: `left` for left-to-right paragraphs, `right`
    /// otherwise.
    pub head: f64,
}

impl Indentations {
    /// Computes the indentations of a line of a paragraph with the given style.
    ///
    /// Paddings are specified in frame coordinates and are therefore multiplied by the
    /// inverse scale; a negative padding is measured from the opposite frame edge. The
    /// first-line indents scale with the text.
    pub(crate) fn new(
        style: &ParagraphStyle,
        is_first_line: bool,
        frame_width: f64,
        scale_info: &ScaleInfo,
    ) -> Self {
        let padding = |value: f32| {
            let value = f64::from(value) * scale_info.inverse_scale;
            if value < 0. {
                (frame_width + value).max(0.)
            } else {
                value
            }
        };
        let mut left = padding(style.padding_left);
        let mut right = padding(style.padding_right);
        if is_first_line {
            left += f64::from(style.first_line_left_indent);
            right += f64::from(style.first_line_right_indent);
        }
        let head = match style.base_direction {
            WritingDirection::LeftToRight => left,
            WritingDirection::RightToLeft => right,
        };
        Self { left, right, head }
    }

    /// The width available to the line.
    pub fn max_width(&self, frame_width: f64) -> f64 {
        (frame_width - self.left - self.right).max(0.)
    }

    /// The sum of the insets that do not scale with the text, in frame coordinates.
    pub(crate) fn unscaled_padding(style: &ParagraphStyle, unscaled_frame_width: f64) -> f64 {
        let padding = |value: f32| {
            let value = f64::from(value);
            if value < 0. {
                (unscaled_frame_width + value).max(0.)
            } else {
                value
            }
        };
        padding(style.padding_left) + padding(style.padding_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ParagraphStyle {
        ParagraphStyle {
            padding_left: 10.,
            padding_right: -30.,
            first_line_left_indent: 5.,
            ..Default::default()
        }
    }

    #[test]
    fn paddings_are_inversely_scaled() {
        let scale_info = ScaleInfo::with_scale(0.5);
        let first = Indentations::new(&style(), true, 200., &scale_info);
        assert_eq!(first.left, 25.);
        // -30 at scale 0.5 is 60 units from the right edge.
        assert_eq!(first.right, 140.);
        assert_eq!(first.head, first.left);
        assert_eq!(first.max_width(200.), 35.);
        let other = Indentations::new(&style(), false, 200., &scale_info);
        assert_eq!(other.left, 20.);
    }

    #[test]
    fn head_follows_direction() {
        let rtl = ParagraphStyle {
            base_direction: WritingDirection::RightToLeft,
            padding_right: 7.,
            ..Default::default()
        };
        let indents = Indentations::new(&rtl, false, 100., &ScaleInfo::default());
        assert_eq!(indents.head, 7.);
        assert_eq!(indents.max_width(100.), 93.);
        assert_eq!(Indentations::unscaled_padding(&style(), 200.), 180.);
    }
}
