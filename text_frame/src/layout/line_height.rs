// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line-height model and vertical placement of lines.

use crate::options::{FirstLineOffsetType, TextLayoutMode};
use crate::shaped::{LineHeightParams, ParagraphStyle};
use crate::style::FontMetrics;

use super::ScaleInfo;

/// Heights of a line above and below its baseline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineHeightInfo {
    /// Distance from the baseline to the top of the line box.
    pub height_above_baseline: f64,
    /// Distance from the baseline to the bottom of the line box.
    pub height_below_baseline: f64,
}

impl LineHeightInfo {
    /// Computes the heights of a line whose fonts have the given combined metrics.
    pub fn new(mode: TextLayoutMode, params: &LineHeightParams, metrics: &FontMetrics) -> Self {
        let ascent = f64::from(metrics.ascent);
        let descent = f64::from(metrics.descent);
        let leading = f64::from(metrics.leading.max(0.));
        let natural = ascent + descent;
        let multiple = if params.line_height_multiple > 0. {
            f64::from(params.line_height_multiple)
        } else {
            1.
        };
        let mut height = natural * multiple;
        let min = f64::from(params.min_line_height);
        let max = f64::from(params.max_line_height);
        if max > 0. {
            height = height.min(max);
        }
        height = height.max(min);
        let extra = height - natural;
        match mode {
            TextLayoutMode::Default => {
                let half = (extra + leading) / 2.;
                Self {
                    height_above_baseline: ascent + half,
                    height_below_baseline: descent + half,
                }
            }
            TextLayoutMode::TextKit => Self {
                height_above_baseline: ascent + extra,
                height_below_baseline: descent + leading,
            },
        }
    }

    /// The height of the line box.
    pub fn height(&self) -> f64 {
        self.height_above_baseline + self.height_below_baseline
    }
}

/// Distance between the baselines of two consecutive lines of `style`'s paragraph that both
/// have the heights `line`.
pub(crate) fn intra_paragraph_baseline_distance(line: &LineHeightInfo, style: &ParagraphStyle) -> f64 {
    line.height_below_baseline
        + f64::from(style.line_height.line_spacing)
        + line.height_above_baseline
}

/// The baseline of the first line of the frame.
///
/// `first_line_offset` is in frame coordinates.
pub(crate) fn first_baseline(
    heights: &LineHeightInfo,
    metrics: &FontMetrics,
    scale_info: &ScaleInfo,
) -> f64 {
    let offset = scale_info.first_paragraph_first_line_offset * scale_info.inverse_scale;
    let ascent = f64::from(metrics.ascent);
    let descent = f64::from(metrics.descent);
    match scale_info.first_paragraph_first_line_offset_type {
        FirstLineOffsetType::OffsetOfFirstBaselineFromDefault => {
            heights.height_above_baseline + offset
        }
        FirstLineOffsetType::OffsetOfFirstBaselineFromTop => offset,
        FirstLineOffsetType::OffsetOfFirstLineCenterFromTop => offset + (ascent - descent) / 2.,
        FirstLineOffsetType::OffsetOfFirstLineCapHeightCenterFromTop => {
            offset + f64::from(metrics.cap_height) / 2.
        }
        FirstLineOffsetType::OffsetOfFirstLineXHeightCenterFromTop => {
            offset + f64::from(metrics.x_height) / 2.
        }
    }
}

/// Places a line below the previous line of the frame.
///
/// `previous` is the previous line's baseline and heights, and the style of its paragraph
/// if that is a different paragraph.
pub(crate) fn next_baseline(
    previous_baseline: f64,
    previous: &LineHeightInfo,
    heights: &LineHeightInfo,
    style: &ParagraphStyle,
    previous_paragraph: Option<&ParagraphStyle>,
) -> f64 {
    let spacing = match previous_paragraph {
        Some(prev) => {
            f64::from(prev.spacing_after)
                + f64::from(style.spacing_before)
                + f64::from(style.line_height.line_spacing)
        }
        None => f64::from(style.line_height.line_spacing),
    };
    previous_baseline + previous.height_below_baseline + spacing + heights.height_above_baseline
}
