// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shrinking text to fit its frame.

use core::ops::Range;

use crate::hyphenation::{self, DEFAULT_HYPHENATION_LANGUAGE};
use crate::options::{BaselineAdjustment, FirstLineOffsetType, TextFrameOptions};
use crate::style::FontMetrics;
use crate::typesetter::Typesetter;
use crate::util::{intersect, nearly_eq, whole_steps, HEIGHT_EPSILON};

use super::indent::Indentations;
use super::line_break::suggest_break;
use super::line_height::{first_baseline, next_baseline, LineHeightInfo};
use super::{SavedLayout, Size, TextFrameLayouter};

/// The scale a layout was computed at.
///
/// Layout happens in inversely scaled coordinates: the frame is divided by `scale` and the
/// text keeps its size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleInfo {
    /// The factor the text is scaled by, in `0.0..=1.0`.
    pub scale: f64,
    /// `1 / scale`.
    pub inverse_scale: f64,
    /// Offset of the first line of the first paragraph, in frame coordinates.
    pub first_paragraph_first_line_offset: f64,
    /// Interpretation of `first_paragraph_first_line_offset`.
    pub first_paragraph_first_line_offset_type: FirstLineOffsetType,
    /// Vertical reference renderers keep fixed.
    pub baseline_adjustment: BaselineAdjustment,
}

impl ScaleInfo {
    /// Creates a scale without a first-line offset.
    pub fn with_scale(scale: f64) -> Self {
        debug_assert!(scale > 0., "scale must be positive");
        Self {
            scale,
            inverse_scale: 1. / scale,
            first_paragraph_first_line_offset: 0.,
            first_paragraph_first_line_offset_type: FirstLineOffsetType::default(),
            baseline_adjustment: BaselineAdjustment::None,
        }
    }

    /// Creates a scale that carries the first-line settings of `options`.
    pub fn for_options(scale: f64, options: &TextFrameOptions) -> Self {
        Self {
            first_paragraph_first_line_offset: options.first_line_offset,
            first_paragraph_first_line_offset_type: options.first_line_offset_type,
            baseline_adjustment: options.baseline_adjustment,
            ..Self::with_scale(scale)
        }
    }
}

impl Default for ScaleInfo {
    fn default() -> Self {
        Self::with_scale(1.)
    }
}

/// Result of [`TextFrameLayouter::estimate_scale_factor_needed_to_fit`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleFactorEstimate {
    /// The largest scale at which the simulated layout fits.
    pub value: f64,
    /// `false` if the simulation ignored something that affects the real layout: lines of
    /// different heights within a paragraph, or hyphenation.
    pub is_accurate: bool,
}

/// Outcome of a simulated layout.
struct Simulation {
    fits: bool,
    /// Paragraphs whose style runs have different metrics.
    has_varying_metrics: bool,
    /// Paragraphs with more than one line.
    multi_line_paragraphs: Vec<usize>,
}

impl<'a, T: Typesetter> TextFrameLayouter<'a, T> {
    /// Lays out the text, shrinking it if it does not fit `frame_size` and `options` allow.
    ///
    /// The text is first laid out at scale 1. If it does not fit, the scale is searched in
    /// multiples of the step size between the minimum scale and 1. The largest fitting
    /// scale wins; if none fits, the layout at the minimum scale is kept.
    pub fn layout_and_scale(&mut self, frame_size: Size, options: &'a TextFrameOptions) {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        self.layout_call_count = 0;
        let max_line_count = options.max_line_count;
        let inversely_scaled = |scale: f64| Size::new(frame_size.width / scale, frame_size.height / scale);

        self.layout(frame_size, ScaleInfo::for_options(1., options), max_line_count, options);
        if self.is_cancelled {
            return;
        }
        if self.fits() || !options.shrinks_to_fit() {
            self.justify_lines_where_necessary();
            return;
        }

        let step = options.clamped_scale_step();
        let min_scale = options.clamped_minimum_text_scale_factor();
        // Candidate scales are `k * step` for `k` in `lo..=hi`.
        let mut lo = ((min_scale / step) - 1e-9).ceil().max(1.) as u32;
        let mut hi = ((1. / step) - 1e-9).ceil() as u32 - 1;
        let mut best = None;
        let mut saved = SavedLayout::new();

        if lo <= hi {
            let estimate = self.estimate_scale_factor_needed_to_fit(
                frame_size.height,
                max_line_count,
                f64::from(lo) * step,
                step,
            );
            log::debug!(
                "estimated scale {} (accurate: {})",
                estimate.value,
                estimate.is_accurate
            );
            let mut k = whole_steps(estimate.value, step).clamp(lo, hi);
            while lo <= hi {
                if self.cancellation_flag.is_cancelled() {
                    log::debug!("scale search cancelled");
                    self.is_cancelled = true;
                    return;
                }
                let scale = f64::from(k) * step;
                self.layout(
                    inversely_scaled(scale),
                    ScaleInfo::for_options(scale, options),
                    max_line_count,
                    options,
                );
                if self.is_cancelled {
                    return;
                }
                if self.fits() {
                    log::debug!("scale {scale} fits");
                    best = Some(k);
                    self.save_layout_to(&mut saved);
                    lo = k + 1;
                    let max_scale = self.calculate_max_scale_factor_for_current_line_breaks();
                    let jump = whole_steps(max_scale, step).min(hi);
                    if lo <= hi && jump >= lo {
                        log::debug!("current line breaks fit up to scale {max_scale}");
                        k = jump;
                        continue;
                    }
                } else {
                    log::debug!("scale {scale} does not fit");
                    hi = k - 1;
                }
                k = lo + (hi.saturating_sub(lo) + 1) / 2;
            }
        }

        match best {
            Some(k) => {
                if !nearly_eq(self.state.scale_info.scale, f64::from(k) * step) {
                    self.restore_layout_from(saved);
                }
                log::debug!("chose scale {}", self.state.scale_info.scale);
            }
            None => {
                log::debug!("text does not fit at the minimum scale {min_scale}");
                if !nearly_eq(self.state.scale_info.scale, min_scale) {
                    self.layout(
                        inversely_scaled(min_scale),
                        ScaleInfo::for_options(min_scale, options),
                        max_line_count,
                        options,
                    );
                    if self.is_cancelled {
                        return;
                    }
                }
            }
        }
        self.justify_lines_where_necessary();
    }

    /// Estimates the largest scale in `min_scale..=1` at which the text fits a frame of
    /// height `frame_height` and the width of the last layout.
    ///
    /// The estimate simulates line breaking with the typesetter's break suggestions, without
    /// shaping lines and without hyphenation, and bisects until the interval is narrower
    /// than `accuracy`. The returned value is the lower end of that interval.
    pub fn estimate_scale_factor_needed_to_fit(
        &self,
        frame_height: f64,
        max_line_count: usize,
        min_scale: f64,
        accuracy: f64,
    ) -> ScaleFactorEstimate {
        let state = self.state();
        let frame_width = state.inversely_scaled_frame_size.width * state.scale_info.scale;
        let accuracy = if accuracy > 0. { accuracy } else { 1. / 128. };
        let min_scale = min_scale.clamp(f64::MIN_POSITIVE, 1.);
        let simulate = |scale: f64| {
            self.simulate(Size::new(frame_width, frame_height), scale, max_line_count)
        };

        let mut outcome = simulate(1.);
        let value = if outcome.fits {
            1.
        } else {
            let mut lo = min_scale;
            let mut hi = 1.;
            outcome = simulate(lo);
            if outcome.fits {
                while hi - lo > accuracy {
                    let mid = (lo + hi) / 2.;
                    let candidate = simulate(mid);
                    if candidate.fits {
                        lo = mid;
                        outcome = candidate;
                    } else {
                        hi = mid;
                    }
                }
            }
            lo
        };
        let is_accurate = !outcome.has_varying_metrics
            && !outcome
                .multi_line_paragraphs
                .iter()
                .any(|&index| self.has_hyphenation_opportunities(index));
        ScaleFactorEstimate { value, is_accurate }
    }

    /// Returns the largest scale at which every line of the current layout still fits its
    /// width.
    ///
    /// Returns infinity if there are no lines with a positive width.
    pub fn calculate_max_scale_factor_for_current_line_breaks(&self) -> f64 {
        let state = self.state();
        let frame_width = state.inversely_scaled_frame_size.width * state.scale_info.scale;
        let mut max_scale = f64::INFINITY;
        for line in &state.lines {
            let style = &self.shaped.paragraphs()
                [state.paragraphs[line.paragraph_index].paragraph_index]
                .style;
            let mut scaled_width = line.natural_width();
            if line.is_first_line_in_paragraph {
                scaled_width +=
                    f64::from(style.first_line_left_indent) + f64::from(style.first_line_right_indent);
            }
            if scaled_width <= 0. {
                continue;
            }
            let available = frame_width - Indentations::unscaled_padding(style, frame_width);
            max_scale = max_scale.min(available.max(0.) / scaled_width);
        }
        max_scale
    }

    /// Lays out the lines' extents at `scale` without shaping them.
    fn simulate(&self, frame_size: Size, scale: f64, max_line_count: usize) -> Simulation {
        let shaped = self.shaped;
        let options = self.options;
        let mode = options.map(|options| options.text_layout_mode).unwrap_or_default();
        let scale_info = match options {
            Some(options) => ScaleInfo::for_options(scale, options),
            None => ScaleInfo::with_scale(scale),
        };
        let frame = Size::new(
            frame_size.width * scale_info.inverse_scale,
            frame_size.height * scale_info.inverse_scale,
        );
        let mut outcome = Simulation {
            fits: false,
            has_varying_metrics: false,
            multi_line_paragraphs: Vec::new(),
        };

        let mut line_count = 0;
        // Baseline and heights of the previous line, and its paragraph.
        let mut previous: Option<(f64, LineHeightInfo, usize)> = None;
        // Scope index and lines used in it.
        let mut scope_lines: Option<(usize, usize)> = None;

        for paragraph_index in self.paragraph_indices() {
            let paragraph = &shaped.paragraphs()[paragraph_index];
            let style = &paragraph.style;
            let range = intersect(&paragraph.range, &self.string_range);
            let scope = shaped.truncation_scope_of(paragraph_index);
            let scope_limit = match scope {
                Some((scope_index, scope)) => {
                    if scope_lines.is_none_or(|(index, _)| index != scope_index) {
                        scope_lines = Some((scope_index, 0));
                    }
                    scope.max_line_count
                }
                None => {
                    scope_lines = None;
                    0
                }
            };

            let (metrics, varies) = self.paragraph_metrics(range.clone());
            outcome.has_varying_metrics |= varies;
            let heights = LineHeightInfo::new(mode, &style.line_height, &metrics);

            let mut paragraph_lines = 0;
            let mut cursor = range.start;
            loop {
                if let Some((_, used)) = scope_lines {
                    if scope_limit != 0 && used >= scope_limit {
                        // The rest of the scope is excised.
                        break;
                    }
                }
                if max_line_count != 0 && line_count >= max_line_count {
                    return outcome;
                }
                let indents = Indentations::new(style, cursor == range.start, frame.width, &scale_info);
                let (end, exceeds_max_width) =
                    suggest_break(self.typesetter, cursor..range.end, indents.max_width(frame.width));
                if exceeds_max_width {
                    return outcome;
                }
                let baseline = match &previous {
                    None => first_baseline(&heights, &metrics, &scale_info),
                    Some((baseline, previous_heights, previous_paragraph)) => {
                        let previous_style = (*previous_paragraph != paragraph_index)
                            .then(|| &shaped.paragraphs()[*previous_paragraph].style);
                        next_baseline(*baseline, previous_heights, &heights, style, previous_style)
                    }
                };
                if baseline + heights.height_below_baseline > frame.height + HEIGHT_EPSILON {
                    return outcome;
                }
                previous = Some((baseline, heights, paragraph_index));
                line_count += 1;
                paragraph_lines += 1;
                if let Some((_, used)) = scope_lines.as_mut() {
                    *used += 1;
                }
                cursor = end;
                if cursor >= range.end {
                    break;
                }
            }
            if paragraph_lines > 1 {
                outcome.multi_line_paragraphs.push(paragraph_index);
            }
        }
        outcome.fits = true;
        outcome
    }

    /// The combined metrics of the fonts in `range`, and whether they differ.
    fn paragraph_metrics(&self, range: Range<usize>) -> (FontMetrics, bool) {
        let shaped = self.shaped;
        let styles = shaped.styles();
        let first = crate::style::style_index_at(styles, range.start);
        let mut combined: Option<FontMetrics> = None;
        let mut varies = false;
        for style in styles[first..]
            .iter()
            .take_while(|style| style.start < range.end.max(range.start + 1))
        {
            let metrics = shaped.font_metrics()[usize::from(style.font_index)];
            combined = Some(match combined {
                Some(combined) => {
                    varies |= combined != metrics;
                    combined.max(metrics)
                }
                None => metrics,
            });
        }
        (combined.unwrap_or_default(), varies)
    }

    /// Whether a paragraph with hyphenation enabled contains a word that could be hyphenated.
    fn has_hyphenation_opportunities(&self, paragraph_index: usize) -> bool {
        let paragraph = &self.shaped.paragraphs()[paragraph_index];
        let factor = TextFrameOptions::clamped_hyphenation_factor(
            paragraph
                .style
                .hyphenation_factor
                .unwrap_or_else(|| self.options.map_or(0., |options| options.hyphenation_factor)),
        );
        if factor <= 0. {
            return false;
        }
        let source = self
            .options
            .and_then(|options| options.hyphenation_source.as_deref())
            .unwrap_or_else(|| hyphenation::default_source());
        let language = paragraph
            .style
            .language
            .as_ref()
            .unwrap_or(&DEFAULT_HYPHENATION_LANGUAGE);
        let mut cache = self.locale_cache.borrow_mut();
        let Some(locale) = cache.locale(source, language) else {
            return false;
        };
        let text = self.shaped.text();
        let range = intersect(&paragraph.range, &self.string_range);
        let mut start = range.start;
        for part in text[range.clone()].split_inclusive(char::is_whitespace) {
            let end = start + part.trim_end().len();
            if end > start
                && source
                    .hyphenation_location_before(text, start..end, end, locale)
                    .is_some()
            {
                return true;
            }
            start += part.len();
        }
        false
    }
}
