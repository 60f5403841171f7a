// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text frame layouter.

mod indent;
mod justify;
mod line;
mod line_break;
mod line_height;
mod paragraph;
mod saved;
mod scale;
mod truncation;

use core::cell::RefCell;
use core::ops::Range;

use smallvec::{smallvec, SmallVec};

use crate::hyphenation::{self, LocaleCache, DEFAULT_HYPHENATION_LANGUAGE};
use crate::options::{
    CancellationFlag, DefaultTextAlignment, TextAlignment, TextFrameOptions, TextLayoutMode,
    TruncationToken, WritingDirection, NEVER_CANCELLED,
};
use crate::shaped::{ParagraphStyle, ShapedText};
use crate::style::{Color, FontMetrics, FontRef, TextStyle};
use crate::token_styles::TokenStyleBuffer;
use crate::typesetter::Typesetter;
use crate::util::{intersect, HEIGHT_EPSILON};

use line_break::{break_line, HyphenationParams};
use line_height::{first_baseline, intra_paragraph_baseline_distance, next_baseline};
use truncation::{truncate_line, TruncationParams};

pub use indent::Indentations;
pub use line::{Justification, LineInitStep, LinePiece, LinePieceKind, TextFrameLine};
pub use line_height::LineHeightInfo;
pub use paragraph::TextFrameParagraph;
pub use saved::SavedLayout;
pub use scale::{ScaleFactorEstimate, ScaleInfo};

/// A width and a height.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent; may be infinite.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Who owns the shaped objects of the lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Ownership {
    /// The layouter owns them and drops them with the layout.
    #[default]
    Owned,
    /// They were handed to the caller.
    Relinquished,
}

/// The state a `layout` call produces.
#[derive(Clone, Debug)]
pub(crate) struct LayoutState<L> {
    pub(crate) paragraphs: Vec<TextFrameParagraph>,
    pub(crate) lines: Vec<TextFrameLine<L>>,
    pub(crate) token_styles: TokenStyleBuffer,
    pub(crate) scale_info: ScaleInfo,
    pub(crate) inversely_scaled_frame_size: Size,
    pub(crate) need_to_justify_lines: bool,
    pub(crate) may_exceed_max_width: bool,
    pub(crate) frame_limits_hit: bool,
    pub(crate) clipped_string_range_end: usize,
    pub(crate) truncated_string_length: usize,
    pub(crate) text_height: f64,
}

/// Lays out a range of a [`ShapedText`] in a frame.
///
/// A layouter is created per layout request. Every call to [`layout`](Self::layout) or
/// [`layout_and_scale`](Self::layout_and_scale) replaces the previous results. Once
/// [`is_cancelled`](Self::is_cancelled) returns `true`, the layouter may only be dropped.
pub struct TextFrameLayouter<'a, T: Typesetter> {
    shaped: &'a ShapedText,
    typesetter: &'a T,
    string_range: Range<usize>,
    default_alignment: DefaultTextAlignment,
    cancellation_flag: &'a CancellationFlag,
    options: Option<&'a TextFrameOptions>,
    locale_cache: RefCell<LocaleCache>,
    layout_call_count: u32,
    is_cancelled: bool,
    ownership: Ownership,
    state: LayoutState<T::Line>,
}

impl<T: Typesetter> core::fmt::Debug for TextFrameLayouter<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextFrameLayouter")
            .field("string_range", &self.string_range)
            .field("default_alignment", &self.default_alignment)
            .field("layout_call_count", &self.layout_call_count)
            .field("is_cancelled", &self.is_cancelled)
            .field("ownership", &self.ownership)
            .field("paragraphs", &self.state.paragraphs.len())
            .field("lines", &self.state.lines.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Typesetter> TextFrameLayouter<'a, T> {
    /// Creates a layouter for `string_range` of `shaped`.
    ///
    /// The range is clamped to the text and extended to character boundaries.
    pub fn new(
        shaped: &'a ShapedText,
        typesetter: &'a T,
        string_range: Range<usize>,
        default_alignment: DefaultTextAlignment,
        cancellation_flag: Option<&'a CancellationFlag>,
    ) -> Self {
        let text = shaped.text();
        let mut start = string_range.start.min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = string_range.end.clamp(start, text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        Self {
            shaped,
            typesetter,
            string_range: start..end,
            default_alignment,
            cancellation_flag: cancellation_flag.unwrap_or(&NEVER_CANCELLED),
            options: None,
            locale_cache: RefCell::new(LocaleCache::default()),
            layout_call_count: 0,
            is_cancelled: false,
            ownership: Ownership::Owned,
            state: LayoutState {
                paragraphs: Vec::new(),
                lines: Vec::new(),
                token_styles: TokenStyleBuffer::new(shaped),
                scale_info: ScaleInfo::default(),
                inversely_scaled_frame_size: Size::default(),
                need_to_justify_lines: false,
                may_exceed_max_width: false,
                frame_limits_hit: false,
                clipped_string_range_end: start,
                truncated_string_length: 0,
                text_height: 0.,
            },
        }
    }

    /// Lays out the text at a fixed scale.
    ///
    /// `inversely_scaled_frame_size` is the frame size divided by the scale. A
    /// `max_line_count` of 0 means no limit.
    pub fn layout(
        &mut self,
        inversely_scaled_frame_size: Size,
        scale_info: ScaleInfo,
        max_line_count: usize,
        options: &'a TextFrameOptions,
    ) {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        debug_assert!(
            scale_info.scale > 0. && (scale_info.scale * scale_info.inverse_scale - 1.).abs() < 1e-9,
            "inverse_scale must be the reciprocal of a positive scale"
        );
        self.layout_call_count += 1;
        self.options = Some(options);
        self.ownership = Ownership::Owned;

        let shaped = self.shaped;
        let typesetter = self.typesetter;
        let text = shaped.text();
        let mode = options.text_layout_mode;
        let frame = inversely_scaled_frame_size;

        let state = &mut self.state;
        state.paragraphs.clear();
        state.lines.clear();
        state.token_styles.clear();
        state.scale_info = scale_info;
        state.inversely_scaled_frame_size = frame;
        state.need_to_justify_lines = false;
        state.may_exceed_max_width = false;
        state.frame_limits_hit = false;
        state.clipped_string_range_end = self.string_range.start;
        state.truncated_string_length = 0;
        state.text_height = 0.;

        let default_token = TruncationToken::default();
        let frame_truncation = TruncationParams {
            truncation_type: options.last_line_truncation_mode,
            token: options.truncation_token.as_ref().unwrap_or(&default_token),
            adjuster: options.truncation_range_adjuster.as_deref(),
        };
        let hyphenation_source = options
            .hyphenation_source
            .as_deref()
            .unwrap_or_else(|| hyphenation::default_source());

        // Scope index, lines used in it and whether it ran out of lines.
        let mut scope_state: Option<(usize, usize, bool)> = None;

        'paragraphs: for paragraph_index in self.paragraph_indices() {
            if self.cancellation_flag.is_cancelled() {
                log::debug!("layout cancelled before paragraph {paragraph_index}");
                self.is_cancelled = true;
                return;
            }
            let state = &mut self.state;
            let paragraph = &shaped.paragraphs()[paragraph_index];
            let style = &paragraph.style;
            let range = intersect(&paragraph.range, &self.string_range);

            let scope = shaped.truncation_scope_of(paragraph_index);
            match scope {
                Some((scope_index, _)) => {
                    if scope_state.is_none_or(|(index, _, _)| index != scope_index) {
                        scope_state = Some((scope_index, 0, false));
                    }
                }
                None => scope_state = None,
            }
            let layout_index = state.paragraphs.len();
            state.paragraphs.push(TextFrameParagraph {
                paragraph_index,
                range_in_original_string: range.clone(),
                range_in_truncated_string: 0..0,
                excised_range: range.end..range.end,
                line_index_range: state.lines.len()..state.lines.len(),
                truncation_token_len: 0,
                has_truncation_token: false,
                alignment: self.default_alignment.resolve(style.alignment, style.base_direction),
                base_direction: style.base_direction,
                first_line_indentations: Indentations::new(style, true, frame.width, &scale_info),
                indentations: Indentations::new(style, false, frame.width, &scale_info),
            });
            if let Some((_, _, true)) = scope_state {
                state.paragraphs[layout_index].excised_range = range.clone();
                continue;
            }

            let hyphenation_factor = TextFrameOptions::clamped_hyphenation_factor(
                style.hyphenation_factor.unwrap_or(options.hyphenation_factor),
            );
            let locale = if hyphenation_factor > 0. {
                let language = style.language.as_ref().unwrap_or(&DEFAULT_HYPHENATION_LANGUAGE);
                self.locale_cache
                    .borrow_mut()
                    .locale(hyphenation_source, language)
                    .cloned()
            } else {
                None
            };
            let hyphenation = locale.as_ref().map(|locale| HyphenationParams {
                source: hyphenation_source,
                locale,
                factor: hyphenation_factor,
            });

            let mut cursor = range.start;
            loop {
                if max_line_count != 0 && state.lines.len() >= max_line_count {
                    log::debug!("line limit of {max_line_count} reached at byte {cursor}");
                    state.hit_frame_limit(typesetter, shaped, mode, frame_truncation);
                    break 'paragraphs;
                }
                if let (Some((_, scope)), Some((_, used, exhausted))) = (scope, scope_state.as_mut()) {
                    if scope.max_line_count != 0 && *used >= scope.max_line_count {
                        log::debug!(
                            "truncation scope over paragraphs {}..{} ran out of lines",
                            scope.paragraphs.start,
                            scope.paragraphs.end
                        );
                        *exhausted = true;
                        let token = scope.token.as_ref().unwrap_or(&default_token);
                        let params = TruncationParams {
                            truncation_type: scope.truncation_type,
                            token,
                            adjuster: frame_truncation.adjuster,
                        };
                        state.truncate_last_line(typesetter, shaped, mode, params);
                        let paragraph = &mut state.paragraphs[layout_index];
                        if paragraph.line_index_range.is_empty() {
                            paragraph.excised_range = range.clone();
                        }
                        break;
                    }
                }

                let is_first_line = cursor == range.start;
                let indents = Indentations::new(style, is_first_line, frame.width, &scale_info);
                let max_width = indents.max_width(frame.width);
                let broken = break_line(typesetter, text, cursor..range.end, max_width, hyphenation);

                let mut line = TextFrameLine::new(
                    broken.range.clone(),
                    layout_index,
                    smallvec![LinePiece {
                        kind: LinePieceKind::Text(broken.range.clone()),
                        width: broken.shaped.width,
                        shaped: Some(broken.shaped.line),
                    }],
                    broken.width,
                );
                line.trailing_whitespace_len = broken.trailing_whitespace_len;
                line.is_first_line_in_paragraph = is_first_line;
                line.hyphen = broken.hyphen;
                line.max_width = max_width;
                line.left_indent = indents.left;
                line.right_indent = indents.right;
                line.head_indent = indents.head;
                line.text_styles_offset = crate::style::style_index_at(shaped.styles(), broken.range.start);
                line.init_step = LineInitStep::TokenStylesAssigned;
                line.metrics = broken.shaped.metrics;
                state.lines.push(line);
                let line_index = state.lines.len() - 1;
                state.position_line(line_index, shaped, mode);
                if state.lines[line_index].bottom() > frame.height + HEIGHT_EPSILON {
                    log::debug!("frame height reached at byte {cursor}");
                    state.lines.pop();
                    state.hit_frame_limit(typesetter, shaped, mode, frame_truncation);
                    break 'paragraphs;
                }

                log::trace!(
                    "line {}..{} width {} of {max_width}",
                    broken.range.start,
                    broken.range.end,
                    broken.width
                );
                state.paragraphs[layout_index].line_index_range.end = state.lines.len();
                state.may_exceed_max_width |= broken.exceeds_max_width;
                if let Some((_, used, _)) = scope_state.as_mut() {
                    *used += 1;
                }
                cursor = broken.range.end;
                if cursor >= range.end {
                    break;
                }
            }
        }

        let justify_last_line = options.justify_last_line;
        let justification_enabled = options.justification_enabled;
        self.state.finish(
            shaped.text(),
            &self.string_range,
            justification_enabled,
            justify_last_line,
        );
    }

    /// Indices of the paragraphs overlapping the string range.
    fn paragraph_indices(&self) -> Range<usize> {
        let first = self.shaped.paragraph_index_at(self.string_range.start);
        let last = if self.string_range.is_empty() {
            first
        } else {
            self.shaped.paragraph_index_at(self.string_range.end - 1)
        };
        first..last + 1
    }

    fn state(&self) -> &LayoutState<T::Line> {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        debug_assert!(self.options.is_some(), "layout has not been called yet");
        &self.state
    }

    /// Stretches the lines of justified paragraphs. Calling this again has no effect.
    pub fn justify_lines_where_necessary(&mut self) {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        let Some(options) = self.options else {
            return;
        };
        if !self.state.need_to_justify_lines {
            return;
        }
        let state = &mut self.state;
        justify::justify_lines(
            &mut state.lines,
            &state.paragraphs,
            self.shaped.text(),
            options.justify_last_line,
        );
        state.need_to_justify_lines = false;
    }

    /// Hands the shaped objects of all lines, including truncation tokens, to the caller.
    ///
    /// Returns one entry per line, with the objects in piece order. The lines keep their
    /// geometry, but [`LinePiece::shaped`] is `None` afterwards.
    pub fn relinquish_ownership_of_shaped_lines_and_truncation_tokens(
        &mut self,
    ) -> Vec<SmallVec<[T::Line; 3]>> {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        debug_assert_eq!(
            self.ownership,
            Ownership::Owned,
            "ownership was already relinquished"
        );
        self.ownership = Ownership::Relinquished;
        self.state
            .lines
            .iter_mut()
            .map(|line| {
                line.pieces
                    .iter_mut()
                    .filter_map(|piece| piece.shaped.take())
                    .collect()
            })
            .collect()
    }

    /// Returns `true` if the cancellation flag was observed during layout.
    ///
    /// This is the only method that may be called on a cancelled layouter.
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled
    }

    /// Number of `layout` calls, reset by `layout_and_scale`.
    pub fn layout_call_count(&self) -> u32 {
        self.layout_call_count
    }

    /// Who owns the shaped line objects.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// The line-height model of the last layout.
    pub fn layout_mode(&self) -> TextLayoutMode {
        self.options.map_or_else(TextLayoutMode::default, |options| options.text_layout_mode)
    }

    /// The scale of the last layout.
    pub fn scale_info(&self) -> &ScaleInfo {
        &self.state().scale_info
    }

    /// The frame size of the last layout, divided by the scale.
    pub fn inversely_scaled_frame_size(&self) -> Size {
        self.state().inversely_scaled_frame_size
    }

    /// Whether [`justify_lines_where_necessary`](Self::justify_lines_where_necessary) would
    /// change any line.
    pub fn need_to_justify_lines(&self) -> bool {
        self.state().need_to_justify_lines
    }

    /// Whether a line is wider than its maximum width, because not even a single grapheme
    /// cluster fit.
    pub fn may_exceed_max_width(&self) -> bool {
        self.state().may_exceed_max_width
    }

    /// Whether the text fit the frame without hitting a frame limit or overflowing a line.
    pub fn fits(&self) -> bool {
        let state = self.state();
        !state.frame_limits_hit && !state.may_exceed_max_width
    }

    /// The part of the original string that is displayed, excised ranges included.
    pub fn range_in_original_string(&self) -> Range<usize> {
        self.string_range.start..self.state().clipped_string_range_end
    }

    /// Returns `true` if the whole text was laid out without clipping.
    pub fn range_in_original_string_is_full_string(&self) -> bool {
        !self.text_is_clipped() && self.string_range == (0..self.shaped.text().len())
    }

    /// Returns `true` if text at the end was dropped because the line limit or the frame
    /// height was reached.
    pub fn text_is_clipped(&self) -> bool {
        self.state().frame_limits_hit
    }

    /// The shaped paragraphs that were laid out.
    pub fn original_string_paragraphs(&self) -> &'a [crate::ShapedParagraph] {
        let state = self.state();
        match (state.paragraphs.first(), state.paragraphs.last()) {
            (Some(first), Some(last)) => {
                &self.shaped.paragraphs()[first.paragraph_index..=last.paragraph_index]
            }
            _ => &[],
        }
    }

    /// The laid out paragraphs.
    pub fn paragraphs(&self) -> &[TextFrameParagraph] {
        &self.state().paragraphs
    }

    /// The laid out lines, in paragraph order.
    pub fn lines(&self) -> &[TextFrameLine<T::Line>] {
        &self.state().lines
    }

    /// Length of the displayed text, with excised ranges replaced by truncation tokens.
    pub fn truncated_string_length(&self) -> usize {
        self.state().truncated_string_length
    }

    /// Distance from the top of the frame to the bottom of the last line, in inversely
    /// scaled coordinates.
    pub fn text_height(&self) -> f64 {
        self.state().text_height
    }

    /// The font table. Fonts used only by truncation tokens follow the original fonts.
    pub fn fonts(&self) -> &[FontRef] {
        self.state().token_styles.fonts()
    }

    /// Metrics of [`fonts`](Self::fonts).
    pub fn font_metrics(&self) -> &[FontMetrics] {
        self.state().token_styles.font_metrics()
    }

    /// The color table. Colors used only by truncation tokens follow the original colors.
    pub fn colors(&self) -> &[Color] {
        self.state().token_styles.colors()
    }

    /// The style runs of the original string that cover
    /// [`range_in_original_string`](Self::range_in_original_string).
    pub fn original_string_styles(&self) -> &'a [TextStyle] {
        let range = self.range_in_original_string();
        let styles = self.shaped.styles();
        let first = crate::style::style_index_at(styles, range.start);
        let last = crate::style::style_index_at(styles, range.end.saturating_sub(1).max(range.start));
        &styles[first..=last]
    }

    /// The style runs of the truncation tokens. Each line with a token refers to its first
    /// run through [`TextFrameLine::token_styles_offset`].
    pub fn truncation_token_text_styles(&self) -> &[TextStyle] {
        self.state().token_styles.data()
    }

    /// Heights of a line whose fonts have at least the metrics `min_font_metrics`.
    pub fn min_line_height_info(
        mode: TextLayoutMode,
        params: &crate::LineHeightParams,
        min_font_metrics: &FontMetrics,
    ) -> LineHeightInfo {
        LineHeightInfo::new(mode, params, min_font_metrics)
    }

    /// Distance between the baselines of two lines of the paragraph with style `style`
    /// that both have the heights of `line`.
    pub fn intra_paragraph_baseline_distance_for_lines_like(
        line: &TextFrameLine<T::Line>,
        style: &ParagraphStyle,
    ) -> f64 {
        intra_paragraph_baseline_distance(line.heights(), style)
    }
}

impl<L> LayoutState<L> {
    /// Computes the heights and baseline of a line from the line before it.
    fn position_line(&mut self, index: usize, shaped: &ShapedText, mode: TextLayoutMode) {
        let line = &self.lines[index];
        let style = paragraph_style(shaped, &self.paragraphs, line);
        let heights = LineHeightInfo::new(mode, &style.line_height, &line.metrics);
        let baseline = match index.checked_sub(1) {
            None => first_baseline(&heights, &line.metrics, &self.scale_info),
            Some(previous) => {
                let previous = &self.lines[previous];
                let previous_paragraph = (previous.paragraph_index != line.paragraph_index)
                    .then(|| paragraph_style(shaped, &self.paragraphs, previous));
                next_baseline(
                    previous.baseline,
                    &previous.heights,
                    &heights,
                    style,
                    previous_paragraph,
                )
            }
        };
        let line = &mut self.lines[index];
        line.heights = heights;
        line.baseline = baseline;
        line.init_step = LineInitStep::MetricsInitialized;
    }

    fn hit_frame_limit<T: Typesetter<Line = L>>(
        &mut self,
        typesetter: &T,
        shaped: &ShapedText,
        mode: TextLayoutMode,
        params: TruncationParams<'_>,
    ) {
        self.frame_limits_hit = true;
        // Paragraphs without lines are clipped entirely, unless a truncation scope removed them.
        while self.paragraphs.last().is_some_and(|paragraph| {
            paragraph.line_index_range.is_empty() && paragraph.excised_range.is_empty()
        }) {
            self.paragraphs.pop();
        }
        // A line truncated by its scope keeps the scope's token.
        if self.lines.last().is_some_and(|line| line.has_truncation_token) {
            return;
        }
        self.truncate_last_line(typesetter, shaped, mode, params);
    }

    /// Truncates the last line so that it ends with the end of its paragraph's content.
    fn truncate_last_line<T: Typesetter<Line = L>>(
        &mut self,
        typesetter: &T,
        shaped: &ShapedText,
        mode: TextLayoutMode,
        params: TruncationParams<'_>,
    ) {
        let Some(index) = self.lines.len().checked_sub(1) else {
            return;
        };
        let layout_index = self.lines[index].paragraph_index;
        let paragraph = &self.paragraphs[layout_index];
        let source = &shaped.paragraphs()[paragraph.paragraph_index];
        let range = paragraph.range_in_original_string.clone();
        let content_end = if range.end == source.range.end {
            (range.end - source.terminator_len).max(range.start)
        } else {
            range.end
        };
        let line = &self.lines[index];
        let start = line.range_in_original_string.start;
        let max_width = line.max_width;
        let truncated = truncate_line(
            typesetter,
            shaped,
            start..content_end.max(start),
            max_width,
            params,
            &mut self.token_styles,
        );
        log::debug!(
            "truncated line {index}, excised {}..{}",
            truncated.excised_range.start,
            truncated.excised_range.end
        );

        let paragraph = &mut self.paragraphs[layout_index];
        paragraph.excised_range = truncated.excised_range.clone();
        paragraph.has_truncation_token = true;
        paragraph.truncation_token_len = truncated.token_len;

        let line = &mut self.lines[index];
        line.init_step = LineInitStep::Broken;
        line.pieces = truncated.pieces;
        line.range_in_original_string = start..range.end;
        line.trailing_whitespace_len = range.end - content_end.max(start);
        line.hyphen = None;
        line.has_truncation_token = true;
        line.width = truncated.width;
        line.justification = None;
        line.token_styles_offset = Some(truncated.token_styles_offset);
        line.init_step = LineInitStep::TokenStylesAssigned;
        line.metrics = truncated.metrics;
        self.position_line(index, shaped, mode);
    }

    /// Derives the bookkeeping that depends on all lines.
    fn finish(
        &mut self,
        text: &str,
        string_range: &Range<usize>,
        justification_enabled: bool,
        justify_last_line: bool,
    ) {
        for paragraph in &self.paragraphs {
            let lines = &mut self.lines[paragraph.line_index_range.clone()];
            if let Some(last) = lines.last_mut() {
                last.is_last_line_in_paragraph = true;
            }
        }

        self.clipped_string_range_end = match self.paragraphs.last() {
            None => string_range.start,
            Some(_) if !self.frame_limits_hit => string_range.end,
            Some(last) => last.range_in_original_string.end,
        };

        let mut offset = 0;
        for paragraph in &mut self.paragraphs {
            let len = paragraph.range_in_original_string.len() - paragraph.excised_range.len()
                + paragraph.truncation_token_len;
            paragraph.range_in_truncated_string = offset..offset + len;
            offset += len;
        }
        self.truncated_string_length = offset;

        for line in &mut self.lines {
            let paragraph = &self.paragraphs[line.paragraph_index];
            let range = line.range_in_original_string.clone();
            line.range_in_truncated_string = paragraph.truncated_index(range.start, false)
                ..paragraph.truncated_index(range.end, line.has_truncation_token);

            let free_space = (line.max_width - line.width).max(0.);
            let is_rtl = paragraph.base_direction == WritingDirection::RightToLeft;
            line.x = line.left_indent
                + match paragraph.alignment {
                    TextAlignment::Left | TextAlignment::Natural => 0.,
                    TextAlignment::Right => free_space,
                    TextAlignment::Center => free_space / 2.,
                    TextAlignment::Justified if is_rtl => free_space,
                    TextAlignment::Justified => 0.,
                };
        }

        self.need_to_justify_lines = justification_enabled
            && self.lines.iter().any(|line| {
                justify::justifiable_gaps(
                    line,
                    &self.paragraphs[line.paragraph_index],
                    text,
                    justify_last_line,
                )
                .is_some()
            });
        self.text_height = self.lines.last().map_or(0., TextFrameLine::bottom);
    }
}

fn paragraph_style<'s, L>(
    shaped: &'s ShapedText,
    paragraphs: &[TextFrameParagraph],
    line: &TextFrameLine<L>,
) -> &'s ParagraphStyle {
    &shaped.paragraphs()[paragraphs[line.paragraph_index].paragraph_index].style
}
