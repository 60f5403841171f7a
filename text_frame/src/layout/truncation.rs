// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replacing part of a line with a truncation token.

use core::ops::Range;

use smallvec::SmallVec;

use crate::options::{TruncationRangeAdjuster, TruncationToken, TruncationType};
use crate::shaped::ShapedText;
use crate::style::{FontMetrics, FontRef};
use crate::token_styles::TokenStyleBuffer;
use crate::typesetter::{Shaped, Typesetter};
use crate::util::WIDTH_EPSILON;

use super::line::{LinePiece, LinePieceKind};

/// How many times a cut is tightened after the real token turned out wider than estimated.
const MAX_REFITS: usize = 3;

#[derive(Copy, Clone)]
pub(crate) struct TruncationParams<'t> {
    pub(crate) truncation_type: TruncationType,
    pub(crate) token: &'t TruncationToken,
    pub(crate) adjuster: Option<&'t dyn TruncationRangeAdjuster>,
}

/// A line with a truncation token.
#[derive(Clone, Debug)]
pub(crate) struct TruncatedLine<L> {
    pub(crate) pieces: SmallVec<[LinePiece<L>; 3]>,
    pub(crate) excised_range: Range<usize>,
    pub(crate) width: f64,
    /// Byte length of the token, after clipping.
    pub(crate) token_len: usize,
    /// Offset of the token's style in the token style buffer.
    pub(crate) token_styles_offset: usize,
    pub(crate) metrics: FontMetrics,
}

#[derive(Clone, Debug)]
struct TokenStyle {
    font: FontRef,
    metrics: FontMetrics,
    color_index: Option<u16>,
}

struct Truncator<'t, T: Typesetter> {
    typesetter: &'t T,
    shaped: &'t ShapedText,
    truncatable: Range<usize>,
    max_width: f64,
    params: TruncationParams<'t>,
}

/// Returns the width of the token when its style is inherited from the end of `range`.
pub(crate) fn estimate_tail_truncation_token_width<T: Typesetter>(
    typesetter: &T,
    shaped: &ShapedText,
    range: Range<usize>,
    token: &TruncationToken,
) -> f64 {
    let point = range.end.saturating_sub(1).max(range.start);
    let style = token_style(shaped, token, point);
    typesetter
        .shape_token(&token.text, &style.font, &style.metrics)
        .width_without_trailing_whitespace()
}

/// Replaces part of `truncatable` with the token so that the result fits `max_width`.
///
/// `truncatable` starts at the line start and usually ends at the end of the paragraph's
/// content. The token's style is added to `token_styles`.
pub(crate) fn truncate_line<T: Typesetter>(
    typesetter: &T,
    shaped: &ShapedText,
    truncatable: Range<usize>,
    max_width: f64,
    params: TruncationParams<'_>,
    token_styles: &mut TokenStyleBuffer,
) -> TruncatedLine<T::Line> {
    let truncator = Truncator {
        typesetter,
        shaped,
        truncatable,
        max_width: max_width.max(0.),
        params,
    };
    let (excised, token_text, style, mut line) = truncator.truncate();
    let font_index = token_styles.intern_font(style.font, style.metrics);
    let color_index = match params.token.color {
        Some(color) => Some(token_styles.intern_color(color)),
        None => style.color_index,
    };
    line.token_styles_offset = token_styles.add_token_style(font_index, color_index);
    line.token_len = token_text.len();
    line.excised_range = excised;
    line
}

impl<T: Typesetter> Truncator<'_, T> {
    fn truncate(&self) -> (Range<usize>, String, TokenStyle, TruncatedLine<T::Line>) {
        let limit = self.max_width + WIDTH_EPSILON;
        let t = self.truncatable.clone();
        let estimate = estimate_tail_truncation_token_width(
            self.typesetter,
            self.shaped,
            t.clone(),
            self.params.token,
        );
        let mut available = self.max_width - estimate;
        for _ in 0..MAX_REFITS {
            if available < 0. {
                break;
            }
            let excised = self.cut(available);
            let excised = self.adjust(excised, limit);
            let style = token_style(self.shaped, self.params.token, self.token_point(&excised));
            let line = self.assemble(excised.clone(), &self.params.token.text, &style);
            if line.width <= limit {
                return (excised, self.params.token.text.clone(), style, line);
            }
            available -= line.width - self.max_width;
        }
        self.token_only(limit)
    }

    /// Computes the excised range for the given width available to the text.
    fn cut(&self, available: f64) -> Range<usize> {
        let t = self.truncatable.clone();
        let text = self.shaped.text();
        let limit = available + WIDTH_EPSILON;
        let trim_end = |end: usize| t.start + text[t.start..end].trim_end().len();
        let skip_start = |start: usize| t.end - text[start..t.end].trim_start().len();
        match self.params.truncation_type {
            TruncationType::End => {
                let end = trim_end(self.typesetter.suggest_cluster_break(t.clone(), limit));
                end..t.end
            }
            TruncationType::Start => {
                let start = self.typesetter.suggest_cluster_break_from_end(t.clone(), limit);
                t.start..skip_start(start)
            }
            TruncationType::Middle => {
                let end = trim_end(self.typesetter.suggest_cluster_break(t.clone(), limit / 2.));
                let prefix = self
                    .typesetter
                    .shape_line(t.start..end, None)
                    .width_without_trailing_whitespace();
                let start = self
                    .typesetter
                    .suggest_cluster_break_from_end(end..t.end, limit - prefix);
                end..skip_start(start).max(end)
            }
        }
    }

    /// Lets the adjuster move the excised range. The suggestion is ignored unless it is a
    /// valid range within the truncatable range and the result still fits.
    fn adjust(&self, excised: Range<usize>, limit: f64) -> Range<usize> {
        let Some(adjuster) = self.params.adjuster else {
            return excised;
        };
        let text = self.shaped.text();
        let t = &self.truncatable;
        let adjusted = adjuster.adjust(text, t.clone(), excised.clone());
        let valid = t.start <= adjusted.start
            && adjusted.start <= adjusted.end
            && adjusted.end <= t.end
            && text.is_char_boundary(adjusted.start)
            && text.is_char_boundary(adjusted.end);
        if !valid || adjusted == excised {
            return excised;
        }
        let style = token_style(self.shaped, self.params.token, self.token_point(&adjusted));
        let line = self.assemble(adjusted.clone(), &self.params.token.text, &style);
        if line.width <= limit {
            adjusted
        } else {
            log::debug!(
                "rejected adjusted truncation range {}..{}",
                adjusted.start,
                adjusted.end
            );
            excised
        }
    }

    /// The position whose style the token inherits.
    fn token_point(&self, excised: &Range<usize>) -> usize {
        let t = &self.truncatable;
        match self.params.truncation_type {
            TruncationType::Start if excised.end < t.end => excised.end,
            _ if excised.start > t.start => self.shaped.text()[..excised.start]
                .char_indices()
                .next_back()
                .map_or(t.start, |(i, _)| i),
            _ => t.start,
        }
    }

    fn assemble(
        &self,
        excised: Range<usize>,
        token_text: &str,
        style: &TokenStyle,
    ) -> TruncatedLine<T::Line> {
        let t = self.truncatable.clone();
        let mut pieces = SmallVec::new();
        let mut width = 0.;
        let mut metrics = FontMetrics::default();
        let mut push = |kind, shaped: Shaped<T::Line>, at_end: bool| {
            let piece_width = if at_end {
                shaped.width_without_trailing_whitespace()
            } else {
                shaped.width
            };
            width += piece_width;
            metrics = metrics.max(shaped.metrics);
            pieces.push(LinePiece {
                kind,
                width: piece_width,
                shaped: Some(shaped.line),
            });
        };
        if excised.start > t.start {
            let range = t.start..excised.start;
            push(
                LinePieceKind::Text(range.clone()),
                self.typesetter.shape_line(range, None),
                false,
            );
        }
        let has_suffix = excised.end < t.end;
        push(
            LinePieceKind::Token(token_text.to_string()),
            self.typesetter
                .shape_token(token_text, &style.font, &style.metrics),
            !has_suffix,
        );
        if has_suffix {
            let range = excised.end..t.end;
            push(
                LinePieceKind::Text(range.clone()),
                self.typesetter.shape_line(range, None),
                true,
            );
        }
        TruncatedLine {
            pieces,
            excised_range: excised,
            width,
            token_len: token_text.len(),
            token_styles_offset: 0,
            metrics,
        }
    }

    /// Excises the whole truncatable range and clips the token until it fits.
    fn token_only(&self, limit: f64) -> (Range<usize>, String, TokenStyle, TruncatedLine<T::Line>) {
        let t = self.truncatable.clone();
        let style = token_style(self.shaped, self.params.token, t.start);
        let text = &self.params.token.text;
        let mut end = text.len();
        loop {
            let clipped = &text[..end];
            let line = self.assemble(t.clone(), clipped, &style);
            if line.width <= limit || end == 0 {
                if end < text.len() {
                    log::debug!(
                        "truncation token clipped to {end} of {} bytes",
                        text.len()
                    );
                }
                return (t, clipped.to_string(), style, line);
            }
            end = clipped.char_indices().next_back().map_or(0, |(i, _)| i);
        }
    }
}

fn token_style(shaped: &ShapedText, token: &TruncationToken, point: usize) -> TokenStyle {
    let style = shaped.style_at(point);
    let (font, metrics) = token.font.unwrap_or_else(|| {
        let index = style.font_index as usize;
        (shaped.fonts()[index], shaped.font_metrics()[index])
    });
    TokenStyle {
        font,
        metrics,
        color_index: style.color_index,
    }
}
