// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input of the layouter: text split into paragraphs, with style runs and tables.

use core::ops::Range;

use icu_locale_core::LanguageIdentifier;

use crate::error::ShapedTextError;
use crate::options::{TextAlignment, TruncationToken, TruncationType, WritingDirection};
use crate::style::{Color, FontMetrics, FontRef, TextStyle};

/// Parameters of the line-height model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineHeightParams {
    /// Multiple of the natural line height (ascent + descent).
    pub line_height_multiple: f32,
    /// Minimum line height, 0 for none.
    pub min_line_height: f32,
    /// Maximum line height, 0 for none.
    pub max_line_height: f32,
    /// Additional spacing between the lines of a paragraph.
    pub line_spacing: f32,
}

impl Default for LineHeightParams {
    fn default() -> Self {
        Self {
            line_height_multiple: 1.,
            min_line_height: 0.,
            max_line_height: 0.,
            line_spacing: 0.,
        }
    }
}

/// Paragraph-level attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    /// Base writing direction.
    pub base_direction: WritingDirection,
    /// Horizontal alignment.
    pub alignment: TextAlignment,
    /// Distance of all lines from the left frame edge. A negative value is measured from the
    /// right frame edge instead, i.e. the indent is `frame_width + padding_left`.
    ///
    /// Paddings are not affected by scale-to-fit.
    pub padding_left: f32,
    /// Distance of all lines from the right frame edge, see `padding_left`.
    pub padding_right: f32,
    /// Additional left indent of the first line.
    pub first_line_left_indent: f32,
    /// Additional right indent of the first line.
    pub first_line_right_indent: f32,
    /// Vertical space above the paragraph (not applied to the first paragraph of the frame).
    pub spacing_before: f32,
    /// Vertical space below the paragraph (not applied to the last paragraph of the frame).
    pub spacing_after: f32,
    /// Line-height model parameters.
    pub line_height: LineHeightParams,
    /// Hyphenation factor, `None` to use the frame options' default.
    pub hyphenation_factor: Option<f32>,
    /// Language of the paragraph, used to pick hyphenation rules.
    pub language: Option<LanguageIdentifier>,
}

/// A paragraph of the shaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedParagraph {
    /// Byte range in the text, including the paragraph terminator.
    pub range: Range<usize>,
    /// Byte length of the paragraph terminator at the end of `range`.
    pub terminator_len: usize,
    /// Paragraph attributes.
    pub style: ParagraphStyle,
}

/// A range of paragraphs sharing a line limit and a truncation policy.
#[derive(Clone, Debug, PartialEq)]
pub struct TruncationScope {
    /// Indices of the paragraphs in the scope.
    pub paragraphs: Range<usize>,
    /// Maximum number of lines of all paragraphs in the scope together.
    pub max_line_count: usize,
    /// Where the last line of the scope is truncated.
    pub truncation_type: TruncationType,
    /// Token for the truncated line, `…` when `None`.
    pub token: Option<TruncationToken>,
}

/// Text prepared for layout.
#[derive(Clone, Debug)]
pub struct ShapedText {
    text: String,
    paragraphs: Vec<ShapedParagraph>,
    styles: Vec<TextStyle>,
    fonts: Vec<FontRef>,
    font_metrics: Vec<FontMetrics>,
    colors: Vec<Color>,
    truncation_scopes: Vec<TruncationScope>,
}

impl ShapedText {
    /// Returns a builder for `text`.
    pub fn builder(text: impl Into<String>) -> ShapedTextBuilder {
        ShapedTextBuilder::new(text)
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All paragraphs, in text order.
    pub fn paragraphs(&self) -> &[ShapedParagraph] {
        &self.paragraphs
    }

    /// The style runs, tiling the text.
    pub fn styles(&self) -> &[TextStyle] {
        &self.styles
    }

    /// The font table.
    pub fn fonts(&self) -> &[FontRef] {
        &self.fonts
    }

    /// Metrics of the fonts, parallel to [`fonts`](Self::fonts).
    pub fn font_metrics(&self) -> &[FontMetrics] {
        &self.font_metrics
    }

    /// The color table.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The truncation scopes, sorted by paragraph index.
    pub fn truncation_scopes(&self) -> &[TruncationScope] {
        &self.truncation_scopes
    }

    /// Returns the scope containing the paragraph with the given index.
    pub fn truncation_scope_of(&self, paragraph_index: usize) -> Option<(usize, &TruncationScope)> {
        self.truncation_scopes
            .iter()
            .enumerate()
            .find(|(_, scope)| scope.paragraphs.contains(&paragraph_index))
    }

    /// Returns the index of the paragraph containing the byte at `index`.
    pub fn paragraph_index_at(&self, index: usize) -> usize {
        self.paragraphs
            .partition_point(|para| para.range.end <= index)
            .min(self.paragraphs.len() - 1)
    }

    /// Returns the style run covering the byte at `index`.
    pub fn style_at(&self, index: usize) -> &TextStyle {
        &self.styles[crate::style::style_index_at(&self.styles, index)]
    }
}

/// Assembles and validates a [`ShapedText`].
#[must_use]
#[derive(Debug)]
pub struct ShapedTextBuilder {
    text: String,
    fonts: Vec<FontRef>,
    font_metrics: Vec<FontMetrics>,
    colors: Vec<Color>,
    default_font: Option<u16>,
    default_color: Option<u16>,
    ranged_fonts: Vec<(Range<usize>, u16)>,
    ranged_colors: Vec<(Range<usize>, u16)>,
    default_paragraph_style: ParagraphStyle,
    ranged_paragraph_styles: Vec<(Range<usize>, ParagraphStyle)>,
    truncation_scopes: Vec<TruncationScope>,
}

impl ShapedTextBuilder {
    /// Creates a builder for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fonts: Vec::new(),
            font_metrics: Vec::new(),
            colors: Vec::new(),
            default_font: None,
            default_color: None,
            ranged_fonts: Vec::new(),
            ranged_colors: Vec::new(),
            default_paragraph_style: ParagraphStyle::default(),
            ranged_paragraph_styles: Vec::new(),
            truncation_scopes: Vec::new(),
        }
    }

    /// Adds a font to the font table and returns its index.
    pub fn add_font(&mut self, font: FontRef, metrics: FontMetrics) -> u16 {
        if let Some(index) = self.fonts.iter().position(|f| *f == font) {
            return index as u16;
        }
        self.fonts.push(font);
        self.font_metrics.push(metrics);
        (self.fonts.len() - 1) as u16
    }

    /// Adds a color to the color table and returns its index.
    pub fn add_color(&mut self, color: Color) -> u16 {
        if let Some(index) = self.colors.iter().position(|c| *c == color) {
            return index as u16;
        }
        self.colors.push(color);
        (self.colors.len() - 1) as u16
    }

    /// Sets the font for all text not covered by a ranged font.
    ///
    /// The first added font is the default if this is never called.
    pub fn push_default_font(&mut self, font_index: u16) {
        self.default_font = Some(font_index);
    }

    /// Sets the color for all text not covered by a ranged color.
    pub fn push_default_color(&mut self, color_index: u16) {
        self.default_color = Some(color_index);
    }

    /// Sets the font of a byte range. Later pushes win.
    pub fn push_font(&mut self, range: Range<usize>, font_index: u16) {
        self.ranged_fonts.push((range, font_index));
    }

    /// Sets the color of a byte range. Later pushes win.
    pub fn push_color(&mut self, range: Range<usize>, color_index: u16) {
        self.ranged_colors.push((range, color_index));
    }

    /// Sets the style of all paragraphs not covered by a ranged paragraph style.
    pub fn push_default_paragraph_style(&mut self, style: ParagraphStyle) {
        self.default_paragraph_style = style;
    }

    /// Sets the style of all paragraphs overlapping the byte range. Later pushes win.
    pub fn push_paragraph_style(&mut self, range: Range<usize>, style: ParagraphStyle) {
        self.ranged_paragraph_styles.push((range, style));
    }

    /// Adds a truncation scope.
    pub fn push_truncation_scope(&mut self, scope: TruncationScope) {
        self.truncation_scopes.push(scope);
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), ShapedTextError> {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(ShapedTextError::InvalidRange(range.clone()));
        }
        Ok(())
    }

    /// Validates the input and produces the shaped text.
    pub fn build(self) -> Result<ShapedText, ShapedTextError> {
        for (range, font) in &self.ranged_fonts {
            self.check_range(range)?;
            if *font as usize >= self.fonts.len() {
                return Err(ShapedTextError::UnknownFont(*font));
            }
        }
        for (range, color) in &self.ranged_colors {
            self.check_range(range)?;
            if *color as usize >= self.colors.len() {
                return Err(ShapedTextError::UnknownColor(*color));
            }
        }
        for (range, _) in &self.ranged_paragraph_styles {
            self.check_range(range)?;
        }
        if self.fonts.is_empty() {
            return Err(ShapedTextError::MissingFont);
        }
        let default_font = self.default_font.unwrap_or(0);
        if default_font as usize >= self.fonts.len() {
            return Err(ShapedTextError::UnknownFont(default_font));
        }
        if let Some(color) = self.default_color {
            if color as usize >= self.colors.len() {
                return Err(ShapedTextError::UnknownColor(color));
            }
        }

        let paragraphs = split_paragraphs(&self.text)
            .into_iter()
            .map(|(range, terminator_len)| {
                let style = self
                    .ranged_paragraph_styles
                    .iter()
                    .rev()
                    .find(|(styled, _)| overlaps(styled, &range))
                    .map_or_else(
                        || self.default_paragraph_style.clone(),
                        |(_, style)| style.clone(),
                    );
                ShapedParagraph {
                    range,
                    terminator_len,
                    style,
                }
            })
            .collect::<Vec<_>>();

        let mut truncation_scopes = self.truncation_scopes;
        truncation_scopes.sort_by_key(|scope| scope.paragraphs.start);
        let mut previous_end = 0;
        for scope in &truncation_scopes {
            if scope.paragraphs.start >= scope.paragraphs.end
                || scope.paragraphs.end > paragraphs.len()
                || scope.paragraphs.start < previous_end
            {
                return Err(ShapedTextError::InvalidTruncationScope(
                    scope.paragraphs.clone(),
                ));
            }
            previous_end = scope.paragraphs.end;
        }

        let styles = resolve_style_runs(
            &self.text,
            default_font,
            self.default_color,
            &self.ranged_fonts,
            &self.ranged_colors,
        );

        Ok(ShapedText {
            text: self.text,
            paragraphs,
            styles,
            fonts: self.fonts,
            font_metrics: self.font_metrics,
            colors: self.colors,
            truncation_scopes,
        })
    }
}

fn overlaps(styled: &Range<usize>, paragraph: &Range<usize>) -> bool {
    if paragraph.is_empty() {
        return styled.start <= paragraph.start && paragraph.start <= styled.end;
    }
    styled.start < paragraph.end && paragraph.start < styled.end
}

/// Splits `text` into paragraphs. Each range includes its terminator; text ending with a
/// terminator does not get an empty trailing paragraph, but empty text has one empty
/// paragraph.
fn split_paragraphs(text: &str) -> Vec<(Range<usize>, usize)> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        let terminator_len = match ch {
            '\r' => {
                if let Some((_, '\n')) = chars.peek() {
                    chars.next();
                    2
                } else {
                    1
                }
            }
            '\n' | '\u{2029}' => ch.len_utf8(),
            _ => continue,
        };
        let end = index + terminator_len;
        paragraphs.push((start..end, terminator_len));
        start = end;
    }
    if start < text.len() || paragraphs.is_empty() {
        paragraphs.push((start..text.len(), 0));
    }
    paragraphs
}

fn resolve_style_runs(
    text: &str,
    default_font: u16,
    default_color: Option<u16>,
    ranged_fonts: &[(Range<usize>, u16)],
    ranged_colors: &[(Range<usize>, u16)],
) -> Vec<TextStyle> {
    let value_at = |index: usize| {
        let font = ranged_fonts
            .iter()
            .rev()
            .find(|(range, _)| range.contains(&index))
            .map_or(default_font, |(_, font)| *font);
        let color = ranged_colors
            .iter()
            .rev()
            .find(|(range, _)| range.contains(&index))
            .map(|(_, color)| *color)
            .or(default_color);
        (font, color)
    };

    let mut styles: Vec<TextStyle> = Vec::new();
    for (index, _) in text.char_indices() {
        let (font_index, color_index) = value_at(index);
        match styles.last() {
            Some(last) if last.font_index == font_index && last.color_index == color_index => {}
            _ => styles.push(TextStyle {
                start: index,
                font_index,
                color_index,
            }),
        }
    }
    if styles.is_empty() {
        styles.push(TextStyle {
            start: 0,
            font_index: default_font,
            color_index: default_color,
        });
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics {
            ascent: 8.,
            descent: 2.,
            ..Default::default()
        }
    }

    #[test]
    fn paragraphs_include_terminators() {
        let paragraphs = split_paragraphs("ab\ncd\r\n\nef");
        assert_eq!(paragraphs, [(0..3, 1), (3..7, 2), (7..8, 1), (8..10, 0)]);
        assert_eq!(split_paragraphs("ab\n"), [(0..3, 1)]);
        assert_eq!(split_paragraphs(""), [(0..0, 0)]);
    }

    #[test]
    fn style_runs_merge_equal_neighbors() {
        let mut builder = ShapedText::builder("Hello world");
        let regular = builder.add_font(FontRef::new(0, 10.), metrics());
        let bold = builder.add_font(FontRef::new(1, 10.), metrics());
        let red = builder.add_color(Color::rgb(255, 0, 0));
        builder.push_default_font(regular);
        builder.push_font(0..5, bold);
        builder.push_color(3..8, red);
        let text = builder.build().unwrap();
        let runs = text
            .styles()
            .iter()
            .map(|s| (s.start, s.font_index, s.color_index))
            .collect::<Vec<_>>();
        assert_eq!(
            runs,
            [(0, 1, None), (3, 1, Some(0)), (5, 0, Some(0)), (8, 0, None)]
        );
        assert_eq!(text.style_at(4).start, 3);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let builder = ShapedText::builder("text");
        assert_eq!(builder.build().unwrap_err(), ShapedTextError::MissingFont);

        let mut builder = ShapedText::builder("t\u{e9}xt");
        builder.add_font(FontRef::new(0, 10.), metrics());
        builder.push_color(0..2, 0);
        assert_eq!(
            builder.build().unwrap_err(),
            ShapedTextError::InvalidRange(0..2)
        );

        let mut builder = ShapedText::builder("one\ntwo");
        builder.add_font(FontRef::new(0, 10.), metrics());
        builder.push_truncation_scope(TruncationScope {
            paragraphs: 1..3,
            max_line_count: 1,
            truncation_type: TruncationType::End,
            token: None,
        });
        assert_eq!(
            builder.build().unwrap_err(),
            ShapedTextError::InvalidTruncationScope(1..3)
        );
    }
}
