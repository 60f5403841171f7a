// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;
use core::ops::Range;

use crate::{
    CancellationFlag, DefaultTextAlignment, FixedAdvanceTypesetter, FontMetrics, FontRef, ParagraphStyle, Shaped,
    ShapedText, ShapedTextBuilder, TextFrameLayouter, TextFrameOptions, Typesetter,
};

/// Size of the default test font. With the default advance of half an em, every character
/// is 10 units wide, and lines are 20 units high.
pub(crate) const FONT_SIZE: f32 = 20.;

pub(crate) fn default_metrics() -> FontMetrics {
    FontMetrics {
        ascent: 16.,
        descent: 4.,
        leading: 0.,
        cap_height: 14.,
        x_height: 10.,
    }
}

pub(crate) struct TestEnv {
    test_name: String,
    options: TextFrameOptions,
    paragraph_style: ParagraphStyle,
    default_alignment: DefaultTextAlignment,
}

impl TestEnv {
    pub(crate) fn new(test_name: &str) -> Self {
        Self {
            test_name: test_name.to_owned(),
            options: TextFrameOptions::default(),
            paragraph_style: ParagraphStyle::default(),
            default_alignment: DefaultTextAlignment::Start,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.test_name
    }

    pub(crate) fn options(&self) -> &TextFrameOptions {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut TextFrameOptions {
        &mut self.options
    }

    pub(crate) fn paragraph_style_mut(&mut self) -> &mut ParagraphStyle {
        &mut self.paragraph_style
    }

    /// A builder with the default test font and the environment's paragraph style.
    pub(crate) fn builder(&self, text: &str) -> ShapedTextBuilder {
        let mut builder = ShapedText::builder(text);
        builder.add_font(FontRef::new(0, FONT_SIZE), default_metrics());
        builder.push_default_paragraph_style(self.paragraph_style.clone());
        builder
    }

    pub(crate) fn shaped(&self, text: &str) -> ShapedText {
        self.builder(text).build().unwrap()
    }

    /// A layouter over the whole text.
    pub(crate) fn layouter<'a, T: Typesetter>(
        &self,
        shaped: &'a ShapedText,
        typesetter: &'a T,
    ) -> TextFrameLayouter<'a, T> {
        TextFrameLayouter::new(
            shaped,
            typesetter,
            0..shaped.text().len(),
            self.default_alignment,
            None,
        )
    }

    pub(crate) fn typesetter<'a>(&self, shaped: &'a ShapedText) -> FixedAdvanceTypesetter<'a> {
        FixedAdvanceTypesetter::new(shaped)
    }
}

/// Counts the lines and tokens shaped by the wrapped typesetter.
#[derive(Debug)]
pub(crate) struct CountingTypesetter<'f, T> {
    inner: T,
    shaped_lines: Cell<usize>,
    cancel_after: Option<(usize, &'f CancellationFlag)>,
}

impl<'f, T> CountingTypesetter<'f, T> {
    pub(crate) fn new(inner: T) -> Self {
        Self {
            inner,
            shaped_lines: Cell::new(0),
            cancel_after: None,
        }
    }

    /// Sets `flag` once `count` lines and tokens have been shaped.
    pub(crate) fn cancelling_after(mut self, count: usize, flag: &'f CancellationFlag) -> Self {
        self.cancel_after = Some((count, flag));
        self
    }

    fn count(&self) {
        let count = self.shaped_lines.get() + 1;
        self.shaped_lines.set(count);
        if let Some((after, flag)) = self.cancel_after {
            if count >= after {
                flag.cancel();
            }
        }
    }

    pub(crate) fn shaped_lines(&self) -> usize {
        self.shaped_lines.get()
    }
}

impl<T: Typesetter> Typesetter for CountingTypesetter<'_, T> {
    type Line = T::Line;

    fn suggest_line_break(&self, range: Range<usize>, width: f64) -> usize {
        self.inner.suggest_line_break(range, width)
    }

    fn suggest_cluster_break(&self, range: Range<usize>, width: f64) -> usize {
        self.inner.suggest_cluster_break(range, width)
    }

    fn suggest_cluster_break_from_end(&self, range: Range<usize>, width: f64) -> usize {
        self.inner.suggest_cluster_break_from_end(range, width)
    }

    fn next_cluster_break(&self, index: usize) -> usize {
        self.inner.next_cluster_break(index)
    }

    fn shape_line(&self, range: Range<usize>, hyphen: Option<char>) -> Shaped<Self::Line> {
        self.count();
        self.inner.shape_line(range, hyphen)
    }

    fn shape_token(&self, text: &str, font: &FontRef, metrics: &FontMetrics) -> Shaped<Self::Line> {
        self.count();
        self.inner.shape_token(text, font, metrics)
    }
}
