// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style data synthesized for truncation tokens.

use hashbrown::HashMap;

use crate::shaped::ShapedText;
use crate::style::{Color, FontMetrics, FontRef, TextStyle};

/// Holds the styles of truncation tokens, which do not exist in the original text.
///
/// The font and color tables start out as copies of the original tables, so indices of the
/// original style runs stay valid in them; fonts and colors that only tokens use are appended.
/// The original tables are never modified.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TokenStyleBuffer {
    fonts: Vec<FontRef>,
    font_metrics: Vec<FontMetrics>,
    colors: Vec<Color>,
    font_indices: HashMap<FontRef, u16>,
    color_indices: HashMap<Color, u16>,
    styles: Vec<TextStyle>,
    original_font_count: usize,
    original_color_count: usize,
}

impl TokenStyleBuffer {
    pub(crate) fn new(shaped: &ShapedText) -> Self {
        let font_indices = shaped
            .fonts()
            .iter()
            .enumerate()
            .map(|(index, font)| (*font, index as u16))
            .collect();
        let color_indices = shaped
            .colors()
            .iter()
            .enumerate()
            .map(|(index, color)| (*color, index as u16))
            .collect();
        Self {
            fonts: shaped.fonts().to_vec(),
            font_metrics: shaped.font_metrics().to_vec(),
            colors: shaped.colors().to_vec(),
            font_indices,
            color_indices,
            styles: Vec::new(),
            original_font_count: shaped.fonts().len(),
            original_color_count: shaped.colors().len(),
        }
    }

    /// Drops everything added since construction.
    pub(crate) fn clear(&mut self) {
        if self.fonts.len() > self.original_font_count {
            let count = self.original_font_count;
            self.fonts.truncate(count);
            self.font_metrics.truncate(count);
            self.font_indices.retain(|_, index| (*index as usize) < count);
        }
        if self.colors.len() > self.original_color_count {
            let count = self.original_color_count;
            self.colors.truncate(count);
            self.color_indices.retain(|_, index| (*index as usize) < count);
        }
        self.styles.clear();
    }

    pub(crate) fn fonts(&self) -> &[FontRef] {
        &self.fonts
    }

    pub(crate) fn font_metrics(&self) -> &[FontMetrics] {
        &self.font_metrics
    }

    pub(crate) fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The token style runs. Each token's runs start at offset 0 of the token text.
    pub(crate) fn data(&self) -> &[TextStyle] {
        &self.styles
    }

    pub(crate) fn intern_font(&mut self, font: FontRef, metrics: FontMetrics) -> u16 {
        if let Some(index) = self.font_indices.get(&font) {
            return *index;
        }
        let index = self.fonts.len() as u16;
        self.fonts.push(font);
        self.font_metrics.push(metrics);
        self.font_indices.insert(font, index);
        index
    }

    pub(crate) fn intern_color(&mut self, color: Color) -> u16 {
        if let Some(index) = self.color_indices.get(&color) {
            return *index;
        }
        let index = self.colors.len() as u16;
        self.colors.push(color);
        self.color_indices.insert(color, index);
        index
    }

    /// Appends the style of a token and returns the offset of its first run.
    pub(crate) fn add_token_style(&mut self, font_index: u16, color_index: Option<u16>) -> usize {
        let offset = self.styles.len();
        self.styles.push(TextStyle {
            start: 0,
            font_index,
            color_index,
        });
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped() -> ShapedText {
        let mut builder = ShapedText::builder("abc");
        builder.add_font(FontRef::new(0, 10.), FontMetrics::default());
        builder.add_color(Color::BLACK);
        builder.build().unwrap()
    }

    #[test]
    fn interning_reuses_original_entries() {
        let mut buffer = TokenStyleBuffer::new(&shaped());
        assert_eq!(buffer.intern_font(FontRef::new(0, 10.), FontMetrics::default()), 0);
        assert_eq!(buffer.intern_color(Color::BLACK), 0);
        assert_eq!(buffer.intern_color(Color::rgb(0, 0, 255)), 1);
        assert_eq!(buffer.intern_color(Color::rgb(0, 0, 255)), 1);
        assert_eq!(buffer.colors().len(), 2);
    }

    #[test]
    fn clear_restores_seeded_tables() {
        let shaped = shaped();
        let seeded = TokenStyleBuffer::new(&shaped);
        let mut buffer = seeded.clone();
        let font = buffer.intern_font(FontRef::new(7, 12.), FontMetrics::default());
        let color = buffer.intern_color(Color::rgb(9, 9, 9));
        assert_eq!(buffer.add_token_style(font, Some(color)), 0);
        assert_eq!(buffer.add_token_style(0, None), 1);
        buffer.clear();
        assert_eq!(buffer, seeded);
        assert_eq!(buffer.intern_font(FontRef::new(7, 12.), FontMetrics::default()), 1);
    }
}
