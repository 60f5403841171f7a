// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style tables shared by the shaped input text and the truncation tokens.

use core::hash::{Hash, Hasher};

/// Identifies a font at a particular size.
///
/// The layouter never looks inside a font; it only forwards references to the
/// [`Typesetter`](crate::Typesetter) and to the renderer.
#[derive(Copy, Clone, Debug)]
pub struct FontRef {
    /// Opaque identifier of the font face, owned by the caller.
    pub id: u32,
    /// Font size in layout units.
    pub size: f32,
}

impl FontRef {
    /// Creates a new font reference.
    pub const fn new(id: u32, size: f32) -> Self {
        Self { id, size }
    }
}

impl PartialEq for FontRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for FontRef {}

impl Hash for FontRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.size.to_bits().hash(state);
    }
}

/// Typographic metrics of a font at the size given by its [`FontRef`].
///
/// All values are positive distances in layout units.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
    /// Recommended additional spacing between lines.
    pub leading: f32,
    /// Height of capital letters above the baseline.
    pub cap_height: f32,
    /// Height of lowercase letters above the baseline.
    pub x_height: f32,
}

impl FontMetrics {
    /// Returns the component-wise maximum of two metrics.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            leading: self.leading.max(other.leading),
            cap_height: self.cap_height.max(other.cap_height),
            x_height: self.x_height.max(other.x_height),
        }
    }
}

/// An RGBA color with 8 bits per channel.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A style run.
///
/// Runs are stored sorted by `start` and tile their string: a run extends up to the start of
/// the following run, the last run extends to the end of the string. Font and color indices
/// refer to the tables of the instance that produced the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Byte offset of the first character with this style.
    pub start: usize,
    /// Index into the font (and font metrics) table.
    pub font_index: u16,
    /// Index into the color table, `None` for the renderer's default color.
    pub color_index: Option<u16>,
}

/// Returns the index of the run containing the byte at `index`.
///
/// Indices at or beyond the end of the last run map to the last run.
pub(crate) fn style_index_at(styles: &[TextStyle], index: usize) -> usize {
    debug_assert!(!styles.is_empty(), "style runs must not be empty");
    styles
        .partition_point(|style| style.start <= index)
        .saturating_sub(1)
}
