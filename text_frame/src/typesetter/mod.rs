// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping oracle the layouter breaks and measures lines with.

mod fixed;

use core::fmt::Debug;
use core::ops::Range;

use crate::style::{FontMetrics, FontRef};

pub use fixed::{FixedAdvanceLine, FixedAdvanceTypesetter};

/// A shaped line or token, as produced by a [`Typesetter`].
#[derive(Clone, Debug, PartialEq)]
pub struct Shaped<L> {
    /// The backend's line object, handed to the renderer.
    pub line: L,
    /// Typographic width, including trailing whitespace and the hyphen, if any.
    pub width: f64,
    /// Width of the trailing whitespace run.
    pub trailing_whitespace_width: f64,
    /// Width of the inserted hyphen, 0 if there is none.
    pub hyphen_width: f64,
    /// Maximum metrics of the fonts used in the line.
    pub metrics: FontMetrics,
}

impl<L> Shaped<L> {
    /// Width without the trailing whitespace.
    pub fn width_without_trailing_whitespace(&self) -> f64 {
        (self.width - self.trailing_whitespace_width).max(0.)
    }
}

/// Measures and breaks the text of a [`ShapedText`](crate::ShapedText).
///
/// Ranges are byte ranges into the shaped text. Implementations must be deterministic:
/// the scale estimator relies on obtaining the same break suggestions the line builder
/// obtains for the same arguments.
pub trait Typesetter {
    /// The backend's shaped line object.
    type Line: Clone + Debug;

    /// Returns the end of the longest prefix of `range` that ends at a line break
    /// opportunity and whose width without trailing whitespace is at most `width`.
    ///
    /// Returns `range.start` if no such prefix exists. `range.end` counts as a break
    /// opportunity.
    fn suggest_line_break(&self, range: Range<usize>, width: f64) -> usize;

    /// Like [`suggest_line_break`](Self::suggest_line_break), but considers every grapheme
    /// cluster boundary a break opportunity.
    fn suggest_cluster_break(&self, range: Range<usize>, width: f64) -> usize;

    /// Returns the start of the longest suffix of `range` that starts at a grapheme cluster
    /// boundary and whose width without trailing whitespace is at most `width`.
    ///
    /// Returns `range.end` if no non-empty suffix fits.
    fn suggest_cluster_break_from_end(&self, range: Range<usize>, width: f64) -> usize;

    /// Returns the end of the grapheme cluster starting at `index`, or the text length if
    /// `index` is at the end of the text.
    fn next_cluster_break(&self, index: usize) -> usize;

    /// Shapes `range` as one line, optionally followed by a hyphen.
    fn shape_line(&self, range: Range<usize>, hyphen: Option<char>) -> Shaped<Self::Line>;

    /// Shapes text that does not occur in the shaped text, e.g. a truncation token.
    fn shape_token(&self, text: &str, font: &FontRef, metrics: &FontMetrics) -> Shaped<Self::Line>;
}
