// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text frame layout.
//!
//! This crate lays out pre-shaped, styled text inside a rectangular frame: it breaks
//! paragraphs into lines, hyphenates words, truncates text that does not fit with a
//! truncation token, justifies lines and shrinks the text until it fits.
//!
//! Shaping itself is delegated to a [`Typesetter`], which measures ranges of the text and
//! suggests line and grapheme cluster breaks. [`FixedAdvanceTypesetter`] is a simple backend
//! with fixed advances that is useful for testing and for monospaced text.
//!
//! ## Example
//!
//! ```rust
//! use text_frame::{
//!     DefaultTextAlignment, FixedAdvanceTypesetter, FontMetrics, FontRef, ShapedText, Size,
//!     TextFrameLayouter, TextFrameOptions,
//! };
//!
//! let mut builder = ShapedText::builder("Hello world, this text is laid out in a frame.");
//! let metrics = FontMetrics {
//!     ascent: 16.,
//!     descent: 4.,
//!     ..Default::default()
//! };
//! builder.add_font(FontRef::new(0, 20.), metrics);
//! let shaped = builder.build().unwrap();
//!
//! let typesetter = FixedAdvanceTypesetter::new(&shaped);
//! let options = TextFrameOptions {
//!     minimum_text_scale_factor: 0.5,
//!     ..Default::default()
//! };
//! let mut layouter = TextFrameLayouter::new(
//!     &shaped,
//!     &typesetter,
//!     0..shaped.text().len(),
//!     DefaultTextAlignment::Start,
//!     None,
//! );
//! layouter.layout_and_scale(Size::new(200., 60.), &options);
//!
//! for line in layouter.lines() {
//!     let range = line.range_in_original_string();
//!     println!("{:?} at {}", &shaped.text()[range], line.baseline());
//! }
//! ```
//!
//! ## Features
//!
//! - `hyphenation` (enabled by default): Pattern-based hyphenation through [`HypherHyphenation`].
//!   Without it, only soft hyphens are honored.

mod error;
mod hyphenation;
mod layout;
mod options;
mod shaped;
mod style;
mod token_styles;
mod typesetter;
mod util;

#[cfg(test)]
mod tests;

pub use error::ShapedTextError;
#[cfg(feature = "hyphenation")]
pub use hyphenation::HypherHyphenation;
pub use hyphenation::{
    HyphenationLocale, HyphenationLocation, HyphenationSource, SoftHyphenSource,
    DEFAULT_HYPHENATION_LANGUAGE,
};
pub use layout::{
    Indentations, Justification, LineHeightInfo, LineInitStep, LinePiece, LinePieceKind,
    Ownership, SavedLayout, ScaleFactorEstimate, ScaleInfo, Size, TextFrameLayouter,
    TextFrameLine, TextFrameParagraph,
};
pub use options::{
    BaselineAdjustment, CancellationFlag, DefaultTextAlignment, FirstLineOffsetType,
    TextAlignment, TextFrameOptions, TextLayoutMode, TruncationRangeAdjuster, TruncationToken,
    TruncationType, WritingDirection,
};
pub use shaped::{
    LineHeightParams, ParagraphStyle, ShapedParagraph, ShapedText, ShapedTextBuilder,
    TruncationScope,
};
pub use style::{Color, FontMetrics, FontRef, TextStyle};
pub use typesetter::{FixedAdvanceLine, FixedAdvanceTypesetter, Shaped, Typesetter};
