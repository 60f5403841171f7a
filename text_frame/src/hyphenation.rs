// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sources of hyphenation opportunities.

use core::ops::Range;

use icu_locale_core::{langid, LanguageIdentifier};

/// Language assumed for paragraphs that do not specify one.
pub static DEFAULT_HYPHENATION_LANGUAGE: LanguageIdentifier = langid!("en");

/// Hyphenation rules resolved for a language by a [`HyphenationSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HyphenationLocale {
    /// The language the rules were resolved for.
    pub language: LanguageIdentifier,
    /// Identifies the rules within the source that resolved them.
    pub key: u32,
}

/// A place where a word may be broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HyphenationLocation {
    /// Byte offset of the break; the line ends right before it.
    pub index: usize,
    /// Hyphen to append to the line.
    pub hyphen: char,
}

/// Finds hyphenation opportunities in words.
pub trait HyphenationSource {
    /// Resolves the rules for `language`, or `None` if the language is not supported.
    ///
    /// This may be expensive; the layouter caches the last result.
    fn locale_for(&self, language: &LanguageIdentifier) -> Option<HyphenationLocale>;

    /// Returns the last hyphenation opportunity within `word` that lies strictly before
    /// `before`, if any.
    ///
    /// `word` is a byte range of `text` without whitespace. Opportunities at the start or
    /// end of the word are never returned.
    fn hyphenation_location_before(
        &self,
        text: &str,
        word: Range<usize>,
        before: usize,
        locale: &HyphenationLocale,
    ) -> Option<HyphenationLocation>;
}

/// Only breaks words after soft hyphens (U+00AD).
#[derive(Copy, Clone, Default, Debug)]
pub struct SoftHyphenSource;

impl HyphenationSource for SoftHyphenSource {
    fn locale_for(&self, language: &LanguageIdentifier) -> Option<HyphenationLocale> {
        Some(HyphenationLocale {
            language: language.clone(),
            key: 0,
        })
    }

    fn hyphenation_location_before(
        &self,
        text: &str,
        word: Range<usize>,
        before: usize,
        _locale: &HyphenationLocale,
    ) -> Option<HyphenationLocation> {
        let end = before.min(word.end);
        if end <= word.start {
            return None;
        }
        text[word.start..end]
            .char_indices()
            .rev()
            .map(|(offset, ch)| (word.start + offset + ch.len_utf8(), ch))
            .find(|(index, ch)| *ch == '\u{ad}' && *index < end && *index < word.end)
            .map(|(index, _)| HyphenationLocation { index, hyphen: '-' })
    }
}

/// Pattern-based hyphenation for the languages supported by [`hypher`], honoring soft
/// hyphens as well.
#[cfg(feature = "hyphenation")]
#[derive(Copy, Clone, Default, Debug)]
pub struct HypherHyphenation;

#[cfg(feature = "hyphenation")]
impl HypherHyphenation {
    fn lang(locale: &HyphenationLocale) -> Option<hypher::Lang> {
        let bytes = locale.key.to_be_bytes();
        hypher::Lang::from_iso([bytes[2], bytes[3]])
    }
}

#[cfg(feature = "hyphenation")]
impl HyphenationSource for HypherHyphenation {
    fn locale_for(&self, language: &LanguageIdentifier) -> Option<HyphenationLocale> {
        let code: [u8; 2] = language.language.as_str().as_bytes().try_into().ok()?;
        hypher::Lang::from_iso(code)?;
        Some(HyphenationLocale {
            language: language.clone(),
            key: u32::from(u16::from_be_bytes(code)),
        })
    }

    fn hyphenation_location_before(
        &self,
        text: &str,
        word: Range<usize>,
        before: usize,
        locale: &HyphenationLocale,
    ) -> Option<HyphenationLocation> {
        let soft = SoftHyphenSource.hyphenation_location_before(text, word.clone(), before, locale);
        let lang = Self::lang(locale)?;
        // Leading and trailing punctuation is not part of the pattern input.
        let full = &text[word.clone()];
        let leading = full.len() - full.trim_start_matches(|c: char| !c.is_alphabetic()).len();
        let trimmed = full[leading..].trim_end_matches(|c: char| !c.is_alphabetic());
        let start = word.start + leading;
        let end = start + trimmed.len();
        let mut offset = start;
        let mut best = None;
        for syllable in hypher::hyphenate(trimmed, lang) {
            offset += syllable.len();
            if offset >= end || offset >= before {
                break;
            }
            best = Some(offset);
        }
        let patterns = best.map(|index| HyphenationLocation { index, hyphen: '-' });
        match (soft, patterns) {
            (Some(a), Some(b)) => Some(if a.index >= b.index { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(feature = "hyphenation")]
static DEFAULT_SOURCE: HypherHyphenation = HypherHyphenation;
#[cfg(not(feature = "hyphenation"))]
static DEFAULT_SOURCE: SoftHyphenSource = SoftHyphenSource;

/// The source used when the options do not provide one.
pub(crate) fn default_source() -> &'static dyn HyphenationSource {
    &DEFAULT_SOURCE
}

/// Caches the locale of the most recently hyphenated language.
///
/// The cached locale is only valid while `cached_locale_id` matches the requested language
/// and the source is the one that resolved it.
#[derive(Clone, Debug, Default)]
pub(crate) struct LocaleCache {
    cached_locale_id: Option<LanguageIdentifier>,
    cached_locale: Option<HyphenationLocale>,
    source_addr: usize,
}

impl LocaleCache {
    pub(crate) fn locale(
        &mut self,
        source: &dyn HyphenationSource,
        language: &LanguageIdentifier,
    ) -> Option<&HyphenationLocale> {
        let source_addr = core::ptr::from_ref(source).cast::<()>().addr();
        if self.source_addr != source_addr || self.cached_locale_id.as_ref() != Some(language) {
            log::trace!("resolving hyphenation locale for {language}");
            self.cached_locale = source.locale_for(language);
            self.cached_locale_id = Some(language.clone());
            self.source_addr = source_addr;
        }
        self.cached_locale.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        lookups: Cell<usize>,
    }

    impl HyphenationSource for CountingSource {
        fn locale_for(&self, language: &LanguageIdentifier) -> Option<HyphenationLocale> {
            self.lookups.set(self.lookups.get() + 1);
            SoftHyphenSource.locale_for(language)
        }

        fn hyphenation_location_before(
            &self,
            text: &str,
            word: Range<usize>,
            before: usize,
            locale: &HyphenationLocale,
        ) -> Option<HyphenationLocation> {
            SoftHyphenSource.hyphenation_location_before(text, word, before, locale)
        }
    }

    #[test]
    fn soft_hyphens() {
        let text = "hy\u{ad}phen\u{ad}ation";
        let locale = SoftHyphenSource.locale_for(&DEFAULT_HYPHENATION_LANGUAGE).unwrap();
        let word = 0..text.len();
        let last = SoftHyphenSource
            .hyphenation_location_before(text, word.clone(), text.len(), &locale)
            .unwrap();
        assert_eq!(&text[..last.index], "hy\u{ad}phen\u{ad}");
        let first = SoftHyphenSource
            .hyphenation_location_before(text, word.clone(), last.index, &locale)
            .unwrap();
        assert_eq!(&text[..first.index], "hy\u{ad}");
        assert_eq!(
            SoftHyphenSource.hyphenation_location_before(text, word, first.index, &locale),
            None
        );
    }

    #[test]
    fn locale_cache_refreshes_on_language_change() {
        let source = CountingSource::default();
        let mut cache = LocaleCache::default();
        let de = langid!("de");
        cache.locale(&source, &DEFAULT_HYPHENATION_LANGUAGE);
        cache.locale(&source, &DEFAULT_HYPHENATION_LANGUAGE);
        assert_eq!(source.lookups.get(), 1);
        assert_eq!(cache.locale(&source, &de).unwrap().language, de);
        assert_eq!(source.lookups.get(), 2);
    }

    #[cfg(feature = "hyphenation")]
    #[test]
    fn patterns_break_words() {
        let source = HypherHyphenation;
        let locale = source.locale_for(&DEFAULT_HYPHENATION_LANGUAGE).unwrap();
        let text = "a hyphenation.";
        let word = 2..text.len();
        let mut before = text.len();
        let mut breaks = Vec::new();
        while let Some(location) = source.hyphenation_location_before(text, word.clone(), before, &locale) {
            assert!(location.index > word.start && location.index < text.len() - 1);
            breaks.push(location.index);
            before = location.index;
        }
        assert!(!breaks.is_empty());
        assert!(breaks.windows(2).all(|w| w[0] > w[1]));
        assert!(source.locale_for(&langid!("xx")).is_none());
    }
}
