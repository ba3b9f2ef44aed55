//! Unicode folding for session titles
//!
//! Folding removes distinctions that should not matter when a title is
//! turned into a file name or compared against a search query:
//!
//! - **width**: characters in the Halfwidth and Fullwidth Forms block
//!   (`Ｓｗｉｆｔ`, `ｶ`) and the ideographic space map to their ordinary
//!   equivalents. Other compatibility characters (`™`, `½`, `ﬁ`) are kept
//! - **diacritics**: combining marks are dropped after decomposition
//!   (`Café` becomes `Cafe`)
//! - **case**: full Unicode lowercase mapping
//!
//! The result is always recomposed to NFC.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which distinctions [`fold`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoldOptions {
    /// Lowercase the text
    pub case: bool,

    /// Strip combining marks
    pub diacritics: bool,

    /// Map halfwidth/fullwidth variants to their ordinary forms
    pub width: bool,
}

impl FoldOptions {
    /// Folding applied to titles in note file names. Case is kept.
    pub const FILE_NAME: FoldOptions = FoldOptions {
        case: false,
        diacritics: true,
        width: true,
    };

    /// Folding applied to both sides of a title search.
    pub const SEARCH: FoldOptions = FoldOptions {
        case: true,
        diacritics: true,
        width: true,
    };

    /// No folding at all (NFC only).
    pub fn none() -> Self {
        Self::default()
    }
}

/// Fold `text` according to `options`.
///
/// # Example
///
/// ```
/// use wwdc_sessions::fold::{fold, FoldOptions};
///
/// assert_eq!(fold("Café", FoldOptions::FILE_NAME), "Cafe");
/// assert_eq!(fold("Ｍｅｅｔ Café", FoldOptions::SEARCH), "meet cafe");
/// ```
pub fn fold(text: &str, options: FoldOptions) -> String {
    let mut decomposed = String::with_capacity(text.len());
    for c in text.chars() {
        if options.width && is_width_variant(c) {
            decomposed.extend(std::iter::once(c).nfkd());
        } else {
            decomposed.extend(std::iter::once(c).nfd());
        }
    }

    let composed: String = if options.diacritics {
        decomposed
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .nfc()
            .collect()
    } else {
        decomposed.nfc().collect()
    };

    if options.case {
        composed.to_lowercase()
    } else {
        composed
    }
}

/// Halfwidth and Fullwidth Forms (U+FF00..U+FFEF) plus the ideographic space.
fn is_width_variant(c: char) -> bool {
    matches!(c, '\u{3000}' | '\u{FF00}'..='\u{FFEF}')
}

/// Split on whitespace runs (newlines included) and join the pieces with `-`.
///
/// Leading and trailing whitespace produce no empty pieces, so an empty or
/// all-blank input yields an empty string.
pub fn hyphenate(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("-")
}
