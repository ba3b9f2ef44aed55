//! Session records
//!
//! A [`SessionRecord`] describes one recorded conference talk. Records are
//! only ever produced by decoding the session lookup JSON; they are never
//! mutated after that.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::fold::{fold, hyphenate, FoldOptions};

/// A single conference session.
///
/// The JSON shape uses camelCase keys:
///
/// ```json
/// {
///   "id": "wwdc2023-10187",
///   "year": 2023,
///   "code": "10187",
///   "title": "Meet SwiftData",
///   "description": "...",
///   "permalink": "https://developer.apple.com/videos/play/wwdc2023/10187",
///   "lengthInMinutes": 14,
///   "relatedSessionIDs": ["wwdc2023-10154"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique key, e.g. `wwdc2023-10187`
    pub id: String,

    /// Four-digit event year
    pub year: u16,

    /// Session code assigned by the organizer
    pub code: String,

    /// Human-readable title
    pub title: String,

    /// Free-text abstract
    pub description: String,

    /// Canonical session page
    #[serde(default)]
    pub permalink: Option<Url>,

    /// Duration in minutes
    #[serde(default)]
    pub length_in_minutes: Option<u32>,

    /// Related session ids in authored order
    #[serde(
        rename = "relatedSessionIDs",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub related_session_ids: Vec<String>,
}

impl SessionRecord {
    /// Display file name for this session's note, e.g.
    /// `WWDC23-10187-Meet-SwiftData`.
    ///
    /// Recomputed on every call.
    pub fn file_name(&self) -> String {
        derive_file_name(self.year, &self.code, &self.title)
    }

    /// Last two digits of the year, zero padded.
    pub fn year_suffix(&self) -> String {
        year_suffix(self.year)
    }

    /// Whether the record lists any related sessions.
    pub fn has_related(&self) -> bool {
        !self.related_session_ids.is_empty()
    }
}

/// Derive a note file name from its parts.
///
/// The title is folded (diacritics and width, case kept), split on
/// whitespace runs and rejoined with `-`. An empty title leaves an empty
/// final segment.
///
/// # Example
///
/// ```
/// use wwdc_sessions::derive_file_name;
///
/// assert_eq!(
///     derive_file_name(2023, "10187", "Meet SwiftData"),
///     "WWDC23-10187-Meet-SwiftData"
/// );
/// assert_eq!(derive_file_name(2023, "10001", "Café   Demo"), "WWDC23-10001-Cafe-Demo");
/// ```
pub fn derive_file_name(year: u16, code: &str, title: &str) -> String {
    let title = hyphenate(&fold(title, FoldOptions::FILE_NAME));
    format!("WWDC{}-{}-{}", year_suffix(year), code, title)
}

fn year_suffix(year: u16) -> String {
    format!("{:02}", year % 100)
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
