//! Session registry loading and lookup
//!
//! The registry is decoded from a JSON object mapping session ids to
//! [`SessionRecord`]s. The source is always supplied by the caller: a file
//! path, any [`Read`] implementation, a byte slice, or the copy of
//! `data/sessions.json` compiled into this crate.
//!
//! Decoding is all-or-nothing. Entries keep the order in which they appear
//! in the document.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{Result, SessionError};
use crate::fold::{fold, FoldOptions};
use crate::options::{KeyCheck, LoadOptions};
use crate::session::SessionRecord;

/// Session lookup JSON shipped with the crate.
pub const BUNDLED_SESSIONS: &[u8] = include_bytes!("../data/sessions.json");

/// Load every session from the JSON file at `path`.
///
/// Returns the mapping from session id to record, in document order. Uses
/// [`LoadOptions::default`], so key/id mismatches are kept and logged.
pub fn load_all_sessions(path: impl AsRef<Path>) -> Result<IndexMap<String, SessionRecord>> {
    SessionRegistry::load(path).map(SessionRegistry::into_inner)
}

/// The full set of sessions keyed by id.
///
/// Immutable once constructed.
///
/// # Example
///
/// ```
/// use wwdc_sessions::{LoadOptions, SessionRegistry};
///
/// let json = br#"{
///     "wwdc2023-10187": {
///         "id": "wwdc2023-10187",
///         "year": 2023,
///         "code": "10187",
///         "title": "Meet SwiftData",
///         "description": "Intro to SwiftData"
///     }
/// }"#;
///
/// let registry = SessionRegistry::from_slice(json, &LoadOptions::default()).unwrap();
/// let session = registry.get("wwdc2023-10187").unwrap();
/// assert_eq!(session.file_name(), "WWDC23-10187-Meet-SwiftData");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRegistry {
    sessions: IndexMap<String, SessionRecord>,
}

impl SessionRegistry {
    // ═══════════════════════════════════════════════════════════════════
    // Loading
    // ═══════════════════════════════════════════════════════════════════

    /// Load a registry from a JSON file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load a registry from a JSON file.
    ///
    /// Fails with [`SessionError::ResourceNotFound`] if the file cannot be
    /// opened, [`SessionError::Io`] if reading fails part way, and
    /// [`SessionError::Decode`] if the contents are not a session mapping.
    pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SessionError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let bytes = read_all(file, path)?;
        let registry = Self::from_slice(&bytes, options)?;

        debug!(
            path = %path.display(),
            sessions = registry.len(),
            "loaded session registry"
        );
        Ok(registry)
    }

    /// Decode a registry from any byte stream.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let bytes = read_all(reader, Path::new(""))?;
        Self::from_slice(&bytes, options)
    }

    /// Decode a registry from raw JSON bytes.
    pub fn from_slice(bytes: &[u8], options: &LoadOptions) -> Result<Self> {
        let sessions: IndexMap<String, SessionRecord> = serde_json::from_slice(bytes)?;
        check_keys(&sessions, options.key_check)?;
        Ok(Self { sessions })
    }

    /// Decode the session lookup compiled into this crate.
    ///
    /// The bundled data is held to the strict key check.
    pub fn bundled() -> Result<Self> {
        Self::from_slice(BUNDLED_SESSIONS, &LoadOptions::verified())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a session by id.
    pub fn get(&self, id: &str) -> Option<&SessionRecord> {
        self.sessions.get(id)
    }

    /// Check whether a session id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check whether the registry has no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterate over `(id, record)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SessionRecord)> {
        self.sessions.iter().map(|(id, session)| (id.as_str(), session))
    }

    /// Iterate over session ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    /// Sessions from a given year, in document order.
    pub fn by_year(&self, year: u16) -> Vec<&SessionRecord> {
        self.sessions
            .values()
            .filter(|session| session.year == year)
            .collect()
    }

    /// Resolve the related sessions of `id`, in authored order.
    ///
    /// Returns `None` if `id` is not in the registry. Related ids that do
    /// not resolve are skipped.
    pub fn related(&self, id: &str) -> Option<Vec<&SessionRecord>> {
        let session = self.get(id)?;
        let related = session
            .related_session_ids
            .iter()
            .filter_map(|related_id| {
                let found = self.get(related_id);
                if found.is_none() {
                    debug!(session = id, related = %related_id, "skipping unknown related session");
                }
                found
            })
            .collect();
        Some(related)
    }

    /// Sessions whose title contains `query`, ignoring case, diacritics and
    /// width. Results are in document order.
    pub fn search(&self, query: &str) -> Vec<&SessionRecord> {
        let needle = fold(query.trim(), FoldOptions::SEARCH);
        self.sessions
            .values()
            .filter(|session| fold(&session.title, FoldOptions::SEARCH).contains(&needle))
            .collect()
    }

    /// Take ownership of the underlying mapping.
    pub fn into_inner(self) -> IndexMap<String, SessionRecord> {
        self.sessions
    }
}

impl From<IndexMap<String, SessionRecord>> for SessionRegistry {
    fn from(sessions: IndexMap<String, SessionRecord>) -> Self {
        Self { sessions }
    }
}

fn read_all<R: Read>(mut reader: R, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

fn check_keys(sessions: &IndexMap<String, SessionRecord>, key_check: KeyCheck) -> Result<()> {
    for (key, session) in sessions {
        if key == &session.id {
            continue;
        }
        match key_check {
            KeyCheck::Verify => {
                return Err(SessionError::KeyMismatch {
                    key: key.clone(),
                    id: session.id.clone(),
                });
            }
            KeyCheck::Trust => {
                warn!(key = %key, id = %session.id, "session key does not match record id");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_registry_is_send_sync() {
        assert_send_sync::<SessionRegistry>();
        assert_send_sync::<SessionRecord>();
    }

    #[test]
    fn test_bundled_registry_decodes() {
        let registry = SessionRegistry::bundled().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("wwdc2023-10187"));
    }

    #[test]
    fn test_bundled_related_ids_resolve() {
        let registry = SessionRegistry::bundled().unwrap();
        for (id, session) in registry.iter() {
            for related in &session.related_session_ids {
                assert!(registry.contains(related), "{id} lists unknown {related}");
            }
        }
    }

    #[test]
    fn test_empty_object_is_empty_registry() {
        let registry = SessionRegistry::from_slice(b"{}", &LoadOptions::default()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry, SessionRegistry::default());
    }

    #[test]
    fn test_top_level_array_is_decode_error() {
        let err = SessionRegistry::from_slice(b"[]", &LoadOptions::default()).unwrap_err();
        assert!(err.is_decode());
    }
}
