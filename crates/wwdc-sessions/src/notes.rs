//! Locating note documents for sessions
//!
//! Each note is a Markdown/DocC article named after its session's
//! [`file_name`](SessionRecord::file_name), e.g.
//! `WWDC23-10187-Meet-SwiftData.md`. The index only looks at file names;
//! note contents are never read.
//!
//! A title containing a path separator (`Swift/UIKit Interop`) yields a file
//! name that cannot live flat in the note directory. Such sessions are never
//! matched and are reported separately as unstorable.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::registry::SessionRegistry;
use crate::session::SessionRecord;

/// File extension of note documents.
pub const NOTE_EXTENSION: &str = "md";

/// Path a session's note is expected at inside `dir`.
///
/// For file names containing a path separator this points below `dir`; see
/// [`is_storable`].
pub fn expected_path(dir: impl AsRef<Path>, session: &SessionRecord) -> PathBuf {
    dir.as_ref()
        .join(format!("{}.{}", session.file_name(), NOTE_EXTENSION))
}

/// Whether `session`'s file name can be stored directly inside a note
/// directory, i.e. contains no path separator.
pub fn is_storable(session: &SessionRecord) -> bool {
    !session.file_name().chars().any(std::path::is_separator)
}

/// Note documents found in a directory, keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    notes: BTreeMap<String, PathBuf>,
}

/// How a registry's sessions map onto the notes in a [`NoteIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteCoverage {
    /// Session ids that have a note, in registry order
    pub documented: Vec<String>,

    /// Session ids without a note, in registry order
    pub missing: Vec<String>,

    /// Session ids whose file name contains a path separator, in registry order
    pub unstorable: Vec<String>,

    /// Note stems that match no session, sorted
    pub orphans: Vec<String>,
}

impl NoteIndex {
    /// Scan `dir` (non-recursively) for note documents.
    ///
    /// Fails with [`SessionError::ResourceNotFound`] if the directory cannot
    /// be opened.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SessionError::ResourceNotFound {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut notes = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| SessionError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(NOTE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                notes.insert(stem.to_string(), path.clone());
            }
        }

        debug!(dir = %dir.display(), notes = notes.len(), "scanned note directory");
        Ok(Self { notes })
    }

    /// Number of notes found.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check whether no notes were found.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Path of the note for `session`, if one exists.
    ///
    /// Always `None` for sessions that are not [storable](is_storable).
    pub fn note_for(&self, session: &SessionRecord) -> Option<&Path> {
        self.notes.get(&session.file_name()).map(PathBuf::as_path)
    }

    /// Partition `registry` into documented, missing and unstorable sessions
    /// and list notes that belong to no session.
    pub fn coverage(&self, registry: &SessionRegistry) -> NoteCoverage {
        let mut coverage = NoteCoverage::default();
        let mut claimed = BTreeSet::new();

        for (id, session) in registry.iter() {
            if !is_storable(session) {
                debug!(session = id, "file name contains a path separator");
                coverage.unstorable.push(id.to_string());
                continue;
            }
            let file_name = session.file_name();
            if self.notes.contains_key(&file_name) {
                coverage.documented.push(id.to_string());
                claimed.insert(file_name);
            } else {
                coverage.missing.push(id.to_string());
            }
        }

        coverage.orphans = self
            .notes
            .keys()
            .filter(|stem| !claimed.contains(stem.as_str()))
            .cloned()
            .collect();
        coverage
    }
}

impl NoteCoverage {
    /// Fraction of sessions with a note, in `0.0..=1.0`.
    ///
    /// Unstorable sessions count as undocumented. An empty registry counts
    /// as fully covered.
    pub fn ratio(&self) -> f64 {
        let total = self.documented.len() + self.missing.len() + self.unstorable.len();
        if total == 0 {
            1.0
        } else {
            self.documented.len() as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_path() {
        let registry = SessionRegistry::bundled().unwrap();
        let session = registry.get("wwdc2023-10187").unwrap();
        assert_eq!(
            expected_path("notes", session),
            PathBuf::from("notes/WWDC23-10187-Meet-SwiftData.md")
        );
    }

    #[test]
    fn test_empty_coverage_ratio() {
        assert_eq!(NoteCoverage::default().ratio(), 1.0);
    }
}
