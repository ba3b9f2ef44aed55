//! # WWDC Sessions
//!
//! Session metadata for a collection of WWDC conference notes.
//!
//! Each note in the collection summarizes one talk. This crate holds the
//! structured side of that collection: the session lookup (id, year, code,
//! title, abstract, links and related talks) and the rules that turn a
//! session into the file name its note is stored under.
//!
//! ## Modules
//!
//! - **session**: the immutable [`SessionRecord`] and file name derivation
//! - **registry**: decoding the session lookup JSON into a [`SessionRegistry`]
//! - **fold**: Unicode case, diacritic and width folding
//! - **notes**: matching note documents on disk to sessions
//!
//! ## Example
//!
//! ```
//! use wwdc_sessions::SessionRegistry;
//!
//! let registry = SessionRegistry::bundled().unwrap();
//! let session = registry.get("wwdc2023-10187").unwrap();
//! assert_eq!(session.file_name(), "WWDC23-10187-Meet-SwiftData");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fold;
pub mod notes;
pub mod options;
pub mod registry;
pub mod session;

// Re-export main types
pub use error::{Result, SessionError};
pub use fold::{fold, hyphenate, FoldOptions};
pub use notes::{expected_path, is_storable, NoteCoverage, NoteIndex};
pub use options::{KeyCheck, LoadOptions};
pub use registry::{load_all_sessions, SessionRegistry, BUNDLED_SESSIONS};
pub use session::{derive_file_name, SessionRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
