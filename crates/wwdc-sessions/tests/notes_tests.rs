//! Note index tests

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wwdc_sessions::*;

fn notes_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        fs::write(dir.path().join(file), "# Notes\n").unwrap();
    }
    dir
}

// ═══════════════════════════════════════════════════════════════════════
// Scanning
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_only_picks_markdown_files() {
    let dir = notes_dir(&[
        "WWDC23-10187-Meet-SwiftData.md",
        "cover.png",
        "README.txt",
    ]);
    fs::create_dir(dir.path().join("Resources.md")).unwrap();

    let index = NoteIndex::scan(dir.path()).unwrap();
    assert_eq!(index.len(), 1);
    assert!(!index.is_empty());
}

#[test]
fn test_scan_missing_dir_is_resource_not_found() {
    let dir = TempDir::new().unwrap();
    let err = NoteIndex::scan(dir.path().join("nope")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_note_for() {
    let dir = notes_dir(&["WWDC23-10187-Meet-SwiftData.md"]);
    let index = NoteIndex::scan(dir.path()).unwrap();
    let registry = SessionRegistry::bundled().unwrap();

    let meet = registry.get("wwdc2023-10187").unwrap();
    assert_eq!(index.note_for(meet), Some(expected_path(dir.path(), meet).as_path()));

    let build = registry.get("wwdc2023-10154").unwrap();
    assert_eq!(index.note_for(build), None);
}

// ═══════════════════════════════════════════════════════════════════════
// Coverage
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_coverage_partitions_registry() {
    let dir = notes_dir(&[
        "WWDC23-10187-Meet-SwiftData.md",
        "WWDC22-10054-The-SwiftUI-cookbook-for-navigation.md",
        "WWDC19-204-Introducing-SwiftUI.md",
        "Index.md",
    ]);
    let index = NoteIndex::scan(dir.path()).unwrap();
    let registry = SessionRegistry::bundled().unwrap();

    let coverage = index.coverage(&registry);

    assert_eq!(
        coverage.documented,
        vec!["wwdc2023-10187".to_string(), "wwdc2022-10054".to_string()]
    );
    assert_eq!(coverage.documented.len() + coverage.missing.len(), registry.len());
    assert!(!coverage.missing.contains(&"wwdc2023-10187".to_string()));
    assert_eq!(
        coverage.orphans,
        vec![
            "Index".to_string(),
            "WWDC19-204-Introducing-SwiftUI".to_string()
        ]
    );
    assert_eq!(coverage.ratio(), 2.0 / registry.len() as f64);
}

#[test]
fn test_empty_dir_has_everything_missing() {
    let dir = notes_dir(&[]);
    let index = NoteIndex::scan(dir.path()).unwrap();
    let registry = SessionRegistry::bundled().unwrap();

    let coverage = index.coverage(&registry);
    assert!(coverage.documented.is_empty());
    assert_eq!(coverage.missing, registry.ids().map(String::from).collect::<Vec<_>>());
    assert!(coverage.orphans.is_empty());
    assert_eq!(coverage.ratio(), 0.0);
}

#[test]
fn test_path_separator_in_title_is_unstorable() {
    let json = r#"{
        "wwdc2023-1": {
            "id": "wwdc2023-1",
            "year": 2023,
            "code": "1",
            "title": "Swift/UIKit Interop",
            "description": "Mixing frameworks"
        },
        "wwdc2023-2": {
            "id": "wwdc2023-2",
            "year": 2023,
            "code": "2",
            "title": "Plain Title",
            "description": "Nothing special"
        }
    }"#;
    let registry = SessionRegistry::from_slice(json.as_bytes(), &LoadOptions::default()).unwrap();
    let interop = registry.get("wwdc2023-1").unwrap();

    assert_eq!(interop.file_name(), "WWDC23-1-Swift/UIKit-Interop");
    assert!(!is_storable(interop));
    assert!(is_storable(registry.get("wwdc2023-2").unwrap()));

    let dir = notes_dir(&["WWDC23-2-Plain-Title.md"]);
    let index = NoteIndex::scan(dir.path()).unwrap();
    assert_eq!(index.note_for(interop), None);

    let coverage = index.coverage(&registry);
    assert_eq!(coverage.documented, vec!["wwdc2023-2".to_string()]);
    assert!(coverage.missing.is_empty());
    assert_eq!(coverage.unstorable, vec!["wwdc2023-1".to_string()]);
    assert_eq!(coverage.ratio(), 0.5);
}
