//! Unit tests for aggregate outcome types.

use std::path::PathBuf;

use quarry_symbols::{ParsedFile, SymbolDocument};

use super::*;

#[test]
fn failed_file_accessors() {
    let failed = FailedFile::new(PathBuf::from("subdir/test.txt"), "no grammar");
    assert_eq!(failed.path(), Path::new("subdir/test.txt"));
    assert_eq!(failed.message(), "no grammar");
}

#[test]
fn output_preserves_both_sequences_in_order() {
    let first = SymbolDocument::new(vec![ParsedFile::new("a.py", "Python", vec![])]);
    let second = SymbolDocument::new(vec![ParsedFile::new("b.py", "Python", vec![])]);
    let output = DirectoryOutput::new(
        vec![first.clone(), second],
        vec![FailedFile::new("c.txt", "no grammar")],
    );

    assert_eq!(output.documents().len(), 2);
    assert_eq!(output.documents().first(), Some(&first));
    assert_eq!(output.failures().len(), 1);
    assert!(!output.is_clean());
}

#[test]
fn default_output_is_clean() {
    let output = DirectoryOutput::default();
    assert!(output.documents().is_empty());
    assert!(output.failures().is_empty());
    assert!(output.is_clean());
}

#[test]
fn output_round_trips_through_json() {
    let output = DirectoryOutput::new(
        vec![SymbolDocument::new(vec![ParsedFile::new(
            "a.py",
            "Python",
            vec![],
        )])],
        vec![FailedFile::new("c.txt", "no grammar")],
    );
    let json = serde_json::to_string(&output).expect("serialise");
    let back: DirectoryOutput = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, output);
}
