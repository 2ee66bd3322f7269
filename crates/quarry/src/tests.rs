//! Crate-level integration tests and shared test doubles.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::error::QuarryError;
use crate::invoke::{ToolInvoker, ToolOutput};
use crate::runner::Quarry;

/// Invoker that returns the same captured output for every file.
pub(crate) struct FixedInvoker {
    output: ToolOutput,
}

impl FixedInvoker {
    pub(crate) fn new(code: Option<i32>, stdout: &str, stderr: &str) -> Self {
        Self {
            output: ToolOutput::new(code, stdout, stderr),
        }
    }
}

impl ToolInvoker for FixedInvoker {
    fn invoke(&self, _binary: &Path, _file: &Path) -> Result<ToolOutput, QuarryError> {
        Ok(self.output.clone())
    }
}

/// Invoker that mimics the external tool's grammar table: Python and Java
/// files parse to an empty-symbol document, everything else fails with the
/// unsupported-language marker.
pub(crate) struct GrammarInvoker;

impl ToolInvoker for GrammarInvoker {
    fn invoke(&self, _binary: &Path, file: &Path) -> Result<ToolOutput, QuarryError> {
        let path = file.to_string_lossy().into_owned();
        let language = if path.ends_with(".py") {
            Some("Python")
        } else if path.ends_with(".java") {
            Some("Java")
        } else {
            None
        };

        language.map_or_else(
            || {
                Ok(ToolOutput::new(
                    Some(1),
                    format!("NoLanguageForBlob({path})"),
                    "",
                ))
            },
            |name| Ok(ToolOutput::new(Some(0), symbols_json(&path, name), "")),
        )
    }
}

/// Builds a minimal well-formed symbol document for one file.
pub(crate) fn symbols_json(path: &str, language: &str) -> String {
    format!(r#"{{"files": [{{"path": "{path}", "language": "{language}", "symbols": []}}]}}"#)
}

/// Builds the directory tree the aggregation tests walk: one Python file,
/// one Java file, one unsupported text file.
fn mixed_tree() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("foo.py"), "def foo(): pass\n").expect("write foo.py");
    fs::create_dir(dir.path().join("subdir")).expect("create subdir");
    fs::write(dir.path().join("subdir/Foo.java"), "class Foo {}\n").expect("write Foo.java");
    fs::write(dir.path().join("subdir/test.txt"), "plain text\n").expect("write test.txt");
    dir
}

#[test]
fn aggregate_directory_parse_collects_successes_and_failures() {
    let dir = mixed_tree();
    let quarry = Quarry::with_invoker("semantic-stub", GrammarInvoker);

    let output = quarry
        .parse_directory(dir.path(), None, false)
        .expect("aggregate mode never raises past the top-level call");

    assert_eq!(output.documents().len(), 2);
    assert_eq!(output.failures().len(), 1);
    assert!(!output.is_clean());

    let failed = output.failures().first().expect("one failure");
    assert!(failed.path().ends_with("subdir/test.txt"));
    assert!(
        failed.message().contains("NoLanguageForBlob"),
        "expected the tool's marker in the message: {}",
        failed.message()
    );
}

#[test]
fn extension_filter_restricts_the_walk() {
    let dir = mixed_tree();
    let quarry = Quarry::with_invoker("semantic-stub", GrammarInvoker);

    let output = quarry
        .parse_directory(dir.path(), Some(".java"), false)
        .expect("parse java only");

    assert_eq!(output.documents().len(), 1);
    assert!(output.failures().is_empty());
    let document = output.documents().first().expect("one document");
    let file = document.files().first().expect("one file");
    assert_eq!(file.language(), "Java");
}

#[test]
fn fail_fast_directory_parse_propagates_the_failure() {
    let dir = mixed_tree();
    let quarry = Quarry::with_invoker("semantic-stub", GrammarInvoker);

    let error = quarry
        .parse_directory(dir.path(), None, true)
        .expect_err("the text file should abort the walk");
    assert!(matches!(error, QuarryError::UnsupportedLanguage { .. }));
}

#[test]
fn empty_directory_yields_empty_output() {
    let dir = TempDir::new().expect("create temp dir");
    let quarry = Quarry::with_invoker("semantic-stub", GrammarInvoker);

    let output = quarry
        .parse_directory(dir.path(), None, false)
        .expect("empty walk");
    assert!(output.documents().is_empty());
    assert!(output.failures().is_empty());
    assert!(output.is_clean());
}
