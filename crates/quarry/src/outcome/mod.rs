//! Aggregate outcome types for directory parsing.
//!
//! In aggregate mode every per-file failure is converted to a [`FailedFile`]
//! and returned alongside the successful documents instead of aborting the
//! walk. Both sequences preserve processing order; their relative
//! interleaving in the original file order is not represented.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use quarry_symbols::SymbolDocument;

/// One file that failed to parse, with the failure rendered as a
/// human-readable message.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use quarry::outcome::FailedFile;
///
/// let failed = FailedFile::new(PathBuf::from("notes.txt"), "no grammar");
/// assert_eq!(failed.message(), "no grammar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    path: PathBuf,
    message: String,
}

impl FailedFile {
    /// Creates a failure record for one file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the failure message.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Terminal result of an aggregate directory parse: one document per file
/// that parsed, one failure record per file that did not.
///
/// Both sequences are append-only during the walk and frozen on return. An
/// empty directory yields an output with both sequences empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryOutput {
    documents: Vec<SymbolDocument>,
    failures: Vec<FailedFile>,
}

impl DirectoryOutput {
    /// Creates an output from its two ordered sequences.
    #[must_use]
    pub const fn new(documents: Vec<SymbolDocument>, failures: Vec<FailedFile>) -> Self {
        Self {
            documents,
            failures,
        }
    }

    /// Returns the successfully decoded documents, in processing order.
    #[must_use]
    pub fn documents(&self) -> &[SymbolDocument] {
        &self.documents
    }

    /// Returns the per-file failures, in processing order.
    #[must_use]
    pub fn failures(&self) -> &[FailedFile] {
        &self.failures
    }

    /// Returns `true` when no file failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests;
