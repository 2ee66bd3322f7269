//! Candidate-file discovery for directory parsing.
//!
//! Discovery is materialized up front: the whole tree is enumerated, the
//! extension filter applied, and the surviving paths sorted before any
//! subprocess runs. This keeps the processing order stable and deterministic
//! for a fixed filesystem snapshot, which directory-level tests rely on.
//!
//! Traversal policy: symbolic links are not followed, hidden files are
//! included, and only regular files are candidates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::QuarryError;

/// Recursively enumerates the regular files under `root`, in lexicographic
/// path order.
///
/// `extension` is a literal suffix (for example `.py`) matched against the
/// full path's trailing characters; `None` matches every regular file.
///
/// # Errors
///
/// Returns [`QuarryError::Io`] when `root` is not an existing directory or
/// when enumeration itself fails partway through the walk.
pub fn discover_files(root: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>, QuarryError> {
    if !root.is_dir() {
        return Err(QuarryError::Io {
            path: root.to_path_buf(),
            source: Arc::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not an existing directory",
            )),
        });
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(root).follow_links(false) {
        let entry = entry_result.map_err(|error| walk_failure(root, error))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(suffix) = extension {
            if !entry.path().to_string_lossy().ends_with(suffix) {
                continue;
            }
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

/// Converts a walk error into the orchestrator's I/O error, keeping the
/// offending path when the walker reports one.
fn walk_failure(root: &Path, error: walkdir::Error) -> QuarryError {
    let path = error
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    let source = error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
    QuarryError::Io {
        path,
        source: Arc::new(source),
    }
}
