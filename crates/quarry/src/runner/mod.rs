//! Parse orchestration: single-file invocation and directory aggregation.
//!
//! [`Quarry`] is the public-facing API. It owns the path to the external
//! tool binary and an invoker, classifies each invocation's outcome, and for
//! directory parsing drives the discovered candidates through one of two
//! failure policies: fail-fast (first failure aborts the walk) or aggregate
//! (failures are collected alongside successes and returned together).
//!
//! The invoker abstraction enables test doubles that return pre-configured
//! captured outputs without spawning real processes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use quarry_symbols::SymbolDocument;

use crate::error::QuarryError;
use crate::invoke::{ProcessInvoker, ToolInvoker};
use crate::outcome::{DirectoryOutput, FailedFile};
use crate::walk;

/// Tracing target for orchestration operations.
const RUNNER_TARGET: &str = "quarry::runner";

/// Literal prefix the external tool emits when it has no grammar for a
/// file's detected language.
const NO_LANGUAGE_MARKER: &str = "NoLanguageForBlob";

/// Orchestrates external-tool invocations over single files and directory
/// trees.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use quarry::Quarry;
///
/// let quarry = Quarry::new("/usr/local/bin/semantic");
/// let document = quarry.parse_file(Path::new("src/app.py"))?;
/// for file in document.files() {
///     println!("{}: {} symbols", file.path(), file.symbols().len());
/// }
/// # Ok::<(), quarry::QuarryError>(())
/// ```
#[derive(Debug)]
pub struct Quarry<I = ProcessInvoker> {
    binary: PathBuf,
    invoker: I,
}

impl Quarry<ProcessInvoker> {
    /// Creates an orchestrator that spawns the tool at `binary` with no
    /// invocation deadline.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::with_invoker(binary, ProcessInvoker::new())
    }
}

impl<I> Quarry<I> {
    /// Creates an orchestrator with a custom invoker.
    ///
    /// Use this to arm a deadline via
    /// [`ProcessInvoker::with_timeout`] or to inject a test double.
    #[must_use]
    pub fn with_invoker(binary: impl Into<PathBuf>, invoker: I) -> Self {
        Self {
            binary: binary.into(),
            invoker,
        }
    }

    /// Returns the path of the external tool binary.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl<I: ToolInvoker> Quarry<I> {
    /// Parses one file by invoking the external tool and decoding its
    /// output.
    ///
    /// The file's existence is not pre-checked; a nonexistent path surfaces
    /// through the tool's own failure reporting.
    ///
    /// # Errors
    ///
    /// - [`QuarryError::UnsupportedLanguage`] when the tool exits non-zero
    ///   with output beginning with the `NoLanguageForBlob` marker.
    /// - [`QuarryError::ToolFailed`] for any other non-zero exit, launch
    ///   failure, or stream failure.
    /// - [`QuarryError::MalformedOutput`] when the tool exits zero but its
    ///   output does not decode.
    /// - [`QuarryError::Interrupted`] / [`QuarryError::Timeout`] from the
    ///   invoker, surfaced unchanged.
    pub fn parse_file(&self, file: &Path) -> Result<SymbolDocument, QuarryError> {
        let output = self.invoker.invoke(&self.binary, file)?;

        if output.success() {
            let document = SymbolDocument::from_json(output.stdout())?;
            debug!(
                target: RUNNER_TARGET,
                file = %file.display(),
                files = document.files().len(),
                "parsed file"
            );
            return Ok(document);
        }

        // The marker is checked on both streams: the tool's original
        // consumers saw them merged, so it may land on either.
        if output.stdout().starts_with(NO_LANGUAGE_MARKER)
            || output.stderr().starts_with(NO_LANGUAGE_MARKER)
        {
            return Err(QuarryError::UnsupportedLanguage {
                output: output.combined(),
            });
        }

        Err(QuarryError::ToolFailed {
            message: output.combined(),
            source: None,
        })
    }

    /// Parses every matching regular file under `root`, sequentially, in
    /// lexicographic path order.
    ///
    /// `extension` is a literal suffix filter (for example `.java`); `None`
    /// matches every regular file. With `fail_fast` the first per-file
    /// failure of any kind aborts the whole operation and no output is
    /// returned; without it every failure is recorded as a [`FailedFile`]
    /// and the walk continues. Interruption is deliberately treated like any
    /// other per-file failure in aggregate mode.
    ///
    /// # Errors
    ///
    /// Returns [`QuarryError::Io`] when `root` is not an existing directory
    /// or enumeration fails, regardless of `fail_fast`. With `fail_fast`,
    /// additionally propagates the first per-file error unchanged.
    pub fn parse_directory(
        &self,
        root: &Path,
        extension: Option<&str>,
        fail_fast: bool,
    ) -> Result<DirectoryOutput, QuarryError> {
        let candidates = walk::discover_files(root, extension)?;

        debug!(
            target: RUNNER_TARGET,
            root = %root.display(),
            candidates = candidates.len(),
            fail_fast,
            "parsing directory"
        );

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for path in candidates {
            match self.parse_file(&path) {
                Ok(document) => documents.push(document),
                Err(error) if fail_fast => return Err(error),
                Err(error) => {
                    warn!(
                        target: RUNNER_TARGET,
                        file = %path.display(),
                        %error,
                        "recording parse failure"
                    );
                    failures.push(FailedFile::new(path, error.to_string()));
                }
            }
        }

        Ok(DirectoryOutput::new(documents, failures))
    }
}
