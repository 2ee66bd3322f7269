//! Parse orchestration around an external code-parsing tool.
//!
//! The `quarry` crate invokes an external parsing executable (GitHub's
//! `semantic` CLI, or any binary honouring the same contract) once per
//! source file as `<binary> parse <file> --json-symbols`, interprets the exit
//! status and captured output, and decodes successful output into the typed
//! symbol model from [`quarry_symbols`].
//!
//! The tool's contract, consumed as-is:
//!
//! - exit 0: stdout is a JSON symbol document;
//! - exit non-zero with output beginning `NoLanguageForBlob`: the tool has
//!   no grammar for the file's language (expected, recoverable);
//! - exit non-zero otherwise: arbitrary diagnostic text (unexpected).
//!
//! Directory parsing discovers candidate files up front in a deterministic
//! order and processes them sequentially under one of two failure policies:
//! fail-fast, where the first failure aborts the whole operation, or
//! aggregate, where failures are collected as [`FailedFile`] records
//! alongside the successes and never raised past the top-level call.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use quarry::Quarry;
//!
//! let quarry = Quarry::new("/usr/local/bin/semantic");
//! let output = quarry.parse_directory(Path::new("src"), Some(".py"), false)?;
//! for failed in output.failures() {
//!     eprintln!("{}: {}", failed.path().display(), failed.message());
//! }
//! # Ok::<(), quarry::QuarryError>(())
//! ```

pub mod error;
pub mod invoke;
pub mod outcome;
pub mod runner;
pub mod walk;

#[cfg(test)]
mod tests;

pub use self::error::QuarryError;
pub use self::invoke::{ProcessInvoker, ToolInvoker, ToolOutput};
pub use self::outcome::{DirectoryOutput, FailedFile};
pub use self::runner::Quarry;
