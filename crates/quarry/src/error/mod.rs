//! Domain errors raised by parse orchestration.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can pattern-match the failure kind instead of inspecting message
//! strings. I/O errors are wrapped in `Arc` to satisfy the
//! `result_large_err` Clippy lint.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use quarry_symbols::DecodeError;

/// Errors arising from invoking the external tool and aggregating results.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// The external tool has no grammar for the file's detected language.
    ///
    /// This is an expected, recoverable outcome, signalled by the tool's
    /// output beginning with the `NoLanguageForBlob` marker.
    #[error("external tool does not support this file's language: {output}")]
    UnsupportedLanguage {
        /// Full captured output of the failed invocation.
        output: String,
    },

    /// The external tool failed for any other reason: non-zero exit without
    /// the unsupported-language marker, a launch failure, or a stream I/O
    /// failure while communicating with it.
    #[error("external tool failed: {message}")]
    ToolFailed {
        /// Captured diagnostic output, or a description of the launch or
        /// stream failure.
        message: String,
        /// Underlying I/O error, when the failure happened outside the
        /// tool's own reporting.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// The tool exited successfully but its output does not conform to the
    /// symbol document schema.
    #[error("external tool produced malformed output: {source}")]
    MalformedOutput {
        /// Underlying decode failure.
        #[from]
        source: DecodeError,
    },

    /// The wait for the external tool was interrupted.
    #[error("interrupted while waiting for the external tool")]
    Interrupted,

    /// The external tool did not exit within the configured deadline and
    /// was killed.
    #[error("external tool timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// Directory enumeration or filesystem access failed outside the
    /// subprocess's own reporting.
    #[error("I/O error under '{path}': {source}")]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}
