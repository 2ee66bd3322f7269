//! Decode errors raised by the symbol model.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can inspect the failure programmatically.

use thiserror::Error;

/// Errors arising from decoding or constructing symbol model values.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not valid JSON or does not match the expected schema
    /// (missing required field, wrong type, unparsable input).
    #[error("symbol document does not match the expected schema: {source}")]
    Malformed {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A byte range was constructed with its start offset past its end.
    #[error("invalid byte range: start {start} exceeds end {end}")]
    InvalidByteRange {
        /// Start offset of the rejected range.
        start: u64,
        /// End offset of the rejected range.
        end: u64,
    },
}
