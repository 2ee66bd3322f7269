//! Typed symbol model for the output of an external code-parsing tool.
//!
//! The `quarry-symbols` crate defines the immutable value types that a
//! `parse <file> --json-symbols` invocation of the external tool produces:
//! symbols with their source positions in three coordinate systems
//! (line/column spans, UTF-16 code-unit spans, and byte offsets), the files
//! they were extracted from, and the [`SymbolDocument`] that wraps one
//! invocation's worth of output.
//!
//! Decoding is atomic: [`SymbolDocument::from_json`] either produces a fully
//! validated document or fails with a [`DecodeError`]. There is no partial
//! decode and no silent defaulting of required fields.
//!
//! # Example
//!
//! ```
//! use quarry_symbols::SymbolDocument;
//!
//! let json = r#"{"files": [{"path": "foo.py", "language": "Python", "symbols": []}]}"#;
//! let document = SymbolDocument::from_json(json).expect("well-formed document");
//! assert_eq!(document.files().len(), 1);
//! ```

pub mod document;
pub mod error;

pub use self::document::{
    ByteRange, ParsedFile, Span, Symbol, SymbolDocument, SymbolExtent, SymbolInfo, SymbolSpan,
};
pub use self::error::DecodeError;
