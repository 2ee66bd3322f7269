//! Value types for one invocation's worth of parsed-symbol output.
//!
//! The wire schema is the external tool's `--json-symbols` document: a
//! top-level `files` array, each file carrying its tool-reported path,
//! detected language, and symbols in document order. Each symbol locates the
//! same syntactic extent in three coordinate systems: a line/column
//! [`SymbolSpan`], a UTF-16 code-unit [`SymbolSpan`], and a [`ByteRange`].
//! The model performs no cross-validation between the three; consumers must
//! not assume they agree when the tool's output is malformed.
//!
//! All types are construct-then-read: private fields, validating
//! constructors, accessor methods, no mutation after construction.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// A line/column position, 1-based, as reported by the external tool.
///
/// Both coordinates are optional: the tool omits them for nodes it cannot
/// attribute to a position. Absent and `null` both decode to `None`. No
/// upper-bound validation is performed; validity is the producing tool's
/// responsibility.
///
/// # Example
///
/// ```
/// use quarry_symbols::Span;
///
/// let span = Span::new(Some(3), Some(1));
/// assert_eq!(span.line(), Some(3));
///
/// let unreported = Span::new(None, None);
/// assert_eq!(unreported.column(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
}

impl Span {
    /// Creates a span position from optional line and column coordinates.
    #[must_use]
    pub const fn new(line: Option<u32>, column: Option<u32>) -> Self {
        Self { line, column }
    }

    /// Returns the 1-based line number, if the tool reported one.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    /// Returns the 1-based column number, if the tool reported one.
    #[must_use]
    pub const fn column(&self) -> Option<u32> {
        self.column
    }
}

/// A start/end pair of [`Span`] positions delimiting one syntactic extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSpan {
    start: Span,
    end: Span,
}

impl SymbolSpan {
    /// Creates a span pair from its endpoints.
    #[must_use]
    pub const fn new(start: Span, end: Span) -> Self {
        Self { start, end }
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Span {
        self.start
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> Span {
        self.end
    }
}

/// Raw wire form of [`ByteRange`], prior to invariant validation.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawByteRange {
    start: u64,
    end: u64,
}

/// A byte-exact slice of the source file, `start <= end`, never absent.
///
/// The invariant is enforced both by [`ByteRange::new`] and during
/// deserialization, so a decoded document can never carry an inverted range.
///
/// # Example
///
/// ```
/// use quarry_symbols::ByteRange;
///
/// let range = ByteRange::new(0, 24).expect("ordered offsets");
/// assert_eq!(range.end(), 24);
/// assert!(ByteRange::new(9, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawByteRange")]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Creates a byte range from start and end offsets.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidByteRange`] when `start > end`.
    pub const fn new(start: u64, end: u64) -> Result<Self, DecodeError> {
        if start > end {
            return Err(DecodeError::InvalidByteRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the end byte offset.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Returns the length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Returns `true` when the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl TryFrom<RawByteRange> for ByteRange {
    type Error = DecodeError;

    fn try_from(raw: RawByteRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Identity fields of a symbol: what it is called and what kind of node
/// produced it.
///
/// Groups the non-positional attributes of [`Symbol`] into a single
/// parameter object, reducing the argument count of [`Symbol::new`].
///
/// # Example
///
/// ```
/// use quarry_symbols::SymbolInfo;
///
/// let info = SymbolInfo::new("foo", "Function", "def foo():", "Function")
///     .with_syntax_type("Function");
/// assert_eq!(info.symbol(), "foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    symbol: String,
    kind: String,
    line: String,
    node_type: String,
    syntax_type: Option<String>,
}

impl SymbolInfo {
    /// Creates the identity bundle with no syntax-type refinement.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        kind: impl Into<String>,
        line: impl Into<String>,
        node_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: kind.into(),
            line: line.into(),
            node_type: node_type.into(),
            syntax_type: None,
        }
    }

    /// Sets the optional syntax-type refinement.
    #[must_use]
    pub fn with_syntax_type(mut self, syntax_type: impl Into<String>) -> Self {
        self.syntax_type = Some(syntax_type.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub const fn symbol(&self) -> &str {
        self.symbol.as_str()
    }
}

/// Positional fields of a symbol: the same extent in three coordinate
/// systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolExtent {
    span: SymbolSpan,
    utf16_code_unit_span: SymbolSpan,
    byte_range: ByteRange,
}

impl SymbolExtent {
    /// Creates the extent bundle.
    #[must_use]
    pub const fn new(
        span: SymbolSpan,
        utf16_code_unit_span: SymbolSpan,
        byte_range: ByteRange,
    ) -> Self {
        Self {
            span,
            utf16_code_unit_span,
            byte_range,
        }
    }
}

/// One semantic unit extracted from a source file.
///
/// The `kind` and `node_type` vocabularies are defined by the external tool
/// and are not enumerated here. Only `syntax_type` is optional; every other
/// field is required by the wire schema.
///
/// # Example
///
/// ```
/// use quarry_symbols::{ByteRange, Span, Symbol, SymbolExtent, SymbolInfo, SymbolSpan};
///
/// let span = SymbolSpan::new(Span::new(Some(1), Some(1)), Span::new(Some(1), Some(9)));
/// let extent = SymbolExtent::new(span, span, ByteRange::new(0, 8).expect("ordered"));
/// let symbol = Symbol::new(SymbolInfo::new("foo", "Function", "def foo():", "Function"), extent);
/// assert_eq!(symbol.kind(), "Function");
/// assert_eq!(symbol.syntax_type(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    symbol: String,
    kind: String,
    line: String,
    span: SymbolSpan,
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    syntax_type: Option<String>,
    utf16_code_unit_span: SymbolSpan,
    byte_range: ByteRange,
}

impl Symbol {
    /// Creates a symbol from its identity and extent bundles.
    #[must_use]
    pub fn new(info: SymbolInfo, extent: SymbolExtent) -> Self {
        Self {
            symbol: info.symbol,
            kind: info.kind,
            line: info.line,
            span: extent.span,
            node_type: info.node_type,
            syntax_type: info.syntax_type,
            utf16_code_unit_span: extent.utf16_code_unit_span,
            byte_range: extent.byte_range,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Returns the tool-defined kind/category.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the free-text source-line excerpt.
    #[must_use]
    pub const fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Returns the line/column extent.
    #[must_use]
    pub const fn span(&self) -> SymbolSpan {
        self.span
    }

    /// Returns the syntax-tree node-type label.
    #[must_use]
    pub const fn node_type(&self) -> &str {
        self.node_type.as_str()
    }

    /// Returns the optional syntax-type refinement.
    #[must_use]
    pub fn syntax_type(&self) -> Option<&str> {
        self.syntax_type.as_deref()
    }

    /// Returns the extent measured in UTF-16 code units.
    #[must_use]
    pub const fn utf16_code_unit_span(&self) -> SymbolSpan {
        self.utf16_code_unit_span
    }

    /// Returns the extent measured in byte offsets.
    #[must_use]
    pub const fn byte_range(&self) -> ByteRange {
        self.byte_range
    }
}

/// One parsed source file: its tool-reported path, detected language, and
/// symbols in the tool's emission order (document order, significant).
///
/// The path is kept verbatim as the tool reported it; it may differ in
/// formatting from the path the caller passed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    path: String,
    language: String,
    symbols: Vec<Symbol>,
}

impl ParsedFile {
    /// Creates a parsed file record.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        language: impl Into<String>,
        symbols: Vec<Symbol>,
    ) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            symbols,
        }
    }

    /// Returns the tool-reported file path.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the detected language name.
    #[must_use]
    pub const fn language(&self) -> &str {
        self.language.as_str()
    }

    /// Returns the symbols in document order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// The decoded result of one tool invocation.
///
/// Normally carries exactly one file, but the wire format permits zero (a
/// file with no recognised content) or several.
///
/// # Example
///
/// ```
/// use quarry_symbols::SymbolDocument;
///
/// let document = SymbolDocument::from_json(r#"{"files": []}"#).expect("decode");
/// assert!(document.files().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDocument {
    files: Vec<ParsedFile>,
}

impl SymbolDocument {
    /// Creates a document from its files.
    #[must_use]
    pub const fn new(files: Vec<ParsedFile>) -> Self {
        Self { files }
    }

    /// Decodes a document from the external tool's JSON output.
    ///
    /// The decode is atomic: either the whole document conforms to the
    /// schema or the operation fails. Unknown fields are ignored; missing
    /// required fields, wrong types, and inverted byte ranges are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] when the text is not valid JSON or
    /// does not match the schema.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(|source| DecodeError::Malformed { source })
    }

    /// Encodes the document back to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] when serialisation fails.
    pub fn to_json(&self) -> Result<String, DecodeError> {
        serde_json::to_string(self).map_err(|source| DecodeError::Malformed { source })
    }

    /// Returns the parsed files in the tool's emission order.
    #[must_use]
    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }
}
