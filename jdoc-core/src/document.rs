//! Immutable wrapper owning one root value.

use std::io::Read;

use crate::parser::{self, ParseError};
use crate::value::Value;

/// A finished document: one root [`Value`], read-only after construction.
///
/// Produced by the parser, or directly from a pre-built value (for
/// instance one assembled by [`crate::Builder`]). A completed document is
/// safely shareable; nothing mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wrap an already-built root value.
    pub fn new(root: Value) -> Self {
        Document { root }
    }

    /// Parse one document from text.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse(input).map(Document::new)
    }

    /// Read a byte stream to its end and parse it.
    pub fn load<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// The root value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consume the document, yielding the root value.
    pub fn into_root(self) -> Value {
        self.root
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_root()
    }
}
