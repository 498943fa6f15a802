//! LaTeX format
//!
//! Serializing is the identity: a normalized [`Document`] already is the LaTeX source.
//! Parsing accepts a raw payload and runs it through sanitizing and completion, so any
//! generated response can be loaded without a topic.

use crate::error::FormatError;
use crate::format::Format;
use sheetcheat_core::latex::transforms::standard::NORMALIZATION;
use sheetcheat_core::latex::Document;

/// Format implementation for LaTeX sources
pub struct LatexFormat;

impl Format for LatexFormat {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "Normalized LaTeX source"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(Document::new(NORMALIZATION.run(source.to_string())?))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.as_str().to_string())
    }
}
