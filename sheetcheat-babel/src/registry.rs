//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::compile::CompilerOptions;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::{LatexFormat, MarkdownFormat, PdfFormat};
use sheetcheat_core::latex::Document;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let preview = registry.serialize(&doc, "markdown")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document to text using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let fmt = self.checked_serializer(format)?;
        fmt.serialize(doc)
    }

    /// Serialize a document with format specific options
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let fmt = self.checked_serializer(format)?;
        fmt.serialize_with_options(doc, options)
    }

    fn checked_serializer(&self, format: &str) -> Result<&dyn Format, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        Ok(fmt)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        Self::with_compiler(CompilerOptions::default())
    }

    /// Default formats, with the PDF format using `compiler`
    pub fn with_compiler(compiler: CompilerOptions) -> Self {
        let mut registry = Self::new();

        registry.register(LatexFormat);
        registry.register(MarkdownFormat);
        registry.register(PdfFormat::new(compiler));

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test format
    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn parse(&self, _source: &str) -> Result<Document, FormatError> {
            Ok(Document::new("test"))
        }
        fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    struct WriteOnlyFormat;
    impl Format for WriteOnlyFormat {
        fn name(&self) -> &str {
            "write-only"
        }
        fn supports_serialization(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert!(!registry.has("nonexistent"));
        assert_eq!(registry.get("test").unwrap().description(), "Test format");
    }

    #[test]
    fn test_registry_get_missing() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("expected FormatNotFound"),
        }
    }

    #[test]
    fn test_registry_list_formats() {
        let mut registry = FormatRegistry::new();
        registry.register(WriteOnlyFormat);
        registry.register(TestFormat);
        assert_eq!(registry.list_formats(), vec!["test", "write-only"]);
    }

    #[test]
    fn test_registry_parse_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let doc = registry.parse("anything", "test").unwrap();
        assert_eq!(doc.as_str(), "test");
        assert_eq!(registry.serialize(&doc, "test").unwrap(), "test output");
        assert_eq!(
            registry
                .serialize_with_options(&doc, "test", &HashMap::new())
                .unwrap(),
            SerializedDocument::Text("test output".to_string())
        );
    }

    #[test]
    fn test_registry_parse_not_supported() {
        let mut registry = FormatRegistry::new();
        registry.register(WriteOnlyFormat);
        assert!(matches!(
            registry.parse("x", "write-only"),
            Err(FormatError::NotSupported(_))
        ));
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["latex", "markdown", "pdf"]);
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat);
        assert_eq!(registry.list_formats().len(), 1);
    }
}
