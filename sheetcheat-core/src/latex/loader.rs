//! Payload loading utilities
//!
//! `DocumentLoader` reads a generated payload from a file or a string and runs transforms
//! on it. Used by the CLI and the tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetcheat_core::latex::loader::DocumentLoader;
//!
//! let doc = DocumentLoader::from_path("respuesta.txt")?.normalize("Vectores")?;
//! ```

use crate::latex::document::Document;
use crate::latex::transforms::standard::{document_pipeline, PipelineOptions, NORMALIZATION};
use crate::latex::transforms::{Transform, TransformError};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Error that can occur when loading documents
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading the payload
    IoError(String),
    /// Transform error
    TransformError(TransformError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::TransformError(err) => write!(f, "Transform error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<TransformError> for LoaderError {
    fn from(err: TransformError) -> Self {
        LoaderError::TransformError(err)
    }
}

/// Payload loader with transform shortcuts
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    /// Load from any reader, typically stdin
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoaderError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run a custom transform on the source
    ///
    /// This is the generic method that all shortcuts use internally.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Full pipeline with default options
    pub fn normalize(&self, topic: &str) -> Result<Document, LoaderError> {
        self.normalize_with(topic, &PipelineOptions::default())
    }

    /// Full pipeline with the given options
    pub fn normalize_with(
        &self,
        topic: &str,
        options: &PipelineOptions,
    ) -> Result<Document, LoaderError> {
        self.with(&document_pipeline(topic, options))
    }

    /// Sanitize and complete, without identity or math
    ///
    /// This is a shortcut for `.with(&NORMALIZATION)`.
    pub fn complete(&self) -> Result<String, LoaderError> {
        self.with(&NORMALIZATION)
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_string_normalize() {
        let doc = DocumentLoader::from_string("\\section{A}")
            .normalize("Vectores")
            .unwrap();
        assert!(doc.has_root());
        assert!(doc.as_str().contains("\\title{Sheet Cheat: Vectores}"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"COOR-BO-ZY\n\\section{B}").unwrap();
        let loader = DocumentLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.source(), "COOR-BO-ZY\n\\section{B}");
        assert!(loader.complete().unwrap().contains("\\section{B}\n\\end{document}"));
    }

    #[test]
    fn test_from_reader() {
        let loader = DocumentLoader::from_reader("x".as_bytes()).unwrap();
        assert_eq!(loader.source(), "x");
    }

    #[test]
    fn test_missing_file() {
        let result = DocumentLoader::from_path("/nonexistent/payload.txt");
        assert!(matches!(result, Err(LoaderError::IoError(_))));
    }

    #[test]
    fn test_empty_payload_error() {
        let result = DocumentLoader::from_string("COOR-BO-ZY").normalize("X");
        assert_eq!(
            result.unwrap_err(),
            LoaderError::TransformError(TransformError::EmptyInput)
        );
    }
}
