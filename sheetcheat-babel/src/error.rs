//! Error types for format operations

use crate::compile::CompileError;
use sheetcheat_core::latex::TransformError;
use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Operation not supported by this format
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Error during serialization or while writing the artifact
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The external compiler could not produce a PDF
    #[error("Compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// Normalization failed while parsing a source
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}
