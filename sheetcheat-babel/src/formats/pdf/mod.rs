//! PDF format
//!
//! Binary output produced by the external compiler, see [`crate::compile`]. Only
//! [`Format::serialize_with_options`] is meaningful; plain `serialize` reports the format
//! as binary.
//!
//! Options:
//!
//! - `stem`: base name of the intermediate files (default `document`)
//! - `engine`: a single engine to use instead of the configured preference list
//! - `passes`: number of engine runs

use crate::compile::{compile, CompilerOptions};
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use sheetcheat_core::latex::Document;
use std::collections::HashMap;

const DEFAULT_STEM: &str = "document";

/// Format implementation for compiled PDFs
#[derive(Debug, Clone, Default)]
pub struct PdfFormat {
    compiler: CompilerOptions,
}

impl PdfFormat {
    pub fn new(compiler: CompilerOptions) -> Self {
        PdfFormat { compiler }
    }

    pub fn compiler(&self) -> &CompilerOptions {
        &self.compiler
    }

    fn effective_options(
        &self,
        options: &HashMap<String, String>,
    ) -> Result<CompilerOptions, FormatError> {
        let mut compiler = self.compiler.clone();
        if let Some(engine) = options.get("engine") {
            compiler = compiler.with_engine(engine.trim());
        }
        if let Some(passes) = options.get("passes") {
            let passes = passes.trim().parse::<u32>().map_err(|_| {
                FormatError::SerializationError(format!(
                    "invalid pass count '{passes}': expected a positive integer"
                ))
            })?;
            compiler = compiler.with_passes(passes);
        }
        Ok(compiler)
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "PDF compiled with an installed LaTeX engine"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "Format 'pdf' is binary; use serialize_with_options".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let compiler = self.effective_options(options)?;
        let stem = options
            .get("stem")
            .map(String::as_str)
            .unwrap_or(DEFAULT_STEM);
        Ok(SerializedDocument::Binary(compile(doc, stem, &compiler)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CompileError;

    #[test]
    fn test_plain_serialize_not_supported() {
        let result = PdfFormat::default().serialize(&Document::new("x"));
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn test_engine_option_overrides_preferences() {
        let options = HashMap::from([
            ("engine".to_string(), "no-such-tex-engine".to_string()),
            ("passes".to_string(), "1".to_string()),
        ]);
        let compiler = PdfFormat::default().effective_options(&options).unwrap();
        assert_eq!(compiler.engines, vec!["no-such-tex-engine"]);
        assert_eq!(compiler.passes, 1);

        let result = PdfFormat::default().serialize_with_options(&Document::new("x"), &options);
        assert!(matches!(
            result,
            Err(FormatError::Compile(CompileError::Unavailable { .. }))
        ));
    }

    #[test]
    fn test_invalid_passes() {
        let options = HashMap::from([("passes".to_string(), "dos".to_string())]);
        assert!(matches!(
            PdfFormat::default().effective_options(&options),
            Err(FormatError::SerializationError(_))
        ));
    }
}
