//! Markdown preview format
//!
//! Export only. The preview is what a web front end shows next to the PDF download, so it
//! favours readability over fidelity:
//!
//! | LaTeX                                   | Markdown                         |
//! |-----------------------------------------|----------------------------------|
//! | `\title`, `\section`, `\subsection`     | `### heading`                    |
//! | `itemize`                               | `- ▸ step`                       |
//! | first `enumerate`                       | `1.  item`                       |
//! | later `enumerate`                       | `- **a)** item`                  |
//! | `\[..\]`, `$$..$$`, `equation`, `align` | `$$` block (`align` → `aligned`) |
//! | `tcolorbox`                             | `> ` blockquote                  |
//! | `\textbf`, `\emph`, `\url`, `\(..\)`    | `**`, `*`, `<url>`, `$..$`       |
//!
//! Conversion goes through the display IR: [`parser`] builds it, [`serializer`] renders it
//! with comrak.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use log::debug;
use sheetcheat_core::latex::Document;

pub use parser::{to_display_tree, ConversionState};

/// Render the Markdown preview of a document
pub fn to_markdown(doc: &Document) -> Result<String, FormatError> {
    let tree = to_display_tree(doc);
    let markdown = serializer::render_document(&tree)?;
    debug!(
        "event=markdown blocks={} bytes_out={}",
        tree.blocks.len(),
        markdown.len()
    );
    Ok(markdown)
}

/// Format implementation for the Markdown preview
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown preview with $-delimited math"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_markdown(doc)
    }
}
