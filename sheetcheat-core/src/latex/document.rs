//! The normalized document value
//!
//! A [`Document`] is what the pipeline hands to the outside world: text that contains a
//! document root (`\begin{document}` / `\end{document}`) once it went through the
//! completing stage. The type itself does not re-validate; it only offers views over the
//! preamble and the body that the output formats need.

use std::fmt;

/// Opening document-root marker
pub const BEGIN_DOCUMENT: &str = "\\begin{document}";

/// Closing document-root marker
pub const END_DOCUMENT: &str = "\\end{document}";

/// A LaTeX document produced by the normalization pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    source: String,
}

impl Document {
    pub fn new(source: impl Into<String>) -> Self {
        Document {
            source: source.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// Whether the text carries a `\begin{document}` marker
    pub fn has_root(&self) -> bool {
        self.source.contains(BEGIN_DOCUMENT)
    }

    /// Everything before `\begin{document}`, empty when there is no root marker
    pub fn preamble(&self) -> &str {
        match self.source.find(BEGIN_DOCUMENT) {
            Some(idx) => &self.source[..idx],
            None => "",
        }
    }

    /// Content between the root markers
    ///
    /// Without a begin marker the whole text is the body. A missing end marker extends the
    /// body to the end of the text.
    pub fn body(&self) -> &str {
        let Some(begin) = self.source.find(BEGIN_DOCUMENT) else {
            return &self.source;
        };
        let start = begin + BEGIN_DOCUMENT.len();
        let end = self.source[start..]
            .find(END_DOCUMENT)
            .map(|offset| start + offset)
            .unwrap_or(self.source.len());
        &self.source[start..end]
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.source
    }
}

impl From<String> for Document {
    fn from(source: String) -> Self {
        Document::new(source)
    }
}

impl From<&str> for Document {
    fn from(source: &str) -> Self {
        Document::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_between_markers() {
        let doc = Document::new("\\usepackage{x}\n\\begin{document}\nHi\n\\end{document}\n");
        assert_eq!(doc.body(), "\nHi\n");
        assert_eq!(doc.preamble(), "\\usepackage{x}\n");
        assert!(doc.has_root());
    }

    #[test]
    fn test_body_without_root_is_whole_text() {
        let doc = Document::new("just a fragment");
        assert_eq!(doc.body(), "just a fragment");
        assert_eq!(doc.preamble(), "");
        assert!(!doc.has_root());
    }

    #[test]
    fn test_body_without_end_marker() {
        let doc = Document::new("\\begin{document}tail");
        assert_eq!(doc.body(), "tail");
    }
}
