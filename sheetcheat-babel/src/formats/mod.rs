//! Format implementations
//!
//! Each format turns a normalized document into one artifact kind.

pub mod latex;
pub mod markdown;
pub mod pdf;

pub use latex::LatexFormat;
pub use markdown::MarkdownFormat;
pub use pdf::PdfFormat;
