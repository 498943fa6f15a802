//! LaTeX-side processing for generated cheat sheets

pub mod completing;
pub mod document;
pub mod identity;
pub mod loader;
pub mod math;
pub mod sanitizing;
pub mod scanning;
pub mod slug;
pub mod transforms;

pub use completing::{complete, complete_with, Skeleton};
pub use document::Document;
pub use loader::{DocumentLoader, LoaderError};
pub use identity::{enforce_title, inject_footer, Identity};
pub use math::{ensure_differential, isolate_display_math, MathOptions};
pub use sanitizing::{sanitize, SENTINEL};
pub use slug::{
    slugify, slugify_with, title_case_filename, ArtifactNames, Separator, Slug, DEFAULT_PREFIX,
};
pub use transforms::standard::{document_pipeline, PipelineOptions};
pub use transforms::TransformError;
