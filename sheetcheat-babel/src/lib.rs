//! Output formats for normalized cheat sheets
//!
//!     This crate turns a [`Document`](sheetcheat_core::latex::Document) produced by the
//!     core pipeline into the artifacts a user gets: the LaTeX source itself, a Markdown
//!     preview and a compiled PDF.
//!
//! Architecture
//!
//!     - Format trait: Uniform interface for all formats (serialization and, where it makes
//!       sense, parsing)
//!     - FormatRegistry: Centralized discovery and selection of formats
//!     - publish: Serialize through the registry and write the artifact
//!     - compile: The external LaTeX engine, the only place that spawns processes
//!
//!     This is a pure lib: it powers the sheetcheat CLI but does not print, read env vars or
//!     otherwise suppose a shell environment. Compiling is the exception by necessity, and
//!     it is confined to a temporary directory.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # Serialize and write artifacts
//!     ├── compile.rs              # External LaTeX engine
//!     ├── ir
//!     │   └── nodes.rs            # Display tree
//!     ├── formats
//!     │   ├── latex               # Identity serializer, payload parser
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # LaTeX → display tree
//!     │   │   ├── serializer.rs   # display tree → Markdown
//!     │   │   └── mod.rs
//!     │   └── pdf                 # Binary output through compile
//!     ├── lib.rs
//!
//! Testing
//!     tests
//!     ├── compile.rs
//!     └── markdown
//!         ├── main.rs
//!         ├── lists.rs
//!         └── documents.rs
//!
//! note that rust does not by default discover tests in subdirectories, so they are
//! included from main.rs.
//!
//! The Markdown Preview
//!
//!     Generated sheets use a narrow LaTeX subset, so the preview converter recognizes that
//!     subset directly instead of parsing LaTeX in general. Conversion is lossy and one way;
//!     there is no Markdown → LaTeX path.

pub mod compile;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod publish;
pub mod registry;

pub use compile::{CompileError, CompilerOptions};
pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use formats::markdown::to_markdown;
pub use publish::{publish, publish_with, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
