//! Display intermediate representation
//!
//! A small, format-agnostic tree of what a cheat sheet shows: headings, paragraphs, step
//! lists, ordered lists, math blocks and callouts. The Markdown preview is built from it;
//! the LaTeX it comes from is discarded along the way.
//!
//! # Information Loss
//!
//! Converting LaTeX → IR is lossy and one way. Lost information includes:
//! - Preamble, packages and layout directives (`\vspace`, font sizes)
//! - Environment options other than a callout title
//! - Comments
//!
//! # Modules
//!
//! - [`nodes`]: IR data structures

pub mod nodes;
