//! Markdown preview tests
//!
//! Submodules are included here since cargo does not discover tests in subdirectories.

mod documents;
mod lists;
