//! # sheetcheat-core
//!
//! Normalization pipeline for LaTeX cheat sheets produced by a generative text service.
//!
//! File Layout
//!
//! Everything lives under [`latex`]. Each concern is a pure function over a text buffer in
//! its own module, and [`latex::transforms`] wraps those functions into composable stages:
//!
//! ```text
//! src/latex
//!   ├── document      the normalized document value
//!   ├── scanning      control sequence and environment scanning helpers
//!   ├── sanitizing    noise, sentinel and forbidden directive removal
//!   ├── completing    document skeleton
//!   ├── identity      title and footer invariants
//!   ├── math          differential repair and display math isolation
//!   ├── slug          filesystem-safe identifiers
//!   ├── transforms    Runnable stages and the standard pipelines
//!   └── loader        DocumentLoader
//! ```
//!
//! The only I/O is reading payloads in [`latex::loader::DocumentLoader`]. Compiling
//! and converting documents to other formats is the job of `sheetcheat-babel`.

pub mod latex;
