//! Transform pipeline infrastructure
//!
//! Normalization is a chain of text passes whose order matters (sanitizing before
//! completion, completion before identity enforcement). This module provides the
//! composable, type-safe way to chain them: any transform can be followed by another one
//! whose input type matches its output type.
//!
//! # Architecture Overview
//!
//! ## 1. The `Runnable` Trait
//!
//! The interface of every stage:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! Implemented by the stages in [`stages`] (sanitizing, completion, identity, math).
//!
//! ## 2. The `Transform<I, O>` Type
//!
//! A wrapper that enables composition through `.then()`:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Sanitize::new())          // String → String
//!     .then(Complete::default());     // String → String
//! ```
//!
//! ## 3. Static Lazy Transforms
//!
//! Pipelines that need no per-request input are pre-built statics, see [`standard`].
//! Pipelines that depend on the topic are built per request with
//! [`standard::document_pipeline`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use sheetcheat_core::latex::transforms::standard::{document_pipeline, PipelineOptions};
//!
//! let pipeline = document_pipeline("Vectores", &PipelineOptions::default());
//! let doc = pipeline.run(raw_response)?;
//! ```
//!
//! Most callers go through [`DocumentLoader`](crate::latex::loader::DocumentLoader).

pub mod stages;
pub mod standard;

use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Nothing left to process once the payload was sanitized
    EmptyInput,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::EmptyInput => write!(f, "nothing to process: input is empty"),
        }
    }
}

impl std::error::Error for TransformError {}

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual transformation stages.
/// The `Transform` struct composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`. The compiler
/// only lets stages be chained when the output of one is the input of the next.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Add a stage to this transform, returning a new transform with extended output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

// Transforms can be used as stages of other transforms
impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
