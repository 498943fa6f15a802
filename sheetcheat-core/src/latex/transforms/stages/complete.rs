//! Completion stage
//!
//! Wraps body-only payloads into the fixed document skeleton.

use crate::latex::completing::{complete_with, Skeleton};
use crate::latex::document::BEGIN_DOCUMENT;
use crate::latex::transforms::{Runnable, TransformError};
use log::debug;

/// Completion stage
///
/// # Input
/// - `String` - sanitized LaTeX, with or without a document root
///
/// # Output
/// - `String` - LaTeX with a document root
#[derive(Default)]
pub struct Complete {
    skeleton: Skeleton,
}

impl Complete {
    pub fn new(skeleton: Skeleton) -> Self {
        Complete { skeleton }
    }
}

impl Runnable<String, String> for Complete {
    fn run(&self, input: String) -> Result<String, TransformError> {
        let wrapped = !input.contains(BEGIN_DOCUMENT);
        debug!(
            "event=complete wrapped={} language={}",
            wrapped, self.skeleton.language
        );
        if !wrapped {
            return Ok(input);
        }
        Ok(complete_with(&input, &self.skeleton))
    }
}
