//! Sanitizing stage
//!
//! Strips wrapper noise from the raw payload. This is the only stage that can reject its
//! input: a payload with nothing left after sanitizing is an [`TransformError::EmptyInput`].

use crate::latex::sanitizing::sanitize;
use crate::latex::transforms::{Runnable, TransformError};
use log::debug;

/// Sanitizing stage
///
/// # Input
/// - `String` - raw generated payload
///
/// # Output
/// - `String` - sanitized, non-empty LaTeX text
pub struct Sanitize;

impl Sanitize {
    pub fn new() -> Self {
        Sanitize
    }
}

impl Default for Sanitize {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for Sanitize {
    fn run(&self, input: String) -> Result<String, TransformError> {
        let output = sanitize(&input);
        debug!(
            "event=sanitize bytes_in={} bytes_out={}",
            input.len(),
            output.len()
        );
        if output.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        Ok(output)
    }
}
