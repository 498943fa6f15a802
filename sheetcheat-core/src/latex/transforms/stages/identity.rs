//! Identity stage: title, `\maketitle` and attribution footer

use crate::latex::identity::{enforce_title, inject_footer, Identity};
use crate::latex::transforms::{Runnable, TransformError};
use log::debug;

/// Identity enforcement stage
///
/// # Input
/// - `String` - completed LaTeX document
///
/// # Output
/// - `String` - document with exactly one title for the topic and one footer
pub struct EnforceIdentity {
    topic: String,
    identity: Identity,
}

impl EnforceIdentity {
    pub fn new(topic: impl Into<String>, identity: Identity) -> Self {
        EnforceIdentity {
            topic: topic.into(),
            identity,
        }
    }
}

impl Runnable<String, String> for EnforceIdentity {
    fn run(&self, input: String) -> Result<String, TransformError> {
        let titled = enforce_title(&input, &self.topic, &self.identity);
        let output = inject_footer(&titled, &self.identity);
        debug!(
            "event=identity title_changed={} footer_added={}",
            titled != input,
            output != titled
        );
        Ok(output)
    }
}
