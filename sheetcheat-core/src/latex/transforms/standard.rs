//! Standard transform definitions
//!
//! Topic-independent pipelines are statics built with `once_cell::sync::Lazy`. The full
//! document pipeline depends on the topic and on configuration, so it is assembled per
//! request by [`document_pipeline`].

use crate::latex::completing::Skeleton;
use crate::latex::document::Document;
use crate::latex::identity::Identity;
use crate::latex::math::MathOptions;
use crate::latex::transforms::stages::{Complete, EnforceIdentity, NormalizeMath, Sanitize};
use crate::latex::transforms::Transform;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Type alias for text-to-text transforms
pub type TextTransform = Transform<String, String>;

/// Type alias for the full pipeline
pub type DocumentTransform = Transform<String, Document>;

/// Everything the full pipeline can be configured with
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub skeleton: Skeleton,
    pub identity: Identity,
    pub math: MathOptions,
}

/// Normalization transform: raw payload → complete document text
///
/// 1. Sanitizing
/// 2. Completion with the default skeleton
///
/// Identity and math are topic or configuration dependent and left to
/// [`document_pipeline`].
pub static NORMALIZATION: Lazy<TextTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(Sanitize::new())
        .then(Complete::default())
});

/// Full pipeline: raw payload → [`Document`]
///
/// 1. Sanitizing
/// 2. Completion
/// 3. Identity enforcement (title, footer)
/// 4. Math normalization, when any math repair is enabled
///
/// The resulting text always ends with a line break, which keeps the pipeline idempotent
/// even though sanitizing trims its input.
pub fn document_pipeline(topic: &str, options: &PipelineOptions) -> DocumentTransform {
    let text = Transform::from_fn(|s: String| Ok(s))
        .then(Sanitize::new())
        .then(Complete::new(options.skeleton.clone()))
        .then(EnforceIdentity::new(topic, options.identity.clone()));
    let text = if options.math.is_active() {
        text.then(NormalizeMath::new(options.math.clone()))
    } else {
        text
    };
    text.then(Transform::from_fn(|mut s: String| {
        if !s.ends_with('\n') {
            s.push('\n');
        }
        Ok(Document::new(s))
    }))
}
