//! Individual normalization stages
//!
//! Each stage implements [`Runnable`](crate::latex::transforms::Runnable) over the document
//! text and logs one `event=<stage>` line at debug level.

pub mod complete;
pub mod identity;
pub mod math;
pub mod sanitize;

pub use complete::Complete;
pub use identity::EnforceIdentity;
pub use math::NormalizeMath;
pub use sanitize::Sanitize;
