//! Request Submission Gate
//!
//! Activities are plain async functions called from the HTTP handlers.
//! They do the work and return results directly.

mod authorize;
mod plan;
mod submit_family_request;
mod validate_family_request;

pub use authorize::*;
pub use plan::*;
pub use submit_family_request::*;
pub use validate_family_request::*;
