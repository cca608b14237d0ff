// Partner Family Requests - API Core
//
// Backend for charity partners submitting item requests on behalf of the
// children in their families. Partner status gates every submission.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
