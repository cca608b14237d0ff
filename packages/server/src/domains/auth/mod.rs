//! Auth domain - partner user tokens and anti-forgery tokens
//!
//! Responsibilities:
//! - JWT issue/verify for signed-in partner users
//! - Authenticity (CSRF) tokens bound to the signed-in user

pub mod csrf;
pub mod jwt;

pub use csrf::{CsrfService, AUTHENTICITY_TOKEN_FIELD, CSRF_HEADER};
pub use jwt::{Claims, JwtService};
