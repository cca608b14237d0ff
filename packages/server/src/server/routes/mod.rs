// HTTP routes
pub mod family_requests;
pub mod health;
pub mod requests;

pub use family_requests::*;
pub use health::*;
pub use requests::*;
