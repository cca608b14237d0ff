/// Authorization for partner users
///
/// Provides a fluent API for status-gated checks:
///
/// ```rust
/// use partner_core::common::auth::{Actor, PartnerCapability};
/// use partner_core::common::{PartnerId, PartnerUserId};
/// use partner_core::domains::partners::models::PartnerStatus;
///
/// let result = Actor::new(PartnerUserId::new(), PartnerId::new(), PartnerStatus::Approved)
///     .can(PartnerCapability::SubmitRequests)
///     .check();
/// assert!(result.is_ok());
/// ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::PartnerCapability;
pub use errors::AuthError;
