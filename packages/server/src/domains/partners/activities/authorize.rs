use crate::common::{Actor, AuthError, PartnerCapability, PartnerUserId};
use crate::domains::partners::models::Partner;

/// Listing page every denied partner is sent back to
pub const REQUESTS_PATH: &str = "/partners/requests";

/// Why a partner was turned away and where to send them
#[derive(Debug)]
pub struct RequestDenied {
    pub redirect_to: &'static str,
    pub reason: AuthError,
}

impl RequestDenied {
    /// Message shown to the partner after the redirect
    pub fn alert(&self) -> String {
        self.reason.to_string()
    }
}

/// Decide whether the partner may open or submit a family request
pub fn authorize(user_id: PartnerUserId, partner: &Partner) -> Result<(), RequestDenied> {
    Actor::new(user_id, partner.id, partner.status)
        .can(PartnerCapability::SubmitRequests)
        .check()
        .map_err(|reason| RequestDenied {
            redirect_to: REQUESTS_PATH,
            reason,
        })
}
