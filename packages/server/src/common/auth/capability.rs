/// Things a partner user may attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerCapability {
    /// Open the family request form or submit it
    SubmitRequests,

    /// See the partner's own request history
    ViewRequests,
}

impl PartnerCapability {
    /// Check if this capability is limited to approved partners
    pub fn requires_approval(&self) -> bool {
        match self {
            PartnerCapability::SubmitRequests => true,
            PartnerCapability::ViewRequests => false,
        }
    }
}
