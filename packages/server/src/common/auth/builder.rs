use super::{AuthError, PartnerCapability};
use crate::common::entity_ids::{PartnerId, PartnerUserId};
use crate::domains::partners::models::PartnerStatus;

/// Entry point for authorization checks
///
/// Usage:
/// ```ignore
/// Actor::new(user.user_id, partner.id, partner.status)
///     .can(PartnerCapability::SubmitRequests)
///     .check()?;
/// ```
pub struct Actor {
    user_id: PartnerUserId,
    partner_id: PartnerId,
    status: PartnerStatus,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `user_id` - The signed-in partner user
    /// * `partner_id` - The partner the user acts for
    /// * `status` - The partner's current status, freshly loaded from the database
    pub fn new(user_id: PartnerUserId, partner_id: PartnerId, status: PartnerStatus) -> Self {
        Self {
            user_id,
            partner_id,
            status,
        }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: PartnerCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: PartnerCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        check_partner_permission(&self.actor, self.capability)
    }
}

fn check_partner_permission(actor: &Actor, capability: PartnerCapability) -> Result<(), AuthError> {
    if !capability.requires_approval() {
        return Ok(());
    }

    let result = match actor.status {
        PartnerStatus::Approved => Ok(()),
        PartnerStatus::Deactivated => Err(AuthError::PartnerDeactivated),
        PartnerStatus::Uninvited
        | PartnerStatus::Invited
        | PartnerStatus::AwaitingReview
        | PartnerStatus::Error
        | PartnerStatus::RecertificationRequired => Err(AuthError::PartnerNotApproved),
    };

    if result.is_err() {
        tracing::warn!(
            user_id = %actor.user_id,
            partner_id = %actor.partner_id,
            status = %actor.status,
            capability = ?capability,
            "Partner capability denied"
        );
    }

    result
}
