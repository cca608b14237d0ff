use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::{authorize, plan_child_requests};
use crate::common::{PartnerId, PartnerUserId};
use crate::domains::auth::CsrfService;
use crate::domains::partners::data::FamilyRequestForm;
use crate::domains::partners::models::{Child, Partner};

/// Body of the validate endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyRequestValidation {
    pub valid: bool,
}

impl FamilyRequestValidation {
    pub const VALID: Self = Self { valid: true };
    pub const INVALID: Self = Self { valid: false };
}

/// Caller identity as seen by the validate endpoint
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: PartnerUserId,
    pub partner_id: PartnerId,
}

/// Dry-run a family request
///
/// Never fails: a missing user, a bad authenticity token (while forgery
/// protection is on), an unapproved partner, an empty plan and database
/// errors all answer `valid: false`.
pub async fn validate_family_request(
    requester: Option<Requester>,
    form: &FamilyRequestForm,
    header_token: Option<&str>,
    csrf: &CsrfService,
    forgery_protection: bool,
    default_item_quantity: i32,
    pool: &PgPool,
) -> FamilyRequestValidation {
    let Some(requester) = requester else {
        debug!("Validate called without a signed-in user");
        return FamilyRequestValidation::INVALID;
    };

    let token = header_token.or(form.authenticity_token.as_deref());
    if forgery_protection && !csrf.verify(requester.user_id, token) {
        warn!(user_id = %requester.user_id, "Can't verify authenticity token");
        return FamilyRequestValidation::INVALID;
    }

    let partner = match Partner::find_by_id_optional(requester.partner_id, pool).await {
        Ok(Some(partner)) => partner,
        Ok(None) => return FamilyRequestValidation::INVALID,
        Err(e) => {
            warn!(error = %e, "Failed to load partner during validation");
            return FamilyRequestValidation::INVALID;
        }
    };

    if authorize(requester.user_id, &partner).is_err() {
        return FamilyRequestValidation::INVALID;
    }

    let children = match Child::find_by_partner(partner.id, pool).await {
        Ok(children) => children,
        Err(e) => {
            warn!(error = %e, "Failed to load children during validation");
            return FamilyRequestValidation::INVALID;
        }
    };

    let plan = plan_child_requests(&children, form, default_item_quantity);
    FamilyRequestValidation {
        valid: !plan.is_empty(),
    }
}
