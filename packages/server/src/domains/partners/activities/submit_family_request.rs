use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use super::{authorize, plan_child_requests};
use crate::common::{PartnerRequestId, PartnerUserId};
use crate::domains::partners::data::FamilyRequestForm;
use crate::domains::partners::models::{
    Child, ChildItemRequest, ItemRequest, Partner, PartnerRequest, CHILD_REQUEST_TYPE,
};

/// Notice shown after every accepted submission
pub const REQUEST_SUCCESS_NOTICE: &str = "Requested items successfully!";

/// What a submission wrote
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// None when no selected child was eligible
    pub partner_request_id: Option<PartnerRequestId>,
    pub child_item_request_count: usize,
    pub skipped_child_count: usize,
}

/// Submit a family request for an approved partner
///
/// Creates one request, its item lines and one child item request per
/// (eligible child, needed item) in a single transaction. Nothing is
/// written when the plan is empty. Submissions are not deduplicated.
pub async fn submit_family_request(
    user_id: PartnerUserId,
    partner: &Partner,
    form: &FamilyRequestForm,
    default_item_quantity: i32,
    pool: &PgPool,
) -> Result<SubmissionOutcome> {
    if let Err(denied) = authorize(user_id, partner) {
        return Err(denied.reason.into());
    }

    let children = Child::find_by_partner(partner.id, pool)
        .await
        .context("Failed to load partner children")?;
    let plan = plan_child_requests(&children, form, default_item_quantity);

    info!(
        partner_id = %partner.id,
        user_id = %user_id,
        selected = form.selected_count(),
        requested = plan.requested_children.len(),
        skipped = plan.skipped_children.len(),
        "Submitting family request"
    );

    if plan.is_empty() {
        return Ok(SubmissionOutcome {
            partner_request_id: None,
            child_item_request_count: 0,
            skipped_child_count: plan.skipped_children.len(),
        });
    }

    let mut tx = pool.begin().await?;

    let request = PartnerRequest::insert(
        partner.id,
        user_id,
        form.comments.as_deref(),
        CHILD_REQUEST_TYPE,
        &mut *tx,
    )
    .await?;

    let mut child_item_request_count = 0;
    for line in &plan.item_lines {
        let item_request = ItemRequest::insert(
            request.id,
            line.item_id,
            line.quantity,
            line.person_count(),
            &mut *tx,
        )
        .await?;

        for child_id in &line.child_ids {
            ChildItemRequest::insert(*child_id, item_request.id, request.id, &mut *tx).await?;
            child_item_request_count += 1;
        }
    }

    tx.commit().await?;

    info!(
        partner_request_id = %request.id,
        item_lines = plan.item_lines.len(),
        child_item_requests = child_item_request_count,
        "Family request created"
    );

    Ok(SubmissionOutcome {
        partner_request_id: Some(request.id),
        child_item_request_count,
        skipped_child_count: plan.skipped_children.len(),
    })
}
