//! Family request endpoints: form data, submission and dry-run validation.

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, Extension},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::common::{ChildId, FamilyId};
use crate::domains::auth::CSRF_HEADER;
use crate::domains::partners::models::{Child, Family, Partner};
use crate::domains::partners::{
    authorize, submit_family_request, validate_family_request, FamilyRequestForm,
    FamilyRequestValidation, Requester, REQUESTS_PATH, REQUEST_SUCCESS_NOTICE,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::flash::{redirect_with_flash, Flash};
use crate::server::middleware::AuthUser;

#[derive(Serialize)]
pub struct NewFamilyRequestResponse {
    pub families: Vec<FamilyEntry>,
    pub authenticity_token: String,
}

#[derive(Serialize)]
pub struct FamilyEntry {
    pub id: FamilyId,
    pub guardian_name: String,
    pub children: Vec<ChildEntry>,
}

#[derive(Serialize)]
pub struct ChildEntry {
    pub id: ChildId,
    pub name: String,
    pub active: bool,
    pub requested_item_ids: Vec<i64>,
    pub eligible: bool,
}

/// Load the signed-in user's partner, treating a dangling partner id as unauthenticated
async fn current_partner(user: &AuthUser, state: &AppState) -> Result<Partner, ApiError> {
    Partner::find_by_id_optional(user.partner_id, &state.db_pool)
        .await?
        .ok_or(ApiError::Unauthenticated)
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok())
}

/// GET /partners/family_requests/new
///
/// Lists the partner's families and children for the request form.
pub async fn new_family_request(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Response, ApiError> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::Unauthenticated);
    };
    let partner = current_partner(&user, &state).await?;

    if let Err(denied) = authorize(user.user_id, &partner) {
        return Ok(redirect_with_flash(denied.redirect_to, Flash::alert(denied.alert())));
    }

    let families = Family::find_by_partner(partner.id, &state.db_pool).await?;
    let mut children_by_family: HashMap<FamilyId, Vec<Child>> = HashMap::new();
    for child in Child::find_by_partner(partner.id, &state.db_pool).await? {
        children_by_family.entry(child.family_id).or_default().push(child);
    }

    let families = families
        .into_iter()
        .map(|family| {
            let children = children_by_family
                .remove(&family.id)
                .unwrap_or_default()
                .into_iter()
                .map(|child| ChildEntry {
                    id: child.id,
                    name: child.full_name(),
                    active: child.active,
                    eligible: child.is_eligible(),
                    requested_item_ids: child.requested_item_ids,
                })
                .collect();

            FamilyEntry {
                id: family.id,
                guardian_name: family.guardian_name(),
                children,
            }
        })
        .collect();

    Ok(Json(NewFamilyRequestResponse {
        families,
        authenticity_token: state.csrf.token_for(user.user_id),
    })
    .into_response())
}

/// POST /partners/family_requests
pub async fn create_family_request(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::Unauthenticated);
    };
    let form = FamilyRequestForm::from_fields(&fields);

    if state.allow_forgery_protection {
        let token = header_token(&headers).or(form.authenticity_token.as_deref());
        if !state.csrf.verify(user.user_id, token) {
            warn!(user_id = %user.user_id, "Can't verify authenticity token");
            return Err(ApiError::InvalidAuthenticityToken);
        }
    }

    let partner = current_partner(&user, &state).await?;

    if let Err(denied) = authorize(user.user_id, &partner) {
        return Ok(redirect_with_flash(denied.redirect_to, Flash::alert(denied.alert())));
    }

    let outcome = submit_family_request(
        user.user_id,
        &partner,
        &form,
        state.default_item_quantity,
        &state.db_pool,
    )
    .await?;

    let redirect_to = match outcome.partner_request_id {
        Some(id) => format!("{}/{}", REQUESTS_PATH, id),
        None => {
            info!(partner_id = %partner.id, "No eligible children selected");
            REQUESTS_PATH.to_string()
        }
    };

    Ok(redirect_with_flash(&redirect_to, Flash::notice(REQUEST_SUCCESS_NOTICE)))
}

/// POST /partners/family_requests/validate
///
/// Always answers 200 with `{"valid": bool}`, whatever is wrong with the request.
pub async fn validate_family_request_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Json<FamilyRequestValidation> {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Validating without a form body");
            HashMap::new()
        }
    };
    let form = FamilyRequestForm::from_fields(&fields);
    let requester = user.map(|Extension(user)| Requester {
        user_id: user.user_id,
        partner_id: user.partner_id,
    });

    let validation = validate_family_request(
        requester,
        &form,
        header_token(&headers),
        &state.csrf,
        state.allow_forgery_protection,
        state.default_item_quantity,
        &state.db_pool,
    )
    .await;

    Json(validation)
}
