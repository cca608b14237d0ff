//! Partner request history, the landing page after every family request redirect.

use axum::{
    extract::{Extension, Path},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::{Actor, PartnerCapability, PartnerRequestId};
use crate::domains::partners::models::{ChildItemRequest, ItemRequest, Partner, PartnerRequest};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::flash::{Flash, FlashKind};
use crate::server::middleware::AuthUser;

#[derive(Serialize)]
pub struct RequestListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    pub requests: Vec<PartnerRequest>,
}

#[derive(Serialize)]
pub struct RequestDetailResponse {
    pub request: PartnerRequest,
    pub item_requests: Vec<ItemRequest>,
    pub child_item_requests: Vec<ChildItemRequest>,
}

async fn viewing_partner(user: &AuthUser, state: &AppState) -> Result<Partner, ApiError> {
    let partner = Partner::find_by_id_optional(user.partner_id, &state.db_pool)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Actor::new(user.user_id, partner.id, partner.status)
        .can(PartnerCapability::ViewRequests)
        .check()?;

    Ok(partner)
}

/// GET /partners/requests
///
/// Consumes the flash message left by the previous redirect.
pub async fn list_requests(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::Unauthenticated);
    };
    let partner = viewing_partner(&user, &state).await?;
    let requests = PartnerRequest::find_by_partner(partner.id, &state.db_pool).await?;

    let flash = Flash::from_headers(&headers);
    let (notice, alert) = match &flash {
        Some(Flash {
            kind: FlashKind::Notice,
            message,
        }) => (Some(message.clone()), None),
        Some(Flash {
            kind: FlashKind::Alert,
            message,
        }) => (None, Some(message.clone())),
        None => (None, None),
    };

    let mut response = Json(RequestListResponse {
        notice,
        alert,
        requests,
    })
    .into_response();

    if flash.is_some() {
        if let Ok(cookie) = HeaderValue::from_str(&Flash::clear_cookie()) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
    }

    Ok(response)
}

/// GET /partners/requests/:id
pub async fn show_request(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<PartnerRequestId>,
) -> Result<Json<RequestDetailResponse>, ApiError> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::Unauthenticated);
    };
    let partner = viewing_partner(&user, &state).await?;

    let request = PartnerRequest::find_for_partner(id, partner.id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound)?;
    let item_requests = ItemRequest::find_by_request(request.id, &state.db_pool).await?;
    let child_item_requests = ChildItemRequest::find_by_request(request.id, &state.db_pool).await?;

    Ok(Json(RequestDetailResponse {
        request,
        item_requests,
        child_item_requests,
    }))
}
