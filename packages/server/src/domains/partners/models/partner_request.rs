use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{PartnerId, PartnerRequestId, PartnerUserId};

/// Requests built from child selections carry this type
pub const CHILD_REQUEST_TYPE: &str = "child";

/// One submitted request - parent of its item lines
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PartnerRequest {
    pub id: PartnerRequestId,
    pub partner_id: PartnerId,
    pub partner_user_id: PartnerUserId,
    pub comments: Option<String>,
    pub request_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl PartnerRequest {
    /// Insert within an open transaction
    pub async fn insert(
        partner_id: PartnerId,
        partner_user_id: PartnerUserId,
        comments: Option<&str>,
        request_type: &str,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO partner_requests (partner_id, partner_user_id, comments, request_type)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(partner_id)
        .bind(partner_user_id)
        .bind(comments)
        .bind(request_type)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// The partner's requests, newest first
    pub async fn find_by_partner(partner_id: PartnerId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM partner_requests WHERE partner_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(partner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Scoped lookup so one partner never sees another's request
    pub async fn find_for_partner(
        id: PartnerRequestId,
        partner_id: PartnerId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM partner_requests WHERE id = $1 AND partner_id = $2",
        )
        .bind(id)
        .bind(partner_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_by_partner(partner_id: PartnerId, pool: &PgPool) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM partner_requests WHERE partner_id = $1")
                .bind(partner_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
