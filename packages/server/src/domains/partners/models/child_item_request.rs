use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ChildId, ChildItemRequestId, ItemRequestId, PartnerRequestId};

/// Links a child to the item line requested on its behalf
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChildItemRequest {
    pub id: ChildItemRequestId,
    pub child_id: ChildId,
    pub item_request_id: ItemRequestId,
    pub partner_request_id: PartnerRequestId,
    pub created_at: DateTime<Utc>,
}

impl ChildItemRequest {
    pub async fn insert(
        child_id: ChildId,
        item_request_id: ItemRequestId,
        partner_request_id: PartnerRequestId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO child_item_requests (child_id, item_request_id, partner_request_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(child_id)
        .bind(item_request_id)
        .bind(partner_request_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// First record for a child, if any
    pub async fn find_by_child(child_id: ChildId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM child_item_requests WHERE child_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(child_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_request(
        partner_request_id: PartnerRequestId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM child_item_requests WHERE partner_request_id = $1 ORDER BY created_at, id",
        )
        .bind(partner_request_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_by_child(child_id: ChildId, pool: &PgPool) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM child_item_requests WHERE child_id = $1")
                .bind(child_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
