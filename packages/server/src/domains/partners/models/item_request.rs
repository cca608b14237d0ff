use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ItemRequestId, PartnerRequestId};

/// One item line of a request
///
/// `person_count` is how many selected children need the item; `quantity`
/// is the number of units asked of the bank.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemRequest {
    pub id: ItemRequestId,
    pub partner_request_id: PartnerRequestId,
    pub item_id: i64,
    pub quantity: i32,
    pub person_count: i32,
}

impl ItemRequest {
    pub async fn insert(
        partner_request_id: PartnerRequestId,
        item_id: i64,
        quantity: i32,
        person_count: i32,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO item_requests (partner_request_id, item_id, quantity, person_count)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(partner_request_id)
        .bind(item_id)
        .bind(quantity)
        .bind(person_count)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_request(
        partner_request_id: PartnerRequestId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM item_requests WHERE partner_request_id = $1 ORDER BY item_id",
        )
        .bind(partner_request_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
