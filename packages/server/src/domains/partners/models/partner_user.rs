use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PartnerId, PartnerUserId};

/// A person who signs in on behalf of a partner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PartnerUser {
    pub id: PartnerUserId,
    pub partner_id: PartnerId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PartnerUser {
    pub async fn find_by_id(id: PartnerUserId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM partner_users WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new partner user
    pub async fn create(
        partner_id: PartnerId,
        email: &str,
        name: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO partner_users (partner_id, email, name)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(partner_id)
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
