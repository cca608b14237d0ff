use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FamilyId, PartnerId};

/// Family model - a household served by exactly one partner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Family {
    pub id: FamilyId,
    pub partner_id: PartnerId,
    pub guardian_first_name: String,
    pub guardian_last_name: String,
    pub created_at: DateTime<Utc>,
}

impl Family {
    /// All families of a partner, oldest first
    pub async fn find_by_partner(partner_id: PartnerId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM families WHERE partner_id = $1 ORDER BY created_at, id",
        )
        .bind(partner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(
        partner_id: PartnerId,
        guardian_first_name: &str,
        guardian_last_name: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO families (partner_id, guardian_first_name, guardian_last_name)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(partner_id)
        .bind(guardian_first_name)
        .bind(guardian_last_name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub fn guardian_name(&self) -> String {
        format!("{} {}", self.guardian_first_name, self.guardian_last_name)
            .trim()
            .to_string()
    }
}
