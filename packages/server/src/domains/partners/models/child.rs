use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ChildId, FamilyId, PartnerId};

/// Child model - a beneficiary within a family
///
/// `requested_item_ids` lists the items the child currently needs.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Child {
    pub id: ChildId,
    pub family_id: FamilyId,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub requested_item_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Child {
    /// A child can be requested for only while active and needing something
    pub fn is_eligible(&self) -> bool {
        self.active && !self.requested_item_ids.is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Every child across all families of a partner
    pub async fn find_by_partner(partner_id: PartnerId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT c.*
             FROM children c
             JOIN families f ON f.id = c.family_id
             WHERE f.partner_id = $1
             ORDER BY f.created_at, f.id, c.created_at, c.id",
        )
        .bind(partner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(
        family_id: FamilyId,
        first_name: &str,
        last_name: &str,
        active: bool,
        requested_item_ids: &[i64],
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO children (family_id, first_name, last_name, active, requested_item_ids)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(family_id)
        .bind(first_name)
        .bind(last_name)
        .bind(active)
        .bind(requested_item_ids)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_active(id: ChildId, active: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("UPDATE children SET active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(active)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn update_requested_items(
        id: ChildId,
        requested_item_ids: &[i64],
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE children SET requested_item_ids = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(requested_item_ids)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
