use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::PartnerId;

/// Partner lifecycle status
///
/// Moves between values outside the request flow (invitations, reviews,
/// deactivation by the bank). Only `Approved` partners may submit requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "partner_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Uninvited,
    Invited,
    AwaitingReview,
    Approved,
    Error,
    RecertificationRequired,
    Deactivated,
}

impl std::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerStatus::Uninvited => write!(f, "uninvited"),
            PartnerStatus::Invited => write!(f, "invited"),
            PartnerStatus::AwaitingReview => write!(f, "awaiting_review"),
            PartnerStatus::Approved => write!(f, "approved"),
            PartnerStatus::Error => write!(f, "error"),
            PartnerStatus::RecertificationRequired => write!(f, "recertification_required"),
            PartnerStatus::Deactivated => write!(f, "deactivated"),
        }
    }
}

impl std::str::FromStr for PartnerStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uninvited" => Ok(PartnerStatus::Uninvited),
            "invited" => Ok(PartnerStatus::Invited),
            "awaiting_review" => Ok(PartnerStatus::AwaitingReview),
            "approved" => Ok(PartnerStatus::Approved),
            "error" => Ok(PartnerStatus::Error),
            "recertification_required" => Ok(PartnerStatus::RecertificationRequired),
            "deactivated" => Ok(PartnerStatus::Deactivated),
            _ => Err(anyhow::anyhow!("Invalid partner status: {}", s)),
        }
    }
}

/// Partner model - an organization requesting items for its families
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub status: PartnerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    /// Find partner by ID
    pub async fn find_by_id(id: PartnerId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find partner by ID, returning None if missing
    pub async fn find_by_id_optional(id: PartnerId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new partner
    pub async fn create(name: &str, status: PartnerStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO partners (name, status) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update partner status
    pub async fn update_status(id: PartnerId, status: PartnerStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE partners SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_from_str() {
        for status in [
            PartnerStatus::Uninvited,
            PartnerStatus::Invited,
            PartnerStatus::AwaitingReview,
            PartnerStatus::Approved,
            PartnerStatus::Error,
            PartnerStatus::RecertificationRequired,
            PartnerStatus::Deactivated,
        ] {
            let parsed: PartnerStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("pending".parse::<PartnerStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&PartnerStatus::AwaitingReview).unwrap();
        assert_eq!(json, "\"awaiting_review\"");
    }
}
