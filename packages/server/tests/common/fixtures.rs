//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use partner_core::domains::partners::models::{
    Child, Family, Partner, PartnerStatus, PartnerUser,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Item every fixture child needs unless told otherwise
pub const DIAPERS_SIZE_4: i64 = 101;

/// A partner with its primary user
pub struct TestPartner {
    pub partner: Partner,
    pub user: PartnerUser,
}

/// Create a partner in the given status with one user
pub async fn create_test_partner(pool: &PgPool, status: PartnerStatus) -> Result<TestPartner> {
    let partner = Partner::create("Little Steps Family Center", status, pool).await?;
    let email = format!("coordinator-{}@partner.org", Uuid::new_v4());
    let user = PartnerUser::create(partner.id, &email, Some("Pat Coordinator"), pool).await?;

    Ok(TestPartner { partner, user })
}

/// Create a family with `count` active children who each need diapers
pub async fn create_test_family_with_children(
    pool: &PgPool,
    partner: &Partner,
    count: usize,
) -> Result<(Family, Vec<Child>)> {
    let family = Family::create(partner.id, "Jordan", "Reyes", pool).await?;

    let mut children = Vec::with_capacity(count);
    for i in 0..count {
        let child = Child::create(
            family.id,
            &format!("Child{}", i),
            "Reyes",
            true,
            &[DIAPERS_SIZE_4],
            pool,
        )
        .await?;
        children.push(child);
    }

    Ok((family, children))
}

/// Form fields selecting every given child
pub fn select_children(children: &[Child]) -> Vec<(String, String)> {
    children
        .iter()
        .map(|child| (format!("child-{}", child.id), "true".to_string()))
        .collect()
}
