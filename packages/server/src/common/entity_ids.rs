//! Typed ID definitions for the partner domain.
//!
//! ```rust
//! use partner_core::common::{ChildId, FamilyId};
//!
//! let family_id = FamilyId::new();
//! let child_id = ChildId::new();
//!
//! // This would be a compile error:
//! // let wrong: ChildId = family_id;
//! # let _ = (family_id, child_id);
//! ```

use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Partner entities (organizations requesting aid).
pub struct Partner;

/// Marker type for PartnerUser entities (people who sign in for a partner).
pub struct PartnerUser;

/// Marker type for Family entities.
pub struct Family;

/// Marker type for Child entities.
pub struct Child;

/// Marker type for PartnerRequest entities (one submitted request).
pub struct PartnerRequest;

/// Marker type for ItemRequest entities (one item line of a request).
pub struct ItemRequest;

/// Marker type for ChildItemRequest entities.
pub struct ChildItemRequest;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type PartnerId = Id<Partner>;

pub type PartnerUserId = Id<PartnerUser>;

pub type FamilyId = Id<Family>;

pub type ChildId = Id<Child>;

/// Typed ID for a submitted request (`partner_requests` row).
pub type PartnerRequestId = Id<PartnerRequest>;

pub type ItemRequestId = Id<ItemRequest>;

pub type ChildItemRequestId = Id<ChildItemRequest>;
