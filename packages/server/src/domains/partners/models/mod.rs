pub mod child;
pub mod child_item_request;
pub mod family;
pub mod item_request;
pub mod partner;
pub mod partner_request;
pub mod partner_user;

pub use child::Child;
pub use child_item_request::ChildItemRequest;
pub use family::Family;
pub use item_request::ItemRequest;
pub use partner::{Partner, PartnerStatus};
pub use partner_request::{PartnerRequest, CHILD_REQUEST_TYPE};
pub use partner_user::PartnerUser;
