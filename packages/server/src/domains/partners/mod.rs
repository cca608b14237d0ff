//! Partners domain - families, children and the requests made for them
//!
//! Responsibilities:
//! - Partner status gate for request submission
//! - Planning and persisting child item requests
//! - Dry-run validation of a family request form

pub mod activities;
pub mod data;
pub mod models;

pub use activities::{
    authorize, plan_child_requests, submit_family_request, validate_family_request,
    FamilyRequestPlan, FamilyRequestValidation, RequestDenied, Requester, SubmissionOutcome,
    REQUESTS_PATH, REQUEST_SUCCESS_NOTICE,
};
pub use data::FamilyRequestForm;
