use thiserror::Error;

/// Reasons a partner user is refused a capability
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Your account has been deactivated. Please contact the bank for assistance.")]
    PartnerDeactivated,

    #[error("Please review your application details and submit for approval in order to make a new request.")]
    PartnerNotApproved,
}
