mod family_request_form;

pub use family_request_form::*;
