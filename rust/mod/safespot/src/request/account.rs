//! Registration and password-reset requests.

use flux_derive::request;

use crate::provider::Secret;

/// Create an account. Validation is left entirely to the provider.
#[request("register/submit")]
pub struct RegisterReq {
    pub identifier: String,
    pub secret: Secret,
}

/// Ask the provider to send reset instructions.
#[request("reset/submit")]
pub struct ResetPasswordReq {
    pub identifier: String,
}
