//! Auth requests.

use flux_derive::request;

use crate::provider::Secret;

/// Submit login credentials. No client-side format check.
#[request("auth/login")]
pub struct LoginReq {
    pub identifier: String,
    pub secret: Secret,
}

/// Close the session and return to the login screen.
#[request("auth/logout")]
pub struct LogoutReq;

/// Dismiss the invalid-credentials notice.
#[request("auth/dismiss-notice")]
pub struct DismissNoticeReq;
