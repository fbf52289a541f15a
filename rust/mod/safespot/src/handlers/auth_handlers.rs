//! Auth handler implementations.

use crate::gate::AuthGate;
use crate::request::*;

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, gate: &AuthGate) {
    gate.submit(&req.identifier, &req.secret).await;
}

/// Handle `auth/logout`.
pub async fn handle_logout(gate: &AuthGate) {
    gate.logout().await;
}

/// Handle `auth/dismiss-notice`.
pub async fn handle_dismiss_notice(gate: &AuthGate) {
    gate.dismiss_notice().await;
}
