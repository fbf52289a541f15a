//! App lifecycle and navigation handlers.

use safespot_flux::StateStore;

use crate::handlers::helpers;
use crate::request::*;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(store: &StateStore) {
    store.put(AuthState::unauthenticated());
    store.put(ValidationState::clean());
    store.put(LoginNotice::default());
    store.put(AppRoute::Login);
}

/// Handle `app/navigate`.
///
/// Protected tabs require an active session; refused navigation leaves
/// the route unchanged.
pub async fn handle_navigate(req: &NavigateReq, store: &StateStore) {
    if req.route.is_protected() && !helpers::require_session(store, req.route.as_path()) {
        return;
    }
    match req.route {
        AppRoute::Register => store.put(RegisterState::default()),
        AppRoute::ForgotPassword => store.put(ResetState::default()),
        _ => {}
    }
    store.put(req.route);
}
