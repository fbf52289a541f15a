//! Shared helpers for handlers.

use safespot_flux::StateStore;

use crate::provider::SessionRef;
use crate::state::AuthState;

/// Whether the session gate is open.
pub fn session_active(store: &StateStore) -> bool {
    store.read::<AuthState>().is_some_and(|s| s.is_active())
}

/// The session currently holding the gate open, if any.
pub fn current_session(store: &StateStore) -> Option<SessionRef> {
    store.read::<AuthState>().and_then(|s| s.session_ref().cloned())
}

/// Log and report a request that needs an active session.
///
/// Returns `true` when the caller may proceed.
pub fn require_session(store: &StateStore, request: &str) -> bool {
    let active = session_active(store);
    if !active {
        tracing::warn!(request, "refused: no active session");
    }
    active
}
