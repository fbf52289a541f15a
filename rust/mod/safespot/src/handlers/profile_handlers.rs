//! Account settings handlers.

use safespot_flux::StateStore;

use crate::handlers::helpers;
use crate::request::*;
use crate::state::*;
use crate::storage::ProfileStore;

/// Handle `profile/load`: runs when the account screen is entered.
pub async fn handle_load(store: &StateStore, profiles: &ProfileStore) {
    if !helpers::require_session(store, LoadProfileReq::PATH) {
        return;
    }
    let state = match profiles.load() {
        Ok(profile) => ProfileState {
            profile,
            ..ProfileState::default()
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to load profile");
            ProfileState {
                error: Some(e.to_string()),
                ..ProfileState::default()
            }
        }
    };
    store.put(state);
}

/// Handle `profile/update-field`.
pub async fn handle_update_field(req: &UpdateProfileFieldReq, store: &StateStore) {
    if !helpers::require_session(store, UpdateProfileFieldReq::PATH) {
        return;
    }
    store.update(ProfileState::default, |state| {
        state.profile.set_field(req.field, req.value.clone());
        state.dirty = true;
        state.saved = false;
    });
}

/// Handle `profile/save`: explicit user action only.
pub async fn handle_save(store: &StateStore, profiles: &ProfileStore) {
    if !helpers::require_session(store, SaveProfileReq::PATH) {
        return;
    }
    let mut state = store.read::<ProfileState>().unwrap_or_default();
    match profiles.save(&state.profile) {
        Ok(()) => {
            tracing::info!("profile saved");
            state.dirty = false;
            state.saved = true;
            state.error = None;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save profile");
            state.saved = false;
            state.error = Some(e.to_string());
        }
    }
    store.put(state);
}
