//! Registration and password-reset handlers.
//!
//! Neither flow touches the session gate or the route; their outcomes are
//! advisory text on their own screens.

use safespot_flux::{I18nStore, QueryParams, StateStore};

use crate::messages;
use crate::provider::IdentityProvider;
use crate::request::*;
use crate::state::*;
use crate::validate;

/// Handle `register/submit`.
///
/// No local validation: every outcome comes from the provider, and
/// provider errors are shown verbatim.
pub async fn handle_register(
    req: &RegisterReq,
    store: &StateStore,
    identity: &dyn IdentityProvider,
    i18n: &I18nStore,
) {
    store.put(RegisterState {
        busy: true,
        confirmation: None,
        error: None,
    });

    match identity.create_account(&req.identifier, &req.secret).await {
        Ok(session) => {
            tracing::info!(uid = %session.uid, "account created");
            store.put(RegisterState {
                busy: false,
                confirmation: Some(i18n.format(
                    messages::ACCOUNT_CREATED,
                    &QueryParams::default().with("email", &req.identifier),
                )),
                error: None,
            });
        }
        Err(e) => {
            tracing::info!(code = %e.code, "account creation failed");
            store.put(RegisterState {
                busy: false,
                confirmation: None,
                error: Some(e.message),
            });
        }
    }
}

/// Handle `reset/submit`.
///
/// The identifier must pass the email shape check before the provider is
/// called; a failing identifier costs no network call.
pub async fn handle_reset(
    req: &ResetPasswordReq,
    store: &StateStore,
    identity: &dyn IdentityProvider,
    i18n: &I18nStore,
) {
    if let Err(e) = validate::check_email(&req.identifier) {
        tracing::debug!(error = %e, "reset refused locally");
        store.put(ResetState {
            busy: false,
            confirmation: None,
            error: Some(i18n.get(messages::INVALID_EMAIL)),
        });
        return;
    }

    store.put(ResetState {
        busy: true,
        confirmation: None,
        error: None,
    });

    match identity.send_password_reset(&req.identifier).await {
        Ok(()) => {
            tracing::info!("password reset dispatched");
            let params = QueryParams::default().with("email", &req.identifier);
            store.put(ResetState {
                busy: false,
                confirmation: Some(i18n.format(messages::RESET_SENT, &params)),
                error: None,
            });
        }
        Err(e) => {
            tracing::info!(code = %e.code, "password reset failed");
            store.put(ResetState {
                busy: false,
                confirmation: None,
                error: Some(e.message),
            });
        }
    }
}
