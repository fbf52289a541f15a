//! Handler implementations and Flux wiring.
//!
//! `SafeSpotBff::register` binds each request type to its handler; the
//! typed payload downcast happens in `Flux::on_request`.

pub mod account_handlers;
pub mod app_handlers;
pub mod auth_handlers;
pub mod helpers;
pub mod map_handlers;
pub mod profile_handlers;

use std::sync::Arc;

use safespot_flux::{Flux, I18nStore};
use safespot_kv::KVStore;

use crate::config::AppConfig;
use crate::gate::AuthGate;
use crate::messages;
use crate::provider::{Geocoder, IdentityProvider};
use crate::request::*;
use crate::storage::ProfileStore;

/// Backend context shared by all handlers.
pub struct SafeSpotBff {
    pub gate: AuthGate,
    pub identity: Arc<dyn IdentityProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub profiles: ProfileStore,
    pub i18n: Arc<I18nStore>,
    pub config: AppConfig,
}

impl SafeSpotBff {
    /// Build the context for `flux`. Spawns the auth reducer, so this must
    /// run inside a tokio runtime.
    pub fn new(
        flux: &Flux,
        config: AppConfig,
        identity: Arc<dyn IdentityProvider>,
        geocoder: Arc<dyn Geocoder>,
        kv: Arc<dyn KVStore>,
    ) -> Arc<Self> {
        let i18n = messages::store(&config.locale);
        let gate = AuthGate::spawn(
            Arc::clone(&identity),
            config.race_policy,
            &i18n,
            Arc::clone(flux.store()),
        );
        Arc::new(Self {
            gate,
            identity,
            geocoder,
            profiles: ProfileStore::new(kv),
            i18n,
            config,
        })
    }

    /// Register every request handler with `flux`.
    pub fn register(self: &Arc<Self>, flux: &Flux) {
        // app/initialize
        flux.on_request::<InitializeReq, _, _>(|_, store| async move {
            app_handlers::handle_initialize(&store).await;
        });

        // app/navigate
        flux.on_request::<NavigateReq, _, _>(|req, store| async move {
            app_handlers::handle_navigate(&req, &store).await;
        });

        // auth/login
        {
            let bff = Arc::clone(self);
            flux.on_request::<LoginReq, _, _>(move |req, _| {
                let bff = Arc::clone(&bff);
                async move {
                    auth_handlers::handle_login(&req, &bff.gate).await;
                }
            });
        }

        // auth/logout
        {
            let bff = Arc::clone(self);
            flux.on_request::<LogoutReq, _, _>(move |_, _| {
                let bff = Arc::clone(&bff);
                async move {
                    auth_handlers::handle_logout(&bff.gate).await;
                }
            });
        }

        // auth/dismiss-notice
        {
            let bff = Arc::clone(self);
            flux.on_request::<DismissNoticeReq, _, _>(move |_, _| {
                let bff = Arc::clone(&bff);
                async move {
                    auth_handlers::handle_dismiss_notice(&bff.gate).await;
                }
            });
        }

        // register/submit
        {
            let bff = Arc::clone(self);
            flux.on_request::<RegisterReq, _, _>(move |req, store| {
                let bff = Arc::clone(&bff);
                async move {
                    account_handlers::handle_register(&req, &store, bff.identity.as_ref(), &bff.i18n).await;
                }
            });
        }

        // reset/submit
        {
            let bff = Arc::clone(self);
            flux.on_request::<ResetPasswordReq, _, _>(move |req, store| {
                let bff = Arc::clone(&bff);
                async move {
                    account_handlers::handle_reset(&req, &store, bff.identity.as_ref(), &bff.i18n).await;
                }
            });
        }

        // profile/load
        {
            let bff = Arc::clone(self);
            flux.on_request::<LoadProfileReq, _, _>(move |_, store| {
                let bff = Arc::clone(&bff);
                async move {
                    profile_handlers::handle_load(&store, &bff.profiles).await;
                }
            });
        }

        // profile/update-field
        flux.on_request::<UpdateProfileFieldReq, _, _>(|req, store| async move {
            profile_handlers::handle_update_field(&req, &store).await;
        });

        // profile/save
        {
            let bff = Arc::clone(self);
            flux.on_request::<SaveProfileReq, _, _>(move |_, store| {
                let bff = Arc::clone(&bff);
                async move {
                    profile_handlers::handle_save(&store, &bff.profiles).await;
                }
            });
        }

        // map/search
        {
            let bff = Arc::clone(self);
            flux.on_request::<MapSearchReq, _, _>(move |req, store| {
                let bff = Arc::clone(&bff);
                async move {
                    map_handlers::handle_search(
                        &req,
                        &store,
                        bff.geocoder.as_ref(),
                        bff.config.default_region,
                    )
                    .await;
                }
            });
        }
    }
}
