//! SafeSpot core: the state and logic behind the parking-spot-finder app.
//!
//! The platform UI renders; this crate owns everything else:
//! - `state/`: state types the UI reads (`#[state("path")]`)
//! - `request/`: request types the UI emits (`#[request("path")]`)
//! - `handlers/`: handler implementations and Flux wiring
//! - `gate`: the Authentication Gate and its reducer
//! - `provider/`: identity and geocoding contracts
//!
//! ```ignore
//! let flux = Flux::new();
//! let bff = SafeSpotBff::new(&flux, config, identity, geocoder, kv);
//! bff.register(&flux);
//! flux.request(InitializeReq).await;
//! flux.request(LoginReq { identifier, secret }).await;
//! assert!(flux.read::<AuthState>().unwrap().is_active());
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod messages;
pub mod provider;
pub mod request;
pub mod state;
pub mod storage;
pub mod validate;

pub use config::{AppConfig, RacePolicy};
pub use error::{ProfileError, ValidationError};
pub use gate::{AuthGate, AuthMsg, AuthOutcome, AuthReducer};
pub use handlers::SafeSpotBff;
