//! State definitions.
//!
//! Each type is stored at a well-known path (`#[state("path")]`). The
//! platform UI reads them and re-renders on change.

pub mod account;
pub mod app;
pub mod auth;
pub mod map;
pub mod profile;

pub use account::{RegisterState, ResetState};
pub use app::AppRoute;
pub use auth::{AuthState, LoginNotice, Session, ValidationState};
pub use map::{MapState, Pin, Region, Span};
pub use profile::{Profile, ProfileField, ProfileState};

use safespot_flux::StateValue;
use serde::Serialize;

/// Render a stored state value as JSON for a UI bridge or console.
///
/// Returns `None` for values that are not SafeSpot state types.
pub fn to_json(value: &StateValue) -> Option<serde_json::Value> {
    fn encode<T: Serialize + 'static>(value: &StateValue) -> Option<serde_json::Value> {
        value.downcast_ref::<T>().and_then(|v| serde_json::to_value(v).ok())
    }

    encode::<AuthState>(value)
        .or_else(|| encode::<ValidationState>(value))
        .or_else(|| encode::<LoginNotice>(value))
        .or_else(|| encode::<RegisterState>(value))
        .or_else(|| encode::<ResetState>(value))
        .or_else(|| encode::<ProfileState>(value))
        .or_else(|| encode::<MapState>(value))
        .or_else(|| encode::<AppRoute>(value))
}
