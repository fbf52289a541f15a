//! External collaborators: identity and geocoding.

pub mod geocode;
pub mod identity;

pub use geocode::{Coordinate, GeocodeError, Geocoder, StaticGeocoder};
pub use identity::{error_code, IdentityProvider, ProviderError, Secret, SessionRef, StaticIdentity};
