//! Geocoding provider contract.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    #[error("no location found for '{0}'")]
    NotFound(String),

    #[error("geocoder failed: {0}")]
    Provider(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Lookup-table geocoder. Addresses are matched trimmed and
/// case-insensitively.
#[derive(Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, address: &str, at: Coordinate) -> Self {
        self.places.insert(normalize(address), at);
        self
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.places
            .get(&normalize(address))
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))
    }
}
