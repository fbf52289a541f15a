//! Map search: `map/state`.

use flux_derive::state;
use serde::Serialize;

use crate::provider::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Visible map region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub center: Coordinate,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub coordinate: Coordinate,
    pub title: String,
}

#[state("map/state")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    pub region: Region,
    /// Zero or one annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<Pin>,
    pub query: String,
    pub searching: bool,
}

impl MapState {
    pub fn centered(region: Region) -> Self {
        Self {
            region,
            pin: None,
            query: String::new(),
            searching: false,
        }
    }
}
