//! Map requests.

use flux_derive::request;

/// Geocode an address and drop a pin on it.
#[request("map/search")]
pub struct MapSearchReq {
    pub address: String,
}
