//! Map search handler.

use safespot_flux::StateStore;

use crate::handlers::helpers;
use crate::provider::Geocoder;
use crate::request::*;
use crate::state::*;

/// Handle `map/search`.
///
/// Success re-centers the region on the result and replaces the pin.
/// Failure is logged only; the map stays as it was. A result that arrives
/// after the session that asked for it has ended is dropped.
pub async fn handle_search(req: &MapSearchReq, store: &StateStore, geocoder: &dyn Geocoder, default_region: Region) {
    if !helpers::require_session(store, MapSearchReq::PATH) {
        return;
    }
    let Some(owner) = helpers::current_session(store) else {
        return;
    };
    let address = req.address.trim();
    if address.is_empty() {
        tracing::debug!("ignoring blank map search");
        return;
    }

    let before = store.update(
        || MapState::centered(default_region),
        |m| m.searching = true,
    );

    let result = geocoder.geocode(address).await;
    if helpers::current_session(store).as_ref() != Some(&owner) {
        tracing::debug!(uid = %owner.uid, "session ended during map search, dropping result");
        return;
    }

    match result {
        Ok(coordinate) => {
            tracing::debug!(lat = coordinate.latitude, lon = coordinate.longitude, "address resolved");
            store.put(MapState {
                region: Region {
                    center: coordinate,
                    span: before.region.span,
                },
                pin: Some(Pin {
                    coordinate,
                    title: address.to_string(),
                }),
                query: address.to_string(),
                searching: false,
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, "geocoding failed");
            store.put(MapState {
                searching: false,
                ..before
            });
        }
    }
}
