//! App lifecycle requests.

use flux_derive::request;

use crate::state::AppRoute;

/// Seed initial state.
#[request("app/initialize")]
pub struct InitializeReq;

/// Move to another screen or tab.
#[request("app/navigate")]
pub struct NavigateReq {
    pub route: AppRoute,
}
