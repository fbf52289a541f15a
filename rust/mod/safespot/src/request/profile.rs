//! Profile requests.

use flux_derive::request;

use crate::state::ProfileField;

/// Load stored profile fields (account screen entry).
#[request("profile/load")]
pub struct LoadProfileReq;

/// Edit one field in memory.
#[request("profile/update-field")]
pub struct UpdateProfileFieldReq {
    pub field: ProfileField,
    pub value: String,
}

/// Persist the edited profile.
#[request("profile/save")]
pub struct SaveProfileReq;
