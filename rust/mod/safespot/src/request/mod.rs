//! Request definitions.
//!
//! Each struct is a typed payload with a `PATH` const (`#[request("path")]`).

pub mod account;
pub mod app;
pub mod auth;
pub mod map;
pub mod profile;

pub use account::{RegisterReq, ResetPasswordReq};
pub use app::{InitializeReq, NavigateReq};
pub use auth::{DismissNoticeReq, LoginReq, LogoutReq};
pub use map::MapSearchReq;
pub use profile::{LoadProfileReq, SaveProfileReq, UpdateProfileFieldReq};
