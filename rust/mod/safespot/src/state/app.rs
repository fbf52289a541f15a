//! Navigation: `app/route`.

use flux_derive::state;
use serde::Serialize;

#[state("app/route")]
#[derive(Copy, Serialize)]
pub enum AppRoute {
    #[serde(rename = "/login")]
    Login,
    #[serde(rename = "/register")]
    Register,
    #[serde(rename = "/forgot-password")]
    ForgotPassword,
    #[serde(rename = "/home")]
    Home,
    #[serde(rename = "/rides")]
    Rides,
    #[serde(rename = "/help")]
    Help,
    #[serde(rename = "/account")]
    Account,
}

impl AppRoute {
    pub const ALL: [AppRoute; 7] = [
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::ForgotPassword,
        AppRoute::Home,
        AppRoute::Rides,
        AppRoute::Help,
        AppRoute::Account,
    ];

    pub fn as_path(self) -> &'static str {
        match self {
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::ForgotPassword => "/forgot-password",
            AppRoute::Home => "/home",
            AppRoute::Rides => "/rides",
            AppRoute::Help => "/help",
            AppRoute::Account => "/account",
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_path() == path)
    }

    /// Tabs of the home screen. Reachable only with an active session.
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            AppRoute::Home | AppRoute::Rides | AppRoute::Help | AppRoute::Account
        )
    }
}
