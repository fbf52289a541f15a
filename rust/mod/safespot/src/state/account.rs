//! Registration and password-reset screens.

use flux_derive::state;
use serde::Serialize;

/// Registration form feedback: `register/state`.
#[state("register/state")]
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterState {
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Forgot-password form feedback: `reset/state`.
#[state("reset/state")]
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResetState {
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
