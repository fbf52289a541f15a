//! Auth state: `auth/state`, `auth/validation`, `auth/notice`.

use flux_derive::state;
use serde::Serialize;

use crate::provider::SessionRef;

/// Session gate. The protected area is reachable only while `Authenticated`.
#[state("auth/state")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub session: Session,
    /// A sign-in attempt is outstanding.
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum Session {
    Unauthenticated,
    Authenticated { session: SessionRef },
}

impl AuthState {
    pub fn unauthenticated() -> Self {
        Self {
            session: Session::Unauthenticated,
            busy: false,
        }
    }

    /// The session-active gate.
    pub fn is_active(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    pub fn session_ref(&self) -> Option<&SessionRef> {
        match &self.session {
            Session::Authenticated { session } => Some(session),
            Session::Unauthenticated => None,
        }
    }
}

/// Field error indicators on the login form.
#[state("auth/validation")]
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    pub identifier_invalid: bool,
    pub secret_invalid: bool,
}

impl ValidationState {
    pub fn clean() -> Self {
        Self::default()
    }

    /// Both flags set. Sign-in failures never say which field was wrong.
    pub fn rejected() -> Self {
        Self {
            identifier_invalid: true,
            secret_invalid: true,
        }
    }
}

/// Modal notice on the login screen. `None` when dismissed.
#[state("auth/notice")]
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginNotice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
