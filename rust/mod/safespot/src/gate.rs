//! Authentication Gate.
//!
//! A login attempt is numbered, announced to the reducer, sent to the
//! identity provider, and its outcome posted back as a message. The
//! reducer is the only writer of `auth/state`, `auth/validation`,
//! `auth/notice` and the login-driven route changes, so overlapping
//! attempts resolve by [`RacePolicy`] rather than by whichever callback
//! happens to touch shared state last.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use safespot_flux::{I18nStore, Mailbox, Reducer, StateStore};

use crate::config::RacePolicy;
use crate::messages;
use crate::provider::{IdentityProvider, ProviderError, Secret, SessionRef};
use crate::state::{AppRoute, AuthState, LoginNotice, MapState, ProfileState, Session, ValidationState};

/// Result of one sign-in call, as judged by the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(SessionRef),
    Rejected(ProviderError),
}

impl From<Result<SessionRef, ProviderError>> for AuthOutcome {
    fn from(result: Result<SessionRef, ProviderError>) -> Self {
        match result {
            Ok(session) => AuthOutcome::Authenticated(session),
            Err(e) => AuthOutcome::Rejected(e),
        }
    }
}

#[derive(Debug)]
pub enum AuthMsg {
    Submitted { attempt: u64 },
    Completed { attempt: u64, outcome: AuthOutcome },
    NoticeDismissed,
    LoggedOut,
}

/// Applies [`AuthMsg`]s to the store, one at a time.
pub struct AuthReducer {
    policy: RacePolicy,
    /// Highest attempt number announced so far.
    issued: u64,
    /// Under `LatestIssued`, outcomes for attempts below this are stale.
    floor: u64,
    /// Attempts below this were issued before a logout; stale under any policy.
    logged_out_below: u64,
    /// Attempts announced but not yet completed.
    pending: u64,
    invalid_message: String,
}

impl AuthReducer {
    pub fn new(policy: RacePolicy, invalid_message: String) -> Self {
        Self {
            policy,
            issued: 0,
            floor: 0,
            logged_out_below: 0,
            pending: 0,
            invalid_message,
        }
    }

    fn is_stale(&self, attempt: u64) -> bool {
        attempt < self.logged_out_below || (self.policy == RacePolicy::LatestIssued && attempt < self.floor)
    }

    fn apply_outcome(&self, outcome: AuthOutcome, store: &StateStore) {
        let busy = self.pending > 0;
        match outcome {
            AuthOutcome::Authenticated(session) => {
                tracing::info!(uid = %session.uid, "sign-in accepted");
                store.put(ValidationState::clean());
                store.put(LoginNotice::default());
                store.put(AuthState {
                    session: Session::Authenticated { session },
                    busy,
                });
                store.put(AppRoute::Home);
            }
            AuthOutcome::Rejected(e) => {
                // Logged for diagnosis; the user only ever sees the generic notice.
                tracing::warn!(code = %e.code, reason = %e.message, "sign-in rejected");
                store.put(ValidationState::rejected());
                store.put(LoginNotice {
                    message: Some(self.invalid_message.clone()),
                });
                store.put(AuthState {
                    session: Session::Unauthenticated,
                    busy,
                });
                store.put(AppRoute::Login);
            }
        }
    }
}

impl Reducer for AuthReducer {
    type Msg = AuthMsg;

    fn reduce(&mut self, msg: AuthMsg, store: &StateStore) {
        match msg {
            AuthMsg::Submitted { attempt } => {
                self.issued = self.issued.max(attempt);
                self.floor = self.floor.max(attempt);
                self.pending += 1;
                store.put(ValidationState::clean());
                store.update(AuthState::unauthenticated, |s| s.busy = true);
            }
            AuthMsg::Completed { attempt, outcome } => {
                self.pending = self.pending.saturating_sub(1);
                if self.is_stale(attempt) {
                    tracing::debug!(attempt, floor = self.floor, "discarding superseded sign-in outcome");
                    store.update(AuthState::unauthenticated, |s| s.busy = self.pending > 0);
                    return;
                }
                self.apply_outcome(outcome, store);
            }
            AuthMsg::NoticeDismissed => {
                store.put(LoginNotice::default());
            }
            AuthMsg::LoggedOut => {
                // Attempts still in flight must not sign the user back in.
                self.logged_out_below = self.issued + 1;
                if let Some(session) = store.read::<AuthState>().and_then(|s| s.session_ref().cloned()) {
                    tracing::info!(uid = %session.uid, "signed out");
                }
                store.put(AuthState {
                    session: Session::Unauthenticated,
                    busy: self.pending > 0,
                });
                store.put(ValidationState::clean());
                store.put(LoginNotice::default());
                store.clear::<MapState>();
                store.clear::<ProfileState>();
                store.put(AppRoute::Login);
            }
        }
    }
}

/// Front door for login submissions.
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    mailbox: Mailbox<AuthMsg>,
    next_attempt: AtomicU64,
}

impl AuthGate {
    /// Start the gate's reducer on the current tokio runtime.
    pub fn spawn(
        provider: Arc<dyn IdentityProvider>,
        policy: RacePolicy,
        i18n: &I18nStore,
        store: Arc<StateStore>,
    ) -> Self {
        let reducer = AuthReducer::new(policy, i18n.get(messages::INVALID_CREDENTIALS));
        Self {
            provider,
            mailbox: Mailbox::spawn(reducer, store),
            next_attempt: AtomicU64::new(0),
        }
    }

    /// Submit credentials: exactly one provider call, outcome applied by
    /// the reducer.
    pub async fn submit(&self, identifier: &str, secret: &Secret) {
        let attempt = self.next_attempt.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(attempt, "sign-in submitted");
        self.mailbox.send(AuthMsg::Submitted { attempt }).await;

        let outcome = AuthOutcome::from(self.provider.sign_in(identifier, secret).await);
        self.mailbox.send(AuthMsg::Completed { attempt, outcome }).await;
    }

    pub async fn dismiss_notice(&self) {
        self.mailbox.send(AuthMsg::NoticeDismissed).await;
    }

    pub async fn logout(&self) {
        self.mailbox.send(AuthMsg::LoggedOut).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::error_code;

    fn session() -> SessionRef {
        SessionRef {
            uid: "uid-1".into(),
            identifier: "user@example.com".into(),
        }
    }

    fn rejected() -> AuthOutcome {
        AuthOutcome::Rejected(ProviderError::new(error_code::WRONG_PASSWORD, "bad password"))
    }

    fn reducer(policy: RacePolicy) -> AuthReducer {
        AuthReducer::new(policy, "Invalid Username or Password".into())
    }

    fn is_active(store: &StateStore) -> bool {
        store.read::<AuthState>().is_some_and(|s| s.is_active())
    }

    // ========================================================================
    // Single attempt
    // ========================================================================

    #[test]
    fn submitted_clears_flags_and_marks_busy() {
        let store = StateStore::new();
        store.put(ValidationState::rejected());
        let mut r = reducer(RacePolicy::LatestIssued);

        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);

        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::clean()));
        let auth = store.read::<AuthState>().unwrap();
        assert!(auth.busy);
        assert!(!auth.is_active());
    }

    #[test]
    fn success_opens_gate() {
        let store = StateStore::new();
        let mut r = reducer(RacePolicy::LatestIssued);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(
            AuthMsg::Completed {
                attempt: 1,
                outcome: AuthOutcome::Authenticated(session()),
            },
            &store,
        );

        let auth = store.read::<AuthState>().unwrap();
        assert!(auth.is_active());
        assert!(!auth.busy);
        assert_eq!(auth.session_ref(), Some(&session()));
        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::clean()));
        assert_eq!(store.read::<AppRoute>(), Some(AppRoute::Home));
        assert_eq!(store.read::<LoginNotice>().unwrap().message, None);
    }

    #[test]
    fn failure_sets_flags_and_generic_notice() {
        let store = StateStore::new();
        let mut r = reducer(RacePolicy::LatestIssued);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(AuthMsg::Completed { attempt: 1, outcome: rejected() }, &store);

        assert!(!is_active(&store));
        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::rejected()));
        assert_eq!(
            store.read::<LoginNotice>().unwrap().message.as_deref(),
            Some("Invalid Username or Password")
        );
        assert_eq!(store.read::<AppRoute>(), Some(AppRoute::Login));
    }

    #[test]
    fn dismiss_keeps_flags() {
        let store = StateStore::new();
        let mut r = reducer(RacePolicy::LatestIssued);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(AuthMsg::Completed { attempt: 1, outcome: rejected() }, &store);
        r.reduce(AuthMsg::NoticeDismissed, &store);

        assert_eq!(store.read::<LoginNotice>().unwrap().message, None);
        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::rejected()));
    }

    // ========================================================================
    // Overlapping attempts
    // ========================================================================

    /// A then B submitted; B completes (success) before A (failure).
    fn overlap(policy: RacePolicy) -> StateStore {
        let store = StateStore::new();
        let mut r = reducer(policy);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(AuthMsg::Submitted { attempt: 2 }, &store);
        r.reduce(
            AuthMsg::Completed {
                attempt: 2,
                outcome: AuthOutcome::Authenticated(session()),
            },
            &store,
        );
        assert!(store.read::<AuthState>().unwrap().busy);
        r.reduce(AuthMsg::Completed { attempt: 1, outcome: rejected() }, &store);
        store
    }

    #[test]
    fn last_completed_lets_older_outcome_win() {
        let store = overlap(RacePolicy::LastCompleted);
        assert!(!is_active(&store));
        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::rejected()));
        assert!(!store.read::<AuthState>().unwrap().busy);
    }

    #[test]
    fn latest_issued_discards_superseded_outcome() {
        let store = overlap(RacePolicy::LatestIssued);
        assert!(is_active(&store));
        assert_eq!(store.read::<ValidationState>(), Some(ValidationState::clean()));
        assert!(!store.read::<AuthState>().unwrap().busy);
    }

    // ========================================================================
    // Logout
    // ========================================================================

    #[test]
    fn logout_closes_gate_and_clears_screens() {
        let store = StateStore::new();
        let mut r = reducer(RacePolicy::LatestIssued);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(
            AuthMsg::Completed {
                attempt: 1,
                outcome: AuthOutcome::Authenticated(session()),
            },
            &store,
        );
        store.put(ProfileState::default());

        r.reduce(AuthMsg::LoggedOut, &store);

        assert!(!is_active(&store));
        assert_eq!(store.read::<AppRoute>(), Some(AppRoute::Login));
        assert!(store.read::<ProfileState>().is_none());
    }

    #[test]
    fn in_flight_success_after_logout_is_ignored() {
        for policy in [RacePolicy::LatestIssued, RacePolicy::LastCompleted] {
            let store = StateStore::new();
            let mut r = reducer(policy);
            r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
            r.reduce(AuthMsg::LoggedOut, &store);
            r.reduce(
                AuthMsg::Completed {
                    attempt: 1,
                    outcome: AuthOutcome::Authenticated(session()),
                },
                &store,
            );
            assert!(!is_active(&store), "{policy}");
            assert!(!store.read::<AuthState>().unwrap().busy);
        }
    }

    #[test]
    fn login_after_logout_still_works() {
        let store = StateStore::new();
        let mut r = reducer(RacePolicy::LastCompleted);
        r.reduce(AuthMsg::Submitted { attempt: 1 }, &store);
        r.reduce(AuthMsg::LoggedOut, &store);
        r.reduce(AuthMsg::Submitted { attempt: 2 }, &store);
        r.reduce(
            AuthMsg::Completed {
                attempt: 2,
                outcome: AuthOutcome::Authenticated(session()),
            },
            &store,
        );
        assert!(is_active(&store));
    }
}
