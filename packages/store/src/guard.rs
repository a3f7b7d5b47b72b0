//! Protected-view guard.
//!
//! Runs synchronously on every protected-view mount: no timer, no polling,
//! no network. An absent or expired token clears the session and sends the
//! user to the login path.

use crate::claims::now_epoch_secs;
use crate::session::SessionStore;

/// Where a guard check currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Not yet evaluated for this mount.
    Checking,
    /// The session is valid; the view may render and fetch.
    Settled,
    /// The session was cleared; navigate to the contained path.
    Redirect(String),
}

/// One guard per protected-view mount.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    login_path: String,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Evaluate the session now.
    pub fn enter(&mut self, store: &SessionStore) -> &GuardState {
        self.enter_at(store, now_epoch_secs())
    }

    /// Evaluate the session against an explicit clock.
    ///
    /// A redirect is terminal: once issued, later calls keep returning it
    /// without touching the store again.
    pub fn enter_at(&mut self, store: &SessionStore, now: i64) -> &GuardState {
        if matches!(self.state, GuardState::Redirect(_)) {
            return &self.state;
        }
        self.state = if store.is_valid_at(now) {
            GuardState::Settled
        } else {
            tracing::info!(to = %self.login_path, "session missing or expired, redirecting");
            store.clear();
            GuardState::Redirect(self.login_path.clone())
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::tests::token_with;
    use crate::session::{Profile, Role};
    use crate::MemoryStore;

    fn signed_in(exp: i64) -> SessionStore {
        let store = SessionStore::open(MemoryStore::new());
        store.save(
            Profile {
                id: "1".into(),
                display_name: "Minh".into(),
                avatar_ref: None,
                role: Role::Member,
            },
            token_with(serde_json::json!({ "exp": exp })),
        );
        store
    }

    #[test]
    fn test_starts_checking() {
        assert_eq!(RouteGuard::new("/login").state(), &GuardState::Checking);
    }

    #[test]
    fn test_valid_session_settles() {
        let store = signed_in(500);
        let mut guard = RouteGuard::new("/login");
        assert_eq!(guard.enter_at(&store, 100), &GuardState::Settled);
        assert!(store.token().is_some());
    }

    #[test]
    fn test_missing_token_redirects() {
        let store = SessionStore::open(MemoryStore::new());
        let mut guard = RouteGuard::new("/login");
        assert_eq!(
            guard.enter_at(&store, 0),
            &GuardState::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_expired_token_clears_and_redirects() {
        let store = signed_in(500);
        let mut guard = RouteGuard::new("/login");
        assert_eq!(
            guard.enter_at(&store, 500),
            &GuardState::Redirect("/login".to_string())
        );
        assert!(store.token().is_none());
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_redirect_is_terminal() {
        let store = SessionStore::open(MemoryStore::new());
        let mut guard = RouteGuard::new("/login");
        guard.enter_at(&store, 0);

        store.save(
            Profile {
                id: "1".into(),
                display_name: "Minh".into(),
                avatar_ref: None,
                role: Role::Member,
            },
            token_with(serde_json::json!({ "exp": 10 })),
        );
        assert!(matches!(guard.enter_at(&store, 0), GuardState::Redirect(_)));
        assert!(store.token().is_some());
    }

    #[test]
    fn test_remount_rechecks() {
        let store = signed_in(50);
        assert_eq!(RouteGuard::new("/login").enter_at(&store, 10), &GuardState::Settled);
        assert!(matches!(
            RouteGuard::new("/login").enter_at(&store, 60),
            GuardState::Redirect(_)
        ));
    }
}
