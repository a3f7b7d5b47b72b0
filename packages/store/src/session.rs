//! # Session store: the single owner of `token` + `user`
//!
//! [`SessionStore`] is the one place the console reads and writes the
//! authentication token and the cached user profile. Views, the sidebar,
//! the route guard and the request gateway all hold clones of the same
//! handle; nobody touches the storage backend directly.
//!
//! ## Invariants
//!
//! - A [`Profile`] is only ever present together with a token.
//! - `token` and `user` are persisted and removed together; after
//!   [`SessionStore::clear`] every reader sees [`Session::default`].
//! - Listeners registered with [`SessionStore::subscribe`] run after every
//!   change, once the store has finished mutating, so they may read the
//!   store again.
//!
//! The store is single-threaded (`Rc<RefCell<_>>`): the console runs on the
//! browser's event loop and every mutation happens in one event callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::backend::{SessionBackend, TOKEN_KEY, USER_KEY};
use crate::claims::{self, now_epoch_secs};
use crate::error::StoreError;

/// The signed-in user's role as far as navigation is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    Member,
}

/// Cached user profile, persisted under the `user` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    /// Avatar URL, or `None` when the account still uses the default picture.
    #[serde(default)]
    pub avatar_ref: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Profile {
    /// Read the JSON stored under the `user` key.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Snapshot of the current authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub profile: Option<Profile>,
}

impl Session {
    /// Whether the session carries a token that has not expired at `now`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| !claims::is_expired_at(token, now))
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(now_epoch_secs())
    }

    /// Admin navigation is decided by the token's role claim alone.
    pub fn is_admin(&self) -> bool {
        self.token.as_deref().is_some_and(claims::is_admin)
    }
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(&Session)>;

struct Inner {
    backend: Box<dyn SessionBackend>,
    session: Session,
    listeners: Vec<(Subscription, Listener)>,
    next_listener: u64,
}

/// Process-wide session state over a [`SessionBackend`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SessionStore")
            .field("has_token", &inner.session.token.is_some())
            .field("profile", &inner.session.profile)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SessionStore {
    /// Open a store over `backend` and load whatever it already holds.
    pub fn open(backend: impl SessionBackend + 'static) -> Self {
        let store = Self {
            inner: Rc::new(RefCell::new(Inner {
                backend: Box::new(backend),
                session: Session::default(),
                listeners: Vec::new(),
                next_listener: 0,
            })),
        };
        store.load();
        store
    }

    /// Re-read `token` and `user` from the backend.
    ///
    /// A stored profile that does not deserialize voids the whole session,
    /// and a profile without a token is ignored.
    pub fn load(&self) -> Session {
        let session = {
            let mut inner = self.inner.borrow_mut();
            let token = inner.backend.get(TOKEN_KEY);
            let raw_profile = inner.backend.get(USER_KEY);

            let session = match (token, raw_profile) {
                (None, _) => Session::default(),
                (Some(token), None) => Session {
                    token: Some(token),
                    profile: None,
                },
                (Some(token), Some(raw)) => match Profile::parse(&raw) {
                    Ok(profile) => Session {
                        token: Some(token),
                        profile: Some(profile),
                    },
                    Err(e) => {
                        tracing::warn!("discarding stored session, profile unreadable: {e}");
                        Session::default()
                    }
                },
            };
            inner.session = session.clone();
            session
        };
        tracing::debug!(signed_in = session.token.is_some(), "session loaded");
        session
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.inner.borrow().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().session.token.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.borrow().session.profile.clone()
    }

    /// Persist a fresh session after a successful login.
    pub fn save(&self, profile: Profile, token: String) {
        {
            let mut inner = self.inner.borrow_mut();
            match serde_json::to_string(&profile) {
                Ok(raw) => {
                    inner.backend.set(TOKEN_KEY, &token);
                    inner.backend.set(USER_KEY, &raw);
                }
                Err(e) => tracing::error!("profile not persisted: {e}"),
            }
            inner.session = Session {
                token: Some(token),
                profile: Some(profile),
            };
        }
        tracing::info!("session saved");
        self.notify();
    }

    /// Apply `change` to the cached profile and persist it.
    /// Returns `false` (and changes nothing) when no profile is cached.
    pub fn update_profile(&self, change: impl FnOnce(&mut Profile)) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            let Some(mut profile) = inner.session.profile.clone() else {
                return false;
            };
            change(&mut profile);
            match serde_json::to_string(&profile) {
                Ok(raw) => inner.backend.set(USER_KEY, &raw),
                Err(e) => tracing::error!("profile not persisted: {e}"),
            }
            inner.session.profile = Some(profile);
        }
        self.notify();
        true
    }

    /// Drop token and profile together, in memory and in the backend.
    pub fn clear(&self) {
        let was_signed_in = {
            let mut inner = self.inner.borrow_mut();
            inner.backend.remove(TOKEN_KEY);
            inner.backend.remove(USER_KEY);
            std::mem::take(&mut inner.session).token.is_some()
        };
        if was_signed_in {
            tracing::info!("session cleared");
        }
        self.notify();
    }

    /// Whether the current token exists and has not expired at `now`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.inner.borrow().session.is_valid_at(now)
    }

    /// Register `listener` to run after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = Subscription(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != subscription);
    }

    fn notify(&self) {
        let (session, listeners): (Session, Vec<Listener>) = {
            let inner = self.inner.borrow();
            (
                inner.session.clone(),
                inner.listeners.iter().map(|(_, l)| l.clone()).collect(),
            )
        };
        for listener in listeners {
            listener(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::claims::tests::token_with;
    use crate::MemoryStore;

    fn profile() -> Profile {
        Profile {
            id: "7".to_string(),
            display_name: "Lan Tran".to_string(),
            avatar_ref: None,
            role: Role::Member,
        }
    }

    fn assert_invariant(store: &SessionStore) {
        let session = store.session();
        assert!(session.profile.is_none() || session.token.is_some());
    }

    #[test]
    fn test_empty_backend_loads_empty_session() {
        let store = SessionStore::open(MemoryStore::new());
        assert_eq!(store.session(), Session::default());
        assert_invariant(&store);
    }

    #[test]
    fn test_save_persists_both_keys() {
        let backend = MemoryStore::new();
        let store = SessionStore::open(backend.clone());
        store.save(profile(), "tok".to_string());

        assert_eq!(backend.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert!(backend.get(USER_KEY).is_some());
        assert_invariant(&store);

        let reopened = SessionStore::open(backend);
        assert_eq!(reopened.session(), store.session());
    }

    #[test]
    fn test_clear_removes_everything() {
        let backend = MemoryStore::new();
        let store = SessionStore::open(backend.clone());
        store.save(profile(), "tok".to_string());
        store.clear();

        assert_eq!(store.session(), Session::default());
        assert!(backend.is_empty());
        assert_eq!(store.load(), Session::default());
        assert_invariant(&store);
    }

    #[test]
    fn test_invalid_profile_voids_session() {
        let backend = MemoryStore::new();
        backend.set(TOKEN_KEY, "tok");
        backend.set(USER_KEY, "{not json");
        let store = SessionStore::open(backend);
        assert_eq!(store.session(), Session::default());
    }

    #[test]
    fn test_parse_profile() {
        assert!(matches!(
            Profile::parse("{not json"),
            Err(StoreError::InvalidProfile(_))
        ));
        let parsed = Profile::parse(r#"{"id":"7","displayName":"ada"}"#).unwrap();
        assert_eq!(parsed.display_name, "ada");
        assert_eq!(parsed.avatar_ref, None);
        assert_eq!(parsed.role, Role::default());
    }

    #[test]
    fn test_profile_without_token_is_ignored() {
        let backend = MemoryStore::new();
        backend.set(USER_KEY, &serde_json::to_string(&profile()).unwrap());
        let store = SessionStore::open(backend);
        assert_eq!(store.session(), Session::default());
        assert_invariant(&store);
    }

    #[test]
    fn test_token_without_profile_loads() {
        let backend = MemoryStore::new();
        backend.set(TOKEN_KEY, "tok");
        let store = SessionStore::open(backend);
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_update_profile() {
        let backend = MemoryStore::new();
        let store = SessionStore::open(backend.clone());
        assert!(!store.update_profile(|p| p.avatar_ref = Some("x".into())));

        store.save(profile(), "tok".to_string());
        assert!(store.update_profile(|p| p.avatar_ref = Some("https://cdn/a.png".into())));
        assert_eq!(
            SessionStore::open(backend).profile().unwrap().avatar_ref.as_deref(),
            Some("https://cdn/a.png")
        );
    }

    #[test]
    fn test_listeners_see_changes() {
        let store = SessionStore::open(MemoryStore::new());
        let calls = Rc::new(Cell::new(0));
        let last_signed_in = Rc::new(Cell::new(false));

        let sub = {
            let calls = calls.clone();
            let last = last_signed_in.clone();
            let reader = store.clone();
            store.subscribe(move |session| {
                calls.set(calls.get() + 1);
                last.set(session.token.is_some());
                // Re-entrant read must not panic.
                let _ = reader.token();
            })
        };

        store.save(profile(), "tok".to_string());
        assert_eq!(calls.get(), 1);
        assert!(last_signed_in.get());

        store.clear();
        assert_eq!(calls.get(), 2);
        assert!(!last_signed_in.get());

        store.unsubscribe(sub);
        store.save(profile(), "tok".to_string());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_validity_and_admin() {
        let store = SessionStore::open(MemoryStore::new());
        assert!(!store.is_valid_at(0));

        let token = token_with(serde_json::json!({ "exp": 100, "role": "Admin" }));
        store.save(profile(), token);
        assert!(store.is_valid_at(99));
        assert!(!store.is_valid_at(100));
        assert!(store.session().is_admin());
    }
}
