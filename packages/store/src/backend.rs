//! Key/value persistence behind the [`crate::SessionStore`].
//!
//! The browser build writes to `window.localStorage`; tests and native
//! builds use [`crate::MemoryStore`]. Both keys are always written and
//! removed together by the store, never individually by callers.

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialised [`crate::Profile`].
pub const USER_KEY: &str = "user";

/// Synchronous string key/value storage.
///
/// Implementations swallow their own failures: a write that cannot be
/// persisted degrades to an in-memory-only session, a read that fails
/// looks like an absent key.
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
