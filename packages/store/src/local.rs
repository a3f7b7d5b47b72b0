//! # `localStorage` backend: browser-side persistence
//!
//! [`LocalStorage`] is the [`SessionBackend`] used on the web platform. It
//! keeps the `token` / `user` pair in `window.localStorage`, which survives
//! reloads and is shared by every view of the console.
//!
//! ## Error handling
//!
//! `localStorage` can be missing (privacy modes) or full. Every method
//! degrades quietly: reads return `None`, writes are dropped with a
//! `warn!`. The in-memory [`crate::Session`] stays authoritative for the
//! current page either way.

use web_sys::Storage;

use crate::backend::SessionBackend;

/// `window.localStorage`-backed SessionBackend for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionBackend for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!(key, "localStorage unavailable, value not persisted");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage rejected write");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
