//! # Session-side state for the warehouse console
//!
//! Everything here is synchronous and free of I/O beyond the key/value
//! backend, so the same code runs in the browser and in native tests.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`SessionBackend`] key/value seam and its two well-known keys |
//! | [`claims`] | Unverified JWT payload decoding: expiry and role claims |
//! | [`config`] | `console.toml` configuration with production defaults |
//! | [`guard`] | The protected-view [`RouteGuard`] |
//! | [`session`] | [`Session`], [`Profile`] and the process-wide [`SessionStore`] |

pub mod backend;
pub mod claims;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use backend::SessionBackend;
pub use claims::{is_admin, is_expired, role, TokenClaims};
pub use config::ConsoleConfig;
pub use error::StoreError;
pub use guard::{GuardState, RouteGuard};
pub use session::{Profile, Role, Session, SessionStore, Subscription};
