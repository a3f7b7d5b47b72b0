//! # API crate: typed client for the warehouse REST API
//!
//! Everything the console sends over the network goes through this crate.
//! Views never build URLs or headers themselves; they call a [`Gateway`]
//! method or submit a [`forms::FormController`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | The [`Transport`] seam and its reqwest implementation |
//! | [`gateway`] | Bearer injection, the public-path allowlist, session-expiry handling |
//! | [`envelope`] | The `{statusCode, message, data}` response wrapper |
//! | [`endpoints`] | One `Gateway` method per endpoint |
//! | [`models`] | Lenient deserialization of every `data` shape |
//! | [`forms`] | Drafts, line items, validation and the form controller |
//! | [`listing`] | Loading / loaded / empty / failed table state |
//!
//! ## Errors
//!
//! Calls fail with [`ApiError`]. [`ApiError::SessionExpired`] is special:
//! by the time a caller sees it the session has already been cleared, and
//! the only correct reaction is to route to login.

pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod listing;
pub mod models;
pub mod transport;

pub use envelope::Envelope;
pub use error::ApiError;
pub use gateway::{is_public, Gateway, PUBLIC_PATHS};
pub use listing::ListState;
pub use transport::{ApiRequest, HttpTransport, Method, Query, RawResponse, Transport};

/// The gateway the browser build uses.
pub type HttpGateway = Gateway<HttpTransport>;
