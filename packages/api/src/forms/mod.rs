//! # Form controller
//!
//! Every create modal in the console (import and export invoices and the
//! registry entity forms) runs on one [`FormController`]. The controller
//! owns:
//!
//! - the typed draft ([`Draft`]), edited through the draft's own setters,
//! - reference caches for its dropdowns ([`ReferenceSet`]), filled lazily
//!   the first time the modal opens and kept for later opens,
//! - one transient [`Message`] with the window it should stay visible for,
//! - an in-flight flag that rejects a second submit until the first resolves.
//!
//! The controller itself is synchronous so the UI can keep it in a signal.
//! Network work happens between [`FormController::begin_submit`] and
//! [`FormController::finish_submit`]. [`dispatch`] and [`fetch_reference`]
//! are the async halves a signal-held controller runs between those calls;
//! [`submit`] and [`load_references`] chain them for callers that can hold
//! `&mut` across the await.

mod account;
mod entity;
mod invoice;
mod lines;

use std::convert::Infallible;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use store::config::MessageConfig;
use thiserror::Error;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::transport::Transport;

pub use account::{
    is_valid_password, ChangePasswordForm, ChangePasswordRequest, LoginForm, LoginRequest,
    RegisterForm, RegisterRequest, MIN_PASSWORD_LEN,
};
pub use entity::{
    is_valid_phone, CategoryDraft, CustomerDraft, ProductDraft, ProductFetch, ProductReferences,
    SupplierDraft, WarehouseDraft,
};
pub use invoice::{
    ExportDraft, ExportFetch, ExportLoaded, ExportPayload, ExportReferences, ImportDraft,
    ImportFetch, ImportLoaded, ImportPayload, ImportReferences,
};
pub use lines::{parse_amount, parse_count, parse_id, Amount, CheckedLine, LineField, LineItem, Lines};

/// A local check failed; nothing was sent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A typed, client-side form state that validates into a request payload.
pub trait Draft: Clone + fmt::Debug {
    type Payload: Serialize;
    type References: ReferenceSet;

    /// Path the payload is POSTed to.
    const ENDPOINT: &'static str;
    /// Banner shown when the create call fails without a server message.
    const FAILURE_MESSAGE: &'static str;

    /// Empty caches for this draft's context.
    fn references(&self) -> Self::References;

    /// Checks run in a fixed order; the first failure wins.
    fn validate(&self) -> Result<Self::Payload, ValidationError>;

    /// Back to the initial shape. Context fixed at creation is kept.
    fn reset(&mut self);
}

/// Drafts with an editable line-item sequence.
pub trait LineDraft: Draft {
    fn lines(&self) -> &Lines;
    fn lines_mut(&mut self) -> &mut Lines;
}

/// One reference list a draft's dropdowns need, and how to fetch it.
pub trait FetchReferences {
    type Loaded;

    async fn fetch<T: Transport>(&self, gateway: &Gateway<T>) -> Result<Self::Loaded, ApiError>;
}

/// The reference caches of one draft.
pub trait ReferenceSet: Clone + fmt::Debug {
    type Fetch: FetchReferences<Loaded = Self::Loaded> + Clone + fmt::Debug + PartialEq;
    type Loaded;

    /// Fetches still needed, one per unpopulated cache.
    fn missing(&self) -> Vec<Self::Fetch>;

    fn apply(&mut self, loaded: Self::Loaded);
}

/// For drafts without dropdowns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoReferences;

impl ReferenceSet for NoReferences {
    type Fetch = Infallible;
    type Loaded = Infallible;

    fn missing(&self) -> Vec<Infallible> {
        Vec::new()
    }

    fn apply(&mut self, loaded: Infallible) {
        match loaded {}
    }
}

impl FetchReferences for Infallible {
    type Loaded = Infallible;

    async fn fetch<T: Transport>(&self, _gateway: &Gateway<T>) -> Result<Infallible, ApiError> {
        match *self {}
    }
}

/// A lazily filled dropdown list. Unfilled renders as empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Cache<T>(Option<Vec<T>>);

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Cache<T> {
    pub fn is_loaded(&self) -> bool {
        self.0.is_some()
    }

    pub fn items(&self) -> &[T] {
        self.0.as_deref().unwrap_or_default()
    }

    pub fn fill(&mut self, items: Vec<T>) {
        self.0 = Some(items);
    }
}

/// Reference lists treat "nothing found" as an empty list.
pub(crate) fn rows_or_empty<R>(result: Result<Envelope<Vec<R>>, ApiError>) -> Result<Vec<R>, ApiError> {
    match result {
        Ok(envelope) => Ok(envelope.data.unwrap_or_default()),
        Err(ApiError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

/// A transient banner. `id` lets a timer clear only the message it was
/// started for.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub tone: Tone,
    pub window: Duration,
}

/// How a submit round trip ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the draft; the backing list should reload.
    Created(String),
    /// The call failed; the modal was closed and the draft discarded.
    Failed(String),
    /// The session was cleared; the shell is about to route to login.
    SessionExpired,
}

impl SubmitOutcome {
    pub fn refreshes_list(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

#[derive(Clone, Debug)]
pub struct FormController<D: Draft> {
    draft: D,
    references: D::References,
    open: bool,
    in_flight: bool,
    message: Option<Message>,
    next_message: u64,
    windows: MessageConfig,
}

impl<D: Draft> FormController<D> {
    pub fn new(draft: D, windows: MessageConfig) -> Self {
        Self {
            references: draft.references(),
            draft,
            open: false,
            in_flight: false,
            message: None,
            next_message: 0,
            windows,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Point the controller at a new draft context, e.g. another warehouse.
    /// The modal closes and the reference caches start over; the banner and
    /// any submit already in flight are left alone.
    pub fn rebind(&mut self, draft: D) {
        self.references = draft.references();
        self.draft = draft;
        self.open = false;
    }

    /// Field edits go through the draft's typed setters.
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn references(&self) -> &D::References {
        &self.references
    }

    pub fn apply_references(&mut self, loaded: <D::References as ReferenceSet>::Loaded) {
        self.references.apply(loaded);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Show the modal. Returns the reference fetches to run, which is empty
    /// when the modal was already open or every cache is populated.
    pub fn open(&mut self) -> Vec<<D::References as ReferenceSet>::Fetch> {
        if self.open {
            return Vec::new();
        }
        self.open = true;
        self.references.missing()
    }

    /// Hide the modal and discard the draft.
    pub fn cancel(&mut self) {
        self.open = false;
        self.draft.reset();
    }

    pub fn validate(&self) -> Result<D::Payload, ValidationError> {
        self.draft.validate()
    }

    /// Validate and mark the submit in flight, yielding the payload to send.
    /// A validation failure shows its reason and leaves the modal open.
    pub fn begin_submit(&mut self) -> Result<D::Payload, SubmitError> {
        if self.in_flight {
            tracing::debug!(endpoint = D::ENDPOINT, "submit ignored, one already in flight");
            return Err(SubmitError::InFlight);
        }
        match self.draft.validate() {
            Ok(payload) => {
                self.in_flight = true;
                Ok(payload)
            }
            Err(e) => {
                tracing::debug!(endpoint = D::ENDPOINT, reason = %e.reason, "validation failed");
                let window = self.windows.validation_window();
                self.show(e.reason.clone(), Tone::Error, window);
                Err(e.into())
            }
        }
    }

    /// Settle a submit started with [`Self::begin_submit`]. The modal closes
    /// and the draft resets whatever the result was.
    pub fn finish_submit(&mut self, result: Result<Envelope<Value>, ApiError>) -> SubmitOutcome {
        self.in_flight = false;
        self.open = false;
        self.draft.reset();

        let outcome = match result {
            Ok(envelope) => SubmitOutcome::Created(envelope.message),
            Err(ApiError::SessionExpired) => SubmitOutcome::SessionExpired,
            Err(ApiError::Rejected { message, .. } | ApiError::NotFound(message))
                if !message.is_empty() =>
            {
                SubmitOutcome::Failed(message)
            }
            Err(_) => SubmitOutcome::Failed(D::FAILURE_MESSAGE.to_string()),
        };

        let window = self.windows.result_window();
        match &outcome {
            SubmitOutcome::Created(text) => {
                tracing::info!(endpoint = D::ENDPOINT, "created");
                if !text.is_empty() {
                    self.show(text.clone(), Tone::Info, window);
                }
            }
            SubmitOutcome::Failed(text) => {
                tracing::warn!(endpoint = D::ENDPOINT, "create failed: {text}");
                self.show(text.clone(), Tone::Error, window);
            }
            SubmitOutcome::SessionExpired => {
                self.message = None;
            }
        }
        outcome
    }

    /// Replace the banner. Returns its id for the clearing timer.
    pub fn show(&mut self, text: impl Into<String>, tone: Tone, window: Duration) -> u64 {
        self.next_message += 1;
        self.message = Some(Message {
            id: self.next_message,
            text: text.into(),
            tone,
            window,
        });
        self.next_message
    }

    /// Clear the banner if it is still the one with `id`.
    pub fn expire_message(&mut self, id: u64) -> bool {
        if self.message.as_ref().is_some_and(|m| m.id == id) {
            self.message = None;
            true
        } else {
            false
        }
    }
}

impl<D: LineDraft> FormController<D> {
    pub fn lines(&self) -> &Lines {
        self.draft.lines()
    }

    pub fn add_line(&mut self) {
        self.draft.lines_mut().add();
    }

    pub fn remove_line(&mut self, index: usize) -> bool {
        self.draft.lines_mut().remove(index)
    }

    pub fn set_line_field(&mut self, index: usize, field: LineField, value: impl Into<String>) -> bool {
        self.draft.lines_mut().set_field(index, field, value)
    }
}

/// Fetch one reference list. A failure is logged and yields `None`, which
/// leaves the cache empty so the next open retries it.
pub async fn fetch_reference<F, T>(fetch: &F, gateway: &Gateway<T>) -> Option<F::Loaded>
where
    F: FetchReferences + fmt::Debug,
    T: Transport,
{
    match fetch.fetch(gateway).await {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            tracing::warn!(?fetch, "reference data not loaded: {e}");
            None
        }
    }
}

/// POST a payload produced by [`FormController::begin_submit`] to the
/// draft's endpoint.
pub async fn dispatch<D: Draft, T: Transport>(
    payload: &D::Payload,
    gateway: &Gateway<T>,
) -> Result<Envelope<Value>, ApiError> {
    gateway.command(D::ENDPOINT, payload).await
}

/// Run every missing reference fetch and fill the caches.
pub async fn load_references<D: Draft, T: Transport>(
    form: &mut FormController<D>,
    gateway: &Gateway<T>,
) {
    for fetch in form.references.missing() {
        if let Some(loaded) = fetch_reference(&fetch, gateway).await {
            form.apply_references(loaded);
        }
    }
}

/// Validate, dispatch and settle in one call.
pub async fn submit<D: Draft, T: Transport>(
    form: &mut FormController<D>,
    gateway: &Gateway<T>,
) -> Result<SubmitOutcome, SubmitError> {
    let payload = form.begin_submit()?;
    let result = dispatch::<D, T>(&payload, gateway).await;
    Ok(form.finish_submit(result))
}
