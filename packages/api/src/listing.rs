use crate::envelope::Envelope;
use crate::error::ApiError;

/// What a registry table shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    Loading,
    Loaded(Vec<T>),
    /// The server found nothing; carries its message.
    Empty(String),
    Failed(String),
}

impl<T> ListState<T> {
    /// Fold a list call into a table state. `failure` is shown when the
    /// error carries no message of its own.
    pub fn from_result(result: Result<Envelope<Vec<T>>, ApiError>, failure: &str) -> Self {
        match result {
            Ok(envelope) => match envelope.data {
                Some(rows) if !rows.is_empty() => ListState::Loaded(rows),
                _ => ListState::Empty(envelope.message),
            },
            Err(ApiError::NotFound(message)) => ListState::Empty(message),
            Err(ApiError::Rejected { message, .. }) if !message.is_empty() => {
                ListState::Failed(message)
            }
            Err(e) => {
                tracing::warn!("list not loaded: {e}");
                ListState::Failed(failure.to_string())
            }
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListState::Loaded(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    /// Edit loaded rows in place, e.g. after a lock toggle or role change.
    pub fn update(&mut self, change: impl FnOnce(&mut Vec<T>)) {
        if let ListState::Loaded(rows) = self {
            change(rows);
        }
    }
}
