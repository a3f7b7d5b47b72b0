//! # Authorized request gateway
//!
//! Every call the console makes goes through [`Gateway`]. Paths on the
//! public allowlist go out as-is; everything else needs a live token from
//! the [`SessionStore`]. A missing or expired token clears the session and
//! fails with [`ApiError::SessionExpired`] *before* anything is sent, and an
//! HTTP 401 on an authorized call does the same after the fact.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{claims, SessionStore};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Query, Transport};

/// Paths that are sent without a bearer token.
pub const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/register"];

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

#[derive(Clone, Debug)]
pub struct Gateway<T> {
    session: SessionStore,
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(session: SessionStore, transport: T) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Token to attach to a protected call, or the session-expired path.
    fn authorize(&self, path: &str) -> Result<String, ApiError> {
        match self.session.token() {
            Some(token) if !claims::is_expired(&token) => Ok(token),
            found => {
                tracing::info!(
                    path,
                    had_token = found.is_some(),
                    "no usable token, clearing session"
                );
                self.session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope<Value>, ApiError> {
        self.send_with(method, path, Query::new(), body).await
    }

    /// Dispatch one call and return the envelope if it reports success.
    pub async fn send_with(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
    ) -> Result<Envelope<Value>, ApiError> {
        let bearer = if is_public(path) {
            None
        } else {
            Some(self.authorize(path)?)
        };
        let authorized = bearer.is_some();

        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                query,
                body,
                bearer,
            })
            .await?;

        if response.status == 401 && authorized {
            tracing::info!(path, "server rejected token, clearing session");
            self.session.clear();
            return Err(ApiError::SessionExpired);
        }
        if !(200..300).contains(&response.status) {
            return Err(ApiError::Transport(format!("HTTP {}", response.status)));
        }

        let envelope: Envelope<Value> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Transport(format!("malformed response: {e}")))?;
        envelope.into_result()
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Envelope<R>, ApiError> {
        self.send(Method::Get, path, None).await?.decode()
    }

    pub async fn get_with<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
    ) -> Result<Envelope<R>, ApiError> {
        self.send_with(Method::Get, path, query, None).await?.decode()
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<R>, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Transport(format!("unserializable body: {e}")))?;
        self.send(Method::Post, path, Some(body)).await?.decode()
    }

    /// POST for commands whose response data is not needed.
    pub async fn command<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<Value>, ApiError> {
        self.post(path, body).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use serde_json::json;
    use store::{MemoryStore, Profile, Role};

    use super::*;
    use crate::transport::testing::RecordingTransport;
    use crate::transport::RawResponse;

    pub(crate) fn token_with(payload: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.sig")
    }

    pub(crate) fn live_token() -> String {
        token_with(json!({ "exp": claims::now_epoch_secs() + 3600 }))
    }

    pub(crate) fn profile() -> Profile {
        Profile {
            id: "7".to_string(),
            display_name: "Ada".to_string(),
            avatar_ref: None,
            role: Role::Member,
        }
    }

    pub(crate) fn signed_in(token: String) -> (Gateway<RecordingTransport>, RecordingTransport) {
        let session = SessionStore::open(MemoryStore::new());
        session.save(profile(), token);
        let transport = RecordingTransport::default();
        (Gateway::new(session, transport.clone()), transport)
    }

    #[test]
    fn test_public_paths() {
        assert!(is_public("/auth/login"));
        assert!(is_public("/auth/register"));
        assert!(!is_public("/auth/changePassword"));
        assert!(!is_public("/category/all"));
    }

    #[tokio::test]
    async fn test_attaches_bearer_to_protected_call() {
        let token = live_token();
        let (gateway, transport) = signed_in(token.clone());
        transport.reply(200, "ok", json!([]));

        gateway.get::<Vec<Value>>("/category/all").await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some(token.as_str()));
        assert_eq!(sent[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_expired_token_is_not_dispatched() {
        let expired = token_with(json!({ "exp": claims::now_epoch_secs() - 10 }));
        let (gateway, transport) = signed_in(expired);

        let result = gateway.get::<Value>("/category/all").await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(transport.sent().is_empty());
        assert_eq!(gateway.session().session(), store::Session::default());
    }

    #[tokio::test]
    async fn test_missing_token_is_not_dispatched() {
        let session = SessionStore::open(MemoryStore::new());
        let transport = RecordingTransport::default();
        let gateway = Gateway::new(session, transport.clone());

        let result = gateway.get::<Value>("/warehouse/all").await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_public_path_needs_no_token() {
        let session = SessionStore::open(MemoryStore::new());
        let transport = RecordingTransport::default();
        transport.reply(200, "welcome", json!({ "token": "t" }));
        let gateway = Gateway::new(session, transport.clone());

        let reply = gateway
            .post::<_, Value>("/auth/login", &json!({ "userName": "ada" }))
            .await
            .unwrap();

        assert_eq!(reply.message, "welcome");
        assert_eq!(transport.sent()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_unauthorized_response_clears_session() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply_raw(Ok(RawResponse {
            status: 401,
            body: String::new(),
        }));

        let result = gateway.get::<Value>("/import/all").await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(gateway.session().token().is_none());
    }

    #[tokio::test]
    async fn test_http_failure_keeps_session() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply_raw(Ok(RawResponse {
            status: 500,
            body: "boom".to_string(),
        }));

        let result = gateway.get::<Value>("/import/all").await;

        assert_eq!(result, Err(ApiError::Transport("HTTP 500".to_string())));
        assert!(gateway.session().token().is_some());
    }

    #[tokio::test]
    async fn test_in_band_not_found() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply(404, "No suppliers found", Value::Null);

        let result = gateway.get::<Vec<Value>>("/supplier/all").await;

        assert_eq!(result, Err(ApiError::NotFound("No suppliers found".to_string())));
    }
}
