//! The wire seam. [`Transport`] moves one JSON request and returns the raw
//! status and body; [`HttpTransport`] is the reqwest implementation used in
//! the browser and on native.

use std::time::Duration;

use serde_json::Value;
use store::config::ApiConfig;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Query parameters, encoded by the transport.
pub type Query = Vec<(&'static str, String)>;

/// One outgoing call. `path` is relative to the API prefix, e.g. `/category/all`;
/// each of its segments is percent-encoded on the way out.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }

    /// `{base_url}/api` followed by the segments of `path`.
    pub fn url(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    fn request(&self, request: &ApiRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.url(&request.path)?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
        .timeout(self.timeout)
        .header(reqwest::header::CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let path = request.path.clone();
        let response = self.request(&request)?.send().await.map_err(|e| {
            tracing::warn!(%path, "request failed: {e}");
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%path, status, "response received");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted transport that records what was sent.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Default)]
    pub(crate) struct RecordingTransport {
        sent: Rc<RefCell<Vec<ApiRequest>>>,
        replies: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
    }

    impl RecordingTransport {
        /// Queue an HTTP 200 carrying the given envelope.
        pub(crate) fn reply(&self, status_code: u16, message: &str, data: Value) -> &Self {
            let body = json!({ "statusCode": status_code, "message": message, "data": data });
            self.replies.borrow_mut().push_back(Ok(RawResponse {
                status: 200,
                body: body.to_string(),
            }));
            self
        }

        pub(crate) fn reply_raw(&self, reply: Result<RawResponse, ApiError>) -> &Self {
            self.replies.borrow_mut().push_back(reply);
            self
        }

        pub(crate) fn sent(&self) -> Vec<ApiRequest> {
            self.sent.borrow().clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_secs: 10,
        })
    }

    #[test]
    fn test_url_joins_api_prefix() {
        let transport = transport();
        assert_eq!(
            transport.url("/category/all").unwrap().as_str(),
            "http://localhost:5000/api/category/all"
        );
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_url_encodes_each_segment() {
        assert_eq!(
            transport().url("/auth/lock/a b?c#d").unwrap().as_str(),
            "http://localhost:5000/api/auth/lock/a%20b%3Fc%23d"
        );
    }

    #[test]
    fn test_bad_base_url_is_error() {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 10,
        });
        assert!(matches!(transport.url("/x"), Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_request_carries_query_and_bearer() {
        let built = transport()
            .request(&ApiRequest {
                method: Method::Get,
                path: "/warehouse/members".to_string(),
                query: vec![("Code", "WH 1&2".to_string())],
                body: None,
                bearer: Some("tok".to_string()),
            })
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built.url().path(), "/api/warehouse/members");
        assert_eq!(built.url().query(), Some("Code=WH+1%262"));
        assert_eq!(built.headers()[reqwest::header::AUTHORIZATION], "Bearer tok");
    }
}
