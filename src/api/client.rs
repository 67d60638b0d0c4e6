//! HTTP client with auth header injection and response normalization.
//!
//! Every call goes through [`ApiClient::request`], which merges the default
//! JSON headers, the bearer token and any caller headers, then folds the
//! response into an [`ApiResult`]. Nothing below this boundary panics or
//! returns a transport error to the caller.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::envelope::{ApiError, ApiResult, GENERIC_API_ERROR_MESSAGE};
use crate::token::TokenStore;

/// Per-call options for [`ApiClient::request`].
///
/// Defaults to a GET with no body and no extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Caller headers, applied last so they win over the defaults.
    pub headers: HeaderMap,
    /// Set when `json()` was handed a value that could not be encoded.
    encode_failed: bool,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn patch() -> Self {
        Self::method(Method::PATCH)
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body.
    ///
    /// An encoding failure is remembered and reported as a network error
    /// when the request is issued.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => {
                log::warn!("Failed to encode request body: {}", e);
                self.encode_failed = true;
            }
        }
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client wrapper for the freight marketplace API.
///
/// Holds the base URL and a read-only handle on the token store. Cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client with the given base URL and token source.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_http_client(Client::new(), base_url, tokens)
    }

    /// Create a client on top of a caller-built `reqwest::Client`.
    ///
    /// The gateway sets no timeout of its own; this is where one goes.
    pub fn with_http_client(client: Client, base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request to a path relative to the base URL.
    ///
    /// Transport failures, non-JSON bodies and payloads that don't decode
    /// into `T` all come back as [`ApiError::Network`]. A parsed body with a
    /// non-2xx status comes back as [`ApiError::Api`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        if options.encode_failed {
            return Err(ApiError::Network);
        }

        let url = format!("{}{}", self.base_url, path);
        let token = self.tokens.get();
        let headers = merge_headers(token.as_deref(), options.headers);

        log::debug!("{} {}", options.method, path);

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            // `Value`'s Display is its compact JSON encoding.
            builder = builder.body(body.to_string());
        }

        let resp = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Request to {} failed (network error): {}", path, e);
                return Err(ApiError::Network);
            }
        };

        let status = resp.status();
        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Failed to read response body from {}: {}", path, e);
                return Err(ApiError::Network);
            }
        };

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Response from {} ({}) is not JSON: {}", path, status, e);
                return Err(ApiError::Network);
            }
        };

        if !status.is_success() {
            return Err(api_error(status, body));
        }

        serde_json::from_value(body).map_err(|e| {
            log::warn!("Failed to parse response from {}: {}", path, e);
            ApiError::Network
        })
    }
}

/// Build the outgoing header map.
///
/// Order: JSON content type, bearer token (when present and non-empty), then
/// caller headers, which replace any default with the same name.
pub(crate) fn merge_headers(token: Option<&str>, caller: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(t) = token.filter(|t| !t.is_empty()) {
        match HeaderValue::from_str(&format!("Bearer {}", t)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => log::warn!("Stored auth token is not a valid header value, sending without it"),
        }
    }

    // `HeaderMap::extend` replaces existing entries for each name it yields.
    headers.extend(caller);
    headers
}

/// Map a parsed non-2xx body onto [`ApiError::Api`].
pub(crate) fn api_error(status: StatusCode, body: Value) -> ApiError {
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or(GENERIC_API_ERROR_MESSAGE)
        .to_string();
    let details = body.get("details").cloned();
    ApiError::Api {
        status: status.as_u16(),
        message,
        details,
    }
}
