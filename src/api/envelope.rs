//! Normalized success/failure shape returned by every gateway call.
//!
//! In-process callers work with [`ApiResult`]; [`Envelope`] is the flat
//! `{ data, error, details }` JSON shape used when the outcome has to be
//! handed on (the CLI prints it).

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message reported for any transport, encoding or decoding failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message reported for a non-2xx response whose body carries no `error` string.
pub const GENERIC_API_ERROR_MESSAGE: &str = "Request failed";

/// Failure outcome of a gateway call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure, or a body that could not be encoded or decoded.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },
}

impl ApiError {
    /// User-facing message for this failure.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network => NETWORK_ERROR_MESSAGE,
            ApiError::Api { message, .. } => message,
        }
    }

    /// Server-supplied `details`, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Network => None,
            ApiError::Api { details, .. } => details.as_ref(),
        }
    }

    /// HTTP status for API errors; `None` when the request never got an answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network => None,
            ApiError::Api { status, .. } => Some(*status),
        }
    }
}

/// Outcome of a gateway call: exactly one of payload or failure.
pub type ApiResult<T> = Result<T, ApiError>;

/// Flat serializable form of an [`ApiResult`].
///
/// Only constructed from an `ApiResult`, so `data` and `error` are never
/// both present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Take the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> From<ApiResult<T>> for Envelope<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
                details: None,
            },
            Err(err) => Self {
                data: None,
                error: Some(err.message().to_string()),
                details: err.details().cloned(),
            },
        }
    }
}
