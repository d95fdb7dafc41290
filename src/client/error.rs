//! Error types for backend requests

use serde_json::{Map, Value};
use thiserror::Error;

/// Key used to hold a non-object JSON error body in [`ApiError::Http`]
pub const DETAIL_KEY: &str = "detail";

/// Errors produced by [`Dispatcher::dispatch`](super::Dispatcher::dispatch)
///
/// Each variant is chosen where the failure happens, so callers can match on
/// the kind instead of probing fields.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, broken body stream)
    #[error("network error calling {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with JSON (proxy error page, misrouted URL)
    #[error(
        "expected JSON from {endpoint} but got {} (HTTP {status})",
        content_type.as_deref().unwrap_or("unknown content type")
    )]
    NonJsonResponse {
        status: u16,
        endpoint: String,
        content_type: Option<String>,
        raw_body: String,
    },

    /// The server answered with JSON and a non-2xx status
    #[error("HTTP {status} from {endpoint}: {}", describe_payload(payload))]
    Http {
        status: u16,
        endpoint: String,
        payload: Map<String, Value>,
    },

    /// The response declared JSON but the body did not parse
    #[error("malformed JSON from {endpoint} (HTTP {status}): {source}")]
    MalformedJson {
        status: u16,
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Builds an `Http` error, keeping object fields as-is and wrapping any
    /// other JSON value under [`DETAIL_KEY`]
    pub fn http(status: u16, endpoint: impl Into<String>, body: Value) -> Self {
        let payload = match body {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert(DETAIL_KEY.to_string(), other);
                map
            }
        };
        ApiError::Http {
            status,
            endpoint: endpoint.into(),
            payload,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NonJsonResponse { status, .. }
            | ApiError::Http { status, .. }
            | ApiError::MalformedJson { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Encode(_) => None,
        }
    }

    /// Endpoint path the failed request was sent to
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Network { endpoint, .. }
            | ApiError::NonJsonResponse { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::MalformedJson { endpoint, .. } => Some(endpoint),
            ApiError::Encode(_) => None,
        }
    }

    /// A server-supplied field from an `Http` error payload
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ApiError::Http { payload, .. } => payload.get(name),
            _ => None,
        }
    }

    /// The server's human-readable message, from its `error` or `message` field
    pub fn server_message(&self) -> Option<&str> {
        ["error", "message"]
            .iter()
            .find_map(|key| self.field(key).and_then(Value::as_str))
    }
}

fn describe_payload(payload: &Map<String, Value>) -> String {
    ["error", "message"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| Value::Object(payload.clone()).to_string())
}
