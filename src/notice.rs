//! View-state notices for request progress and failures
//!
//! A [`Notice`] is a loading, error, empty or message state rendered to text
//! and handed to a [`NoticeSink`], which decides where it is shown (a
//! terminal, a log, a test buffer). The sink is addressed by a target name so
//! one sink can serve several display areas.

use serde_json::Value;
use std::fmt;
use std::future::Future;

use crate::client::{ApiError, ClientError};

/// Default text while a request is in flight
pub const DEFAULT_LOADING: &str = "Loading...";

/// Default text for a request that returned nothing to show
pub const DEFAULT_EMPTY: &str = "No data";

/// Default text for a failure with no better description
pub const DEFAULT_ERROR: &str = "Failed to load";

/// Shown instead of the raw body when the server sent back an HTML page
pub const ERROR_PAGE_MESSAGE: &str =
    "The server returned an error page; check that the API endpoint is correct";

/// Severity of a transient message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        })
    }
}

/// A displayable view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading(String),
    Error {
        message: String,
        /// Hint shown when the action can be retried
        retry: Option<String>,
    },
    Empty(String),
    Message {
        kind: MessageKind,
        text: String,
    },
}

impl Notice {
    pub fn loading() -> Self {
        Notice::Loading(DEFAULT_LOADING.to_string())
    }

    pub fn empty() -> Self {
        Notice::Empty(DEFAULT_EMPTY.to_string())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error {
            message: message.into(),
            retry: None,
        }
    }

    pub fn message(kind: MessageKind, text: impl Into<String>) -> Self {
        Notice::Message {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loading(text) | Notice::Empty(text) => f.write_str(text),
            Notice::Error { message, retry } => {
                write!(f, "Error: {}", message)?;
                if let Some(hint) = retry {
                    write!(f, "\n{}", hint)?;
                }
                Ok(())
            }
            Notice::Message { kind, text } => write!(f, "[{}] {}", kind, text),
        }
    }
}

/// Destination for rendered notices
pub trait NoticeSink {
    /// Shows `notice` in the display area named `target`, replacing what was there
    fn show(&mut self, target: &str, notice: Notice);
}

/// Collects notices in order; useful for tests and batch output
impl NoticeSink for Vec<(String, Notice)> {
    fn show(&mut self, target: &str, notice: Notice) {
        self.push((target.to_string(), notice));
    }
}

/// Writes notices to standard error
#[derive(Debug, Default)]
pub struct StderrSink {
    /// Whether loading notices are printed
    pub show_progress: bool,
}

impl NoticeSink for StderrSink {
    fn show(&mut self, _target: &str, notice: Notice) {
        if matches!(notice, Notice::Loading(_)) && !self.show_progress {
            return;
        }
        eprintln!("{}", notice);
    }
}

/// Picks the text to show for a failed request
///
/// Prefers the server's own `error` or `message` field. An HTML error page
/// gets [`ERROR_PAGE_MESSAGE`] instead of its markup. A JSON error without
/// a message falls back to `fallback`.
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::NonJsonResponse { raw_body, .. } if raw_body.contains('<') => {
            ERROR_PAGE_MESSAGE.to_string()
        }
        ApiError::Http { .. } => err
            .server_message()
            .unwrap_or(fallback)
            .to_string(),
        _ => err.to_string(),
    }
}

/// [`error_message`] for client-level errors
pub fn client_error_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Api(api) => error_message(api, fallback),
        other => other.to_string(),
    }
}

/// Runs a request while showing its progress
///
/// Shows a loading notice on `target`, then awaits `request`. On failure an
/// error notice is shown and the error is returned unchanged, so the caller
/// still decides what happens next.
pub async fn safe_request<S, Fut>(
    sink: &mut S,
    target: &str,
    loading: &str,
    fallback: &str,
    request: Fut,
) -> Result<Value, ApiError>
where
    S: NoticeSink + ?Sized,
    Fut: Future<Output = Result<Value, ApiError>>,
{
    sink.show(target, Notice::Loading(loading.to_string()));
    request.await.inspect_err(|err| {
        sink.show(target, Notice::error(error_message(err, fallback)));
    })
}

/// Whether a payload has nothing to display (null, empty array or object)
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
