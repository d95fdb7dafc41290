//! Generic request dispatcher for the ShengHang backend
//!
//! Every endpoint call goes through [`Dispatcher::dispatch`], which joins the
//! base address and endpoint path, applies the default JSON headers and
//! cookie policy, sends the request, and classifies the response as a JSON
//! payload or a tagged [`ApiError`].

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::sync::Arc;

use super::ApiError;

/// Media type the backend uses for every API response
const JSON_MEDIA_TYPE: &str = "application/json";

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured value, encoded as JSON text before sending
    Json(Value),
    /// Pre-encoded text, sent unchanged
    Text(String),
}

impl RequestBody {
    fn encode(self) -> Result<String, serde_json::Error> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(&value),
            RequestBody::Text(text) => Ok(text),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

/// Per-request options, merged over the dispatcher defaults
///
/// Defaults: `GET`, `Content-Type: application/json`, no body. Headers set
/// here replace a default of the same name; other defaults are kept.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    /// Options for a `GET` request
    pub fn get() -> Self {
        Self::default()
    }

    /// Options for a `POST` request without a body
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    /// Sets the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request body
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds or replaces a header
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Sends requests to the backend and classifies the responses
///
/// Cookies set by the backend are kept in a shared jar and sent back on
/// later requests, so a login session carries over between calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    base_url: String,
    cookies: Arc<Jar>,
}

impl Dispatcher {
    /// Creates a dispatcher for `base_url` with an empty cookie jar
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Self::with_cookie_jar(base_url, Arc::new(Jar::default()))
    }

    /// Creates a dispatcher that stores and forwards cookies through `cookies`
    pub fn with_cookie_jar(base_url: impl Into<String>, cookies: Arc<Jar>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cookies,
        })
    }

    /// The base address prefixed to every endpoint path
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full target address for an endpoint path
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends a request and returns the parsed JSON payload
    ///
    /// # Arguments
    /// * `endpoint` - Path appended to the base address (e.g. "/user/login/")
    /// * `options` - Method, extra headers and body
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, verbatim, for a 2xx JSON response
    /// * `Err(ApiError::Network)` - The request failed before a response arrived
    /// * `Err(ApiError::NonJsonResponse)` - The response was not JSON; the raw body is kept
    /// * `Err(ApiError::MalformedJson)` - The response claimed JSON but did not parse
    /// * `Err(ApiError::Http)` - A JSON response with a non-2xx status
    pub async fn dispatch(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint);

        let mut headers = default_headers();
        headers.extend(options.headers);

        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body.encode()?);
        }

        log::debug!("{} {}", options.method, url);

        let response = request.send().await.map_err(|source| {
            log::error!("network error calling {}: {}", endpoint, source);
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let text = response.text().await.map_err(|source| {
            log::error!("failed reading response body from {}: {}", endpoint, source);
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains(JSON_MEDIA_TYPE));
        if !is_json {
            log::error!(
                "expected JSON but got {} for {}: {}",
                content_type.as_deref().unwrap_or("unknown"),
                endpoint,
                text
            );
            return Err(ApiError::NonJsonResponse {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                content_type,
                raw_body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text).map_err(|source| {
            log::error!("malformed JSON from {}: {}", endpoint, source);
            ApiError::MalformedJson {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        if !status.is_success() {
            log::error!("HTTP {} for {}: {}", status.as_u16(), endpoint, payload);
            return Err(ApiError::http(status.as_u16(), endpoint, payload));
        }

        Ok(payload)
    }

    /// Sends a `GET` request
    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.dispatch(endpoint, RequestOptions::get()).await
    }

    /// Sends a `POST` request with a JSON body
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.dispatch(endpoint, RequestOptions::post().body(body)).await
    }

    /// Sends a `POST` request without a body
    pub async fn post_empty(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.dispatch(endpoint, RequestOptions::post()).await
    }

    /// The `Cookie` header value the jar would send to the backend, if any
    pub fn cookie_header(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let header = self.cookies.cookies(&url)?;
        header.to_str().ok().map(str::to_string)
    }

    /// Loads cookies from a `Cookie` header value (`a=1; b=2`) into the jar
    pub fn restore_cookies(&self, header: &str) {
        let Ok(url) = Url::parse(&self.base_url) else {
            log::warn!("cannot restore cookies for invalid base url {}", self.base_url);
            return;
        };
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(pair, &url);
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
    headers
}

/// Appends percent-encoded query parameters to an endpoint path
pub fn query_path(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}
