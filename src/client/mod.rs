//! ShengHang API client
//!
//! [`Dispatcher`] performs single requests. [`ShengHangClient`] owns a
//! dispatcher, a [`ResponseCache`] and the stored login session, and hands
//! out the per-domain endpoint groups from [`crate::endpoints`].

mod dispatcher;
mod error;

pub use dispatcher::{query_path, Dispatcher, RequestBody, RequestOptions};
pub use error::{ApiError, DETAIL_KEY};

use serde_json::Value;
use thiserror::Error;

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::endpoints::{
    AdminApi, CommentApi, FavoriteApi, MusicApi, PlayHistoryApi, SonglistApi, UserApi,
};
use crate::session::{Identity, Session, SessionStore};

/// Errors from the client's session glue
#[derive(Debug, Error)]
pub enum ClientError {
    /// A backend request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    /// Reading or writing the session file failed
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    /// The operation needs a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// Missing expected field in a response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Entry point for talking to the ShengHang backend
#[derive(Debug)]
pub struct ShengHangClient {
    dispatcher: Dispatcher,
    cache: ResponseCache,
    store: Option<SessionStore>,
    session: Session,
}

impl ShengHangClient {
    /// Creates a client that persists its session in the platform data directory
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_session_store(config, SessionStore::new())
    }

    /// Creates a client with an explicit session store, or none for an
    /// in-memory session
    pub fn with_session_store(
        config: &ClientConfig,
        store: Option<SessionStore>,
    ) -> Result<Self, ClientError> {
        let dispatcher = Dispatcher::new(config.base_url.clone())?;
        let session = store.as_ref().map(SessionStore::load).unwrap_or_default();
        if let Some(cookie) = &session.cookie {
            dispatcher.restore_cookies(cookie);
        }

        Ok(Self {
            dispatcher,
            cache: ResponseCache::new(config.cache_ttl),
            store,
            session,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(&self.dispatcher)
    }

    pub fn music(&self) -> MusicApi<'_> {
        MusicApi::new(&self.dispatcher)
    }

    pub fn songlists(&self) -> SonglistApi<'_> {
        SonglistApi::new(&self.dispatcher)
    }

    pub fn favorites(&self) -> FavoriteApi<'_> {
        FavoriteApi::new(&self.dispatcher)
    }

    pub fn comments(&self) -> CommentApi<'_> {
        CommentApi::new(&self.dispatcher)
    }

    pub fn play_history(&self) -> PlayHistoryApi<'_> {
        PlayHistoryApi::new(&self.dispatcher)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(&self.dispatcher)
    }

    /// `GET` an endpoint, answering from the response cache when possible
    ///
    /// The endpoint path (including any query string) is the cache key.
    pub async fn cached_get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.cache
            .cached_request(endpoint, || self.dispatcher.get(endpoint))
            .await
    }

    /// Logs in and stores the returned identity and session cookie
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Identity, ClientError> {
        let payload = self.users().login(username, password).await?;

        let user_id = payload
            .get("user_id")
            .and_then(json_to_string)
            .ok_or_else(|| ClientError::MissingField("user_id".to_string()))?;
        let identity = Identity {
            user_id,
            username: payload
                .get("username")
                .and_then(Value::as_str)
                .unwrap_or(username)
                .to_string(),
            is_admin: payload
                .get("is_admin")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        };

        self.session = Session {
            identity: Some(identity.clone()),
            cookie: self.dispatcher.cookie_header(),
        };
        if let Some(store) = &self.store {
            store.save(&self.session)?;
        }

        log::info!("logged in as {} ({})", identity.username, identity.user_id);
        Ok(identity)
    }

    /// Logs out
    ///
    /// A failed logout request is logged and otherwise ignored; the local
    /// identity and the response cache are cleared either way.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Err(e) = self.users().logout().await {
            log::warn!("logout request failed: {}", e);
        }

        self.session = Session::default();
        self.cache.clear();
        if let Some(store) = &self.store {
            store.clear()?;
        }
        Ok(())
    }

    /// The logged-in identity, or `ClientError::NotLoggedIn`
    pub fn require_login(&self) -> Result<&Identity, ClientError> {
        self.session.identity.as_ref().ok_or(ClientError::NotLoggedIn)
    }
}

/// Ids arrive as JSON numbers or strings depending on the endpoint
fn json_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
