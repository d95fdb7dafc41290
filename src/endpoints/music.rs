//! Catalogue endpoints: singers, albums and songs

use serde_json::Value;

use crate::client::{ApiError, Dispatcher};

/// Wrappers for `/singer/...`, `/album/...` and `/song/...` endpoints
///
/// Search filters are free-form JSON objects interpreted by the backend
/// (e.g. `{"song_title": "..."}`).
#[derive(Debug, Clone, Copy)]
pub struct MusicApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MusicApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn search_singer(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher.post("/singer/search_singer/", filters).await
    }

    pub async fn singer_profile(&self, singer_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/singer/profile/{}/", singer_id))
            .await
    }

    pub async fn search_album(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher.post("/album/search_album/", filters).await
    }

    pub async fn album_profile(&self, album_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/album/profile/{}/", album_id))
            .await
    }

    pub async fn search_song(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher.post("/song/search_song/", filters).await
    }

    pub async fn song_profile(&self, song_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/song/profile/{}/", song_id))
            .await
    }
}
