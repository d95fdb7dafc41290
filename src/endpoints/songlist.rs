//! Song list (playlist) endpoints

use serde_json::{json, Value};

use crate::client::{query_path, ApiError, Dispatcher};

/// Default ordering for [`SonglistApi::list`]
pub const DEFAULT_LIST_SORT: &str = "create_time";

/// Wrappers for `/songlist/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct SonglistApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> SonglistApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Lists song lists, optionally only public (`Some(true)`) or private (`Some(false)`) ones
    pub async fn list(&self, is_public: Option<bool>, sort_by: &str) -> Result<Value, ApiError> {
        self.dispatcher.get(&list_path(is_public, sort_by)).await
    }

    pub async fn create(&self, songlist_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/songlist/create_songlist/", songlist_data)
            .await
    }

    pub async fn edit(&self, songlist_id: u64, songlist_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                &format!("/songlist/edit_songlist/{}/", songlist_id),
                songlist_data,
            )
            .await
    }

    pub async fn profile(&self, songlist_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/songlist/profile/{}/", songlist_id))
            .await
    }

    pub async fn delete(&self, songlist_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post_empty(&format!("/songlist/delete_songlist/{}/", songlist_id))
            .await
    }

    pub async fn add_song(&self, songlist_id: u64, song_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                &format!("/songlist/{}/add_song/", songlist_id),
                json!({"song_id": song_id}),
            )
            .await
    }

    pub async fn remove_song(&self, songlist_id: u64, song_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post_empty(&format!(
                "/songlist/{}/delete_song/{}/",
                songlist_id, song_id
            ))
            .await
    }

    pub async fn search(&self, title: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/songlist/search_songlist/",
                json!({"songlist_title": title}),
            )
            .await
    }

    pub async fn like(&self, songlist_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post_empty(&format!("/songlist/like_songlist/{}/", songlist_id))
            .await
    }

    /// Songs of a list in the given order
    pub async fn sort(&self, songlist_id: u64, sort_by: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&query_path(
                &format!("/songlist/sort_songlist/{}/", songlist_id),
                &[("sort", sort_by.to_string())],
            ))
            .await
    }
}

fn list_path(is_public: Option<bool>, sort_by: &str) -> String {
    let mut params = vec![("sort_by", sort_by.to_string())];
    if let Some(is_public) = is_public {
        params.push(("is_public", if is_public { "1" } else { "0" }.to_string()));
    }
    query_path("/songlist/list_songlists/", &params)
}
