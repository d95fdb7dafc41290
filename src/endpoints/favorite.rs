//! Favorite endpoints

use serde_json::{json, Value};

use super::TargetKind;
use crate::client::{ApiError, Dispatcher};

/// Default number of entries in the platform top-favorites ranking
pub const DEFAULT_TOP_LIMIT: u32 = 10;

/// Wrappers for `/favorite/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct FavoriteApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FavoriteApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Favorites of the logged-in user
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.dispatcher.get("/favorite/list_favorite/").await
    }

    pub async fn add(&self, kind: TargetKind, id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/favorite/add_favorite/",
                json!({"type": kind.as_str(), "id": id}),
            )
            .await
    }

    pub async fn delete(&self, kind: TargetKind, id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/favorite/delete_favorite/",
                json!({"type": kind.as_str(), "id": id}),
            )
            .await
    }

    /// Statistics over the logged-in user's favorite songs
    pub async fn my_song_stats(&self) -> Result<Value, ApiError> {
        self.dispatcher
            .post_empty("/favorite/get_my_favorite_songs_stats/")
            .await
    }

    /// Most-favorited items of one kind across the platform
    pub async fn platform_top(&self, target_type: TargetKind, limit: u32) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/favorite/get_platform_top_favorites/",
                json!({"target_type": target_type.as_str(), "limit": limit}),
            )
            .await
    }
}
