//! Administrator endpoints
//!
//! The backend only honours these for the administrator account; other users
//! get an `Http` error with status 403.

use serde_json::{json, Map, Value};

use super::merge_object;
use crate::client::{ApiError, Dispatcher};

/// Wrappers for `/Administrator/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AdminApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn add_singer(&self, singer_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/singer/admin_add_singer/", singer_data)
            .await
    }

    pub async fn delete_singer(&self, singer_id: u64, singer_name: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/Administrator/singer/admin_delete_singer/",
                json!({"singer_id": singer_id, "singer_name": singer_name}),
            )
            .await
    }

    pub async fn update_singer(&self, singer_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/singer/admin_update_singer/", singer_data)
            .await
    }

    pub async fn add_album(&self, album_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/album/admin_add_album/", album_data)
            .await
    }

    pub async fn delete_album(&self, album_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/Administrator/album/admin_delete_album/",
                json!({"album_id": album_id}),
            )
            .await
    }

    pub async fn update_album(&self, album_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/album/admin_update_album/", album_data)
            .await
    }

    pub async fn add_song(&self, song_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/song/admin_add_song/", song_data)
            .await
    }

    pub async fn delete_song(&self, song_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/Administrator/song/admin_delete_song/",
                json!({"song_id": song_id}),
            )
            .await
    }

    pub async fn update_song(&self, song_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/song/admin_update_song/", song_data)
            .await
    }

    pub async fn system_logs(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/get_system_logs/", filters)
            .await
    }

    pub async fn user_behavior_stats(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/Administrator/user/get_user_behavior_stats/", filters)
            .await
    }

    /// Detailed behaviour statistics for one user; `filters` are merged into the body
    pub async fn specific_user_stats(&self, target_user_id: u64, filters: Value) -> Result<Value, ApiError> {
        let mut body = Map::new();
        body.insert("target_user_id".to_string(), json!(target_user_id));
        self.dispatcher
            .post(
                "/Administrator/user/get_specific_user_stats/",
                merge_object(body, filters),
            )
            .await
    }

    pub async fn pending_comments(&self, page: u32, page_size: u32) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/Administrator/comment/admin_get_pending_comments/",
                json!({"page": page, "page_size": page_size}),
            )
            .await
    }

    /// Approves or rejects a comment, optionally banning its author
    pub async fn audit_comment(&self, comment_id: u64, result: &str, ban_user: bool) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/Administrator/comment/admin_audit_comment/",
                json!({"comment_id": comment_id, "result": result, "ban_user": ban_user}),
            )
            .await
    }
}
