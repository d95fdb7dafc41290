//! Comment endpoints

use serde_json::{json, Value};
use std::fmt;

use super::TargetKind;
use crate::client::{query_path, ApiError, Dispatcher};

/// Default ordering for comments on a target
pub const DEFAULT_COMMENT_SORT: &str = "time";

/// What to do to a comment through [`CommentApi::action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Like,
    Report,
}

impl fmt::Display for CommentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommentAction::Like => "like",
            CommentAction::Report => "report",
        })
    }
}

/// Wrappers for `/comment/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct CommentApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> CommentApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self) -> Result<Value, ApiError> {
        self.dispatcher.get("/comment/list_comment/").await
    }

    /// Publishes a comment, or a reply when `parent_id` is set
    pub async fn publish(
        &self,
        target_type: TargetKind,
        target_id: u64,
        content: &str,
        parent_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/comment/publish_comment/",
                json!({
                    "target_type": target_type.as_str(),
                    "target_id": target_id,
                    "content": content,
                    "parent_id": parent_id,
                }),
            )
            .await
    }

    pub async fn delete(&self, comment_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/comment/delete_comment/",
                json!({"comment_id": comment_id}),
            )
            .await
    }

    pub async fn action(&self, comment_id: u64, action: CommentAction) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/comment/action_comment/",
                json!({"comment_id": comment_id, "action": action.to_string()}),
            )
            .await
    }

    pub async fn by_target(
        &self,
        target_type: TargetKind,
        target_id: u64,
        sort_by: &str,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&query_path(
                "/comment/get_comments_by_target/",
                &[
                    ("target_type", target_type.to_string()),
                    ("target_id", target_id.to_string()),
                    ("sort_by", sort_by.to_string()),
                ],
            ))
            .await
    }

    pub async fn detail(&self, comment_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&query_path(
                "/comment/get_comment_detail/",
                &[("comment_id", comment_id.to_string())],
            ))
            .await
    }

    /// Comments written by the logged-in user
    pub async fn mine(&self) -> Result<Value, ApiError> {
        self.dispatcher.get("/comment/get_my_comments/").await
    }

    pub async fn stats(&self, target_type: TargetKind, target_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&query_path(
                "/comment/get_comment_stats/",
                &[
                    ("target_type", target_type.to_string()),
                    ("target_id", target_id.to_string()),
                ],
            ))
            .await
    }

    pub async fn report(&self, comment_id: u64, reason: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/comment/report_comment/",
                json!({"comment_id": comment_id, "reason": reason}),
            )
            .await
    }
}
