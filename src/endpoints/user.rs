//! User account, profile and follow endpoints

use serde_json::{json, Value};

use crate::client::{ApiError, Dispatcher};

/// Wrappers for `/user/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> UserApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Registers a new account; `user_data` is passed through as the body
    pub async fn register(&self, user_data: Value) -> Result<Value, ApiError> {
        self.dispatcher.post("/user/register/", user_data).await
    }

    /// Logs in. Use [`ShengHangClient::login`](crate::client::ShengHangClient::login)
    /// to also record the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/user/login/",
                json!({"username": username, "password": password}),
            )
            .await
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.dispatcher.post_empty("/user/logout/").await
    }

    pub async fn delete_account(&self, password: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/delete_account/", json!({"password": password}))
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/user/change_password/",
                json!({"old_password": old_password, "new_password": new_password}),
            )
            .await
    }

    pub async fn profile(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/user/profile/{}/", user_id))
            .await
    }

    pub async fn update_profile(&self, profile_data: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/update_profile/", profile_data)
            .await
    }

    pub async fn follow_user(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/follow_user/", json!({"user_id": user_id}))
            .await
    }

    pub async fn unfollow_user(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/unfollow_user/", json!({"user_id": user_id}))
            .await
    }

    pub async fn follow_singer(&self, singer_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/follow_singer/", json!({"singer_id": singer_id}))
            .await
    }

    pub async fn unfollow_singer(&self, singer_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/unfollow_singer/", json!({"singer_id": singer_id}))
            .await
    }

    /// Users that `user_id` follows
    pub async fn followings(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/user/{}/get_followings/", user_id))
            .await
    }

    /// Users following `user_id`
    pub async fn followers(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/user/{}/get_followers/", user_id))
            .await
    }

    /// Singers that `user_id` follows
    pub async fn followed_singers(&self, user_id: u64) -> Result<Value, ApiError> {
        self.dispatcher
            .get(&format!("/user/{}/get_followsingers/", user_id))
            .await
    }

    /// Looks up a user by name
    pub async fn user_info(&self, user_name: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/get_user_info/", json!({"user_name": user_name}))
            .await
    }

    /// Updates which profile fields are public
    pub async fn update_visibility(&self, visibility: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/user/update_visibility/", visibility)
            .await
    }
}
