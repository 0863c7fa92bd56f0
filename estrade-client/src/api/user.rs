//! User profile and favorites API

use crate::api::require_data;
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{User, UserUpdate};

/// Profile and favorite structure operations for the current user
///
/// Favorite mutations return the full refreshed id list.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn update_profile(&self, req: &UserUpdate) -> ClientResult<User>;

    async fn favorites(&self) -> ClientResult<Vec<i64>>;

    async fn add_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>>;

    async fn remove_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>>;
}

/// HTTP implementation of [`UserApi`]
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    http: HttpClient,
}

impl HttpUserApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn update_profile(&self, req: &UserUpdate) -> ClientResult<User> {
        let resp: ApiResponse<User> = self.http.patch("api/users/me", req).await?;
        require_data(resp, "user")
    }

    async fn favorites(&self) -> ClientResult<Vec<i64>> {
        let resp: ApiResponse<Vec<i64>> = self.http.get("api/users/me/favorites").await?;
        require_data(resp, "favorites")
    }

    async fn add_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>> {
        let resp: ApiResponse<Vec<i64>> = self
            .http
            .post_empty(&format!("api/users/me/favorites/{}", structure_id))
            .await?;
        require_data(resp, "favorites")
    }

    async fn remove_favorite(&self, structure_id: i64) -> ClientResult<Vec<i64>> {
        let resp: ApiResponse<Vec<i64>> = self
            .http
            .delete(&format!("api/users/me/favorites/{}", structure_id))
            .await?;
        require_data(resp, "favorites")
    }
}
