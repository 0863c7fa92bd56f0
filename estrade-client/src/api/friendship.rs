//! Friendship API

use crate::api::require_data;
use crate::dto::{FriendsDataDto, FriendshipDto};
use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::ApiResponse;
use shared::models::{FriendRequestCreate, Friendship, FriendsData};

/// Friendship operations for the current user
#[async_trait]
pub trait FriendshipApi: Send + Sync {
    /// Fetch the consolidated friends document (friends, pending, sent)
    async fn friends_data(&self) -> ClientResult<FriendsData>;

    /// Send a friend request by email
    async fn send_request(&self, req: &FriendRequestCreate) -> ClientResult<Friendship>;

    /// Accept a received pending request
    async fn accept(&self, friendship_id: i64) -> ClientResult<Friendship>;

    /// Reject a received pending request
    async fn reject(&self, friendship_id: i64) -> ClientResult<Friendship>;

    /// Cancel a request the current user sent
    async fn cancel(&self, friendship_id: i64) -> ClientResult<()>;

    /// Remove an accepted friendship
    async fn remove(&self, friendship_id: i64) -> ClientResult<()>;
}

/// HTTP implementation of [`FriendshipApi`]
#[derive(Debug, Clone)]
pub struct HttpFriendshipApi {
    http: HttpClient,
}

impl HttpFriendshipApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FriendshipApi for HttpFriendshipApi {
    async fn friends_data(&self) -> ClientResult<FriendsData> {
        let resp: ApiResponse<FriendsDataDto> = self.http.get("api/friends").await?;
        require_data(resp, "friends")?.try_into()
    }

    async fn send_request(&self, req: &FriendRequestCreate) -> ClientResult<Friendship> {
        let resp: ApiResponse<FriendshipDto> =
            self.http.post("api/friends/requests", req).await?;
        require_data(resp, "friendship")?.try_into()
    }

    async fn accept(&self, friendship_id: i64) -> ClientResult<Friendship> {
        let resp: ApiResponse<FriendshipDto> = self
            .http
            .post_empty(&format!("api/friends/requests/{}/accept", friendship_id))
            .await?;
        require_data(resp, "friendship")?.try_into()
    }

    async fn reject(&self, friendship_id: i64) -> ClientResult<Friendship> {
        let resp: ApiResponse<FriendshipDto> = self
            .http
            .post_empty(&format!("api/friends/requests/{}/reject", friendship_id))
            .await?;
        require_data(resp, "friendship")?.try_into()
    }

    async fn cancel(&self, friendship_id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self
            .http
            .delete(&format!("api/friends/requests/{}", friendship_id))
            .await?;
        Ok(())
    }

    async fn remove(&self, friendship_id: i64) -> ClientResult<()> {
        let _: ApiResponse<()> = self
            .http
            .delete(&format!("api/friends/{}", friendship_id))
            .await?;
        Ok(())
    }
}
