//! Friendship operations
//!
//! The consolidated friends document is computed here by filtering the
//! friendship table relative to the logged-in user, the way the server
//! derives it. Status changes all funnel through
//! [`MockBackend::update_friendship_status`], which enforces the monotonic
//! transition rules.

use crate::store::MockBackend;
use async_trait::async_trait;
use chrono::Utc;
use estrade_client::api::FriendshipApi;
use estrade_client::error::ClientResult;
use shared::models::{
    FriendEntry, FriendRequestCreate, FriendRequestEntry, Friendship, FriendshipStatus,
    FriendsData, UserSummary,
};
use shared::{AppError, AppResult, ErrorCode};

fn friendship_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::FriendshipNotFound,
        format!("Friendship {} not found", id),
    )
}

impl MockBackend {
    /// Apply a status change to a friendship row, rejecting transitions the
    /// status state machine does not allow (for example back to `PENDING`
    /// once accepted) with a 400-equivalent error.
    pub async fn update_friendship_status(
        &self,
        friendship_id: i64,
        next: FriendshipStatus,
    ) -> AppResult<Friendship> {
        let mut state = self.state.write().await;
        let row = state
            .friendships
            .iter_mut()
            .find(|f| f.id == friendship_id)
            .ok_or_else(|| friendship_not_found(friendship_id))?;

        if !row.status.may_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::FriendshipStatusInvalid,
                format!("Cannot change friendship status {:?} to {:?}", row.status, next),
            ));
        }

        row.status = next;
        row.updated_at = Utc::now();
        let updated = row.clone();
        self.persist(&state)?;
        Ok(updated)
    }
}

#[async_trait]
impl FriendshipApi for MockBackend {
    async fn friends_data(&self) -> ClientResult<FriendsData> {
        self.simulate("friends.data").await;
        let me = self.current_user().await?;

        let state = self.state.read().await;
        let summary_of = |user_id: i64| -> Option<UserSummary> {
            state.user_by_id(user_id).map(UserSummary::from)
        };

        let mut data = FriendsData::empty();
        for f in state.friendships.iter().filter(|f| f.involves(me.id)) {
            match f.status {
                FriendshipStatus::Accepted => {
                    if let Some(user) = summary_of(f.other_user_id(me.id)) {
                        data.friends.push(FriendEntry {
                            friendship_id: f.id,
                            user,
                        });
                    }
                }
                FriendshipStatus::Pending => {
                    if let Some(user) = summary_of(f.other_user_id(me.id)) {
                        let entry = FriendRequestEntry {
                            friendship_id: f.id,
                            user,
                            status: f.status,
                            created_at: f.created_at,
                        };
                        if f.receiver_id == me.id {
                            data.pending.push(entry);
                        } else {
                            data.sent.push(entry);
                        }
                    }
                }
                // Blocked and terminal rows never surface in the document
                _ => {}
            }
        }
        Ok(data)
    }

    async fn send_request(&self, req: &FriendRequestCreate) -> ClientResult<Friendship> {
        self.simulate("friends.send").await;
        let me = self.current_user().await?;

        if !req.email.contains('@') {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                "A valid email address is required",
            )
            .into());
        }

        let mut state = self.state.write().await;
        let receiver = state
            .user_by_email(req.email.trim())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::UserNotFound,
                    format!("No account found for {}", req.email.trim()),
                )
            })?
            .clone();

        if receiver.id == me.id {
            return Err(AppError::new(ErrorCode::SelfFriendRequest).into());
        }
        if let Some(existing) = state.live_friendship_between(me.id, receiver.id) {
            return Err(AppError::with_message(
                ErrorCode::FriendshipExists,
                format!(
                    "A friendship with {} already exists (status {:?})",
                    receiver.email, existing.status
                ),
            )
            .into());
        }

        let now = Utc::now();
        let friendship = Friendship {
            id: state.alloc_id(),
            sender_id: me.id,
            receiver_id: receiver.id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.friendships.push(friendship.clone());
        self.persist(&state)?;

        tracing::info!(sender_id = me.id, receiver_id = receiver.id, "Friend request sent");
        Ok(friendship)
    }

    async fn accept(&self, friendship_id: i64) -> ClientResult<Friendship> {
        self.simulate("friends.accept").await;
        let me = self.current_user().await?;

        {
            let state = self.state.read().await;
            let row = state
                .friendship_by_id(friendship_id)
                .ok_or_else(|| friendship_not_found(friendship_id))?;
            if row.receiver_id != me.id {
                return Err(AppError::permission_denied(
                    "Only the receiver can accept a friend request",
                )
                .into());
            }
        }
        Ok(self
            .update_friendship_status(friendship_id, FriendshipStatus::Accepted)
            .await?)
    }

    async fn reject(&self, friendship_id: i64) -> ClientResult<Friendship> {
        self.simulate("friends.reject").await;
        let me = self.current_user().await?;

        {
            let state = self.state.read().await;
            let row = state
                .friendship_by_id(friendship_id)
                .ok_or_else(|| friendship_not_found(friendship_id))?;
            if row.receiver_id != me.id {
                return Err(AppError::permission_denied(
                    "Only the receiver can reject a friend request",
                )
                .into());
            }
        }
        Ok(self
            .update_friendship_status(friendship_id, FriendshipStatus::Rejected)
            .await?)
    }

    async fn cancel(&self, friendship_id: i64) -> ClientResult<()> {
        self.simulate("friends.cancel").await;
        let me = self.current_user().await?;

        {
            let state = self.state.read().await;
            let row = state
                .friendship_by_id(friendship_id)
                .ok_or_else(|| friendship_not_found(friendship_id))?;
            if row.sender_id != me.id {
                return Err(AppError::permission_denied(
                    "Only the sender can cancel a friend request",
                )
                .into());
            }
            if row.status != FriendshipStatus::Pending {
                return Err(AppError::with_message(
                    ErrorCode::FriendshipStatusInvalid,
                    "Only a pending request can be cancelled",
                )
                .into());
            }
        }
        self.update_friendship_status(friendship_id, FriendshipStatus::Cancelled)
            .await?;
        Ok(())
    }

    async fn remove(&self, friendship_id: i64) -> ClientResult<()> {
        self.simulate("friends.remove").await;
        let me = self.current_user().await?;

        {
            let state = self.state.read().await;
            let row = state
                .friendship_by_id(friendship_id)
                .ok_or_else(|| friendship_not_found(friendship_id))?;
            if !row.involves(me.id) {
                return Err(AppError::permission_denied(
                    "Only one of the two friends can remove a friendship",
                )
                .into());
            }
            if row.status != FriendshipStatus::Accepted {
                return Err(AppError::with_message(
                    ErrorCode::FriendshipStatusInvalid,
                    "Only an accepted friendship can be removed",
                )
                .into());
            }
        }
        self.update_friendship_status(friendship_id, FriendshipStatus::Cancelled)
            .await?;
        Ok(())
    }
}
