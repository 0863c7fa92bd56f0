//! Friendships of the current user
//!
//! The server exposes one consolidated document (friends, received
//! requests, sent requests). Mutations touch individual friendships but
//! shift entries between the three lists, so every successful mutation
//! reloads the whole document instead of patching it locally.

use crate::cache::CacheSlot;
use crate::notify::Notifier;
use crate::session::SessionStore;
use estrade_client::{ApiClient, ClientResult};
use shared::models::{FriendEntry, FriendRequestCreate, FriendRequestEntry, Friendship, FriendsData};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Friendship state of the logged-in user
pub struct FriendshipStore {
    api: ApiClient,
    session: Arc<SessionStore>,
    notifier: Notifier,
    data: CacheSlot<FriendsData>,
}

impl FriendshipStore {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            data: CacheSlot::new(),
        }
    }

    /// Consolidated friends document, cached until forced
    ///
    /// Logged-out callers get the empty document without a request.
    pub async fn load_friends_data(&self, force: bool) -> FriendsData {
        if !self.session.is_logged_in().await {
            return FriendsData::empty();
        }
        match self
            .data
            .get_or_fetch(force, || self.api.friends.friends_data())
            .await
        {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load friends data");
                self.notifier.error(e.user_message());
                self.data.value().await.unwrap_or_default()
            }
        }
    }

    /// Accepted friends from the cached document
    pub async fn friends(&self) -> Vec<FriendEntry> {
        self.data
            .value()
            .await
            .map(|d| d.friends)
            .unwrap_or_default()
    }

    /// Received requests still awaiting an answer
    pub async fn pending_requests(&self) -> Vec<FriendRequestEntry> {
        self.data
            .value()
            .await
            .map(|d| d.pending)
            .unwrap_or_default()
    }

    /// Requests the current user sent and may still cancel
    pub async fn sent_requests(&self) -> Vec<FriendRequestEntry> {
        self.data.value().await.map(|d| d.sent).unwrap_or_default()
    }

    /// Send a friend request to the given email
    ///
    /// Errors are notified and also returned so the invite form can keep
    /// the address and show a field-level message.
    pub async fn send_friend_request_by_email(&self, email: &str) -> ClientResult<Friendship> {
        let req = FriendRequestCreate {
            email: email.to_string(),
        };
        match self.api.friends.send_request(&req).await {
            Ok(friendship) => {
                tracing::info!(friendship_id = friendship.id, "Friend request sent");
                self.reload().await;
                self.notifier
                    .success(format!("Demande d'ami envoyée à {email}."));
                Ok(friendship)
            }
            Err(e) => {
                tracing::warn!(email, error = %e, "Failed to send friend request");
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Accept a received request
    pub async fn accept_request(&self, friendship_id: i64) -> bool {
        match self.api.friends.accept(friendship_id).await {
            Ok(_) => {
                tracing::info!(friendship_id, "Friend request accepted");
                self.reload().await;
                self.notifier.success("Demande d'ami acceptée.");
                true
            }
            Err(e) => {
                tracing::warn!(friendship_id, error = %e, "Failed to accept friend request");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Reject a received request
    pub async fn reject_request(&self, friendship_id: i64) -> bool {
        match self.api.friends.reject(friendship_id).await {
            Ok(_) => {
                tracing::info!(friendship_id, "Friend request rejected");
                self.reload().await;
                self.notifier.success("Demande d'ami refusée.");
                true
            }
            Err(e) => {
                tracing::warn!(friendship_id, error = %e, "Failed to reject friend request");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Cancel a request the current user sent
    ///
    /// The error is returned as well: the other party may have answered
    /// in the meantime, and the sent list needs to reflect that.
    pub async fn cancel_sent_request(&self, friendship_id: i64) -> ClientResult<()> {
        match self.api.friends.cancel(friendship_id).await {
            Ok(()) => {
                tracing::info!(friendship_id, "Friend request cancelled");
                self.reload().await;
                self.notifier.success("Demande d'ami annulée.");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(friendship_id, error = %e, "Failed to cancel friend request");
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Remove an accepted friend
    pub async fn remove_friend(&self, friendship_id: i64) -> bool {
        match self.api.friends.remove(friendship_id).await {
            Ok(()) => {
                tracing::info!(friendship_id, "Friend removed");
                self.reload().await;
                self.notifier.success("Cet ami a été retiré de votre liste.");
                true
            }
            Err(e) => {
                tracing::warn!(friendship_id, error = %e, "Failed to remove friend");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Drop the cached document
    pub async fn clear(&self) {
        self.data.clear().await;
    }

    /// React to session changes: load on login, clear on logout
    ///
    /// Runs until the token is cancelled or the session store is dropped.
    pub async fn run_session_watcher(self: Arc<Self>, shutdown: CancellationToken) {
        let mut rx = self.session.watch_user();
        let mut logged_in = rx.borrow_and_update().is_some();
        if logged_in {
            self.load_friends_data(false).await;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = rx.borrow_and_update().is_some();
                    if next == logged_in {
                        continue;
                    }
                    logged_in = next;
                    if logged_in {
                        tracing::debug!("User logged in, loading friends data");
                        self.load_friends_data(true).await;
                    } else {
                        self.clear().await;
                    }
                }
            }
        }
        tracing::debug!("Friendship session watcher stopped");
    }

    async fn reload(&self) {
        if let Err(e) = self
            .data
            .get_or_fetch(true, || self.api.friends.friends_data())
            .await
        {
            tracing::error!(error = %e, "Failed to reload friends data");
            self.notifier.error(e.user_message());
        }
    }
}
