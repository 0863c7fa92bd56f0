//! Friendship Model

use super::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Friendship lifecycle status
///
/// This is the single wire representation used by the API, the mock backend
/// and the stores. Transitions are monotonic: once a request leaves
/// `Pending` it never returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
    Blocked,
    Cancelled,
}

impl FriendshipStatus {
    /// Terminal states: the row can never change status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Whether a transition from `self` to `next` is allowed
    pub fn may_transition_to(&self, next: FriendshipStatus) -> bool {
        match self {
            Self::Pending => matches!(
                next,
                Self::Accepted | Self::Rejected | Self::Blocked | Self::Cancelled
            ),
            Self::Accepted => matches!(next, Self::Blocked | Self::Cancelled),
            Self::Blocked => matches!(next, Self::Cancelled),
            Self::Rejected | Self::Cancelled => false,
        }
    }
}

/// Friendship row: symmetric in meaning, asymmetric in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    /// The other party of the friendship relative to `user_id`
    pub fn other_user_id(&self, user_id: i64) -> i64 {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Whether `user_id` is one of the two parties
    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

/// Accepted friendship entry in the consolidated friends document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendEntry {
    pub friendship_id: i64,
    pub user: UserSummary,
}

/// Pending or sent request entry in the consolidated friends document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestEntry {
    pub friendship_id: i64,
    /// The other party: sender for received requests, receiver for sent ones
    pub user: UserSummary,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

/// Consolidated friends document returned by one endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FriendsData {
    /// Accepted friendships
    #[serde(default)]
    pub friends: Vec<FriendEntry>,
    /// Requests received by the current user, still pending
    #[serde(default)]
    pub pending: Vec<FriendRequestEntry>,
    /// Requests sent by the current user, still pending
    #[serde(default)]
    pub sent: Vec<FriendRequestEntry>,
}

impl FriendsData {
    /// Empty document (logged out / not yet loaded)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of entries across the three lists
    pub fn len(&self) -> usize {
        self.friends.len() + self.pending.len() + self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Send friend request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestCreate {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_format() {
        assert_eq!(
            serde_json::to_string(&FriendshipStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&FriendshipStatus::Accepted).unwrap(),
            "\"ACCEPTED\""
        );

        let parsed: FriendshipStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, FriendshipStatus::Cancelled);
    }

    #[test]
    fn test_status_transitions_are_monotonic() {
        use FriendshipStatus::*;

        assert!(Pending.may_transition_to(Accepted));
        assert!(Pending.may_transition_to(Rejected));
        assert!(Pending.may_transition_to(Cancelled));

        // Never back to pending
        assert!(!Accepted.may_transition_to(Pending));
        assert!(!Rejected.may_transition_to(Pending));
        assert!(!Blocked.may_transition_to(Pending));

        // Terminal states are frozen
        assert!(!Rejected.may_transition_to(Accepted));
        assert!(!Cancelled.may_transition_to(Accepted));

        assert!(Accepted.may_transition_to(Cancelled));
        assert!(Blocked.may_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        assert!(FriendshipStatus::Rejected.is_terminal());
        assert!(FriendshipStatus::Cancelled.is_terminal());
        assert!(!FriendshipStatus::Pending.is_terminal());
        assert!(!FriendshipStatus::Accepted.is_terminal());
        assert!(!FriendshipStatus::Blocked.is_terminal());
    }

    #[test]
    fn test_other_user_id() {
        let f = Friendship {
            id: 1,
            sender_id: 10,
            receiver_id: 20,
            status: FriendshipStatus::Accepted,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(f.other_user_id(10), 20);
        assert_eq!(f.other_user_id(20), 10);
        assert!(f.involves(10));
        assert!(f.involves(20));
        assert!(!f.involves(30));
    }
}
