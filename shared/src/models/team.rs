//! Team Member Model

use super::user::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership status of a team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// Invitation accepted, account linked
    Active,
    /// Invitation sent, not yet accepted
    Pending,
}

/// Team member entity
///
/// `user_id`, `first_name` and `last_name` stay empty until the invitee
/// accepts the invitation and links an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub structure_id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
    pub status: MemberStatus,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl TeamMember {
    /// Whether this member row belongs to the given user account
    pub fn is_user(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Invite team member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvite {
    pub email: String,
    pub role: UserRole,
}

/// Change team member role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoleUpdate {
    pub role: UserRole,
}
