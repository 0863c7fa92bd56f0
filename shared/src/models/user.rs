//! User Model

use serde::{Deserialize, Serialize};

/// Platform role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular spectator account
    Spectator,
    /// Owner/administrator of a structure
    StructureAdministrator,
    /// Team member handling event organization
    OrganizationService,
    /// Team member handling reservations
    ReservationService,
}

impl UserRole {
    /// Roles that can be assigned to structure team members
    pub const TEAM_ROLES: [UserRole; 3] = [
        UserRole::StructureAdministrator,
        UserRole::OrganizationService,
        UserRole::ReservationService,
    ];

    /// Whether this role can be held by a structure team member
    pub fn is_team_role(&self) -> bool {
        Self::TEAM_ROLES.contains(self)
    }

    /// Whether this role can manage the structure itself (profile, deletion, team)
    pub fn can_manage_structure(&self) -> bool {
        matches!(self, UserRole::StructureAdministrator)
    }

    /// Whether this role can manage areas and audience zone templates
    pub fn can_manage_areas(&self) -> bool {
        matches!(
            self,
            UserRole::StructureAdministrator | UserRole::OrganizationService
        )
    }

    /// Whether this role can create and manage events
    pub fn can_manage_events(&self) -> bool {
        matches!(
            self,
            UserRole::StructureAdministrator | UserRole::OrganizationService
        )
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    /// Structure this user administers or works for, if any
    pub structure_id: Option<i64>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Display name ("First Last")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Light user view carried inside friend lists and search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Update user profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
