//! Wire payloads with untyped date fields
//!
//! The API emits timestamps in more than one format, so date-bearing
//! payloads are first parsed with `String` dates and then converted into
//! the chrono-typed models by [`crate::convert`]. Payloads without dates
//! deserialize straight into the shared models.

use serde::{Deserialize, Serialize};
use shared::models::{
    Address, EventStatus, FriendEntry, FriendshipStatus, MemberStatus, StructureArea,
    StructureType, UserRole, UserSummary,
};

/// Structure as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureDto {
    pub id: i64,
    pub name: String,
    pub types: Vec<StructureType>,
    pub description: Option<String>,
    pub address: Address,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub gallery_urls: Vec<String>,
    pub areas: Option<Vec<StructureArea>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Structure creation response as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureCreatedDto {
    pub structure: StructureDto,
    pub token: Option<String>,
}

/// Event summary as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummaryDto {
    pub id: i64,
    pub structure_id: i64,
    pub name: String,
    pub start_at: String,
    pub end_at: String,
    pub status: EventStatus,
}

/// Team member as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDto {
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
    pub invited_at: String,
    pub joined_at: Option<String>,
}

/// Friendship row as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipDto {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: FriendshipStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Friend request entry as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestEntryDto {
    pub friendship_id: i64,
    pub user: UserSummary,
    pub status: FriendshipStatus,
    pub created_at: String,
}

/// Consolidated friends document as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsDataDto {
    #[serde(default)]
    pub friends: Vec<FriendEntry>,
    #[serde(default)]
    pub pending: Vec<FriendRequestEntryDto>,
    #[serde(default)]
    pub sent: Vec<FriendRequestEntryDto>,
}
