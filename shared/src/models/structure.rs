//! Structure Model

use super::area::StructureArea;
use super::structure_type::StructureType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Postal address of a structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

/// Structure entity (event venue)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
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
    /// Areas owned by this structure, present on detail fetches
    pub areas: Option<Vec<StructureArea>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact structure view carried on list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureSummary {
    pub id: i64,
    pub name: String,
    pub types: Vec<StructureType>,
    pub city: String,
    pub logo_url: Option<String>,
    /// Server-computed ranking weight used for list ordering
    pub importance: Option<i32>,
    /// Server-computed count of scheduled events
    #[serde(default)]
    pub events_count: i64,
}

/// Create structure payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureCreate {
    pub name: String,
    pub type_ids: Vec<i64>,
    pub description: Option<String>,
    pub address: Address,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Update structure payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Response of the structure creation endpoint
///
/// The server re-issues the creator's auth token with administrator rights
/// over the new structure; the session layer must apply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureCreated {
    pub structure: Structure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
