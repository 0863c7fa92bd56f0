//! Structure Area Model

use super::audience_zone::AudienceZoneTemplate;
use serde::{Deserialize, Serialize};

/// Physical area of a structure (hall, pit, esplanade, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureArea {
    pub id: i64,
    pub structure_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
    /// Audience zone templates of this area, present once lazily loaded
    pub audience_zone_templates: Option<Vec<AudienceZoneTemplate>>,
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
}

/// Update area payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
