//! Audience Zone Template Model

use serde::{Deserialize, Serialize};

/// Seating arrangement of an audience zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatingType {
    Seated,
    Standing,
    Mixed,
}

/// Reusable audience zone template attached to an area
///
/// Templates describe how an area is split for ticketing (front pit,
/// balcony, ...) and are instantiated per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceZoneTemplate {
    pub id: i64,
    pub area_id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub seating_type: SeatingType,
    pub is_active: bool,
}

/// Create audience zone template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceZoneTemplateCreate {
    pub name: String,
    pub max_capacity: i32,
    pub seating_type: SeatingType,
}

/// Update audience zone template payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceZoneTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seating_type: Option<SeatingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
