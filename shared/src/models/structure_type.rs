//! Structure Type Model

use serde::{Deserialize, Serialize};

/// Structure type lookup entity (concert hall, theater, stadium, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureType {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}
