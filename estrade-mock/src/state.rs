//! In-memory tables of the mock backend

use serde::{Deserialize, Serialize};
use shared::models::{
    AudienceZoneTemplate, EventSummary, Friendship, Structure, StructureArea, StructureType,
    TeamMember, User,
};
use std::collections::HashMap;

/// Whole backend state: one field per table
///
/// Areas and audience zone templates live in their own tables and are
/// attached to parent payloads at read time, mirroring how the server
/// joins them on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockState {
    #[serde(default)]
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub structure_types: Vec<StructureType>,
    #[serde(default)]
    pub structure_areas: Vec<StructureArea>,
    #[serde(default)]
    pub audience_zones: Vec<AudienceZoneTemplate>,
    #[serde(default)]
    pub events: Vec<EventSummary>,
    #[serde(default)]
    pub users: Vec<User>,
    /// Plaintext passwords by user id; mock only, never leaves this crate
    #[serde(default)]
    pub passwords: HashMap<i64, String>,
    /// Favorite structure ids by user id
    #[serde(default)]
    pub user_favorites: HashMap<i64, Vec<i64>>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub friendships: Vec<Friendship>,
    /// Ranking weight by structure id, drives list ordering
    #[serde(default)]
    pub structure_importance: HashMap<i64, i32>,
    /// Next id handed out to any newly created row
    #[serde(default = "default_next_id")]
    pub next_id: i64,
}

fn default_next_id() -> i64 {
    1000
}

impl MockState {
    /// Empty state with no users or structures
    pub fn empty() -> Self {
        Self {
            next_id: default_next_id(),
            ..Default::default()
        }
    }

    /// Allocate a fresh id, unique across all tables
    pub fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn structure_by_id(&self, id: i64) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }

    pub fn area_by_id(&self, id: i64) -> Option<&StructureArea> {
        self.structure_areas.iter().find(|a| a.id == id)
    }

    pub fn areas_of(&self, structure_id: i64) -> Vec<StructureArea> {
        self.structure_areas
            .iter()
            .filter(|a| a.structure_id == structure_id)
            .cloned()
            .collect()
    }

    pub fn zone_by_id(&self, id: i64) -> Option<&AudienceZoneTemplate> {
        self.audience_zones.iter().find(|z| z.id == id)
    }

    pub fn zones_of(&self, area_id: i64) -> Vec<AudienceZoneTemplate> {
        self.audience_zones
            .iter()
            .filter(|z| z.area_id == area_id)
            .cloned()
            .collect()
    }

    pub fn events_of(&self, structure_id: i64) -> Vec<EventSummary> {
        let mut events: Vec<EventSummary> = self
            .events
            .iter()
            .filter(|e| e.structure_id == structure_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_at);
        events
    }

    pub fn team_of(&self, structure_id: i64) -> Vec<TeamMember> {
        self.team_members
            .iter()
            .filter(|m| m.structure_id == structure_id)
            .cloned()
            .collect()
    }

    pub fn friendship_by_id(&self, id: i64) -> Option<&Friendship> {
        self.friendships.iter().find(|f| f.id == id)
    }

    /// Any friendship row between the two users that is still in force
    /// (pending, accepted or blocked); terminal rows do not count.
    pub fn live_friendship_between(&self, a: i64, b: i64) -> Option<&Friendship> {
        self.friendships
            .iter()
            .find(|f| f.involves(a) && f.involves(b) && !f.status.is_terminal())
    }

    pub fn favorites_of(&self, user_id: i64) -> Vec<i64> {
        self.user_favorites.get(&user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_id_is_monotonic() {
        let mut state = MockState::empty();
        let a = state.alloc_id();
        let b = state.alloc_id();
        assert_eq!(b, a + 1);
        assert!(a >= 1000);
    }

    #[test]
    fn test_empty_state_roundtrips_through_json() {
        let state = MockState::empty();
        let json = serde_json::to_string(&state).unwrap();
        let back: MockState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.next_id, state.next_id);
        assert!(back.structures.is_empty());
    }
}
