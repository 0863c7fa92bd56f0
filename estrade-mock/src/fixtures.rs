//! Seed data for the mock backend
//!
//! One structure administrator (Alice, user 1, structure 1) with a staffed
//! venue, a handful of spectator accounts around her, and a friendship
//! table where exactly the rows 2, 20 and 27 are requests waiting on her.

use chrono::{DateTime, TimeZone, Utc};
use shared::models::{
    Address, AudienceZoneTemplate, EventStatus, EventSummary, Friendship, FriendshipStatus,
    MemberStatus, SeatingType, Structure, StructureArea, StructureType, TeamMember, User, UserRole,
};

use crate::state::MockState;

/// Every seeded account logs in with this password
pub const DEFAULT_PASSWORD: &str = "password123";

pub const ADMIN_USER_ID: i64 = 1;
pub const ADMIN_EMAIL: &str = "alice@estrade.fr";
pub const ADMIN_STRUCTURE_ID: i64 = 1;

pub const SPECTATOR_USER_ID: i64 = 2;
pub const SPECTATOR_EMAIL: &str = "bruno@estrade.fr";

/// Friendship rows pending on the admin account, in seed order
pub const PENDING_FRIENDSHIP_IDS: [i64; 3] = [2, 20, 27];

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn user(id: i64, first: &str, last: &str, email: &str, role: UserRole, structure: Option<i64>) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        role,
        structure_id: structure,
        avatar_url: None,
    }
}

fn friendship(
    id: i64,
    sender_id: i64,
    receiver_id: i64,
    status: FriendshipStatus,
    created: DateTime<Utc>,
) -> Friendship {
    Friendship {
        id,
        sender_id,
        receiver_id,
        status,
        created_at: created,
        updated_at: created,
    }
}

/// Build the fully seeded state
pub fn seed() -> MockState {
    let mut state = MockState::empty();

    state.structure_types = vec![
        StructureType {
            id: 1,
            name: "Salle de concert".to_string(),
            icon: Some("music".to_string()),
        },
        StructureType {
            id: 2,
            name: "Théâtre".to_string(),
            icon: Some("masks".to_string()),
        },
        StructureType {
            id: 3,
            name: "Stade".to_string(),
            icon: Some("stadium".to_string()),
        },
        StructureType {
            id: 4,
            name: "Festival / Plein air".to_string(),
            icon: Some("tent".to_string()),
        },
    ];

    state.users = vec![
        user(
            ADMIN_USER_ID,
            "Alice",
            "Martin",
            ADMIN_EMAIL,
            UserRole::StructureAdministrator,
            Some(ADMIN_STRUCTURE_ID),
        ),
        user(
            SPECTATOR_USER_ID,
            "Bruno",
            "Lefevre",
            SPECTATOR_EMAIL,
            UserRole::Spectator,
            None,
        ),
        user(
            3,
            "Chloé",
            "Dubois",
            "chloe@estrade.fr",
            UserRole::OrganizationService,
            Some(ADMIN_STRUCTURE_ID),
        ),
        user(4, "David", "Moreau", "david@estrade.fr", UserRole::Spectator, None),
        user(5, "Emma", "Petit", "emma@estrade.fr", UserRole::Spectator, None),
        user(6, "Farid", "Benali", "farid@estrade.fr", UserRole::Spectator, None),
        user(
            7,
            "Gabrielle",
            "Roux",
            "gabrielle@estrade.fr",
            UserRole::Spectator,
            None,
        ),
        user(
            8,
            "Hugo",
            "Blanc",
            "hugo@estrade.fr",
            UserRole::ReservationService,
            Some(ADMIN_STRUCTURE_ID),
        ),
        user(9, "Inès", "Garcia", "ines@estrade.fr", UserRole::Spectator, None),
    ];
    state.passwords = state
        .users
        .iter()
        .map(|u| (u.id, DEFAULT_PASSWORD.to_string()))
        .collect();

    let created = ts(2025, 1, 10, 9, 0);
    state.structures = vec![
        Structure {
            id: ADMIN_STRUCTURE_ID,
            name: "Le Zénith de Paris".to_string(),
            types: vec![state.structure_types[0].clone()],
            description: Some("Grande salle de concert du parc de la Villette.".to_string()),
            address: Address {
                street: "211 avenue Jean Jaurès".to_string(),
                city: "Paris".to_string(),
                zip_code: "75019".to_string(),
                country: "France".to_string(),
            },
            phone: Some("+33 1 44 52 54 56".to_string()),
            email: Some("contact@zenith-paris.fr".to_string()),
            website: Some("https://www.zenith-paris.com".to_string()),
            logo_url: None,
            cover_url: None,
            gallery_urls: vec![],
            areas: None,
            created_at: created,
            updated_at: created,
        },
        Structure {
            id: 2,
            name: "Théâtre du Châtelet".to_string(),
            types: vec![state.structure_types[1].clone()],
            description: Some("Théâtre musical de la place du Châtelet.".to_string()),
            address: Address {
                street: "1 place du Châtelet".to_string(),
                city: "Paris".to_string(),
                zip_code: "75001".to_string(),
                country: "France".to_string(),
            },
            phone: None,
            email: None,
            website: Some("https://www.chatelet.com".to_string()),
            logo_url: None,
            cover_url: None,
            gallery_urls: vec![],
            areas: None,
            created_at: created,
            updated_at: created,
        },
        Structure {
            id: 3,
            name: "La Cigale".to_string(),
            types: vec![state.structure_types[0].clone()],
            description: None,
            address: Address {
                street: "120 boulevard de Rochechouart".to_string(),
                city: "Paris".to_string(),
                zip_code: "75018".to_string(),
                country: "France".to_string(),
            },
            phone: None,
            email: None,
            website: None,
            logo_url: None,
            cover_url: None,
            gallery_urls: vec![],
            areas: None,
            created_at: created,
            updated_at: created,
        },
    ];
    state.structure_importance = [(1, 90), (2, 80), (3, 70)].into_iter().collect();

    state.structure_areas = vec![
        StructureArea {
            id: 10,
            structure_id: ADMIN_STRUCTURE_ID,
            name: "Grande salle".to_string(),
            description: Some("Salle principale, jauge complète.".to_string()),
            max_capacity: 6000,
            is_active: true,
            audience_zone_templates: None,
        },
        StructureArea {
            id: 11,
            structure_id: ADMIN_STRUCTURE_ID,
            name: "Club".to_string(),
            description: None,
            max_capacity: 800,
            is_active: true,
            audience_zone_templates: None,
        },
    ];

    state.audience_zones = vec![
        AudienceZoneTemplate {
            id: 100,
            area_id: 10,
            name: "Fosse".to_string(),
            max_capacity: 3000,
            seating_type: SeatingType::Standing,
            is_active: true,
        },
        AudienceZoneTemplate {
            id: 101,
            area_id: 10,
            name: "Balcon".to_string(),
            max_capacity: 1500,
            seating_type: SeatingType::Seated,
            is_active: true,
        },
        AudienceZoneTemplate {
            id: 102,
            area_id: 11,
            name: "Fosse club".to_string(),
            max_capacity: 600,
            seating_type: SeatingType::Mixed,
            is_active: true,
        },
    ];

    state.events = vec![
        EventSummary {
            id: 200,
            structure_id: ADMIN_STRUCTURE_ID,
            name: "Nuit électro".to_string(),
            start_at: ts(2026, 11, 20, 20, 0),
            end_at: ts(2026, 11, 21, 2, 0),
            status: EventStatus::Published,
        },
        EventSummary {
            id: 201,
            structure_id: ADMIN_STRUCTURE_ID,
            name: "Festival de printemps".to_string(),
            start_at: ts(2027, 4, 3, 18, 0),
            end_at: ts(2027, 4, 3, 23, 30),
            status: EventStatus::Draft,
        },
        EventSummary {
            id: 202,
            structure_id: 2,
            name: "Le Lac des cygnes".to_string(),
            start_at: ts(2026, 12, 5, 19, 30),
            end_at: ts(2026, 12, 5, 22, 0),
            status: EventStatus::Published,
        },
    ];

    state.team_members = vec![
        TeamMember {
            id: 300,
            structure_id: ADMIN_STRUCTURE_ID,
            user_id: Some(ADMIN_USER_ID),
            email: ADMIN_EMAIL.to_string(),
            first_name: "Alice".to_string(),
            last_name: "Martin".to_string(),
            role: UserRole::StructureAdministrator,
            status: MemberStatus::Active,
            invited_at: created,
            joined_at: Some(created),
        },
        TeamMember {
            id: 301,
            structure_id: ADMIN_STRUCTURE_ID,
            user_id: Some(3),
            email: "chloe@estrade.fr".to_string(),
            first_name: "Chloé".to_string(),
            last_name: "Dubois".to_string(),
            role: UserRole::OrganizationService,
            status: MemberStatus::Active,
            invited_at: ts(2025, 2, 1, 10, 0),
            joined_at: Some(ts(2025, 2, 2, 8, 30)),
        },
        TeamMember {
            id: 302,
            structure_id: ADMIN_STRUCTURE_ID,
            user_id: Some(8),
            email: "hugo@estrade.fr".to_string(),
            first_name: "Hugo".to_string(),
            last_name: "Blanc".to_string(),
            role: UserRole::ReservationService,
            status: MemberStatus::Active,
            invited_at: ts(2025, 2, 1, 10, 5),
            joined_at: Some(ts(2025, 2, 3, 14, 0)),
        },
        TeamMember {
            id: 303,
            structure_id: ADMIN_STRUCTURE_ID,
            user_id: None,
            email: "lucas@estrade.fr".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: UserRole::ReservationService,
            status: MemberStatus::Pending,
            invited_at: ts(2025, 6, 15, 16, 20),
            joined_at: None,
        },
    ];

    state.friendships = vec![
        friendship(2, SPECTATOR_USER_ID, ADMIN_USER_ID, FriendshipStatus::Pending, ts(2025, 5, 2, 11, 0)),
        friendship(3, ADMIN_USER_ID, 4, FriendshipStatus::Accepted, ts(2025, 3, 14, 9, 30)),
        friendship(4, ADMIN_USER_ID, 7, FriendshipStatus::Pending, ts(2025, 6, 1, 17, 45)),
        friendship(5, 9, ADMIN_USER_ID, FriendshipStatus::Rejected, ts(2025, 4, 20, 8, 15)),
        friendship(20, 5, ADMIN_USER_ID, FriendshipStatus::Pending, ts(2025, 6, 10, 12, 0)),
        friendship(27, 6, ADMIN_USER_ID, FriendshipStatus::Pending, ts(2025, 7, 4, 19, 10)),
    ];

    state.user_favorites = [(ADMIN_USER_ID, vec![2]), (SPECTATOR_USER_ID, vec![1])]
        .into_iter()
        .collect();

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_requests_for_admin_are_exactly_the_known_ids() {
        let state = seed();
        let mut pending: Vec<i64> = state
            .friendships
            .iter()
            .filter(|f| f.receiver_id == ADMIN_USER_ID && f.status == FriendshipStatus::Pending)
            .map(|f| f.id)
            .collect();
        pending.sort_unstable();
        assert_eq!(pending, PENDING_FRIENDSHIP_IDS.to_vec());
    }

    #[test]
    fn test_seeded_ids_stay_below_allocation_start() {
        let state = seed();
        let max_seeded = state
            .structures
            .iter()
            .map(|s| s.id)
            .chain(state.structure_areas.iter().map(|a| a.id))
            .chain(state.audience_zones.iter().map(|z| z.id))
            .chain(state.events.iter().map(|e| e.id))
            .chain(state.users.iter().map(|u| u.id))
            .chain(state.team_members.iter().map(|m| m.id))
            .chain(state.friendships.iter().map(|f| f.id))
            .max()
            .unwrap();
        assert!(max_seeded < state.next_id);
    }

    #[test]
    fn test_admin_account_shape() {
        let state = seed();
        let alice = state.user_by_email(ADMIN_EMAIL).unwrap();
        assert_eq!(alice.id, ADMIN_USER_ID);
        assert_eq!(alice.role, UserRole::StructureAdministrator);
        assert_eq!(alice.structure_id, Some(ADMIN_STRUCTURE_ID));
    }
}
