//! Integration tests for the mock backend through the domain API traits

use estrade_client::ClientError;
use estrade_client::api::{
    AreaApi, AuthApi, EventApi, FriendshipApi, StructureApi, TeamApi, TokenSink, UserApi,
};
use estrade_mock::{MockBackend, fixtures};
use shared::ErrorCode;
use shared::client::LoginRequest;
use shared::models::{
    Address, AreaUpdate, AudienceZoneTemplateCreate, EventCreate, FriendRequestCreate,
    FriendshipStatus, MemberStatus, SeatingType, StructureCreate, TeamInvite, TeamRoleUpdate,
    User, UserRole,
};
use tempfile::TempDir;

async fn login(backend: &MockBackend, email: &str) -> User {
    let resp = backend
        .login(&LoginRequest {
            email: email.to_string(),
            password: fixtures::DEFAULT_PASSWORD.to_string(),
        })
        .await
        .expect("seeded account should log in");
    backend.set_token(Some(resp.token)).await;
    resp.user
}

fn any_structure_payload(name: &str) -> StructureCreate {
    StructureCreate {
        name: name.to_string(),
        type_ids: vec![1],
        description: None,
        address: Address {
            street: "3 rue des Lices".to_string(),
            city: "Angers".to_string(),
            zip_code: "49100".to_string(),
            country: "France".to_string(),
        },
        phone: None,
        email: None,
        website: None,
    }
}

#[tokio::test]
async fn test_unauthenticated_calls_are_rejected() {
    let backend = MockBackend::new();
    let err = backend.friends_data().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_pending_requests_for_alice_match_fixture() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    let data = backend.friends_data().await.unwrap();
    let mut pending: Vec<i64> = data.pending.iter().map(|p| p.friendship_id).collect();
    pending.sort_unstable();
    assert_eq!(pending, fixtures::PENDING_FRIENDSHIP_IDS.to_vec());

    // Alice also has one accepted friend (David) and one sent request
    assert_eq!(data.friends.len(), 1);
    assert_eq!(data.friends[0].user.first_name, "David");
    assert_eq!(data.sent.len(), 1);
}

#[tokio::test]
async fn test_self_friend_request_is_rejected() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    let err = backend
        .send_request(&FriendRequestCreate {
            email: fixtures::ADMIN_EMAIL.to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_friend_request_conflicts() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    // Alice and David already have an accepted friendship (row 3)
    let err = backend
        .send_request(&FriendRequestCreate {
            email: "david@estrade.fr".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn test_rejected_row_does_not_block_a_new_request() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    // Row 5 (Inès -> Alice) was rejected; a fresh request is allowed
    let friendship = backend
        .send_request(&FriendRequestCreate {
            email: "ines@estrade.fr".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(friendship.status, FriendshipStatus::Pending);
    assert_eq!(friendship.sender_id, fixtures::ADMIN_USER_ID);
}

#[tokio::test]
async fn test_status_regression_is_rejected() {
    let backend = MockBackend::new();

    // Row 3 is ACCEPTED; forcing it back to PENDING must fail
    let err = backend
        .update_friendship_status(3, FriendshipStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FriendshipStatusInvalid);
    assert_eq!(err.http_status().as_u16(), 400);

    // Terminal rows are frozen too
    let err = backend
        .update_friendship_status(5, FriendshipStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FriendshipStatusInvalid);
}

#[tokio::test]
async fn test_accept_moves_request_to_friends() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    let accepted = backend.accept(2).await.unwrap();
    assert_eq!(accepted.status, FriendshipStatus::Accepted);

    let data = backend.friends_data().await.unwrap();
    assert!(data.friends.iter().any(|f| f.friendship_id == 2));
    assert!(!data.pending.iter().any(|p| p.friendship_id == 2));
}

#[tokio::test]
async fn test_only_the_receiver_accepts_or_rejects() {
    let backend = MockBackend::new();
    // Bruno sent row 2, so he cannot accept or reject it
    login(&backend, fixtures::SPECTATOR_EMAIL).await;

    let err = backend.accept(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    let err = backend.reject(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // But he can cancel his own request
    backend.cancel(2).await.unwrap();
    let snapshot = backend.snapshot().await;
    let row = snapshot.friendship_by_id(2).unwrap();
    assert_eq!(row.status, FriendshipStatus::Cancelled);
}

#[tokio::test]
async fn test_structure_creation_grants_admin_rights_and_reissues_token() {
    let backend = MockBackend::new();
    let bruno = login(&backend, fixtures::SPECTATOR_EMAIL).await;
    assert_eq!(bruno.role, UserRole::Spectator);

    let created = StructureApi::create(&backend, &any_structure_payload("Le Chabada"))
        .await
        .unwrap();
    let token = created.token.expect("creation re-issues the token");
    backend.set_token(Some(token)).await;

    let me = backend.me().await.unwrap();
    assert_eq!(me.role, UserRole::StructureAdministrator);
    assert_eq!(me.structure_id, Some(created.structure.id));

    // The creator is the first (active, administrator) team member
    let team = TeamApi::list(&backend, created.structure.id).await.unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].user_id, Some(bruno.id));
    assert_eq!(team[0].role, UserRole::StructureAdministrator);
    assert_eq!(team[0].status, MemberStatus::Active);
}

#[tokio::test]
async fn test_structure_creation_is_refused_when_already_owning_one() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    let err = StructureApi::create(&backend, &any_structure_payload("Une deuxième salle"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn test_structure_delete_cascades_and_demotes_the_team() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    StructureApi::delete(&backend, fixtures::ADMIN_STRUCTURE_ID)
        .await
        .unwrap();

    let err = StructureApi::get(&backend, fixtures::ADMIN_STRUCTURE_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let snapshot = backend.snapshot().await;
    assert!(snapshot.areas_of(fixtures::ADMIN_STRUCTURE_ID).is_empty());
    assert!(snapshot.team_of(fixtures::ADMIN_STRUCTURE_ID).is_empty());
    assert!(snapshot.events_of(fixtures::ADMIN_STRUCTURE_ID).is_empty());

    // The former administrator falls back to a spectator account
    let me = backend.me().await.unwrap();
    assert_eq!(me.role, UserRole::Spectator);
    assert_eq!(me.structure_id, None);
}

#[tokio::test]
async fn test_team_invite_validates_role_and_duplicates() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;
    let sid = fixtures::ADMIN_STRUCTURE_ID;

    let err = backend
        .invite(
            sid,
            &TeamInvite {
                email: "nadia@estrade.fr".to_string(),
                role: UserRole::Spectator,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let roster = backend
        .invite(
            sid,
            &TeamInvite {
                email: "nadia@estrade.fr".to_string(),
                role: UserRole::ReservationService,
            },
        )
        .await
        .unwrap();
    assert!(
        roster
            .iter()
            .any(|m| m.email == "nadia@estrade.fr" && m.status == MemberStatus::Pending)
    );

    let err = backend
        .invite(
            sid,
            &TeamInvite {
                email: "nadia@estrade.fr".to_string(),
                role: UserRole::OrganizationService,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn test_team_role_update_returns_the_full_roster() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;
    let sid = fixtures::ADMIN_STRUCTURE_ID;

    // Member 302 is Hugo (reservation service)
    let roster = backend
        .update_role(
            sid,
            302,
            &TeamRoleUpdate {
                role: UserRole::OrganizationService,
            },
        )
        .await
        .unwrap();
    let hugo = roster.iter().find(|m| m.id == 302).unwrap();
    assert_eq!(hugo.role, UserRole::OrganizationService);

    // The linked account follows suit
    let snapshot = backend.snapshot().await;
    assert_eq!(
        snapshot.user_by_id(8).unwrap().role,
        UserRole::OrganizationService
    );
}

#[tokio::test]
async fn test_team_self_and_admin_removal_are_forbidden() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;
    let sid = fixtures::ADMIN_STRUCTURE_ID;

    // Member 300 is Alice herself
    let err = TeamApi::remove(&backend, sid, 300).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    let err = backend
        .update_role(
            sid,
            300,
            &TeamRoleUpdate {
                role: UserRole::OrganizationService,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // Promote Chloé, then try to remove her as a fellow administrator
    backend
        .update_role(
            sid,
            301,
            &TeamRoleUpdate {
                role: UserRole::StructureAdministrator,
            },
        )
        .await
        .unwrap();
    let err = TeamApi::remove(&backend, sid, 301).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // A regular member can still be removed, and loses structure access
    TeamApi::remove(&backend, sid, 302).await.unwrap();
    let snapshot = backend.snapshot().await;
    assert!(!snapshot.team_of(sid).iter().any(|m| m.id == 302));
    assert_eq!(snapshot.user_by_id(8).unwrap().structure_id, None);
}

#[tokio::test]
async fn test_team_management_requires_administrator() {
    let backend = MockBackend::new();
    // Chloé is organization service, not an administrator
    login(&backend, "chloe@estrade.fr").await;

    let err = backend
        .invite(
            fixtures::ADMIN_STRUCTURE_ID,
            &TeamInvite {
                email: "nadia@estrade.fr".to_string(),
                role: UserRole::ReservationService,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn test_event_dates_are_validated() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    let start = chrono::Utc::now() + chrono::Duration::days(30);
    let err = EventApi::create(
        &backend,
        fixtures::ADMIN_STRUCTURE_ID,
        &EventCreate {
            name: "Soirée inversée".to_string(),
            start_at: start,
            end_at: start - chrono::Duration::hours(2),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let event = EventApi::create(
        &backend,
        fixtures::ADMIN_STRUCTURE_ID,
        &EventCreate {
            name: "Concert d'automne".to_string(),
            start_at: start,
            end_at: start + chrono::Duration::hours(3),
        },
    )
    .await
    .unwrap();
    let events = backend
        .list_by_structure(fixtures::ADMIN_STRUCTURE_ID)
        .await
        .unwrap();
    assert!(events.iter().any(|e| e.id == event.id));
}

#[tokio::test]
async fn test_zone_capacity_cannot_exceed_its_area() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    // Area 11 (Club) holds 800 people
    let err = backend
        .create_template(
            11,
            &AudienceZoneTemplateCreate {
                name: "Mégafosse".to_string(),
                max_capacity: 5000,
                seating_type: SeatingType::Standing,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    // Area 10 cannot shrink below its largest zone (3000)
    let err = AreaApi::update(
        &backend,
        10,
        &AreaUpdate {
            max_capacity: Some(1000),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_favorites_follow_conflict_and_not_found_rules() {
    let backend = MockBackend::new();
    login(&backend, fixtures::ADMIN_EMAIL).await;

    assert_eq!(backend.favorites().await.unwrap(), vec![2]);

    let err = backend.add_favorite(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));

    let updated = backend.add_favorite(3).await.unwrap();
    assert_eq!(updated, vec![2, 3]);

    let err = backend.remove_favorite(99).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_state_survives_a_restart_when_persistent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("estrade-mock.json");

    {
        let backend = MockBackend::persistent(&path).unwrap();
        login(&backend, fixtures::ADMIN_EMAIL).await;
        AreaApi::create(
            &backend,
            fixtures::ADMIN_STRUCTURE_ID,
            &shared::models::AreaCreate {
                name: "Terrasse".to_string(),
                description: None,
                max_capacity: 250,
            },
        )
        .await
        .unwrap();
    }

    let reopened = MockBackend::persistent(&path).unwrap();
    let snapshot = reopened.snapshot().await;
    assert!(
        snapshot
            .areas_of(fixtures::ADMIN_STRUCTURE_ID)
            .iter()
            .any(|a| a.name == "Terrasse")
    );
}
