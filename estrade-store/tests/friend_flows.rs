//! Integration tests for the friendship store over the mock backend

use estrade_client::{ApiClient, ClientError};
use estrade_mock::{MockBackend, fixtures};
use estrade_store::{AppStores, NoticeLevel};
use std::sync::Arc;
use std::time::Duration;

fn stores() -> (AppStores, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::new());
    let stores = AppStores::new(ApiClient::from_backend(backend.clone()), None);
    (stores, backend)
}

async fn login(stores: &AppStores, email: &str) {
    stores
        .session
        .login(email, fixtures::DEFAULT_PASSWORD)
        .await
        .expect("seeded account should log in");
}

#[tokio::test]
async fn test_friends_document_loads_once_until_forced() {
    let (stores, backend) = stores();
    login(&stores, fixtures::ADMIN_EMAIL).await;

    stores.friends.load_friends_data(false).await;
    assert_eq!(backend.log().count("friends.data"), 1);

    stores.friends.load_friends_data(false).await;
    assert_eq!(backend.log().count("friends.data"), 1);

    stores.friends.load_friends_data(true).await;
    assert_eq!(backend.log().count("friends.data"), 2);
}

#[tokio::test]
async fn test_pending_requests_match_the_seeded_rows() {
    let (stores, _backend) = stores();
    login(&stores, fixtures::ADMIN_EMAIL).await;
    stores.friends.load_friends_data(false).await;

    let mut pending: Vec<i64> = stores
        .friends
        .pending_requests()
        .await
        .iter()
        .map(|p| p.friendship_id)
        .collect();
    pending.sort_unstable();
    assert_eq!(pending, fixtures::PENDING_FRIENDSHIP_IDS.to_vec());

    assert_eq!(stores.friends.friends().await.len(), 1);
    assert_eq!(stores.friends.sent_requests().await.len(), 1);
}

#[tokio::test]
async fn test_self_request_is_rejected() {
    let (stores, _backend) = stores();
    login(&stores, fixtures::ADMIN_EMAIL).await;

    let err = stores
        .friends
        .send_friend_request_by_email(fixtures::ADMIN_EMAIL)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(stores.notifier.last().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_accepting_twice_hits_the_monotonic_guard() {
    let (stores, _backend) = stores();
    login(&stores, fixtures::ADMIN_EMAIL).await;

    assert!(stores.friends.accept_request(2).await);
    // The row is accepted now; the transition back is not allowed
    assert!(!stores.friends.accept_request(2).await);
}

#[tokio::test]
async fn test_every_mutation_reloads_the_document() {
    let (stores, backend) = stores();
    login(&stores, fixtures::ADMIN_EMAIL).await;
    stores.friends.load_friends_data(false).await;
    assert_eq!(backend.log().count("friends.data"), 1);

    assert!(stores.friends.accept_request(2).await);
    assert_eq!(backend.log().count("friends.data"), 2);
    assert_eq!(stores.friends.friends().await.len(), 2);

    assert!(stores.friends.reject_request(20).await);
    assert_eq!(backend.log().count("friends.data"), 3);

    assert!(stores.friends.remove_friend(2).await);
    assert_eq!(backend.log().count("friends.data"), 4);
    assert_eq!(stores.friends.friends().await.len(), 1);
}

#[tokio::test]
async fn test_cancel_rethrows_when_the_request_was_already_handled() {
    let backend = Arc::new(MockBackend::new());
    let alice = AppStores::new(ApiClient::from_backend(backend.clone()), None);
    login(&alice, fixtures::ADMIN_EMAIL).await;
    assert!(alice.friends.accept_request(2).await);

    // Bruno takes over the backend token; his sent request was accepted
    // while he was away
    let bruno = AppStores::new(ApiClient::from_backend(backend.clone()), None);
    login(&bruno, fixtures::SPECTATOR_EMAIL).await;
    let err = bruno.friends.cancel_sent_request(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(bruno.notifier.last().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_login_loads_and_logout_clears_friends() {
    let (stores, backend) = stores();
    stores.start_watchers();

    login(&stores, fixtures::ADMIN_EMAIL).await;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while stores.friends.pending_requests().await.len() != 3 {
        assert!(
            tokio::time::Instant::now() < deadline,
            "friends document should load after login"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    stores.logout().await;
    assert!(stores.friends.pending_requests().await.is_empty());

    // Logged out: the store answers locally without a request
    let calls = backend.log().count("friends.data");
    assert!(stores.friends.load_friends_data(false).await.is_empty());
    assert_eq!(backend.log().count("friends.data"), calls);

    stores.shutdown();
}
