//! Guided tour of the domain stores over the mock backend
//!
//! Walks through the main flows end to end: login, the automatic structure
//! bundle load, area and zone management, the team roster, friendships and
//! logout. Every notification the stores emit is printed the way a UI toast
//! layer would surface it.
//!
//! Run: cargo run --example guided_tour

use estrade_client::ApiClient;
use estrade_mock::{MockBackend, fixtures};
use estrade_store::AppStores;
use shared::models::AreaCreate;
use shared::request::StructureQuery;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let backend = Arc::new(MockBackend::new());
    let stores = AppStores::new(ApiClient::from_backend(backend.clone()), None);
    stores.start_watchers();

    let mut notices = stores.notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            println!("   [{:?}] {}", notice.level, notice.message);
        }
    });

    println!("\n== Public directory ==");
    let page = stores.structures.get_structures(&StructureQuery::page(1)).await;
    for summary in &page.items {
        println!("  #{} {} ({})", summary.id, summary.name, summary.city);
    }

    println!("\n== Login ==");
    let user = stores
        .session
        .login(fixtures::ADMIN_EMAIL, fixtures::DEFAULT_PASSWORD)
        .await?;
    println!(
        "  Logged in as {} {} ({:?})",
        user.first_name, user.last_name, user.role
    );

    println!("\n== Structure bundle (loaded by the session watcher) ==");
    let state = stores.user_structure.wait_until_settled().await;
    println!("  Bundle settled: {:?}", state);
    if let Some(structure) = stores.user_structure.structure().await {
        println!("  Structure: {} (#{})", structure.name, structure.id);
    }
    for area in stores.user_structure.areas().await {
        let templates = stores
            .user_structure
            .load_area_templates(area.id, false)
            .await;
        println!(
            "  Area \"{}\" (capacity {}): {} zone templates",
            area.name,
            area.max_capacity,
            templates.len()
        );
    }
    for event in stores.user_structure.events().await {
        println!("  Event \"{}\" ({:?})", event.name, event.status);
    }

    println!("\n== Create an area ==");
    stores
        .user_structure
        .create_area(&AreaCreate {
            name: "Terrasse d'été".to_string(),
            description: Some("Scène extérieure ouverte de juin à septembre".to_string()),
            max_capacity: 450,
        })
        .await;
    println!("  Areas now: {}", stores.user_structure.areas().await.len());

    println!("\n== Team ==");
    for member in stores.team.load_team_members(false).await {
        println!("  {}: {:?} ({:?})", member.email, member.role, member.status);
    }

    println!("\n== Friends ==");
    let friends = stores.friends.load_friends_data(false).await;
    println!(
        "  {} friends, {} received requests, {} sent",
        friends.friends.len(),
        friends.pending.len(),
        friends.sent.len()
    );
    if let Some(request) = friends.pending.first() {
        println!(
            "  Accepting the request from {}...",
            request.user.first_name
        );
        stores.friends.accept_request(request.friendship_id).await;
        println!("  Friends now: {}", stores.friends.friends().await.len());
    }

    println!("\n== Logout ==");
    stores.logout().await;
    stores.shutdown();
    println!(
        "\nDone. The backend served {} requests in total.",
        backend.log().total()
    );
    Ok(())
}
