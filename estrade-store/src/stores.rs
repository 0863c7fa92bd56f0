//! Application store facade
//!
//! Owns one instance of every domain store, wires them over a shared
//! `ApiClient` and notifier, and runs the session watchers that keep the
//! structure bundle and friends document in step with login state.

use crate::friends::FriendshipStore;
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::structures::StructureStore;
use crate::team::TeamStore;
use crate::user_structure::UserStructureStore;
use estrade_client::ApiClient;
use shared::models::User;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Every domain store of the application, wired together
pub struct AppStores {
    pub notifier: Notifier,
    pub session: Arc<SessionStore>,
    pub structures: Arc<StructureStore>,
    pub user_structure: Arc<UserStructureStore>,
    pub team: Arc<TeamStore>,
    pub friends: Arc<FriendshipStore>,
    shutdown: CancellationToken,
}

impl AppStores {
    /// Wire every store over one API client
    ///
    /// `data_dir` holds the persisted session file; `None` disables
    /// persistence.
    pub fn new(api: ApiClient, data_dir: Option<PathBuf>) -> Self {
        let notifier = Notifier::new();
        let session = Arc::new(SessionStore::new(
            api.clone(),
            notifier.clone(),
            data_dir,
        ));
        let structures = Arc::new(StructureStore::new(
            api.clone(),
            session.clone(),
            notifier.clone(),
        ));
        let user_structure = Arc::new(UserStructureStore::new(
            api.clone(),
            session.clone(),
            notifier.clone(),
        ));
        let team = Arc::new(TeamStore::new(
            api.clone(),
            session.clone(),
            user_structure.clone(),
            notifier.clone(),
        ));
        let friends = Arc::new(FriendshipStore::new(api, session.clone(), notifier.clone()));
        Self {
            notifier,
            session,
            structures,
            user_structure,
            team,
            friends,
            shutdown: CancellationToken::new(),
        }
    }

    /// Restore the persisted session, if any and still valid
    pub async fn restore_session(&self) -> Option<User> {
        self.session.restore().await
    }

    /// Spawn the background watchers reacting to session changes
    ///
    /// Call once after construction; watchers stop on [`Self::shutdown`]
    /// or drop.
    pub fn start_watchers(&self) {
        tokio::spawn(
            self.user_structure
                .clone()
                .run_session_watcher(self.shutdown.child_token()),
        );
        tokio::spawn(
            self.friends
                .clone()
                .run_session_watcher(self.shutdown.child_token()),
        );
    }

    /// Drop every cached domain state, keeping the session itself
    pub async fn reset_all(&self) {
        self.structures.clear().await;
        self.user_structure.reset().await;
        self.team.clear().await;
        self.friends.clear().await;
        tracing::debug!("All domain stores reset");
    }

    /// Log out and drop every cached domain state
    pub async fn logout(&self) {
        self.session.logout().await;
        self.reset_all().await;
    }

    /// Stop the background watchers
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for AppStores {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
