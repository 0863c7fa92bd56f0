//! Public structure directory and owner-side structure management

use crate::cache::CacheSlot;
use crate::notify::Notifier;
use crate::session::SessionStore;
use estrade_client::ApiClient;
use shared::models::{
    Structure, StructureCreate, StructureSummary, StructureType, StructureUpdate,
};
use shared::request::StructureQuery;
use shared::response::PaginatedResponse;
use std::sync::Arc;

/// Structure directory with one cached detail slot
///
/// Caches the last structure fetched in detail and the global type lookup
/// list. Directory pages are never cached; every failure resolves to an
/// empty/None value after a notification.
pub struct StructureStore {
    api: ApiClient,
    session: Arc<SessionStore>,
    notifier: Notifier,
    current: CacheSlot<Structure>,
    types: CacheSlot<Vec<StructureType>>,
}

impl StructureStore {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            current: CacheSlot::new(),
            types: CacheSlot::new(),
        }
    }

    /// Directory page matching the query; always calls through
    pub async fn get_structures(
        &self,
        query: &StructureQuery,
    ) -> PaginatedResponse<StructureSummary> {
        match self.api.structures.list(query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list structures");
                self.notifier.error(e.user_message());
                PaginatedResponse::empty()
            }
        }
    }

    /// One structure in detail, from the cache when the id matches
    pub async fn get_structure(&self, id: i64, force_refresh: bool) -> Option<Structure> {
        if !force_refresh && self.current.is_fresh().await {
            if let Some(cached) = self.current.value().await {
                if cached.id == id {
                    return Some(cached);
                }
            }
        }
        match self
            .current
            .get_or_fetch(true, || self.api.structures.get(id))
            .await
        {
            Ok(structure) => Some(structure),
            Err(e) => {
                tracing::error!(structure_id = id, error = %e, "Failed to fetch structure");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Global structure-type list, cached after the first load
    pub async fn get_structure_types(&self, force_refresh: bool) -> Vec<StructureType> {
        match self
            .types
            .get_or_fetch(force_refresh, || self.api.structures.types())
            .await
        {
            Ok(types) => types,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load structure types");
                self.notifier.error(e.user_message());
                self.types.value().await.unwrap_or_default()
            }
        }
    }

    /// Create a structure and make it current
    ///
    /// The server re-issues the creator's token with administrator rights
    /// over the new structure; it is applied to the session before
    /// returning, so the caller sees the promoted user.
    pub async fn create_structure(&self, req: &StructureCreate) -> Option<Structure> {
        match self.api.structures.create(req).await {
            Ok(created) => {
                tracing::info!(structure_id = created.structure.id, "Structure created");
                self.current.set(created.structure.clone()).await;
                if let Some(token) = created.token {
                    self.session.apply_token(token).await;
                }
                self.notifier.success(format!(
                    "La structure « {} » a été créée.",
                    created.structure.name
                ));
                Some(created.structure)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create structure");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Update a structure, refreshing the detail slot when it holds it
    pub async fn update_structure(&self, id: i64, req: &StructureUpdate) -> Option<Structure> {
        match self.api.structures.update(id, req).await {
            Ok(structure) => {
                let cached = self.current.value().await.is_some_and(|c| c.id == id);
                if cached {
                    self.current.set(structure.clone()).await;
                }
                self.notifier
                    .success("Les informations de la structure ont été mises à jour.");
                Some(structure)
            }
            Err(e) => {
                tracing::error!(structure_id = id, error = %e, "Failed to update structure");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Delete a structure, clearing the detail slot when it held it
    ///
    /// Deleting your own structure demotes you server-side, so the session
    /// user is refreshed afterwards.
    pub async fn delete_structure(&self, id: i64) -> bool {
        match self.api.structures.delete(id).await {
            Ok(()) => {
                tracing::info!(structure_id = id, "Structure deleted");
                if self.current.value().await.is_some_and(|c| c.id == id) {
                    self.current.clear().await;
                }
                let own_structure =
                    self.session.current_user().await.and_then(|u| u.structure_id) == Some(id);
                if own_structure {
                    self.session.refresh_current_user().await;
                }
                self.notifier.success("La structure a été supprimée.");
                true
            }
            Err(e) => {
                tracing::error!(structure_id = id, error = %e, "Failed to delete structure");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Upload a gallery image and patch the cached structure
    pub async fn upload_gallery_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Option<String> {
        match self
            .api
            .structures
            .upload_gallery_image(id, filename, bytes)
            .await
        {
            Ok(url) => {
                self.current
                    .mutate(|s| {
                        if s.id == id {
                            s.gallery_urls.push(url.clone());
                        }
                    })
                    .await;
                self.notifier.success("L'image a été ajoutée à la galerie.");
                Some(url)
            }
            Err(e) => {
                tracing::error!(structure_id = id, error = %e, "Gallery upload failed");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Cached detail structure, if any
    pub async fn current_structure(&self) -> Option<Structure> {
        self.current.value().await
    }

    /// Drop the user-scoped cache; the type lookup is public data and
    /// survives a logout
    pub async fn clear(&self) {
        self.current.clear().await;
    }
}
