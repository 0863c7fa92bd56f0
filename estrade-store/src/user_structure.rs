//! Aggregate loader for the current user's own structure
//!
//! Loads the structure, its areas and its events as one bundle whenever
//! the session's structure id appears or changes, and keeps the cached
//! lists in sync with every mutation by patching them with the server's
//! returned canonical objects.

use crate::cache::{CacheSlot, KeyedCache};
use crate::notify::Notifier;
use crate::session::SessionStore;
use estrade_client::ApiClient;
use shared::models::{
    AreaCreate, AreaUpdate, AudienceZoneTemplate, AudienceZoneTemplateCreate,
    AudienceZoneTemplateUpdate, EventCreate, EventSummary, Structure, StructureArea,
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Load lifecycle of the structure bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No structure to load, or nothing loaded yet
    Idle,
    /// Bundle load in flight
    Loading,
    /// Structure, areas and events are in memory
    Loaded,
    /// The user's structure id no longer exists server-side
    NotFound,
    /// The structure fetch itself failed
    Failed,
}

impl LoadState {
    /// Whether the load reached a terminal outcome
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded | Self::NotFound | Self::Failed)
    }
}

/// Domain state of the structure the current user administers or works for
pub struct UserStructureStore {
    api: ApiClient,
    session: Arc<SessionStore>,
    notifier: Notifier,
    structure: CacheSlot<Structure>,
    areas: CacheSlot<Vec<StructureArea>>,
    events: CacheSlot<Vec<EventSummary>>,
    templates: KeyedCache<i64, Vec<AudienceZoneTemplate>>,
    state_tx: watch::Sender<LoadState>,
}

impl UserStructureStore {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, notifier: Notifier) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        Self {
            api,
            session,
            notifier,
            structure: CacheSlot::new(),
            areas: CacheSlot::new(),
            events: CacheSlot::new(),
            templates: KeyedCache::new(),
            state_tx,
        }
    }

    /// Structure id of the authenticated user, if any
    pub async fn user_structure_id(&self) -> Option<i64> {
        self.session.current_user().await.and_then(|u| u.structure_id)
    }

    /// Load the whole bundle: structure first, then areas and events in
    /// parallel
    ///
    /// Area or event failures keep the bundle `Loaded` with the affected
    /// list empty; only a failing structure fetch settles on `NotFound` or
    /// `Failed`. Idempotent while the cached structure matches the user's
    /// id and `force` is off.
    pub async fn load_all_structure_data(&self, force: bool) -> LoadState {
        let Some(structure_id) = self.user_structure_id().await else {
            self.reset().await;
            return LoadState::Idle;
        };

        let already_loaded = self.load_state() == LoadState::Loaded
            && self
                .structure
                .value()
                .await
                .is_some_and(|s| s.id == structure_id);
        if already_loaded && !force {
            return LoadState::Loaded;
        }

        tracing::debug!(structure_id, "Loading structure bundle");
        self.state_tx.send_replace(LoadState::Loading);

        let structure = self
            .structure
            .get_or_fetch(true, || self.api.structures.get(structure_id))
            .await;

        let next = match structure {
            Ok(_) => {
                let (areas, events) = tokio::join!(
                    self.areas
                        .get_or_fetch(true, || self.api.areas.list(structure_id)),
                    self.events
                        .get_or_fetch(true, || self.api.events.list_by_structure(structure_id)),
                );
                if let Err(e) = &areas {
                    tracing::error!(structure_id, error = %e, "Failed to load areas");
                    self.notifier.error(e.user_message());
                }
                if let Err(e) = &events {
                    tracing::error!(structure_id, error = %e, "Failed to load events");
                    self.notifier.error(e.user_message());
                }
                LoadState::Loaded
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(structure_id, "User structure does not exist server-side");
                self.clear_data().await;
                LoadState::NotFound
            }
            Err(e) => {
                tracing::error!(structure_id, error = %e, "Failed to load structure bundle");
                self.notifier.error(e.user_message());
                LoadState::Failed
            }
        };
        self.state_tx.send_replace(next);
        next
    }

    /// Current load state
    pub fn load_state(&self) -> LoadState {
        *self.state_tx.borrow()
    }

    /// Channel following the load state
    pub fn watch_load_state(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// Wait until the bundle load settles, returning the settled state
    ///
    /// Resolves immediately when the state is already settled; otherwise
    /// waits for the current or next load to finish. The structure-creation
    /// flow uses this to hold navigation until the new structure's data is
    /// in memory.
    pub async fn wait_until_settled(&self) -> LoadState {
        let mut rx = self.state_tx.subscribe();
        match rx.wait_for(|state| state.is_settled()).await {
            Ok(state) => *state,
            // The sender lives as long as the store; read the latest state
            // anyway rather than invent one.
            Err(_) => self.load_state(),
        }
    }

    /// Cached structure of the current user
    pub async fn structure(&self) -> Option<Structure> {
        self.structure.value().await
    }

    /// Cached areas, empty until loaded
    pub async fn areas(&self) -> Vec<StructureArea> {
        self.areas.value().await.unwrap_or_default()
    }

    /// Cached events, empty until loaded
    pub async fn events(&self) -> Vec<EventSummary> {
        self.events.value().await.unwrap_or_default()
    }

    /// Cached templates of an area, empty until loaded
    pub async fn area_templates(&self, area_id: i64) -> Vec<AudienceZoneTemplate> {
        self.templates.get(&area_id).await.unwrap_or_default()
    }

    /// Whether the current user can edit the structure profile itself
    pub async fn has_structure_management_permission(&self) -> bool {
        self.session
            .current_user()
            .await
            .is_some_and(|u| u.role.can_manage_structure())
    }

    /// Whether the current user can manage areas and their templates
    pub async fn has_area_management_permission(&self) -> bool {
        self.session
            .current_user()
            .await
            .is_some_and(|u| u.role.can_manage_areas())
    }

    /// Whether the current user can create and manage events
    pub async fn has_event_management_permission(&self) -> bool {
        self.session
            .current_user()
            .await
            .is_some_and(|u| u.role.can_manage_events())
    }

    /// Create an area under the user's structure and patch the cached list
    pub async fn create_area(&self, req: &AreaCreate) -> Option<StructureArea> {
        if !self.ensure_area_permission().await {
            return None;
        }
        let Some(structure_id) = self.user_structure_id().await else {
            self.notifier
                .error("Aucune structure n'est associée à votre compte.");
            return None;
        };
        match self.api.areas.create(structure_id, req).await {
            Ok(area) => {
                tracing::info!(area_id = area.id, structure_id, "Area created");
                self.areas.mutate(|list| list.push(area.clone())).await;
                self.notifier
                    .success(format!("L'espace « {} » a été créé.", area.name));
                Some(area)
            }
            Err(e) => {
                tracing::error!(structure_id, error = %e, "Failed to create area");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Update an area, replacing it in the cached list by id
    ///
    /// The response does not carry the lazily loaded templates; the nested
    /// copy from the cache is kept.
    pub async fn update_area(&self, area_id: i64, req: &AreaUpdate) -> Option<StructureArea> {
        if !self.ensure_area_permission().await {
            return None;
        }
        match self.api.areas.update(area_id, req).await {
            Ok(area) => {
                self.areas
                    .mutate(|list| {
                        if let Some(cached) = list.iter_mut().find(|a| a.id == area.id) {
                            let templates = cached.audience_zone_templates.take();
                            *cached = area.clone();
                            if cached.audience_zone_templates.is_none() {
                                cached.audience_zone_templates = templates;
                            }
                        }
                    })
                    .await;
                self.notifier
                    .success(format!("L'espace « {} » a été mis à jour.", area.name));
                Some(area)
            }
            Err(e) => {
                tracing::error!(area_id, error = %e, "Failed to update area");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Delete an area, dropping it from both caches
    pub async fn delete_area(&self, area_id: i64) -> bool {
        if !self.ensure_area_permission().await {
            return false;
        }
        match self.api.areas.delete(area_id).await {
            Ok(()) => {
                tracing::info!(area_id, "Area deleted");
                self.areas
                    .mutate(|list| list.retain(|a| a.id != area_id))
                    .await;
                self.templates.remove(&area_id);
                self.notifier.success("L'espace a été supprimé.");
                true
            }
            Err(e) => {
                tracing::error!(area_id, error = %e, "Failed to delete area");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Templates of an area, loaded lazily and cached per area id
    ///
    /// The loaded list is also nested into the cached area so detail views
    /// see it without a second lookup.
    pub async fn load_area_templates(
        &self,
        area_id: i64,
        force: bool,
    ) -> Vec<AudienceZoneTemplate> {
        let slot = self.templates.slot(&area_id);
        match slot
            .get_or_fetch(force, || self.api.areas.templates(area_id))
            .await
        {
            Ok(templates) => {
                self.areas
                    .mutate(|list| {
                        if let Some(area) = list.iter_mut().find(|a| a.id == area_id) {
                            area.audience_zone_templates = Some(templates.clone());
                        }
                    })
                    .await;
                templates
            }
            Err(e) => {
                tracing::error!(area_id, error = %e, "Failed to load audience zone templates");
                self.notifier.error(e.user_message());
                Vec::new()
            }
        }
    }

    /// Create an audience zone template, patching both caches
    pub async fn create_audience_zone_template(
        &self,
        area_id: i64,
        req: &AudienceZoneTemplateCreate,
    ) -> Option<AudienceZoneTemplate> {
        if !self.ensure_area_permission().await {
            return None;
        }
        match self.api.areas.create_template(area_id, req).await {
            Ok(template) => {
                tracing::info!(
                    template_id = template.id,
                    area_id,
                    "Audience zone template created"
                );
                self.patch_templates(area_id, |templates| templates.push(template.clone()))
                    .await;
                self.notifier
                    .success(format!("La zone « {} » a été créée.", template.name));
                Some(template)
            }
            Err(e) => {
                tracing::error!(area_id, error = %e, "Failed to create audience zone template");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Update an audience zone template, patching both caches by id
    pub async fn update_audience_zone_template(
        &self,
        template_id: i64,
        req: &AudienceZoneTemplateUpdate,
    ) -> Option<AudienceZoneTemplate> {
        if !self.ensure_area_permission().await {
            return None;
        }
        match self.api.areas.update_template(template_id, req).await {
            Ok(template) => {
                self.patch_templates(template.area_id, |templates| {
                    if let Some(cached) = templates.iter_mut().find(|t| t.id == template.id) {
                        *cached = template.clone();
                    }
                })
                .await;
                self.notifier
                    .success(format!("La zone « {} » a été mise à jour.", template.name));
                Some(template)
            }
            Err(e) => {
                tracing::error!(template_id, error = %e, "Failed to update audience zone template");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Delete an audience zone template, dropping it from both caches
    pub async fn delete_audience_zone_template(&self, area_id: i64, template_id: i64) -> bool {
        if !self.ensure_area_permission().await {
            return false;
        }
        match self.api.areas.delete_template(template_id).await {
            Ok(()) => {
                tracing::info!(template_id, area_id, "Audience zone template deleted");
                self.patch_templates(area_id, |templates| {
                    templates.retain(|t| t.id != template_id)
                })
                .await;
                self.notifier.success("La zone a été supprimée.");
                true
            }
            Err(e) => {
                tracing::error!(template_id, error = %e, "Failed to delete audience zone template");
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Create a draft event under the user's structure
    pub async fn create_event(&self, req: &EventCreate) -> Option<EventSummary> {
        if !self.ensure_event_permission().await {
            return None;
        }
        let Some(structure_id) = self.user_structure_id().await else {
            self.notifier
                .error("Aucune structure n'est associée à votre compte.");
            return None;
        };
        match self.api.events.create(structure_id, req).await {
            Ok(event) => {
                tracing::info!(event_id = event.id, structure_id, "Event created");
                self.events
                    .mutate(|list| {
                        list.push(event.clone());
                        list.sort_by_key(|e| e.start_at);
                    })
                    .await;
                self.notifier
                    .success(format!("L'événement « {} » a été créé.", event.name));
                Some(event)
            }
            Err(e) => {
                tracing::error!(structure_id, error = %e, "Failed to create event");
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Return every sub-state to empty and the lifecycle to `Idle`
    pub async fn reset(&self) {
        self.clear_data().await;
        self.state_tx.send_replace(LoadState::Idle);
    }

    /// React to session changes: load the bundle when the user's structure
    /// id appears or changes, reset when it goes away
    ///
    /// Runs until the token is cancelled or the session store is dropped.
    pub async fn run_session_watcher(self: Arc<Self>, shutdown: CancellationToken) {
        let mut rx = self.session.watch_user();
        let mut current = rx.borrow_and_update().as_ref().and_then(|u| u.structure_id);
        if current.is_some() {
            self.load_all_structure_data(false).await;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = rx.borrow_and_update().as_ref().and_then(|u| u.structure_id);
                    if next == current {
                        continue;
                    }
                    current = next;
                    match next {
                        Some(id) => {
                            tracing::debug!(structure_id = id, "User structure changed, reloading");
                            self.load_all_structure_data(true).await;
                        }
                        None => self.reset().await,
                    }
                }
            }
        }
        tracing::debug!("Structure session watcher stopped");
    }

    async fn ensure_area_permission(&self) -> bool {
        if self.has_area_management_permission().await {
            return true;
        }
        self.notifier
            .error("Vous n'avez pas les droits nécessaires pour gérer les espaces.");
        false
    }

    async fn ensure_event_permission(&self) -> bool {
        if self.has_event_management_permission().await {
            return true;
        }
        self.notifier
            .error("Vous n'avez pas les droits nécessaires pour gérer les événements.");
        false
    }

    /// Apply one patch to the keyed template cache and to the copy nested
    /// in the cached area
    async fn patch_templates<F>(&self, area_id: i64, patch: F)
    where
        F: Fn(&mut Vec<AudienceZoneTemplate>),
    {
        self.templates.mutate(&area_id, &patch).await;
        self.areas
            .mutate(|list| {
                if let Some(area) = list.iter_mut().find(|a| a.id == area_id) {
                    if let Some(templates) = area.audience_zone_templates.as_mut() {
                        patch(templates);
                    }
                }
            })
            .await;
    }

    async fn clear_data(&self) {
        self.structure.clear().await;
        self.areas.clear().await;
        self.events.clear().await;
        self.templates.clear();
    }
}
