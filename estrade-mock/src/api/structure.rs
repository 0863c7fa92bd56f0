//! Structure operations

use crate::api::require_admin;
use crate::state::MockState;
use crate::store::MockBackend;
use async_trait::async_trait;
use chrono::Utc;
use estrade_client::api::StructureApi;
use estrade_client::error::ClientResult;
use shared::models::{
    MemberStatus, Structure, StructureCreate, StructureCreated, StructureSummary, StructureType,
    StructureUpdate, TeamMember, UserRole,
};
use shared::request::StructureQuery;
use shared::response::PaginatedResponse;
use shared::{AppError, AppResult, ErrorCode};

fn summarize(state: &MockState, s: &Structure) -> StructureSummary {
    StructureSummary {
        id: s.id,
        name: s.name.clone(),
        types: s.types.clone(),
        city: s.address.city.clone(),
        logo_url: s.logo_url.clone(),
        importance: state.structure_importance.get(&s.id).copied(),
        events_count: state
            .events
            .iter()
            .filter(|e| e.structure_id == s.id)
            .count() as i64,
    }
}

fn resolve_types(state: &MockState, type_ids: &[i64]) -> AppResult<Vec<StructureType>> {
    type_ids
        .iter()
        .map(|tid| {
            state
                .structure_types
                .iter()
                .find(|t| t.id == *tid)
                .cloned()
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::StructureTypeNotFound,
                        format!("Structure type {} not found", tid),
                    )
                })
        })
        .collect()
}

fn structure_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::StructureNotFound,
        format!("Structure {} not found", id),
    )
}

#[async_trait]
impl StructureApi for MockBackend {
    async fn list(
        &self,
        query: &StructureQuery,
    ) -> ClientResult<PaginatedResponse<StructureSummary>> {
        self.simulate("structure.list").await;

        let state = self.state.read().await;
        let mut matches: Vec<&Structure> = state
            .structures
            .iter()
            .filter(|s| {
                let search_ok = query.search.as_deref().is_none_or(|term| {
                    let term = term.to_lowercase();
                    s.name.to_lowercase().contains(&term)
                        || s.address.city.to_lowercase().contains(&term)
                });
                let type_ok = query
                    .type_id
                    .is_none_or(|tid| s.types.iter().any(|t| t.id == tid));
                let city_ok = query
                    .city
                    .as_deref()
                    .is_none_or(|c| s.address.city.eq_ignore_ascii_case(c));
                search_ok && type_ok && city_ok
            })
            .collect();

        // Most important first, then by name for a stable order
        matches.sort_by(|a, b| {
            let ia = state.structure_importance.get(&a.id).copied().unwrap_or(0);
            let ib = state.structure_importance.get(&b.id).copied().unwrap_or(0);
            ib.cmp(&ia).then_with(|| a.name.cmp(&b.name))
        });

        let total = matches.len() as u64;
        let page = query.pagination.page;
        let per_page = query.pagination.limit();
        let items: Vec<StructureSummary> = matches
            .into_iter()
            .skip(query.pagination.offset() as usize)
            .take(per_page as usize)
            .map(|s| summarize(&state, s))
            .collect();

        Ok(PaginatedResponse::new(items, page, per_page, total))
    }

    async fn get(&self, id: i64) -> ClientResult<Structure> {
        self.simulate("structure.get").await;

        let state = self.state.read().await;
        let mut structure = state
            .structure_by_id(id)
            .cloned()
            .ok_or_else(|| structure_not_found(id))?;
        structure.areas = Some(state.areas_of(id));
        Ok(structure)
    }

    async fn types(&self) -> ClientResult<Vec<StructureType>> {
        self.simulate("structure.types").await;
        Ok(self.state.read().await.structure_types.clone())
    }

    async fn create(&self, req: &StructureCreate) -> ClientResult<StructureCreated> {
        self.simulate("structure.create").await;
        let user = self.current_user().await?;

        if req.name.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Structure name is required")
                    .into(),
            );
        }
        if req.type_ids.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "At least one structure type is required",
            )
            .into());
        }
        if user.structure_id.is_some() {
            return Err(AppError::with_message(
                ErrorCode::AlreadyExists,
                "User already belongs to a structure",
            )
            .into());
        }

        let mut state = self.state.write().await;
        if state
            .structures
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(req.name.trim()))
        {
            return Err(AppError::with_message(
                ErrorCode::StructureNameExists,
                format!("A structure named \"{}\" already exists", req.name.trim()),
            )
            .into());
        }
        let types = resolve_types(&state, &req.type_ids)?;

        let now = Utc::now();
        let id = state.alloc_id();
        let structure = Structure {
            id,
            name: req.name.trim().to_string(),
            types,
            description: req.description.clone(),
            address: req.address.clone(),
            phone: req.phone.clone(),
            email: req.email.clone(),
            website: req.website.clone(),
            logo_url: None,
            cover_url: None,
            gallery_urls: vec![],
            areas: None,
            created_at: now,
            updated_at: now,
        };
        state.structures.push(structure.clone());

        // The creator becomes the structure's administrator and its first
        // team member, and gets a token carrying the new rights.
        let mut admin = user.clone();
        admin.role = UserRole::StructureAdministrator;
        admin.structure_id = Some(id);
        if let Some(u) = state.users.iter_mut().find(|u| u.id == user.id) {
            *u = admin.clone();
        }
        let member_id = state.alloc_id();
        state.team_members.push(TeamMember {
            id: member_id,
            structure_id: id,
            user_id: Some(admin.id),
            email: admin.email.clone(),
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            role: UserRole::StructureAdministrator,
            status: MemberStatus::Active,
            invited_at: now,
            joined_at: Some(now),
        });
        self.persist(&state)?;

        tracing::info!(structure_id = id, user_id = admin.id, "Structure created");
        Ok(StructureCreated {
            structure,
            token: Some(MockBackend::issue_token(&admin)),
        })
    }

    async fn update(&self, id: i64, req: &StructureUpdate) -> ClientResult<Structure> {
        self.simulate("structure.update").await;
        let user = self.current_user().await?;
        require_admin(&user, id)?;

        let mut state = self.state.write().await;
        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(AppError::with_message(
                    ErrorCode::RequiredField,
                    "Structure name is required",
                )
                .into());
            }
            if state
                .structures
                .iter()
                .any(|s| s.id != id && s.name.eq_ignore_ascii_case(name.trim()))
            {
                return Err(AppError::with_message(
                    ErrorCode::StructureNameExists,
                    format!("A structure named \"{}\" already exists", name.trim()),
                )
                .into());
            }
        }
        let types = match &req.type_ids {
            Some(tids) => Some(resolve_types(&state, tids)?),
            None => None,
        };

        let structure = state
            .structures
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| structure_not_found(id))?;

        if let Some(name) = &req.name {
            structure.name = name.trim().to_string();
        }
        if let Some(t) = types {
            structure.types = t;
        }
        if let Some(description) = &req.description {
            structure.description = Some(description.clone());
        }
        if let Some(address) = &req.address {
            structure.address = address.clone();
        }
        if let Some(phone) = &req.phone {
            structure.phone = Some(phone.clone());
        }
        if let Some(email) = &req.email {
            structure.email = Some(email.clone());
        }
        if let Some(website) = &req.website {
            structure.website = Some(website.clone());
        }
        structure.updated_at = Utc::now();

        let updated = structure.clone();
        self.persist(&state)?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.simulate("structure.delete").await;
        let user = self.current_user().await?;
        require_admin(&user, id)?;

        let mut state = self.state.write().await;
        if state.structure_by_id(id).is_none() {
            return Err(structure_not_found(id).into());
        }

        let area_ids: Vec<i64> = state
            .structure_areas
            .iter()
            .filter(|a| a.structure_id == id)
            .map(|a| a.id)
            .collect();
        state.audience_zones.retain(|z| !area_ids.contains(&z.area_id));
        state.structure_areas.retain(|a| a.structure_id != id);
        state.events.retain(|e| e.structure_id != id);
        state.team_members.retain(|m| m.structure_id != id);
        for favorites in state.user_favorites.values_mut() {
            favorites.retain(|sid| *sid != id);
        }
        for u in state.users.iter_mut() {
            if u.structure_id == Some(id) {
                u.structure_id = None;
                u.role = UserRole::Spectator;
            }
        }
        state.structure_importance.remove(&id);
        state.structures.retain(|s| s.id != id);

        self.persist(&state)?;
        tracing::info!(structure_id = id, "Structure deleted with all dependents");
        Ok(())
    }

    async fn upload_gallery_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<String> {
        self.simulate("structure.upload_gallery").await;
        let user = self.current_user().await?;
        require_admin(&user, id)?;

        if filename.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "A file name is required").into(),
            );
        }
        if bytes.is_empty() {
            return Err(
                AppError::with_message(ErrorCode::ValidationFailed, "Uploaded file is empty")
                    .into(),
            );
        }

        let mut state = self.state.write().await;
        let structure = state
            .structures
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| structure_not_found(id))?;

        // Unique object key, the way the real storage backend names uploads
        let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin");
        let url = format!(
            "https://cdn.estrade.dev/structures/{}/{}.{}",
            id,
            uuid::Uuid::new_v4(),
            extension
        );
        structure.gallery_urls.push(url.clone());
        structure.updated_at = Utc::now();
        self.persist(&state)?;
        Ok(url)
    }
}
