//! Area and audience zone template operations

use crate::api::require_area_manager;
use crate::store::MockBackend;
use async_trait::async_trait;
use estrade_client::api::AreaApi;
use estrade_client::error::ClientResult;
use shared::models::{
    AreaCreate, AreaUpdate, AudienceZoneTemplate, AudienceZoneTemplateCreate,
    AudienceZoneTemplateUpdate, StructureArea,
};
use shared::{AppError, ErrorCode};

fn area_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::AreaNotFound, format!("Area {} not found", id))
}

fn zone_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ZoneTemplateNotFound,
        format!("Audience zone template {} not found", id),
    )
}

fn capacity_exceeds_area(zone_capacity: i32, area_capacity: i32) -> AppError {
    AppError::with_message(
        ErrorCode::ZoneCapacityExceedsArea,
        format!(
            "Zone capacity {} exceeds area capacity {}",
            zone_capacity, area_capacity
        ),
    )
}

fn require_positive_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Capacity must be greater than zero",
        ));
    }
    Ok(())
}

#[async_trait]
impl AreaApi for MockBackend {
    async fn list(&self, structure_id: i64) -> ClientResult<Vec<StructureArea>> {
        self.simulate("area.list").await;

        let state = self.state.read().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }
        Ok(state.areas_of(structure_id))
    }

    async fn create(&self, structure_id: i64, req: &AreaCreate) -> ClientResult<StructureArea> {
        self.simulate("area.create").await;
        let user = self.current_user().await?;
        require_area_manager(&user, structure_id)?;

        if req.name.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Area name is required").into(),
            );
        }
        require_positive_capacity(req.max_capacity)?;

        let mut state = self.state.write().await;
        if state.structure_by_id(structure_id).is_none() {
            return Err(AppError::with_message(
                ErrorCode::StructureNotFound,
                format!("Structure {} not found", structure_id),
            )
            .into());
        }
        if state
            .structure_areas
            .iter()
            .any(|a| a.structure_id == structure_id && a.name.eq_ignore_ascii_case(req.name.trim()))
        {
            return Err(AppError::with_message(
                ErrorCode::AreaNameExists,
                format!("An area named \"{}\" already exists", req.name.trim()),
            )
            .into());
        }

        let area = StructureArea {
            id: state.alloc_id(),
            structure_id,
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            max_capacity: req.max_capacity,
            is_active: true,
            audience_zone_templates: None,
        };
        state.structure_areas.push(area.clone());
        self.persist(&state)?;
        Ok(area)
    }

    async fn update(&self, area_id: i64, req: &AreaUpdate) -> ClientResult<StructureArea> {
        self.simulate("area.update").await;
        let user = self.current_user().await?;

        let mut state = self.state.write().await;
        let (structure_id, largest_zone) = {
            let area = state.area_by_id(area_id).ok_or_else(|| area_not_found(area_id))?;
            let largest = state
                .audience_zones
                .iter()
                .filter(|z| z.area_id == area_id)
                .map(|z| z.max_capacity)
                .max()
                .unwrap_or(0);
            (area.structure_id, largest)
        };
        require_area_manager(&user, structure_id)?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(
                    AppError::with_message(ErrorCode::RequiredField, "Area name is required")
                        .into(),
                );
            }
            if state.structure_areas.iter().any(|a| {
                a.structure_id == structure_id
                    && a.id != area_id
                    && a.name.eq_ignore_ascii_case(name.trim())
            }) {
                return Err(AppError::with_message(
                    ErrorCode::AreaNameExists,
                    format!("An area named \"{}\" already exists", name.trim()),
                )
                .into());
            }
        }
        if let Some(capacity) = req.max_capacity {
            require_positive_capacity(capacity)?;
            // An area can never shrink below its largest zone template
            if capacity < largest_zone {
                return Err(capacity_exceeds_area(largest_zone, capacity).into());
            }
        }

        let area = state
            .structure_areas
            .iter_mut()
            .find(|a| a.id == area_id)
            .ok_or_else(|| area_not_found(area_id))?;
        if let Some(name) = &req.name {
            area.name = name.trim().to_string();
        }
        if let Some(description) = &req.description {
            area.description = Some(description.clone());
        }
        if let Some(capacity) = req.max_capacity {
            area.max_capacity = capacity;
        }
        if let Some(is_active) = req.is_active {
            area.is_active = is_active;
        }

        let updated = area.clone();
        self.persist(&state)?;
        Ok(updated)
    }

    async fn delete(&self, area_id: i64) -> ClientResult<()> {
        self.simulate("area.delete").await;
        let user = self.current_user().await?;

        let mut state = self.state.write().await;
        let structure_id = state
            .area_by_id(area_id)
            .map(|a| a.structure_id)
            .ok_or_else(|| area_not_found(area_id))?;
        require_area_manager(&user, structure_id)?;

        state.audience_zones.retain(|z| z.area_id != area_id);
        state.structure_areas.retain(|a| a.id != area_id);
        self.persist(&state)?;
        Ok(())
    }

    async fn templates(&self, area_id: i64) -> ClientResult<Vec<AudienceZoneTemplate>> {
        self.simulate("zone.list").await;

        let state = self.state.read().await;
        if state.area_by_id(area_id).is_none() {
            return Err(area_not_found(area_id).into());
        }
        Ok(state.zones_of(area_id))
    }

    async fn create_template(
        &self,
        area_id: i64,
        req: &AudienceZoneTemplateCreate,
    ) -> ClientResult<AudienceZoneTemplate> {
        self.simulate("zone.create").await;
        let user = self.current_user().await?;

        if req.name.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Zone name is required").into(),
            );
        }
        require_positive_capacity(req.max_capacity)?;

        let mut state = self.state.write().await;
        let (structure_id, area_capacity) = state
            .area_by_id(area_id)
            .map(|a| (a.structure_id, a.max_capacity))
            .ok_or_else(|| area_not_found(area_id))?;
        require_area_manager(&user, structure_id)?;

        if req.max_capacity > area_capacity {
            return Err(capacity_exceeds_area(req.max_capacity, area_capacity).into());
        }

        let zone = AudienceZoneTemplate {
            id: state.alloc_id(),
            area_id,
            name: req.name.trim().to_string(),
            max_capacity: req.max_capacity,
            seating_type: req.seating_type,
            is_active: true,
        };
        state.audience_zones.push(zone.clone());
        self.persist(&state)?;
        Ok(zone)
    }

    async fn update_template(
        &self,
        template_id: i64,
        req: &AudienceZoneTemplateUpdate,
    ) -> ClientResult<AudienceZoneTemplate> {
        self.simulate("zone.update").await;
        let user = self.current_user().await?;

        let mut state = self.state.write().await;
        let area_id = state
            .zone_by_id(template_id)
            .map(|z| z.area_id)
            .ok_or_else(|| zone_not_found(template_id))?;
        let (structure_id, area_capacity) = state
            .area_by_id(area_id)
            .map(|a| (a.structure_id, a.max_capacity))
            .ok_or_else(|| area_not_found(area_id))?;
        require_area_manager(&user, structure_id)?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(
                    AppError::with_message(ErrorCode::RequiredField, "Zone name is required")
                        .into(),
                );
            }
        }
        if let Some(capacity) = req.max_capacity {
            require_positive_capacity(capacity)?;
            if capacity > area_capacity {
                return Err(capacity_exceeds_area(capacity, area_capacity).into());
            }
        }

        let zone = state
            .audience_zones
            .iter_mut()
            .find(|z| z.id == template_id)
            .ok_or_else(|| zone_not_found(template_id))?;
        if let Some(name) = &req.name {
            zone.name = name.trim().to_string();
        }
        if let Some(capacity) = req.max_capacity {
            zone.max_capacity = capacity;
        }
        if let Some(seating_type) = req.seating_type {
            zone.seating_type = seating_type;
        }
        if let Some(is_active) = req.is_active {
            zone.is_active = is_active;
        }

        let updated = zone.clone();
        self.persist(&state)?;
        Ok(updated)
    }

    async fn delete_template(&self, template_id: i64) -> ClientResult<()> {
        self.simulate("zone.delete").await;
        let user = self.current_user().await?;

        let mut state = self.state.write().await;
        let area_id = state
            .zone_by_id(template_id)
            .map(|z| z.area_id)
            .ok_or_else(|| zone_not_found(template_id))?;
        let structure_id = state
            .area_by_id(area_id)
            .map(|a| a.structure_id)
            .ok_or_else(|| area_not_found(area_id))?;
        require_area_manager(&user, structure_id)?;

        state.audience_zones.retain(|z| z.id != template_id);
        self.persist(&state)?;
        Ok(())
    }
}
